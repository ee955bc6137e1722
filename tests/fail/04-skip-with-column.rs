use rowscan::Record;

#[derive(Record, Default)]
pub struct Session {
    id: i64,
    #[record(skip, column = "token")]
    token: String,
}

fn main() {}
