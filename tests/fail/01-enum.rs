use rowscan::Record;

#[derive(Record)]
pub enum Status {
    Draft,
    Published,
}

fn main() {}
