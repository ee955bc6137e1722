use rowscan::Record;

#[derive(Record, Debug, Default)]
pub struct User {
    id: i64,
    #[record(column = "mail")]
    email: Option<String>,
    age: u8,
    #[record(skip)]
    session: Vec<String>,
}

#[derive(Record, Debug, Default)]
pub struct Empty {}

fn main() {
    assert_eq!(User::descriptor().len(), 3);
    assert!(Empty::descriptor().is_empty());
}
