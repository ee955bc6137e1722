use rowscan::Record;

#[allow(non_snake_case)]
#[derive(Record, Debug, Default)]
pub struct Item {
    r#type: String,
    ForeignID: i64,
    #[record(column = "")]
    LastSeen: Option<i64>,
}

fn main() {
    let descriptor = Item::descriptor();
    assert_eq!(descriptor.resolve("type"), Some(0));
    assert_eq!(descriptor.resolve("foreign_id"), Some(1));
    assert_eq!(descriptor.resolve("last_seen"), Some(2));
}
