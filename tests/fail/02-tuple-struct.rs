use rowscan::Record;

#[derive(Record, Default)]
pub struct Pair(i64, String);

fn main() {}
