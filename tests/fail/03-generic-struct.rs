use rowscan::Record;

#[derive(Record, Default)]
pub struct Wrapper<T> {
    value: T,
}

fn main() {}
