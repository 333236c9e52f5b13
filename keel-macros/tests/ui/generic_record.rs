#![allow(dead_code)]

use keel::Record;

#[derive(Record)]
#[keel(table = "wrappers")]
struct Wrapper<T> {
    #[keel(column = "id", primary_key)]
    id: i64,
    value: T,
}

fn main() {}
