#![allow(dead_code)]

use keel::Record;

#[derive(Record)]
#[keel(table = "people")]
struct Person {
    #[keel(column = "id", primary_key, unique)]
    id: i64,
}

fn main() {}
