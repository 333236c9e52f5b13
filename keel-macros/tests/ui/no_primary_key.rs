#![allow(dead_code)]

use keel::Record;

#[derive(Record)]
#[keel(table = "people")]
struct Person {
    #[keel(column = "id")]
    id: i64,
    #[keel(column = "name")]
    name: String,
}

fn main() {}
