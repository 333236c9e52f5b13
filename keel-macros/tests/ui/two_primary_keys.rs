#![allow(dead_code)]

use keel::Record;

#[derive(Record)]
#[keel(table = "people")]
struct Person {
    #[keel(column = "id", primary_key)]
    id: i64,
    #[keel(column = "code", primary_key)]
    code: String,
}

fn main() {}
