#![allow(dead_code)]

use keel::Record;

#[derive(Record)]
struct Person {
    #[keel(column = "id", primary_key)]
    id: i64,
}

fn main() {}
