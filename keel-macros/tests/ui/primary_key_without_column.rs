#![allow(dead_code)]

use keel::Record;

#[derive(Record)]
#[keel(table = "people")]
struct Person {
    #[keel(primary_key)]
    id: i64,
}

fn main() {}
