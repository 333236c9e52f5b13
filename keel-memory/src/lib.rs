mod driver;
mod order;

pub use driver::*;
