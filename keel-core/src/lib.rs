mod as_value;
mod context;
mod driver;
mod engine;
mod error;
mod field;
mod global;
mod record;
mod rows;
mod schema;
mod sql_writer;
mod util;
mod value;

pub use ::anyhow::Context as ErrorContext;
pub use as_value::*;
pub use context::*;
pub use driver::*;
pub use engine::*;
pub use error::*;
pub use field::*;
pub use global::*;
pub use record::*;
pub use rows::*;
pub use schema::*;
pub use sql_writer::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
