mod people;
mod tags;
mod values;

use keel::Engine;
use log::LevelFilter;
use std::env;

pub use people::{AGE_AT_LEAST, AGE_BELOW, Person};
pub use tags::Tag;
pub use values::Sample;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run every scenario against the driver of `engine`.
///
/// The tables `people`, `samples` and `tags` must exist, the where clauses [`AGE_BELOW`] and
/// [`AGE_AT_LEAST`] must be understood by the driver.
pub async fn execute_tests(engine: &Engine) {
    people::people(engine).await;
    values::values(engine).await;
    tags::tags(engine).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
