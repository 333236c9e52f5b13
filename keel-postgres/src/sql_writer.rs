use keel_core::{SqlWriter, write_integer};

/// Postgres dialect: numbered `$n` placeholders.
#[derive(Default, Debug, Clone, Copy)]
pub struct PostgresSqlWriter;

impl PostgresSqlWriter {
    pub const fn new() -> Self {
        Self
    }
}

impl SqlWriter for PostgresSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_placeholder(&self, out: &mut String, index: usize) {
        out.push('$');
        write_integer(out, index);
    }
}
