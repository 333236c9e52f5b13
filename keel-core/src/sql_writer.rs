use crate::{Field, QueryContext, fields_without, separated_by, write_integer};

/// Dialect printer turning table names and field descriptors into SQL text.
///
/// Values never appear in the text: every value is a positional placeholder and is bound by the
/// driver. Caller supplied clauses (where, order, group) are copied verbatim.
pub trait SqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter;

    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', "\"\"");
        out.push('"');
    }

    /// Render a table name, `schema.table` is quoted part by part.
    fn write_table_ref(&self, out: &mut String, table: &str) {
        separated_by(
            out,
            table.split('.'),
            |out, part| self.write_identifier_quoted(out, part),
            ".",
        );
    }

    /// Placeholder of the parameter at `index` (1 based).
    fn write_placeholder(&self, out: &mut String, _index: usize) {
        out.push('?');
    }

    fn write_column_list<'a>(&self, out: &mut String, fields: &mut dyn Iterator<Item = &'a Field>) {
        separated_by(
            out,
            fields,
            |out, f| self.write_identifier_quoted(out, &f.name),
            ", ",
        );
    }

    /// Render the context clauses in the order GROUP BY, ORDER BY, LIMIT, OFFSET.
    fn write_query_context(&self, out: &mut String, context: &QueryContext) {
        if !context.group().is_empty() {
            out.push_str("\nGROUP BY ");
            out.push_str(context.group());
        }
        if !context.order().is_empty() {
            out.push_str("\nORDER BY ");
            out.push_str(context.order());
        }
        if let Some(limit) = context.limit() {
            out.push_str("\nLIMIT ");
            write_integer(out, limit);
        }
        if let Some(skip) = context.skip() {
            out.push_str("\nOFFSET ");
            write_integer(out, skip);
        }
    }

    /// Emit SELECT statement (projection, FROM, optional WHERE, context clauses).
    ///
    /// A blank `condition` omits the WHERE clause, the caller must not bind arguments for it.
    fn write_select(
        &self,
        out: &mut String,
        table: &str,
        fields: &[Field],
        condition: Option<&str>,
        context: &QueryContext,
    ) {
        out.reserve(64 + fields.len() * 24);
        out.push_str("SELECT ");
        self.write_column_list(out, &mut fields.iter());
        out.push_str("\nFROM ");
        self.write_table_ref(out, table);
        if let Some(condition) = condition.filter(|v| !v.trim().is_empty()) {
            out.push_str("\nWHERE ");
            out.push_str(condition);
        }
        self.write_query_context(out, context);
    }

    /// Emit SELECT of the single row identified by the key, bound as parameter 1.
    fn write_select_by_key(&self, out: &mut String, table: &str, fields: &[Field], id: &Field) {
        let mut condition = String::with_capacity(id.name.len() + 8);
        self.write_identifier_quoted(&mut condition, &id.name);
        condition.push_str(" = ");
        self.write_placeholder(&mut condition, 1);
        self.write_select(
            out,
            table,
            fields,
            Some(condition.as_str()),
            &QueryContext::new().with_limit(1),
        );
    }

    /// Emit INSERT of the non key columns (parameters from 1) returning the key.
    fn write_insert(&self, out: &mut String, table: &str, fields: &[Field], id: &Field) {
        out.reserve(64 + fields.len() * 32);
        out.push_str("INSERT INTO ");
        self.write_table_ref(out, table);
        let columns = fields_without(fields, id);
        if columns.clone().next().is_none() {
            out.push_str(" DEFAULT VALUES");
        } else {
            out.push_str(" (");
            self.write_column_list(out, &mut columns.clone());
            out.push_str(")\nVALUES (");
            separated_by(
                out,
                columns.enumerate(),
                |out, (i, _)| self.write_placeholder(out, i + 1),
                ", ",
            );
            out.push(')');
        }
        out.push_str("\nRETURNING ");
        self.write_identifier_quoted(out, &id.name);
    }

    /// Emit UPDATE of the non key columns: the key is parameter 1, the columns follow from 2.
    fn write_update(&self, out: &mut String, table: &str, fields: &[Field], id: &Field) {
        out.reserve(64 + fields.len() * 32);
        out.push_str("UPDATE ");
        self.write_table_ref(out, table);
        out.push_str("\nSET ");
        separated_by(
            out,
            fields_without(fields, id).enumerate(),
            |out, (i, f)| {
                self.write_identifier_quoted(out, &f.name);
                out.push_str(" = ");
                self.write_placeholder(out, i + 2);
            },
            ", ",
        );
        out.push_str("\nWHERE ");
        self.write_identifier_quoted(out, &id.name);
        out.push_str(" = ");
        self.write_placeholder(out, 1);
    }

    /// Emit DELETE of the row identified by the key, bound as parameter 1.
    fn write_delete(&self, out: &mut String, table: &str, id: &Field) {
        out.push_str("DELETE FROM ");
        self.write_table_ref(out, table);
        out.push_str("\nWHERE ");
        self.write_identifier_quoted(out, &id.name);
        out.push_str(" = ");
        self.write_placeholder(out, 1);
    }
}

/// Fallback generic SQL writer, `?` placeholders.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self
    }
}

impl SqlWriter for GenericSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }
}
