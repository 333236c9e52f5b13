use keel_core::{Error, Field, Result, find_field};
use std::cmp::Ordering;

struct SortKey<'a> {
    column: &'a str,
    descending: bool,
}

/// Parse `col [ASC|DESC], ...`, column names may be double quoted.
fn parse(order: &str) -> Result<Vec<SortKey<'_>>> {
    order
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|part| {
            let mut words = part.split_whitespace();
            let column = words.next().unwrap_or_default().trim_matches('"');
            let descending = match words.next() {
                None => false,
                Some(v) if v.eq_ignore_ascii_case("asc") => false,
                Some(v) if v.eq_ignore_ascii_case("desc") => true,
                Some(v) => {
                    return Err(Error::msg(format!(
                        "Unexpected `{}` in the order clause `{}`, expected ASC or DESC",
                        v, order
                    )));
                }
            };
            if let Some(v) = words.next() {
                return Err(Error::msg(format!(
                    "Unexpected `{}` in the order clause `{}`",
                    v, order
                )));
            }
            Ok(SortKey { column, descending })
        })
        .collect()
}

/// Stable sort of the rows by the `order` clause, incomparable values keep their position.
pub(crate) fn sort_rows(rows: &mut [Vec<Field>], order: &str) -> Result<()> {
    let keys = parse(order)?;
    if let Some(row) = rows.first()
        && let Some(key) = keys.iter().find(|k| find_field(row, k.column).is_none())
    {
        return Err(Error::msg(format!(
            "Cannot order by the unknown column `{}`",
            key.column
        )));
    }
    rows.sort_by(|a, b| {
        for key in &keys {
            let (Some(a), Some(b)) = (find_field(a, key.column), find_field(b, key.column)) else {
                continue;
            };
            let ordering = a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal);
            let ordering = if key.descending {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::sort_rows;
    use keel_core::{Field, Value};

    fn row(name: &'static str, age: i32) -> Vec<Field> {
        vec![
            Field::new("name", Value::Varchar(None), name.into()).unwrap(),
            Field::new("age", Value::Int32(None), age.into()).unwrap(),
        ]
    }

    fn names(rows: &[Vec<Field>]) -> Vec<String> {
        rows.iter().map(|r| r[0].value.to_string()).collect()
    }

    #[test]
    fn multiple_keys() {
        let mut rows = vec![row("b", 2), row("a", 2), row("c", 1)];
        sort_rows(&mut rows, "age DESC, \"name\" asc").unwrap();
        assert_eq!(names(&rows), ["'a'", "'b'", "'c'"]);
        sort_rows(&mut rows, "age").unwrap();
        assert_eq!(names(&rows), ["'c'", "'a'", "'b'"]);
    }

    #[test]
    fn invalid_clauses() {
        let mut rows = vec![row("b", 2), row("a", 2)];
        assert!(sort_rows(&mut rows, "age SIDEWAYS").is_err());
        assert!(sort_rows(&mut rows, "height").is_err());
        assert!(sort_rows(&mut rows, "age DESC NULLS").is_err());
        assert!(sort_rows(&mut rows, "").is_ok());
    }
}
