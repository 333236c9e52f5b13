#[cfg(test)]
mod tests {
    use indoc::indoc;
    use keel_core::{Field, GenericSqlWriter, QueryContext, SqlWriter, Value};

    const WRITER: GenericSqlWriter = GenericSqlWriter::new();

    fn fields() -> Vec<Field> {
        vec![
            Field::empty("id", Value::Int64(None)),
            Field::empty("name", Value::Varchar(None)),
            Field::empty("age", Value::Int32(None)),
        ]
    }

    fn key() -> Field {
        Field::new("id", Value::Int64(None), 42i64.into()).unwrap()
    }

    #[test]
    fn select_all() {
        let mut out = String::new();
        WRITER.write_select(&mut out, "people", &fields(), None, &QueryContext::new());
        assert_eq!(
            out,
            indoc! {r#"
                SELECT "id", "name", "age"
                FROM "people"
            "#}
            .trim()
        );
    }

    #[test]
    fn select_with_context() {
        let mut out = String::new();
        let context = QueryContext::new()
            .with_skip(2)
            .with_limit(5)
            .with_order("o")
            .with_group("g");
        WRITER.write_select(&mut out, "people", &fields(), Some("age < ?"), &context);
        assert_eq!(
            out,
            indoc! {r#"
                SELECT "id", "name", "age"
                FROM "people"
                WHERE age < ?
                GROUP BY g
                ORDER BY o
                LIMIT 5
                OFFSET 2
            "#}
            .trim()
        );
    }

    #[test]
    fn select_omits_unset_clauses() {
        let mut out = String::new();
        let context = QueryContext::new().with_order("age DESC").with_skip(3);
        WRITER.write_select(&mut out, "people", &fields(), Some("  "), &context);
        assert_eq!(
            out,
            indoc! {r#"
                SELECT "id", "name", "age"
                FROM "people"
                ORDER BY age DESC
                OFFSET 3
            "#}
            .trim()
        );
    }

    #[test]
    fn select_by_key() {
        let mut out = String::new();
        WRITER.write_select_by_key(&mut out, "app.people", &fields(), &key());
        assert_eq!(
            out,
            indoc! {r#"
                SELECT "id", "name", "age"
                FROM "app"."people"
                WHERE "id" = ?
                LIMIT 1
            "#}
            .trim()
        );
    }

    #[test]
    fn insert() {
        let mut out = String::new();
        WRITER.write_insert(&mut out, "people", &fields(), &key());
        assert_eq!(
            out,
            indoc! {r#"
                INSERT INTO "people" ("name", "age")
                VALUES (?, ?)
                RETURNING "id"
            "#}
            .trim()
        );
    }

    #[test]
    fn insert_only_key() {
        let mut out = String::new();
        WRITER.write_insert(&mut out, "counters", &[key()], &key());
        assert_eq!(
            out,
            indoc! {r#"
                INSERT INTO "counters" DEFAULT VALUES
                RETURNING "id"
            "#}
            .trim()
        );
    }

    #[test]
    fn update() {
        let mut out = String::new();
        WRITER.write_update(&mut out, "people", &fields(), &key());
        assert_eq!(
            out,
            indoc! {r#"
                UPDATE "people"
                SET "name" = ?, "age" = ?
                WHERE "id" = ?
            "#}
            .trim()
        );
    }

    #[test]
    fn delete() {
        let mut out = String::new();
        WRITER.write_delete(&mut out, "people", &key());
        assert_eq!(out, "DELETE FROM \"people\"\nWHERE \"id\" = ?");
    }

    #[test]
    fn quoted_identifiers() {
        let mut out = String::new();
        WRITER.write_identifier_quoted(&mut out, r#"my "odd" column"#);
        assert_eq!(out, r#""my ""odd"" column""#);
    }
}
