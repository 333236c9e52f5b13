#[cfg(test)]
mod tests {
    use keel::{Field, Record, Value};
    use rust_decimal::Decimal;
    use std::sync::Mutex;
    use time::{Date, Month};
    use uuid::Uuid;

    #[derive(Record, Default, Debug)]
    #[keel(table = "sales.orders")]
    struct Order {
        #[keel(column = "customer")]
        customer: String,
        #[keel(column = "order_id", primary_key)]
        id: Uuid,
        #[keel(column = "total")]
        total: Option<Decimal>,
        #[keel(column = "placed")]
        placed: Option<Date>,
        #[keel(column = "lines")]
        lines: Box<i16>,
        _lock: Mutex<()>,
    }

    #[test]
    fn schema_from_annotations() {
        let schema = Order::schema().expect("The schema should be valid");
        assert_eq!(schema.table(), "sales.orders");
        let names: Vec<_> = schema.columns().iter().map(|c| &*c.name).collect();
        assert_eq!(names, ["customer", "order_id", "total", "placed", "lines"]);
        assert_eq!(schema.primary_key_column().name, "order_id");
        assert!(schema.columns()[1].primary_key);
        assert_eq!(
            schema.fields().iter().map(|f| f.ty.clone()).collect::<Vec<_>>(),
            [
                Value::Varchar(None),
                Value::Uuid(None),
                Value::Decimal(None),
                Value::Date(None),
                Value::Int16(None),
            ]
        );
        assert!(std::ptr::eq(schema, Order::schema().unwrap()), "The schema is cached");
    }

    #[test]
    fn metadata_is_a_copy() {
        let schema = Order::schema().unwrap();
        let placed = Date::from_calendar_date(2025, Month::March, 3).unwrap();
        let mut order = Order {
            customer: "ACME".into(),
            total: Some(Decimal::new(1999, 2)),
            placed: Some(placed),
            lines: Box::new(3),
            ..Default::default()
        };
        let metadata = schema.metadata(&order);
        assert_eq!(metadata.table, "sales.orders");
        assert_eq!(metadata.primary_key, 1);
        assert_eq!(metadata.primary_key().value, Value::Uuid(Some(Uuid::nil())));
        assert!(metadata.primary_key().value.is_zero());
        assert_eq!(metadata.fields[0].value, Value::Varchar(Some("ACME".into())));
        assert_eq!(metadata.fields[3].value, Value::Date(Some(placed)));

        order.customer = "Globex".into();
        assert_eq!(metadata.fields[0].value, Value::Varchar(Some("ACME".into())));
        let again = schema.metadata(&order);
        assert_eq!(again.primary_key, metadata.primary_key);
        assert_eq!(again.fields[0].value, Value::Varchar(Some("Globex".into())));
    }

    #[test]
    fn apply_by_storage_name() {
        let schema = Order::schema().unwrap();
        let mut order = Order::default();
        let id = Uuid::from_u128(0x1234);
        schema
            .apply(
                &mut order,
                [
                    Field::new("order_id", Value::Uuid(None), id.into()).unwrap(),
                    Field::new("lines", Value::Int16(None), Value::Int64(Some(7))).unwrap(),
                    Field::new("discount", Value::Int32(None), 5.into()).unwrap(),
                    Field::new("total", Value::Decimal(None), Value::Null).unwrap(),
                ],
            )
            .expect("Should assign the fields");
        assert_eq!(order.id, id);
        assert_eq!(*order.lines, 7);
        assert_eq!(order.total, None);
        assert_eq!(order.customer, "");
    }
}
