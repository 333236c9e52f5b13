use bytes::BytesMut;
use keel_core::Value;
use rust_decimal::Decimal;
use std::{error::Error, io::Read};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use tokio_postgres::types::{FromSql, IsNull, ToSql, Type, to_sql_checked};
use uuid::Uuid;

/// Bridge between [`Value`] and the typed Postgres codecs, in both directions.
#[derive(Debug)]
pub(crate) struct ValueHolder(pub(crate) Value);

impl From<Value> for ValueHolder {
    fn from(value: Value) -> Self {
        ValueHolder(value)
    }
}

impl<'a> FromSql<'a> for ValueHolder {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Self::from_sql_nullable(ty, Some(raw))
    }
    fn from_sql_null(ty: &Type) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Self::from_sql_nullable(ty, None)
    }
    fn from_sql_nullable(
        ty: &Type,
        raw: Option<&'a [u8]>,
    ) -> Result<Self, Box<dyn Error + Sync + Send>> {
        macro_rules! to_value {
            ($ty_var:ident, $raw:ident, $($($ty:path)|+ => ($value:path, $source:ty),)+) => {
                match *$ty_var {
                    $($($ty)|+ => $value(match $raw {
                        Some($raw) => Some(<$source>::from_sql($ty_var, $raw)?.into()),
                        None => None,
                    }),)+
                    _ => {
                        if let Some(mut raw) = $raw {
                            let mut buf = String::new();
                            let _ = raw.read_to_string(&mut buf);
                            return Err(keel_core::Error::msg(format!(
                                "Cannot decode sql type: `{}`, value: `{}`",
                                $ty_var, buf
                            ))
                            .into());
                        }
                        Value::Null
                    }
                }
            };
        }
        let value = to_value!(ty, raw,
            Type::BOOL => (Value::Boolean, bool),
            Type::INT2 => (Value::Int16, i16),
            Type::INT4 => (Value::Int32, i32),
            Type::INT8 => (Value::Int64, i64),
            Type::FLOAT4 => (Value::Float32, f32),
            Type::FLOAT8 => (Value::Float64, f64),
            Type::NUMERIC => (Value::Decimal, Decimal),
            Type::VARCHAR | Type::TEXT | Type::NAME | Type::BPCHAR => (Value::Varchar, String),
            Type::BYTEA => (Value::Blob, Vec<u8>),
            Type::DATE => (Value::Date, Date),
            Type::TIME => (Value::Time, Time),
            Type::TIMESTAMP => (Value::Timestamp, PrimitiveDateTime),
            Type::TIMESTAMPTZ => (Value::TimestampWithTimezone, OffsetDateTime),
            Type::UUID => (Value::Uuid, Uuid),
        );
        Ok(value.into())
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

/// Bind an integer to the width the server chose for the parameter.
fn integer_to_sql(
    value: Option<i64>,
    ty: &Type,
    out: &mut BytesMut,
) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    match *ty {
        Type::INT2 => value
            .map(i16::try_from)
            .transpose()?
            .to_sql_checked(ty, out),
        Type::INT4 => value
            .map(i32::try_from)
            .transpose()?
            .to_sql_checked(ty, out),
        Type::NUMERIC => value.map(Decimal::from).to_sql_checked(ty, out),
        _ => value.to_sql_checked(ty, out),
    }
}

/// Bind a double to a `REAL` parameter, rounding to the nearest `f32`.
fn double_to_real(
    value: Option<f64>,
    ty: &Type,
    out: &mut BytesMut,
) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    let value = value
        .map(|v| match v as f32 {
            r if r.is_infinite() && v.is_finite() => {
                Err(format!("Value {} is out of range for REAL", v))
            }
            r => Ok(r),
        })
        .transpose()?;
    value.to_sql_checked(ty, out)
}

impl ToSql for ValueHolder {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>>
    where
        Self: Sized,
    {
        match &self.0 {
            Value::Null => Ok(IsNull::Yes),
            Value::Boolean(v) => v.to_sql_checked(ty, out),
            Value::Int16(v) => integer_to_sql(v.map(i64::from), ty, out),
            Value::Int32(v) => integer_to_sql(v.map(i64::from), ty, out),
            Value::Int64(v) => integer_to_sql(*v, ty, out),
            Value::Float32(v) if *ty == Type::FLOAT8 => v.map(f64::from).to_sql_checked(ty, out),
            Value::Float32(v) => v.to_sql_checked(ty, out),
            Value::Float64(v) if *ty == Type::FLOAT4 => double_to_real(*v, ty, out),
            Value::Float64(v) => v.to_sql_checked(ty, out),
            Value::Decimal(v) => v.to_sql_checked(ty, out),
            Value::Varchar(v) => v.to_sql_checked(ty, out),
            Value::Blob(v) => v.as_deref().to_sql_checked(ty, out),
            Value::Date(v) => v.to_sql_checked(ty, out),
            Value::Time(v) => v.to_sql_checked(ty, out),
            Value::Timestamp(v) => v.to_sql_checked(ty, out),
            Value::TimestampWithTimezone(v) => v.to_sql_checked(ty, out),
            Value::Uuid(v) => v.to_sql_checked(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool
    where
        Self: Sized,
    {
        true
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::ValueHolder;
    use bytes::BytesMut;
    use keel_core::Value;
    use tokio_postgres::types::{IsNull, ToSql, Type};

    fn bind(value: Value, ty: &Type) -> Option<BytesMut> {
        let mut out = BytesMut::new();
        match ValueHolder(value).to_sql_checked(ty, &mut out) {
            Ok(IsNull::No) => Some(out),
            Ok(IsNull::Yes) => Some(BytesMut::new()),
            Err(..) => None,
        }
    }

    #[test]
    fn floats_follow_the_parameter_type() {
        let real = bind(Value::Float64(Some(1.5)), &Type::FLOAT4).expect("Should narrow");
        assert_eq!(&real[..], 1.5f32.to_be_bytes());
        let double = bind(Value::Float32(Some(1.5)), &Type::FLOAT8).expect("Should widen");
        assert_eq!(&double[..], 1.5f64.to_be_bytes());
        assert!(bind(Value::Float64(Some(1e300)), &Type::FLOAT4).is_none());
        assert!(bind(Value::Float64(None), &Type::FLOAT4).is_some());
    }

    #[test]
    fn integers_follow_the_parameter_type() {
        let small = bind(Value::Int64(Some(7)), &Type::INT2).expect("Should narrow");
        assert_eq!(&small[..], 7i16.to_be_bytes());
        assert!(bind(Value::Int64(Some(70000)), &Type::INT2).is_none());
    }
}
