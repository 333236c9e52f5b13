use crate::{Error, Result};
use rust_decimal::Decimal;
use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    mem,
};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Dynamically typed column value.
///
/// The variant is the column type, the inner `Option` is the nullable wrapper: `None` stands for
/// SQL `NULL` of that type. A value with `None` inside is also used as the type prototype of a
/// column (see [`Value::as_empty`]).
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
}

macro_rules! for_each_variant {
    ($value:expr, $v:ident => $body:expr, Null => $null:expr $(,)?) => {
        match $value {
            Value::Null => $null,
            Value::Boolean($v) => $body,
            Value::Int16($v) => $body,
            Value::Int32($v) => $body,
            Value::Int64($v) => $body,
            Value::Float32($v) => $body,
            Value::Float64($v) => $body,
            Value::Decimal($v) => $body,
            Value::Varchar($v) => $body,
            Value::Blob($v) => $body,
            Value::Date($v) => $body,
            Value::Time($v) => $body,
            Value::Timestamp($v) => $body,
            Value::TimestampWithTimezone($v) => $body,
            Value::Uuid($v) => $body,
        }
    };
}

impl Value {
    pub fn same_type(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    /// The `NULL` value of the same type, used as the type prototype of a column.
    pub fn as_empty(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(..) => Value::Boolean(None),
            Value::Int16(..) => Value::Int16(None),
            Value::Int32(..) => Value::Int32(None),
            Value::Int64(..) => Value::Int64(None),
            Value::Float32(..) => Value::Float32(None),
            Value::Float64(..) => Value::Float64(None),
            Value::Decimal(..) => Value::Decimal(None),
            Value::Varchar(..) => Value::Varchar(None),
            Value::Blob(..) => Value::Blob(None),
            Value::Date(..) => Value::Date(None),
            Value::Time(..) => Value::Time(None),
            Value::Timestamp(..) => Value::Timestamp(None),
            Value::TimestampWithTimezone(..) => Value::TimestampWithTimezone(None),
            Value::Uuid(..) => Value::Uuid(None),
        }
    }

    pub fn is_null(&self) -> bool {
        for_each_variant!(self, v => v.is_none(), Null => true)
    }

    /// Whether this is the zero value of its type: `NULL`, `false`, numeric zero, empty text or
    /// blob, nil uuid. Temporal values are zero only when `NULL`.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none_or(|v| !v),
            Value::Int16(v) => v.is_none_or(|v| v == 0),
            Value::Int32(v) => v.is_none_or(|v| v == 0),
            Value::Int64(v) => v.is_none_or(|v| v == 0),
            Value::Float32(v) => v.is_none_or(|v| v == 0.0),
            Value::Float64(v) => v.is_none_or(|v| v == 0.0),
            Value::Decimal(v) => v.is_none_or(|v| v.is_zero()),
            Value::Varchar(v) => v.as_ref().is_none_or(String::is_empty),
            Value::Blob(v) => v.as_ref().is_none_or(|v| v.is_empty()),
            Value::Uuid(v) => v.is_none_or(|v| v.is_nil()),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::TimestampWithTimezone(v) => v.is_none(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Boolean(..) => "BOOLEAN",
            Value::Int16(..) => "SMALLINT",
            Value::Int32(..) => "INTEGER",
            Value::Int64(..) => "BIGINT",
            Value::Float32(..) => "REAL",
            Value::Float64(..) => "DOUBLE",
            Value::Decimal(..) => "DECIMAL",
            Value::Varchar(..) => "VARCHAR",
            Value::Blob(..) => "BLOB",
            Value::Date(..) => "DATE",
            Value::Time(..) => "TIME",
            Value::Timestamp(..) => "TIMESTAMP",
            Value::TimestampWithTimezone(..) => "TIMESTAMP WITH TIME ZONE",
            Value::Uuid(..) => "UUID",
        }
    }

    /// Convert into the type of `prototype`.
    ///
    /// Integers convert across widths when in range, `Value::Null` becomes the `NULL` of the
    /// prototype type. Any other combination must already have the same type.
    pub fn convert_to(self, prototype: &Value) -> Result<Value> {
        if self.same_type(prototype) || matches!(prototype, Value::Null) {
            return Ok(self);
        }
        if matches!(self, Value::Null) {
            return Ok(prototype.as_empty());
        }
        if let (Value::Float32(v), Value::Float64(..)) = (&self, prototype) {
            return Ok(Value::Float64(v.map(f64::from)));
        }
        let integer = match self {
            Value::Int16(v) => Some(v.map(i64::from)),
            Value::Int32(v) => Some(v.map(i64::from)),
            Value::Int64(v) => Some(v),
            _ => None,
        };
        let out_of_range = |v: i64| {
            Error::msg(format!(
                "Value {} is out of range for {}",
                v,
                prototype.type_name()
            ))
        };
        let converted = match (integer, prototype) {
            (Some(v), Value::Int16(..)) => Value::Int16(
                v.map(|v| i16::try_from(v).map_err(|_| out_of_range(v)))
                    .transpose()?,
            ),
            (Some(v), Value::Int32(..)) => Value::Int32(
                v.map(|v| i32::try_from(v).map_err(|_| out_of_range(v)))
                    .transpose()?,
            ),
            (Some(v), Value::Int64(..)) => Value::Int64(v),
            _ => {
                return Err(Error::msg(format!(
                    "Cannot convert {:?} to {}",
                    self,
                    prototype.type_name()
                )));
            }
        };
        Ok(converted)
    }
}

impl PartialOrd for Value {
    /// Values of different types are not comparable, `NULL` sorts first.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Boolean(l), Value::Boolean(r)) => l.partial_cmp(r),
            (Value::Int16(l), Value::Int16(r)) => l.partial_cmp(r),
            (Value::Int32(l), Value::Int32(r)) => l.partial_cmp(r),
            (Value::Int64(l), Value::Int64(r)) => l.partial_cmp(r),
            (Value::Float32(l), Value::Float32(r)) => l.partial_cmp(r),
            (Value::Float64(l), Value::Float64(r)) => l.partial_cmp(r),
            (Value::Decimal(l), Value::Decimal(r)) => l.partial_cmp(r),
            (Value::Varchar(l), Value::Varchar(r)) => l.partial_cmp(r),
            (Value::Blob(l), Value::Blob(r)) => l.partial_cmp(r),
            (Value::Date(l), Value::Date(r)) => l.partial_cmp(r),
            (Value::Time(l), Value::Time(r)) => l.partial_cmp(r),
            (Value::Timestamp(l), Value::Timestamp(r)) => l.partial_cmp(r),
            (Value::TimestampWithTimezone(l), Value::TimestampWithTimezone(r)) => {
                l.partial_cmp(r)
            }
            (Value::Uuid(l), Value::Uuid(r)) => l.partial_cmp(r),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("NULL");
        }
        match self {
            Value::Boolean(Some(v)) => write!(f, "{v}"),
            Value::Int16(Some(v)) => write!(f, "{v}"),
            Value::Int32(Some(v)) => write!(f, "{v}"),
            Value::Int64(Some(v)) => write!(f, "{v}"),
            Value::Float32(Some(v)) => write!(f, "{v}"),
            Value::Float64(Some(v)) => write!(f, "{v}"),
            Value::Decimal(Some(v)) => write!(f, "{v}"),
            Value::Varchar(Some(v)) => write!(f, "'{v}'"),
            Value::Blob(Some(v)) => write!(f, "<{} bytes>", v.len()),
            Value::Date(Some(v)) => write!(f, "{v}"),
            Value::Time(Some(v)) => write!(f, "{v}"),
            Value::Timestamp(Some(v)) => write!(f, "{v}"),
            Value::TimestampWithTimezone(Some(v)) => write!(f, "{v}"),
            Value::Uuid(Some(v)) => write!(f, "{v}"),
            _ => f.write_str("NULL"),
        }
    }
}
