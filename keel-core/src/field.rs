use crate::{ErrorContext, Result, Value};
use std::borrow::Cow;

/// One mapped column of a record: storage name, type prototype and current value.
///
/// Descriptors are plain values, every conversion produces fresh ones so the caller record and
/// the driver working set never alias.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Storage-side column name.
    pub name: Cow<'static, str>,
    /// Type prototype, always a `NULL` of the column type.
    pub ty: Value,
    /// Current value, always of the same type as `ty` (or `Value::Null`).
    pub value: Value,
}

impl Field {
    /// Create a descriptor converting `value` into the type of `ty`.
    pub fn new(name: impl Into<Cow<'static, str>>, ty: Value, value: Value) -> Result<Self> {
        let name = name.into();
        let ty = ty.as_empty();
        let value = value
            .convert_to(&ty)
            .with_context(|| format!("While assigning the column `{}`", name))?;
        Ok(Self { name, ty, value })
    }

    /// A descriptor with no value (the `NULL` of its type).
    pub fn empty(name: impl Into<Cow<'static, str>>, ty: Value) -> Self {
        let ty = ty.as_empty();
        Self {
            name: name.into(),
            value: ty.clone(),
            ty,
        }
    }

    /// A copy of this descriptor holding `value`.
    pub fn with_value(&self, value: Value) -> Result<Self> {
        Self::new(self.name.clone(), self.ty.clone(), value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Find a descriptor by storage name.
pub fn find_field<'a>(fields: &'a [Field], name: &str) -> Option<&'a Field> {
    fields.iter().find(|f| f.name == name)
}

/// All descriptors except the one sharing the name of `key`.
pub fn fields_without<'a>(
    fields: &'a [Field],
    key: &'a Field,
) -> impl Iterator<Item = &'a Field> + Clone {
    fields.iter().filter(move |f| f.name != key.name)
}
