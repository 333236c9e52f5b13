use crate::{AsValue, ErrorContext, Failure, Field, Result, Value};
use std::{borrow::Cow, collections::HashSet, fmt};

type Getter<R> = Box<dyn Fn(&R) -> Value + Send + Sync>;
type Setter<R> = Box<dyn Fn(&mut R, Value) -> Result<()> + Send + Sync>;
type Check = Box<dyn Fn(&Value) -> Result<()> + Send + Sync>;

/// Mapping of one record field to one column, through a typed accessor pair.
pub struct ColumnSchema<R> {
    /// Storage-side column name.
    pub name: Cow<'static, str>,
    /// Type prototype of the column.
    pub ty: Value,
    /// Whether this column identifies the row.
    pub primary_key: bool,
    get: Getter<R>,
    set: Setter<R>,
    check: Check,
}

impl<R> ColumnSchema<R> {
    /// Read the field out of `record`.
    pub fn read(&self, record: &R) -> Field {
        Field {
            name: self.name.clone(),
            ty: self.ty.clone(),
            value: (self.get)(record),
        }
    }

    /// Assign `value` to the field of `record`.
    pub fn write(&self, record: &mut R, value: Value) -> Result<()> {
        (self.set)(record, value)
            .with_context(|| format!("While writing the column `{}`", self.name))
    }

    /// Whether `value` can be written into this column.
    pub fn check(&self, value: &Value) -> Result<()> {
        (self.check)(value).with_context(|| format!("While writing the column `{}`", self.name))
    }

    /// An empty descriptor of this column.
    pub fn field(&self) -> Field {
        Field::empty(self.name.clone(), self.ty.clone())
    }
}

impl<R> fmt::Debug for ColumnSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSchema")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("primary_key", &self.primary_key)
            .field("get", &"..")
            .field("set", &"..")
            .field("check", &"..")
            .finish()
    }
}

/// Table name, descriptors and primary key position extracted from one record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordMetadata {
    pub table: Cow<'static, str>,
    pub fields: Vec<Field>,
    pub primary_key: usize,
}

impl RecordMetadata {
    pub fn primary_key(&self) -> &Field {
        &self.fields[self.primary_key]
    }
}

/// Explicit description of how a record type maps to a table.
///
/// Built once per record type (usually by `#[derive(Record)]`) and cached, the descriptor
/// order is the column declaration order.
///
/// ```rust
/// use keel_core::{Schema, Value};
///
/// #[derive(Default)]
/// struct Person {
///     id: i64,
///     name: String,
/// }
///
/// let schema = Schema::<Person>::builder("people")
///     .primary_key("id", |r: &Person| r.id, |r: &mut Person, v| r.id = v)
///     .column("name", |r: &Person| r.name.clone(), |r: &mut Person, v| r.name = v)
///     .build()
///     .unwrap();
/// let metadata = schema.metadata(&Person { id: 0, name: "John".into() });
/// assert_eq!(metadata.table, "people");
/// assert_eq!(metadata.primary_key().value, Value::Int64(Some(0)));
/// ```
pub struct Schema<R> {
    table: Cow<'static, str>,
    columns: Vec<ColumnSchema<R>>,
    primary_key: usize,
}

impl<R: 'static> Schema<R> {
    pub fn builder(table: impl Into<Cow<'static, str>>) -> SchemaBuilder<R> {
        SchemaBuilder {
            table: table.into(),
            columns: Vec::new(),
        }
    }
}

impl<R> Schema<R> {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[ColumnSchema<R>] {
        &self.columns
    }

    pub fn primary_key_column(&self) -> &ColumnSchema<R> {
        &self.columns[self.primary_key]
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSchema<R>> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Empty descriptors, used when the record only serves as a type template.
    pub fn fields(&self) -> Vec<Field> {
        self.columns.iter().map(ColumnSchema::field).collect()
    }

    /// Extract the metadata and current values of `record`.
    pub fn metadata(&self, record: &R) -> RecordMetadata {
        RecordMetadata {
            table: self.table.clone(),
            fields: self.columns.iter().map(|c| c.read(record)).collect(),
            primary_key: self.primary_key,
        }
    }

    /// Descriptor of the primary key holding `id`.
    pub fn key_field(&self, id: Value) -> Result<Field> {
        let column = self.primary_key_column();
        Field::new(column.name.clone(), column.ty.clone(), id)
            .with_context(|| format!("While looking up a row of `{}` by key", self.table))
    }

    /// Assign the descriptors to the fields of `record` with the same storage name.
    ///
    /// Descriptors that do not match any column are ignored. Every value is checked before the
    /// first assignment, on error `record` is left untouched.
    pub fn apply(&self, record: &mut R, fields: impl IntoIterator<Item = Field>) -> Result<()> {
        let assigned: Vec<_> = fields
            .into_iter()
            .filter_map(|f| self.column(&f.name).map(|c| (c, f.value)))
            .collect();
        for (column, value) in &assigned {
            column.check(value)?;
        }
        for (column, value) in assigned {
            column.write(record, value)?;
        }
        Ok(())
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("table", &self.table)
            .field("columns", &self.columns)
            .field("primary_key", &self.primary_key)
            .finish()
    }
}

pub struct SchemaBuilder<R> {
    table: Cow<'static, str>,
    columns: Vec<ColumnSchema<R>>,
}

impl<R: 'static> SchemaBuilder<R> {
    pub fn column<T: AsValue + 'static>(
        self,
        name: impl Into<Cow<'static, str>>,
        get: fn(&R) -> T,
        set: fn(&mut R, T),
    ) -> Self {
        self.push(name.into(), false, get, set)
    }

    pub fn primary_key<T: AsValue + 'static>(
        self,
        name: impl Into<Cow<'static, str>>,
        get: fn(&R) -> T,
        set: fn(&mut R, T),
    ) -> Self {
        self.push(name.into(), true, get, set)
    }

    fn push<T: AsValue + 'static>(
        mut self,
        name: Cow<'static, str>,
        primary_key: bool,
        get: fn(&R) -> T,
        set: fn(&mut R, T),
    ) -> Self {
        self.columns.push(ColumnSchema {
            name,
            ty: T::as_empty_value(),
            primary_key,
            get: Box::new(move |record| get(record).as_value()),
            set: Box::new(move |record, value| {
                set(record, T::try_from_value(value)?);
                Ok(())
            }),
            check: Box::new(|value: &Value| T::try_from_value(value.clone()).map(drop)),
        });
        self
    }

    /// Validate the description: a table name, unique non empty column names and exactly one
    /// primary key.
    pub fn build(self) -> std::result::Result<Schema<R>, Failure> {
        if self.table.trim().is_empty() {
            return Err(Failure::configuration("The table name is missing"));
        }
        let mut names = HashSet::new();
        for column in &self.columns {
            if column.name.trim().is_empty() {
                return Err(Failure::configuration(format!(
                    "Table `{}` has a column without a name",
                    self.table
                )));
            }
            if !names.insert(&column.name) {
                return Err(Failure::configuration(format!(
                    "Column `{}` appears more than once in table `{}`",
                    column.name, self.table
                )));
            }
        }
        let mut keys = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.primary_key)
            .map(|(i, _)| i);
        let Some(primary_key) = keys.next() else {
            return Err(Failure::configuration(format!(
                "Table `{}` does not declare a primary key",
                self.table
            )));
        };
        if keys.next().is_some() {
            return Err(Failure::configuration(format!(
                "Table `{}` declares more than one primary key",
                self.table
            )));
        }
        Ok(Schema {
            table: self.table,
            columns: self.columns,
            primary_key,
        })
    }
}
