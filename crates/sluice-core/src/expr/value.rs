use super::Type;

use indexmap::IndexMap;

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Binary value
    Bytes(Vec<u8>),

    /// Value of an enumerated type
    Enum(ValueEnum),

    F32(f32),

    F64(f64),

    I16(i16),

    I32(i32),

    I64(i64),

    /// A list of values of the same type
    List(Vec<Value>),

    /// Null value
    #[default]
    Null,

    /// A handle to the rows of a mapped entity. The mapping decides which
    /// table backs it.
    Queryable(String),

    /// Named fields, such as the variables captured by a closure
    Record(ValueRecord),

    String(String),

    Uuid(uuid::Uuid),
}

/// A variant of a named enumeration, e.g. `SortOrder::Descending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEnum {
    pub ty: String,
    pub variant: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValueRecord {
    pub fields: IndexMap<String, Value>,
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn enumeration(ty: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::Enum(ValueEnum {
            ty: ty.into(),
            variant: variant.into(),
        })
    }

    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::Record(ValueRecord {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&ValueEnum> {
        match self {
            Self::Enum(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&ValueRecord> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    /// A field of a record value. `None` for any other value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_record()?.get(name)
    }

    /// Integer view of the value, if it holds an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I16(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    /// Floating point view of any numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F32(v) => Some(v.into()),
            Self::F64(v) => Some(v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    /// Infers the type of the value. Null infers as a nullable object.
    pub fn infer_ty(&self) -> Type {
        match self {
            Self::Bool(_) => Type::Bool,
            Self::Bytes(_) => Type::Bytes,
            Self::Enum(v) => Type::Enum(v.ty.clone()),
            Self::F32(_) => Type::F32,
            Self::F64(_) => Type::F64,
            Self::I16(_) => Type::I16,
            Self::I32(_) => Type::I32,
            Self::I64(_) => Type::I64,
            Self::List(items) => Type::array(
                items
                    .first()
                    .map(Value::infer_ty)
                    .unwrap_or(Type::Object),
            ),
            Self::Null => Type::nullable(Type::Object),
            Self::Queryable(entity) => Type::queryable(entity.clone()),
            Self::Record(_) => Type::Object,
            Self::String(_) => Type::String,
            Self::Uuid(_) => Type::Uuid,
        }
    }
}

impl ValueRecord {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i16> for Value {
    fn from(src: i16) -> Self {
        Self::I16(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f32> for Value {
    fn from(src: f32) -> Self {
        Self::F32(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(src: uuid::Uuid) -> Self {
        Self::Uuid(src)
    }
}

impl From<ValueEnum> for Value {
    fn from(src: ValueEnum) -> Self {
        Self::Enum(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
