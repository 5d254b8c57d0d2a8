use super::{Alias, Function};
use crate::expr::Value;

/// How to compute one scalar value of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Field(Field),
    Constant(Constant),
    Function(Box<Function>),

    /// Every column, `*`
    Wildcard,
}

/// A mapped property, or a key of the row's dynamic bag.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Property name. For dynamic keys, the name of the bag property.
    pub name: String,

    /// Key within the dynamic bag
    pub key: Option<String>,

    /// Table the field is read from. `None` reads from the innermost table in
    /// scope.
    pub table: Option<Alias>,
}

/// A literal value. Rendered as a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub value: Value,

    /// Column alias used when the constant is selected
    pub alias: Alias,
}

impl Projection {
    pub fn field(name: impl Into<String>) -> Projection {
        Projection::Field(Field {
            name: name.into(),
            key: None,
            table: None,
        })
    }

    /// A key of the dynamic bag property `bag`.
    pub fn dynamic(bag: impl Into<String>, key: impl Into<String>) -> Projection {
        Projection::Field(Field {
            name: bag.into(),
            key: Some(key.into()),
            table: None,
        })
    }

    pub fn constant(value: impl Into<Value>) -> Projection {
        Projection::Constant(Constant {
            value: value.into(),
            alias: Alias::next(),
        })
    }

    pub fn function(function: Function) -> Projection {
        Projection::Function(Box::new(function))
    }

    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Projection::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Projection::Constant(constant) => Some(constant),
            _ => None,
        }
    }

    pub fn is_null_constant(&self) -> bool {
        matches!(self, Projection::Constant(constant) if constant.value.is_null())
    }

    /// Reads every field of this projection from `table`.
    pub fn with_table(mut self, table: Alias) -> Projection {
        self.set_table(table);
        self
    }

    fn set_table(&mut self, table: Alias) {
        match self {
            Projection::Field(field) => field.table = Some(table),
            Projection::Function(function) => {
                for operand in function.operands_mut() {
                    operand.set_table(table);
                }
            }
            Projection::Constant(_) | Projection::Wildcard => {}
        }
    }
}

impl Field {
    pub fn is_dynamic(&self) -> bool {
        self.key.is_some()
    }
}

impl From<Field> for Projection {
    fn from(value: Field) -> Self {
        Projection::Field(value)
    }
}

impl From<Function> for Projection {
    fn from(value: Function) -> Self {
        Projection::function(value)
    }
}
