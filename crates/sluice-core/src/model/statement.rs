use super::{Delete, Insert, Select, Sync, Update};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    Sync(Box<Sync>),
}

impl Statement {
    pub fn name(&self) -> &'static str {
        match self {
            Statement::Select(_) => "SELECT",
            Statement::Insert(_) => "INSERT",
            Statement::Update(_) => "UPDATE",
            Statement::Delete(_) => "DELETE",
            Statement::Sync(_) => "SYNC",
        }
    }

    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Statement::Select(select) => Some(select),
            _ => None,
        }
    }
}

macro_rules! impl_from {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Statement {
                fn from(value: $ty) -> Self {
                    Statement::$ty(value)
                }
            }
        )*
    };
}

impl_from!(Select, Insert, Update, Delete);

impl From<Sync> for Statement {
    fn from(value: Sync) -> Self {
        Statement::Sync(Box::new(value))
    }
}
