use super::{Type, Value, ValueEnum};

/// Direction argument of ordered `Distinct` and `Duplicates`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Whether the fields listed in a `SyncWith` are the ones to copy or the ones
/// to leave alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncFields {
    Include,
    Exclude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
}

macro_rules! enum_value {
    ($ty:ident { $($variant:ident),* }) => {
        impl $ty {
            pub const NAME: &'static str = stringify!($ty);

            pub fn ty() -> Type {
                Type::enumeration(Self::NAME)
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }

            /// Reads the variant back from a constant value.
            pub fn from_value(value: &Value) -> Option<Self> {
                let ValueEnum { ty, variant } = value.as_enum()?;
                if ty != Self::NAME {
                    return None;
                }
                match variant.as_str() {
                    $(stringify!($variant) => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }

        impl From<$ty> for Value {
            fn from(src: $ty) -> Value {
                Value::enumeration($ty::NAME, src.name())
            }
        }
    };
}

enum_value!(SortOrder { Ascending, Descending });
enum_value!(SyncFields { Include, Exclude });
enum_value!(HashAlgorithm { Md5, Sha1 });
