use crate::expr::Type;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The entity property stored in this column. `None` for columns only
    /// reachable through the dynamic bag.
    pub property: Option<String>,

    /// Dynamic bag key stored in this column
    pub key: Option<String>,

    pub ty: Type,

    /// True if the database assigns the value on insert
    pub identity: bool,

    /// True if the column is part of the table's primary key
    pub primary_key: bool,

    /// True if the database computes the value; never written
    pub computed: bool,

    /// Maximum length of string values
    pub max_length: Option<usize>,
}

impl Column {
    /// A column storing the property of the same name.
    pub fn new(name: impl Into<String>, ty: Type) -> Column {
        let name = name.into();
        Column {
            property: Some(name.clone()),
            name,
            key: None,
            ty,
            identity: false,
            primary_key: false,
            computed: false,
            max_length: None,
        }
    }

    /// A column storing a dynamic bag key.
    pub fn dynamic(name: impl Into<String>, key: impl Into<String>, ty: Type) -> Column {
        Column {
            property: None,
            key: Some(key.into()),
            ..Column::new(name, ty)
        }
    }

    pub fn property(mut self, property: impl Into<String>) -> Column {
        self.property = Some(property.into());
        self
    }

    pub fn identity(mut self) -> Column {
        self.identity = true;
        self
    }

    pub fn primary_key(mut self) -> Column {
        self.primary_key = true;
        self
    }

    pub fn computed(mut self) -> Column {
        self.computed = true;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Column {
        self.max_length = Some(max_length);
        self
    }

    /// Columns whose value comes from the database and must not be written.
    pub fn is_generated(&self) -> bool {
        self.identity || self.computed
    }
}
