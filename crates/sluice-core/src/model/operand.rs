use super::{Operator, Projection};

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Operator(Box<Operator>),
    Projection(Projection),
}

impl Operand {
    pub fn as_operator(&self) -> Option<&Operator> {
        match self {
            Operand::Operator(operator) => Some(operator),
            _ => None,
        }
    }

    pub fn as_projection(&self) -> Option<&Projection> {
        match self {
            Operand::Projection(projection) => Some(projection),
            _ => None,
        }
    }
}

impl From<Operator> for Operand {
    fn from(value: Operator) -> Self {
        Operand::Operator(Box::new(value))
    }
}

impl From<Projection> for Operand {
    fn from(value: Projection) -> Self {
        Operand::Projection(value)
    }
}
