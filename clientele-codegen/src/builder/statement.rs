//! Statements composed from [`Value`] fragments.

use super::Value;

/// One statement of a generated command body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let [mut] name = value;`
    Let {
        name: String,
        value: Value,
        mutable: bool,
    },
    /// `value;`
    Expr(Value),
}

impl Statement {
    pub fn let_(name: impl Into<String>, value: Value) -> Self {
        Self::Let {
            name: name.into(),
            value,
            mutable: false,
        }
    }

    pub fn let_mut(name: impl Into<String>, value: Value) -> Self {
        Self::Let {
            name: name.into(),
            value,
            mutable: true,
        }
    }

    pub fn expr(value: Value) -> Self {
        Self::Expr(value)
    }

    /// The value this statement evaluates.
    pub fn value(&self) -> &Value {
        match self {
            Self::Let { value, .. } | Self::Expr(value) => value,
        }
    }

    /// The local this statement binds, if any.
    pub fn binding(&self) -> Option<&str> {
        match self {
            Self::Let { name, .. } => Some(name),
            Self::Expr(_) => None,
        }
    }
}
