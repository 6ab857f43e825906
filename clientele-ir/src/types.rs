//! Type expressions as written in the catalog, and the builtin type families.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// A declared type, as written in a catalog (`string`, `list<Movie>`, `[u8]`).
///
/// Expressions are purely syntactic. Whether a name refers to a primitive,
/// an enum or a model is decided by a [`crate::TypeResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum TypeExpr {
    /// A named type with optional type arguments: `Movie`, `list<string>`.
    Named { name: String, args: Vec<TypeExpr> },
    /// An array type: `[T]` or `T[]`.
    Array(Box<TypeExpr>),
}

impl TypeExpr {
    /// A named type without type arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A named type with type arguments.
    pub fn generic(name: impl Into<String>, args: impl IntoIterator<Item = TypeExpr>) -> Self {
        Self::Named {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// The head name, if this is a named type.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            Self::Array(_) => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, args } if args.is_empty() => write!(f, "{}", name),
            Self::Named { name, args } => {
                write!(f, "{}<", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
            Self::Array(inner) => write!(f, "[{}]", inner),
        }
    }
}

/// Error produced when a type expression cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type expression '{input}': {reason}")]
pub struct TypeExprError {
    pub input: String,
    pub reason: String,
}

impl FromStr for TypeExpr {
    type Err = TypeExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser {
            chars: s.chars().collect(),
            pos: 0,
        };
        let fail = |reason: String| TypeExprError {
            input: s.to_string(),
            reason,
        };

        let expr = parser.parse_type().map_err(fail)?;
        parser.skip_ws();
        if parser.pos < parser.chars.len() {
            return Err(fail(format!(
                "unexpected '{}' at offset {}",
                parser.chars[parser.pos], parser.pos
            )));
        }
        Ok(expr)
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = TypeExprError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, c: char) -> Result<(), String> {
        self.skip_ws();
        match self.peek() {
            Some(found) if found == c => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(format!("expected '{}' but found '{}'", c, found)),
            None => Err(format!("expected '{}' but reached the end", c)),
        }
    }

    fn parse_type(&mut self) -> Result<TypeExpr, String> {
        self.skip_ws();
        let mut expr = if self.peek() == Some('[') {
            self.pos += 1;
            let inner = self.parse_type()?;
            self.expect(']')?;
            TypeExpr::Array(Box::new(inner))
        } else {
            self.parse_named()?
        };

        // Trailing `[]` suffixes: `Movie[]`, `u8[][]`.
        loop {
            self.skip_ws();
            if self.peek() == Some('[') && self.chars.get(self.pos + 1) == Some(&']') {
                self.pos += 2;
                expr = TypeExpr::Array(Box::new(expr));
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_named(&mut self) -> Result<TypeExpr, String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == ':')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(match self.peek() {
                Some(c) => format!("expected a type name but found '{}'", c),
                None => "expected a type name".to_string(),
            });
        }
        let name: String = self.chars[start..self.pos].iter().collect();

        self.skip_ws();
        let mut args = Vec::new();
        if self.peek() == Some('<') {
            self.pos += 1;
            loop {
                args.push(self.parse_type()?);
                self.skip_ws();
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some('>') => {
                        self.pos += 1;
                        break;
                    }
                    Some(c) => return Err(format!("expected ',' or '>' but found '{}'", c)),
                    None => return Err("unclosed '<'".to_string()),
                }
            }
        }

        Ok(TypeExpr::Named { name, args })
    }
}

/// Primitive numeric, boolean and character types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
}

impl PrimitiveType {
    /// Look up a primitive by its catalog spelling (`int`, `float`, or a Rust name).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "bool" | "boolean" => Self::Bool,
            "char" => Self::Char,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" | "int" | "long" => Self::I64,
            "i128" => Self::I128,
            "isize" => Self::Isize,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "usize" => Self::Usize,
            "f32" => Self::F32,
            "f64" | "float" | "double" => Self::F64,
            _ => return None,
        })
    }

    /// The Rust spelling of this primitive.
    pub fn rust_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

/// The collection families a catalog can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Ordered, list-like: `list<T>`, `Vec<T>`.
    List,
    /// `set<T>`, `BTreeSet<T>`, `HashSet<T>`.
    Set,
    /// Keyed: `map<K, V>`. Never a scalar collection (two type parameters).
    Map,
}

impl CollectionKind {
    /// Recognise a collection head name, returning the kind and its Rust container path.
    pub fn from_name(name: &str) -> Option<(Self, &'static str)> {
        Some(match name {
            "list" | "Vec" | "vec" => (Self::List, "Vec"),
            "set" | "BTreeSet" => (Self::Set, "std::collections::BTreeSet"),
            "HashSet" => (Self::Set, "std::collections::HashSet"),
            "map" | "BTreeMap" => (Self::Map, "std::collections::BTreeMap"),
            "HashMap" => (Self::Map, "std::collections::HashMap"),
            _ => return None,
        })
    }

    /// Whether the collection is list-like (textually a list/`Vec`).
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List)
    }
}
