//! Catalog declarations: the raw, unclassified description of a client API.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::TypeExpr;

/// How a composite value is assembled by generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructionStyle {
    /// `Type::builder().field(v)...build()`
    Builder,
    /// `Type::default()` followed by `set_field(v)` calls.
    #[default]
    Setter,
}

/// The mutation an operation performs, used to filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Update,
}

impl OperationKind {
    /// Infer the kind from an operation name (`update_movie` is an update).
    pub fn infer(operation_name: &str) -> Self {
        let lower = operation_name.to_ascii_lowercase();
        if ["update", "edit", "patch", "replace"]
            .iter()
            .any(|prefix| lower.starts_with(prefix))
        {
            Self::Update
        } else {
            Self::Create
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication scaffolding emitted into the generated base command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum AuthMode {
    #[default]
    None,
    Basic,
    Signature,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic => "basic",
            Self::Signature => "signature",
        }
    }
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "basic" => Ok(Self::Basic),
            "signature" => Ok(Self::Signature),
            other => Err(format!(
                "unknown authentication mode '{}', expected none, basic or signature",
                other
            )),
        }
    }
}

impl TryFrom<String> for AuthMode {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An enumeration exposed by the client library.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDecl {
    pub name: String,
    /// Full path override; defaults to the client's model module.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A string-constructible type (parsed from a flag value with `FromStr`).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalarDecl {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    /// Version requirement of the crate `path` lives in, when that crate is
    /// neither the client nor the standard library.
    #[serde(default)]
    pub version: Option<String>,
}

/// A composite model type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDecl {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub construction: ConstructionStyle,
    #[serde(default)]
    pub description: Option<String>,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// One declared field of a model.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub required: bool,
    /// Server-assigned primary key.
    #[serde(default)]
    pub identifier: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Operations this field takes part in; empty means all of them.
    #[serde(default)]
    pub operations: Vec<OperationKind>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A group of operations exposed through one client accessor.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceDecl {
    pub name: String,
    /// Accessor method on the client; defaults to the snake-cased group name.
    #[serde(default)]
    pub accessor: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub operations: Vec<OperationDecl>,
}

/// One callable operation on a resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationDecl {
    pub name: String,
    #[serde(default)]
    pub kind: Option<OperationKind>,
    /// Return type; absent for operations that return nothing.
    #[serde(default)]
    pub returns: Option<TypeExpr>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

impl OperationDecl {
    /// The declared kind, or the one inferred from the name.
    pub fn kind(&self) -> OperationKind {
        self.kind.unwrap_or_else(|| OperationKind::infer(&self.name))
    }
}

/// One parameter of an operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// Bound to a positional argument instead of an option.
    #[serde(default)]
    pub path: bool,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}
