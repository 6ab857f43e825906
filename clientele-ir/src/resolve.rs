//! The type-resolution seam between a catalog and the type classifier.

use crate::{CollectionKind, ModelDecl, PrimitiveType};

/// What a type name refers to, as answered by a [`TypeResolver`].
#[derive(Debug, Clone, Copy)]
pub enum ResolvedType<'a> {
    /// A primitive numeric, boolean or character type.
    Primitive(PrimitiveType),
    /// The string type.
    String,
    /// An enumeration at the given path.
    Enum { path: &'a str },
    /// A type parsed from a single string (`FromStr`).
    StringConstructible { path: &'a str },
    /// A collection head; its type arguments come from the expression.
    Collection {
        kind: CollectionKind,
        container: &'static str,
    },
    /// A composite model.
    Composite {
        path: &'a str,
        model: &'a ModelDecl,
        variants: Option<&'a MutationVariants>,
    },
}

/// Separate request types a model is sent as, per mutation kind.
///
/// Models named `MovieModel` are sent as `CreateMovie` and `UpdateMovie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationVariants {
    pub create: String,
    pub update: String,
}

/// Answers "what is this type name" for the classifier.
///
/// Implemented by the catalog. Only head names are resolved; type arguments
/// are classified recursively by the caller.
pub trait TypeResolver {
    fn resolve(&self, name: &str) -> Option<ResolvedType<'_>>;
}
