//! Intermediate representation types for the clientele CLI generator.
//!
//! This crate holds the plain data shared by every stage of generation:
//!
//! ```text
//! clientele.toml → clientele-catalog (parsing) → declarations + TypeResolver
//!                → clientele-codegen (classification) → descriptors → commands
//! ```
//!
//! - Declarations ([`ModelDecl`], [`ResourceDecl`], ...) mirror the catalog file.
//! - [`TypeResolver`] is the seam between the catalog and the type classifier.
//! - Descriptors ([`TypeDescriptor`], [`OperationDescriptor`], ...) are the
//!   classified, immutable view the flattening and emission passes share.

mod decl;
mod descriptor;
mod resolve;
mod types;

pub use decl::{
    AuthMode, ConstructionStyle, EnumDecl, FieldDecl, ModelDecl, OperationDecl, OperationKind,
    ParamDecl, ResourceDecl, ScalarDecl,
};
pub use descriptor::{
    FieldDescriptor, OperationDescriptor, ParameterDescriptor, TypeDescriptor, TypeKind,
};
pub use resolve::{MutationVariants, ResolvedType, TypeResolver};
pub use types::{CollectionKind, PrimitiveType, TypeExpr, TypeExprError};
