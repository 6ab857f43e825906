//! Code generation building blocks.
//!
//! This module provides the core primitives for generating code:
//! - [`CodeBuilder`] - Fluent API for building indented code
//! - [`CodeFragment`] - Intermediate representation for code pieces
//! - [`Renderable`] - Trait for types that can be converted to code fragments
//! - [`Indent`] - Indentation configuration
//!
//! # Language-Agnostic Expression Builders
//!
//! - [`Value`] - Semantic values (literals, flag reads, calls, collections, etc.)
//! - [`BuilderSpec`] - Declarative specification for builder/fluent API patterns
//! - [`Statement`] - Let bindings and expression statements of a command body
//! - [`Renderer`] - Trait for language-specific rendering

mod code_builder;
mod expr;
mod indent;
mod renderable;
mod statement;

pub use code_builder::CodeBuilder;
pub use expr::{BuilderSpec, Constructor, MethodCall, RenderOptions, Renderer, Terminal, Value};
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
pub use statement::Statement;
