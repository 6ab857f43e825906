//! Core utilities and types for the clientele CLI generator.
//!
//! This crate provides the naming helpers, file-writing rules and version
//! type shared by the catalog, the engine and the renderers.

mod file;
mod utils;
mod version;

pub use file::{File, FileRules, GENERATED_HEADER, GeneratedFile, Overwrite, WriteResult};
pub use utils::{capitalize, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
pub use version::Version;
