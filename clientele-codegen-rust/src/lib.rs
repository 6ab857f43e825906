//! Rust backend for clientele.
//!
//! Renders the commands synthesized by `clientele-codegen` into a
//! clap-based CLI crate: one command module per operation, the CLI
//! assembler, and the base command with the global settings flags.
//!
//! ```ignore
//! use clientele_codegen::pipeline::Pipeline;
//! use clientele_codegen_rust::{Generator, LanguageCodegen};
//!
//! let ctx = Pipeline::new().run(catalog)?;
//! Generator::new(&ctx).generate(Path::new("movies-cli"))?;
//! ```

mod generator;
mod renderer;
mod rust_file;
mod type_mapper;

pub mod ast;
pub mod files;

pub use ast::{
    ArgAttr, Arm, ClapAttr, Enum, Field, Fn, Impl, Match, Param, Struct, Variant,
};
pub use clientele_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use generator::Generator;
pub use renderer::RustRenderer;
pub use rust_file::{RawCode, RustFile, Use};
pub use type_mapper::RustTypeMapper;
