//! Compilation pipeline.
//!
//! A [`Pipeline`] runs phases over a [`CompilationContext`] that is built
//! once per generation run and passed by reference:
//!
//! - explicit phase boundaries (validate → lower → synthesize)
//! - diagnostics collected in one place instead of aborting on the first gap
//! - the catalog (type resolver) and command registry owned by the context
//!
//! ```ignore
//! use clientele_codegen::pipeline::{Pipeline, Severity};
//!
//! let ctx = Pipeline::new().run(catalog)?;
//! for diag in ctx.warnings() {
//!     eprintln!("{}", diag);
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use runner::Pipeline;
