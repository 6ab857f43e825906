//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - lints the catalog
//! - [`LowerPhase`] - classifies operations into descriptors
//! - [`SynthesizePhase`] - synthesizes and registers commands

mod lower;
mod synthesize;
mod validate;

pub use lower::LowerPhase;
pub use synthesize::SynthesizePhase;
pub use validate::{
    DuplicateOperationLint, EmptyDescriptionLint, Lint, LintInfo, OperationNamingLint,
    ValidatePhase,
};
