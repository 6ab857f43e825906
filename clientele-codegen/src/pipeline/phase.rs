//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// Name and description of a phase.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// One step of the pipeline.
///
/// Built-in phases:
/// - `ValidatePhase` - lints the catalog
/// - `LowerPhase` - classifies every operation into descriptors
/// - `SynthesizePhase` - turns descriptors into commands and registers them
pub trait Phase: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase on the context.
    ///
    /// # Errors
    ///
    /// Returns an error only when the run cannot continue. Anything that can
    /// be skipped is recorded as a diagnostic instead.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
