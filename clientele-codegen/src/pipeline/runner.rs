//! Pipeline orchestrator.

use clientele_catalog::Catalog;
use eyre::Result;

use super::{
    CompilationContext, Phase,
    phases::{LowerPhase, SynthesizePhase, ValidatePhase},
};

/// Runs the built-in phases, then any added ones, over one context.
///
/// ```ignore
/// let ctx = Pipeline::new().run(catalog)?;
/// for command in &ctx.commands {
///     println!("{}", command.command_name);
/// }
/// ```
pub struct Pipeline {
    builtin: Vec<Box<dyn Phase>>,
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    /// validate, lower, synthesize.
    pub fn new() -> Self {
        Self {
            builtin: vec![
                Box::new(ValidatePhase::new()),
                Box::new(LowerPhase),
                Box::new(SynthesizePhase),
            ],
            phases: Vec::new(),
        }
    }

    /// validate and lower only; nothing is synthesized.
    pub fn analysis() -> Self {
        Self {
            builtin: vec![Box::new(ValidatePhase::new()), Box::new(LowerPhase)],
            phases: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    pub fn phase_names(&self) -> Vec<&'static str> {
        self.builtin
            .iter()
            .chain(self.phases.iter())
            .map(|p| p.name())
            .collect()
    }

    /// Run every phase over a fresh context.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally. Use [`Pipeline::run_in`]
    /// to keep the diagnostics of a failed run.
    pub fn run(&self, catalog: Catalog) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(catalog);
        self.run_in(&mut ctx)?;
        Ok(ctx)
    }

    /// Run every phase over an existing context.
    pub fn run_in(&self, ctx: &mut CompilationContext) -> Result<()> {
        for phase in self.builtin.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), ctx)?;
        }
        tracing::info!(
            groups = ctx.registry.group_count(),
            commands = ctx.commands.len(),
            warnings = ctx.warning_count(),
            "pipeline finished"
        );
        Ok(())
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let name = phase.name();
        let before = ctx.diagnostics.len();
        tracing::debug!(phase = name, "{}", phase.description());

        phase.run(ctx)?;

        tracing::debug!(
            phase = name,
            diagnostics = ctx.diagnostics.len() - before,
            "phase finished"
        );
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::testing::movies_catalog;

    struct CountingPhase(Arc<AtomicUsize>);

    impl Phase for CountingPhase {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn description(&self) -> &'static str {
            "Counts its runs"
        }

        fn run(&self, _ctx: &mut CompilationContext) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let ctx = Pipeline::new()
            .run(movies_catalog())
            .expect("pipeline should succeed");

        assert!(!ctx.operations.is_empty());
        assert_eq!(ctx.commands.len(), ctx.registry.command_count());
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_analysis_does_not_synthesize() {
        let pipeline = Pipeline::analysis();
        assert_eq!(pipeline.phase_names(), ["validate", "lower"]);

        let ctx = pipeline.run(movies_catalog()).expect("pipeline should succeed");
        assert!(!ctx.operations.is_empty());
        assert!(ctx.commands.is_empty());
    }

    #[test]
    fn test_custom_phase_runs_last() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new().phase(CountingPhase(count.clone()));
        assert_eq!(
            pipeline.phase_names(),
            ["validate", "lower", "synthesize", "counting"]
        );

        pipeline.run(movies_catalog()).expect("pipeline should succeed");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
