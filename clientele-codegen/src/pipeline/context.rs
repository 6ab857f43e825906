//! Compilation context passed through pipeline phases.

use clientele_catalog::Catalog;
use clientele_ir::OperationDescriptor;

use super::diagnostic::{Diagnostic, Severity};
use crate::{registry::CommandRegistry, synthesize::GeneratedCommand};

/// State threaded through every phase of one generation run.
///
/// The catalog is the type resolver; everything else accumulates as the
/// phases run. Nothing here outlives the run.
#[derive(Debug)]
pub struct CompilationContext {
    pub catalog: Catalog,
    /// Classified operations (populated by `LowerPhase`).
    pub operations: Vec<OperationDescriptor>,
    /// Synthesized commands in synthesis order (populated by `SynthesizePhase`).
    pub commands: Vec<GeneratedCommand>,
    pub registry: CommandRegistry,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            operations: Vec::new(),
            commands: Vec::new(),
            registry: CommandRegistry::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Commands registered under `group`, in synthesis order.
    pub fn group_commands<'a>(
        &'a self,
        group: &'a str,
    ) -> impl Iterator<Item = &'a GeneratedCommand> {
        self.commands
            .iter()
            .filter(move |c| c.resource_group == group)
    }
}
