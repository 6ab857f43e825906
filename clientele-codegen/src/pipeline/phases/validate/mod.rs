//! Validate phase - runs lints over the catalog.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::{Lint, LintInfo};
pub use lints::{DuplicateOperationLint, EmptyDescriptionLint, OperationNamingLint};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that checks the catalog with a configurable set of lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// A validate phase with the default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(OperationNamingLint),
                Box::new(DuplicateOperationLint),
                Box::new(EmptyDescriptionLint),
            ],
        }
    }

    /// A validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check catalog conventions and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        for lint in &self.lints {
            lint.check(&ctx.catalog, &mut ctx.diagnostics);
        }

        // Warnings are allowed.
        if ctx.has_errors() {
            bail!("Validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clientele_catalog::Catalog;

    use super::*;
    use crate::{pipeline::Diagnostic, testing::movies_catalog};

    #[test]
    fn test_default_lints() {
        assert_eq!(
            ValidatePhase::new().lint_names(),
            ["operation-naming", "duplicate-operation", "empty-description"]
        );
        assert!(ValidatePhase::empty().lint_info().is_empty());
    }

    #[test]
    fn test_with_errors() {
        struct AlwaysErrorLint;
        impl Lint for AlwaysErrorLint {
            fn name(&self) -> &'static str {
                "always-error"
            }
            fn description(&self) -> &'static str {
                "Always produces an error"
            }
            fn check(&self, _catalog: &Catalog, diagnostics: &mut Vec<Diagnostic>) {
                diagnostics.push(Diagnostic::error("test", "forced error"));
            }
        }

        let mut ctx = CompilationContext::new(movies_catalog());
        let result = ValidatePhase::empty().with_lint(AlwaysErrorLint).run(&mut ctx);

        assert!(result.is_err());
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_fixture_is_clean() {
        let mut ctx = CompilationContext::new(movies_catalog());
        ValidatePhase::new().run(&mut ctx).unwrap();
        assert!(ctx.diagnostics.is_empty());
    }
}
