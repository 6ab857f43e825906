//! Lower phase - classifies catalog operations into descriptors.
//!
//! Every parameter type goes through the [`TypeClassifier`]. Fields that
//! cannot be classified are dropped from their composite; an operation with
//! a parameter that cannot be classified is skipped. Both are warnings: one
//! malformed operation never blocks the rest.

use clientele_catalog::Catalog;
use clientele_ir::{OperationDecl, OperationDescriptor, ParameterDescriptor, TypeKind};
use eyre::Result;

use crate::{
    classify::TypeClassifier,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

/// Phase that turns catalog operations into [`OperationDescriptor`]s.
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Classify operation parameters and model fields"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let (operations, diagnostics) = lower_catalog(&ctx.catalog);
        ctx.operations = operations;
        ctx.diagnostics.extend(diagnostics);
        Ok(())
    }
}

fn lower_catalog(catalog: &Catalog) -> (Vec<OperationDescriptor>, Vec<Diagnostic>) {
    let mut classifier = TypeClassifier::new(catalog);
    let mut operations = Vec::new();
    let mut diagnostics = Vec::new();

    for resource in &catalog.resources {
        let group = catalog.group_name(resource);
        let accessor = catalog.accessor(resource);

        for decl in &resource.operations {
            let location = format!("resources.{}.{}", group, decl.name);
            let lowered = lower_operation(&mut classifier, decl, &location, &mut diagnostics);

            for gap in classifier.take_gaps() {
                tracing::warn!(location = %gap.location, "dropping field: {}", gap.error);
                diagnostics.push(
                    Diagnostic::warning("lower", format!("field dropped: {}", gap.error))
                        .at(gap.location),
                );
            }

            if let Some(parameters) = lowered {
                operations.push(OperationDescriptor {
                    name: decl.name.clone(),
                    resource_group: group.clone(),
                    accessor: accessor.clone(),
                    kind: decl.kind(),
                    description: decl.description.clone(),
                    parameters,
                    return_type: decl.returns.clone(),
                });
            }
        }
    }

    (operations, diagnostics)
}

/// Classify every parameter, or `None` if the operation must be skipped.
fn lower_operation(
    classifier: &mut TypeClassifier<'_, Catalog>,
    decl: &OperationDecl,
    location: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Vec<ParameterDescriptor>> {
    let mut parameters = Vec::with_capacity(decl.params.len());

    for param in &decl.params {
        let ty = match classifier.classify(&param.ty) {
            Ok(ty) => ty,
            Err(error) => {
                tracing::warn!(
                    operation = %decl.name,
                    parameter = %param.name,
                    "skipping operation: {}",
                    error
                );
                diagnostics.push(
                    Diagnostic::warning(
                        "lower",
                        format!(
                            "operation '{}' skipped: parameter '{}': {}",
                            decl.name, param.name, error
                        ),
                    )
                    .at(location),
                );
                return None;
            }
        };

        let mut is_path_identifier = param.path;
        if is_path_identifier && !matches!(ty.kind, TypeKind::Scalar | TypeKind::Enum) {
            diagnostics.push(
                Diagnostic::warning(
                    "lower",
                    format!(
                        "path parameter '{}' is not a scalar; it is bound as options instead",
                        param.name
                    ),
                )
                .at(location),
            );
            is_path_identifier = false;
        }

        parameters.push(ParameterDescriptor {
            name: param.name.clone(),
            ty,
            is_path_identifier,
            required: param.required,
        });
    }

    Some(parameters)
}
