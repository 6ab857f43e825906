//! Synthesize phase - one command per lowered operation.

use eyre::Result;

use crate::{
    naming::flag_name,
    pipeline::{CompilationContext, Diagnostic, Phase},
    synthesize::CommandSynthesizer,
};

/// Phase that synthesizes commands and registers them by resource group.
pub struct SynthesizePhase;

impl Phase for SynthesizePhase {
    fn name(&self) -> &'static str {
        "synthesize"
    }

    fn description(&self) -> &'static str {
        "Flatten parameters into flags and emit command bodies"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let synthesizer = CommandSynthesizer::new(ctx.catalog.client.client_path());

        for operation in &ctx.operations {
            let synthesis = synthesizer.synthesize(operation);
            let command = synthesis.command;

            for conflict in synthesis.conflicts {
                ctx.diagnostics.push(
                    Diagnostic::warning(
                        "synthesize",
                        format!(
                            "flag '--{}' from '{}' is also produced by '{}' with a different type; the first one is kept",
                            flag_name(&conflict.variable),
                            conflict.kept.join("."),
                            conflict.dropped.join("."),
                        ),
                    )
                    .at(format!(
                        "resources.{}.{}",
                        operation.resource_group, operation.name
                    )),
                );
            }

            tracing::debug!(
                command = %command.command_name,
                flags = command.flags.len(),
                "synthesized command"
            );
            ctx.registry
                .register(&command.resource_group, &command.command_name);
            ctx.commands.push(command);
        }

        Ok(())
    }
}
