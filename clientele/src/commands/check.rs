use std::path::PathBuf;

use clap::Args;
use clientele_codegen::pipeline::{CompilationContext, Pipeline};
use eyre::{Context, Result};

use super::{open_catalog, print_diagnostics};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to clientele.toml (defaults to ./clientele.toml)
    #[arg(short, long, default_value = "clientele.toml")]
    pub catalog: PathBuf,

    /// Print diagnostics as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let mut ctx = CompilationContext::new(open_catalog(&self.catalog));
        Pipeline::analysis()
            .run_in(&mut ctx)
            .wrap_err("Validation failed")?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&ctx.diagnostics)?);
            if ctx.has_errors() {
                std::process::exit(1);
            }
            return Ok(());
        }

        if print_diagnostics(&ctx) {
            std::process::exit(1);
        }

        if ctx.has_warnings() {
            println!();
        }

        println!("✓ {} is valid\n", self.catalog.display());

        let cli = &ctx.catalog.cli;
        println!("  {} v{}", cli.name, cli.version);
        if let Some(desc) = &cli.description {
            println!("  {}\n", desc);
        } else {
            println!();
        }

        let count = ctx.operations.len();
        let skipped = ctx.catalog.operation_count().saturating_sub(count);
        println!(
            "  {} operation{} classified",
            count,
            if count == 1 { "" } else { "s" }
        );
        if skipped > 0 {
            println!("  {} skipped", skipped);
        }

        Ok(())
    }
}
