use std::path::PathBuf;

use clap::Args;
use clientele_codegen::{
    language::LanguageCodegen,
    pipeline::{CompilationContext, Pipeline},
};
use clientele_codegen_rust::Generator;
use eyre::{Context, Result};

use super::{list::print_groups, open_catalog, print_diagnostics};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to clientele.toml (defaults to ./clientele.toml)
    #[arg(short, long, default_value = "clientele.toml")]
    pub catalog: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let catalog = open_catalog(&self.catalog);
        tracing::debug!(
            catalog = %self.catalog.display(),
            resources = catalog.resources.len(),
            "loaded catalog"
        );
        let ctx = Pipeline::new()
            .run(catalog)
            .wrap_err("Failed to synthesize commands")?;

        if print_diagnostics(&ctx) {
            std::process::exit(1);
        }

        let generator = Generator::new(&ctx);
        if self.dry_run {
            self.run_preview(&generator)
        } else {
            self.run_generation(&generator, &ctx)
        }
    }

    fn run_generation(&self, generator: &Generator, ctx: &CompilationContext) -> Result<()> {
        let result = generator
            .generate(&self.output)
            .wrap_err("Failed to generate code")?;

        let cli = &ctx.catalog.cli;
        println!("{} v{}", cli.name, cli.version);
        if let Some(desc) = &cli.description {
            println!("{}", desc);
        }
        println!();

        println!("Commands ({}):", ctx.commands.len());
        print_groups(ctx, "  ", false);
        println!();

        println!(
            "Generated: {}/src/{}/",
            self.output.display(),
            cli.namespace
        );

        if !result.skipped.is_empty() {
            println!();
            println!("Kept existing:");
            for path in &result.skipped {
                println!("  = {}", path);
            }
        }

        Ok(())
    }

    fn run_preview(&self, generator: &Generator) -> Result<()> {
        let files = generator.preview();

        for file in &files {
            println!("── {} ──", file.path);
            println!("{}", file.content);
        }

        println!("── Summary ──");
        println!("{} files would be generated", files.len());

        Ok(())
    }
}
