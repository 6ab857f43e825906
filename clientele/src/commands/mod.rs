mod check;
mod completions;
mod generate;
mod list;

use std::path::Path;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use clientele_catalog::Catalog;
use clientele_codegen::pipeline::{CompilationContext, Severity};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use list::ListCommand;

/// Extension trait for exiting on catalog errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for clientele_catalog::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

pub(crate) fn open_catalog(path: &Path) -> Catalog {
    Catalog::from_file(path).unwrap_or_exit()
}

/// Print every diagnostic; returns whether any was an error.
pub(crate) fn print_diagnostics(ctx: &CompilationContext) -> bool {
    for diag in &ctx.diagnostics {
        match diag.severity {
            Severity::Error | Severity::Warning => {
                eprintln!("{}: {}", diag.severity, diag.message);
                if let Some(loc) = &diag.location {
                    eprintln!("  --> {}", loc);
                }
            }
            Severity::Info => {
                println!("info: {}", diag.message);
                if let Some(loc) = &diag.location {
                    println!("  --> {}", loc);
                }
            }
        }
    }
    ctx.has_errors()
}

#[derive(Parser)]
#[command(name = "clientele")]
#[command(version)]
#[command(about = "Generate command-line interfaces from API client catalogs")]
pub(crate) struct Cli {
    /// Print debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the CLI crate from clientele.toml
    Generate(GenerateCommand),

    /// Validate clientele.toml without generating code
    Check(CheckCommand),

    /// List the commands the catalog produces
    List(ListCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
