use std::path::PathBuf;

use clap::Args;
use clientele_codegen::{
    pipeline::{CompilationContext, Pipeline},
    synthesize::GeneratedCommand,
};
use eyre::{Context, Result};

use super::open_catalog;

#[derive(Args)]
pub struct ListCommand {
    /// Path to clientele.toml (defaults to ./clientele.toml)
    #[arg(short, long, default_value = "clientele.toml")]
    pub catalog: PathBuf,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let ctx = Pipeline::new()
            .run(open_catalog(&self.catalog))
            .wrap_err("Failed to synthesize commands")?;

        if ctx.commands.is_empty() {
            println!("No commands");
        } else {
            println!("Commands:");
            print_groups(&ctx, "  ", true);
        }

        Ok(())
    }
}

/// Print each group followed by its command signatures.
pub(crate) fn print_groups(ctx: &CompilationContext, indent: &str, descriptions: bool) {
    for (group, _) in ctx.registry.groups() {
        println!("{}{}", indent, group);
        for command in ctx.group_commands(group) {
            let signature = signature(command);
            match (&command.description, descriptions) {
                (Some(desc), true) => println!("{}  {}  {}", indent, signature, desc),
                _ => println!("{}  {}", indent, signature),
            }
        }
    }
}

/// `add-movie --title [--director]`, positionals first.
fn signature(command: &GeneratedCommand) -> String {
    let mut parts = vec![command.command_id.clone()];

    for flag in command.positionals() {
        if flag.is_optional_value() {
            parts.push(format!("[{}]", flag.flag_name));
        } else if flag.source_type.element.is_some() {
            parts.push(format!("<{}>...", flag.flag_name));
        } else {
            parts.push(format!("<{}>", flag.flag_name));
        }
    }

    for flag in command.options() {
        if flag.required {
            parts.push(format!("--{}", flag.flag_name));
        } else {
            parts.push(format!("[--{}]", flag.flag_name));
        }
    }

    parts.join(" ")
}
