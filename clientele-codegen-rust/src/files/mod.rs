pub use clientele_core::GENERATED_HEADER;

use crate::Use;

/// Common use statement helpers for generated files.
pub mod uses {
    use super::Use;

    /// `use clap::Args;`
    pub fn clap_args() -> Use {
        Use::new("clap").symbol("Args")
    }

    /// `use clap::{Args, Parser, Subcommand};`
    pub fn clap_parser_subcommand() -> Use {
        Use::new("clap").symbols(["Args", "Parser", "Subcommand"])
    }

    /// `use crate::<namespace>::base::{..};`
    pub fn base(namespace: &str, symbols: &[&str]) -> Use {
        Use::new(format!("crate::{}::base", namespace)).symbols(symbols.iter().copied())
    }
}

mod base_rs;
mod cargo_toml;
mod cli_rs;
mod command_rs;
mod commands_mod;
mod generated_mod;
mod main_rs;

pub use base_rs::BaseRs;
pub use cargo_toml::{CargoToml, Dependency};
pub use cli_rs::{CliRs, CommandInfo, GroupInfo};
pub use command_rs::CommandRs;
pub use commands_mod::CommandsMod;
pub use generated_mod::GeneratedMod;
pub use main_rs::MainRs;
