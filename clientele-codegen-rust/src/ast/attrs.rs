//! Typed clap attributes.
//!
//! Generated structs and enums carry these instead of raw attribute strings;
//! they are rendered to `#[command(...)]` / `#[arg(...)]` syntax on output.

use std::fmt;

/// A clap attribute on a struct, enum, variant or field.
#[derive(Debug, Clone, PartialEq)]
pub enum ClapAttr {
    /// `#[command(name = "...")]`
    CommandName(String),
    /// `#[command(version = "...")]`
    CommandVersion(String),
    /// `#[command(about = "...")]`
    CommandAbout(String),
    /// `#[command(arg_required_else_help = true)]`
    ArgRequiredElseHelp,
    /// `#[command(subcommand)]`
    Subcommand,
    /// `#[command(flatten)]`
    Flatten,
    /// `#[arg(...)]`
    Arg(ArgAttr),
}

impl ClapAttr {
    pub fn command_name(name: impl Into<String>) -> Self {
        Self::CommandName(name.into())
    }

    pub fn command_version(version: impl Into<String>) -> Self {
        Self::CommandVersion(version.into())
    }

    pub fn command_about(about: impl Into<String>) -> Self {
        Self::CommandAbout(about.into())
    }

    pub fn arg(attr: ArgAttr) -> Self {
        Self::Arg(attr)
    }
}

impl fmt::Display for ClapAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandName(name) => write!(f, "command(name = {:?})", name),
            Self::CommandVersion(version) => write!(f, "command(version = {:?})", version),
            Self::CommandAbout(about) => write!(f, "command(about = {:?})", about),
            Self::ArgRequiredElseHelp => write!(f, "command(arg_required_else_help = true)"),
            Self::Subcommand => write!(f, "command(subcommand)"),
            Self::Flatten => write!(f, "command(flatten)"),
            Self::Arg(attr) => write!(f, "{}", attr),
        }
    }
}

/// Options of an `#[arg(...)]` attribute.
///
/// A field without `long` or `short` is positional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgAttr {
    pub long: bool,
    pub short: Option<char>,
    /// Available on every subcommand.
    pub global: bool,
    /// Forces presence; only needed where the field type does not imply it.
    pub required: bool,
    pub value_name: Option<String>,
    /// Minimum number of values for multi-valued positionals.
    pub min_values: Option<usize>,
}

impl ArgAttr {
    pub fn new() -> Self {
        Self::default()
    }

    /// `--name` syntax.
    pub fn long(mut self) -> Self {
        self.long = true;
        self
    }

    pub fn short(mut self, c: char) -> Self {
        self.short = Some(c);
        self
    }

    pub fn global(mut self) -> Self {
        self.global = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.value_name = Some(name.into());
        self
    }

    pub fn min_values(mut self, count: usize) -> Self {
        self.min_values = Some(count);
        self
    }
}

impl fmt::Display for ArgAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if let Some(c) = self.short {
            parts.push(format!("short = '{}'", c));
        }
        if self.long {
            parts.push("long".to_string());
        }
        if self.global {
            parts.push("global = true".to_string());
        }
        if self.required {
            parts.push("required = true".to_string());
        }
        if let Some(count) = self.min_values {
            parts.push(format!("num_args = {}..", count));
        }
        if let Some(ref name) = self.value_name {
            parts.push(format!("value_name = {:?}", name));
        }

        write!(f, "arg({})", parts.join(", "))
    }
}
