//! Catalog parsing, validation and type resolution for clientele.
//!
//! A catalog (`clientele.toml`) describes the client library a CLI is
//! generated for: its models, enums, string-constructible scalars and the
//! resources whose operations become commands. [`Catalog`] implements
//! [`clientele_ir::TypeResolver`], which is all the type classifier needs.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod parse;
mod resolve;
mod validate;

pub use config::{CliConfig, ClientConfig};
use clientele_core::to_snake_case;
use clientele_ir::{EnumDecl, ModelDecl, ResourceDecl, ScalarDecl};
pub use error::{Error, Result, SourceContext};
pub use parse::CATALOG_FILE;
use resolve::TypeIndex;
use serde::Deserialize;
pub use validate::ParseContext;

/// Path roots that never need a dependency.
const LOCAL_ROOTS: &[&str] = &["std", "core", "alloc", "crate", "self", "super"];

/// Root of a `clientele.toml` catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub cli: CliConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub enums: Vec<EnumDecl>,

    #[serde(default)]
    pub scalars: Vec<ScalarDecl>,

    #[serde(default)]
    pub models: Vec<ModelDecl>,

    /// Resources in declaration order; this order drives group order.
    #[serde(default)]
    pub resources: Vec<ResourceDecl>,

    #[serde(skip)]
    index: TypeIndex,
}

impl Catalog {
    /// Group name of a resource: the name without `Client` and the
    /// configured resource suffix (`MoviesResourceClient` -> `Movies`).
    pub fn group_name(&self, resource: &ResourceDecl) -> String {
        let mut name = resource.name.as_str();
        if let Some(stripped) = name.strip_suffix("Client").filter(|s| !s.is_empty()) {
            name = stripped;
        }
        if let Some(suffix) = self.client.resource_suffix.as_deref().filter(|s| !s.is_empty())
            && let Some(stripped) = name.strip_suffix(suffix).filter(|s| !s.is_empty())
        {
            name = stripped;
        }
        name.to_string()
    }

    /// Client accessor returning a resource's sub-client.
    pub fn accessor(&self, resource: &ResourceDecl) -> String {
        resource
            .accessor
            .clone()
            .unwrap_or_else(|| to_snake_case(&self.group_name(resource)))
    }

    /// Look up a model declaration by name.
    pub fn model(&self, name: &str) -> Option<&ModelDecl> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Crates other than the client and the standard library that declared
    /// type paths live in, with their version requirement (`*` when none is
    /// given), in first-declaration order.
    pub fn external_crates(&self) -> Vec<(String, String)> {
        let client = self.client.crate_ident();
        let paths = self
            .scalars
            .iter()
            .map(|s| (s.path.as_deref(), s.version.as_deref()))
            .chain(self.enums.iter().map(|e| (e.path.as_deref(), None)))
            .chain(self.models.iter().map(|m| (m.path.as_deref(), None)));

        let mut crates: Vec<(String, String)> = Vec::new();
        for (path, version) in paths {
            let Some((root, _)) = path.and_then(|p| p.split_once("::")) else {
                continue;
            };
            if root == client || LOCAL_ROOTS.contains(&root) {
                continue;
            }
            match crates.iter_mut().find(|(name, _)| name == root) {
                Some((_, existing)) if existing == "*" => {
                    if let Some(version) = version {
                        *existing = version.to_string();
                    }
                }
                Some(_) => {}
                None => crates.push((root.to_string(), version.unwrap_or("*").to_string())),
            }
        }
        crates
    }

    /// Count of declared operations across all resources.
    pub fn operation_count(&self) -> usize {
        self.resources.iter().map(|r| r.operations.len()).sum()
    }
}
