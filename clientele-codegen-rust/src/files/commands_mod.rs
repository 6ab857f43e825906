use std::path::{Path, PathBuf};

use clientele_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::{RawCode, RustFile};

/// The commands/mod.rs file that exports every command module.
pub struct CommandsMod {
    pub namespace: String,
    /// Module names, in synthesis order.
    pub modules: Vec<String>,
}

impl CommandsMod {
    pub fn new(namespace: impl Into<String>, modules: Vec<String>) -> Self {
        Self {
            namespace: namespace.into(),
            modules,
        }
    }
}

impl GeneratedFile for CommandsMod {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src")
            .join(&self.namespace)
            .join("commands")
            .join("mod.rs")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        let mods = self.modules.iter().map(|m| format!("pub mod {};", m));
        let uses = self.modules.iter().map(|m| format!("pub use {}::*;", m));

        RustFile::new()
            .add(RawCode::lines(mods))
            .add(RawCode::lines(uses))
            .render_with_header(GENERATED_HEADER)
    }
}
