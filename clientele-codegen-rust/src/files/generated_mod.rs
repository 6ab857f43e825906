use std::path::{Path, PathBuf};

use clientele_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::{RawCode, RustFile};

/// The `<namespace>/mod.rs` file tying base, cli and commands together.
pub struct GeneratedMod {
    pub namespace: String,
}

impl GeneratedMod {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

impl GeneratedFile for GeneratedMod {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join(&self.namespace).join("mod.rs")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        RustFile::new()
            .add(RawCode::lines(["pub mod base;", "pub mod cli;", "pub mod commands;"]))
            .render_with_header(GENERATED_HEADER)
    }
}
