use std::path::{Path, PathBuf};

use clientele_core::{FileRules, GeneratedFile};

/// The main.rs entry point (user-editable, written once).
pub struct MainRs {
    pub namespace: String,
}

impl MainRs {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

impl GeneratedFile for MainRs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join("main.rs")
    }

    fn rules(&self) -> FileRules {
        FileRules::if_missing()
    }

    fn render(&self) -> String {
        format!(
            "mod {ns};\n\nfn main() {{\n    {ns}::cli::run();\n}}\n",
            ns = self.namespace
        )
    }
}

#[cfg(test)]
mod tests {
    use clientele_core::{Overwrite, WriteResult};

    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(
            MainRs::new("generated").render(),
            "mod generated;\n\nfn main() {\n    generated::cli::run();\n}\n"
        );
    }

    #[test]
    fn test_existing_main_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let main = MainRs::new("generated");
        assert_eq!(main.rules().overwrite, Overwrite::IfMissing);

        assert_eq!(main.write(dir.path()).unwrap(), WriteResult::Written);
        std::fs::write(main.path(dir.path()), "// edited\n").unwrap();

        assert_eq!(main.write(dir.path()).unwrap(), WriteResult::Skipped);
        let content = std::fs::read_to_string(main.path(dir.path())).unwrap();
        assert_eq!(content, "// edited\n");
    }
}
