use std::path::{Path, PathBuf};

use clientele_core::{FileRules, GeneratedFile, Version};

const DEFAULT_EDITION: &str = "2024";

/// One `[dependencies]` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Dependency {
    /// `name = "1"`
    Version { name: String, version: String },
    /// `name = { version = "4", features = ["derive"] }`
    Features {
        name: String,
        version: String,
        features: Vec<String>,
    },
    /// `name = { path = "../client" }`
    Path { name: String, path: String },
}

impl Dependency {
    pub fn version(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::Version {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn features(
        name: impl Into<String>,
        version: impl Into<String>,
        features: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::Features {
            name: name.into(),
            version: version.into(),
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    pub fn path(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Path {
            name: name.into(),
            path: path.into(),
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Version { name, version } => format!("{} = {:?}", name, version),
            Self::Features {
                name,
                version,
                features,
            } => {
                let features = features
                    .iter()
                    .map(|f| format!("{:?}", f))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{} = {{ version = {:?}, features = [{}] }}",
                    name, version, features
                )
            }
            Self::Path { name, path } => format!("{} = {{ path = {:?} }}", name, path),
        }
    }
}

/// The Cargo.toml of the generated CLI.
pub struct CargoToml {
    pub name: String,
    pub version: Version,
    pub edition: String,
    pub dependencies: Vec<Dependency>,
}

impl CargoToml {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Version::new(0, 1, 0),
            edition: DEFAULT_EDITION.to_string(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

impl GeneratedFile for CargoToml {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("Cargo.toml")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite()
    }

    fn render(&self) -> String {
        let mut out = format!(
            "[package]\nname = {:?}\nversion = \"{}\"\nedition = {:?}\n\n[dependencies]\n",
            self.name, self.version, self.edition
        );

        for dependency in &self.dependencies {
            out.push_str(&dependency.render());
            out.push('\n');
        }

        out
    }
}
