use clientele_core::Version;
use clientele_ir::AuthMode;
use serde::Deserialize;

/// `[cli]`: metadata of the generated command line.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Binary name; also names the per-user settings directory.
    pub name: String,

    #[serde(default)]
    pub version: Version,

    pub description: Option<String>,

    /// Authentication flags emitted into the base command.
    #[serde(default)]
    pub auth: AuthMode,

    /// Module under `src/` the generated code is written to.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    "generated".to_string()
}

/// `[client]`: the client library the generated commands call into.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Cargo package name of the client library.
    #[serde(rename = "crate", default)]
    pub crate_name: String,

    /// Dependency version requirement.
    pub version: Option<String>,

    /// Local dependency path, used instead of `version` when set.
    pub path: Option<String>,

    /// Client entry type, constructed from a `ClientConfiguration`.
    #[serde(default = "default_client_name")]
    pub name: String,

    /// Module holding models and enums.
    #[serde(default = "default_model_module")]
    pub model_module: String,

    /// Stripped from resource names (after `Client`) to form group names.
    pub resource_suffix: Option<String>,

    /// Models named `*{model_suffix}` are sent as `Create*` / `Update*` types.
    #[serde(default = "default_model_suffix")]
    pub model_suffix: String,
}

fn default_client_name() -> String {
    "ResourceClient".to_string()
}

fn default_model_module() -> String {
    "model".to_string()
}

fn default_model_suffix() -> String {
    "Model".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            crate_name: String::new(),
            version: None,
            path: None,
            name: default_client_name(),
            model_module: default_model_module(),
            resource_suffix: None,
            model_suffix: default_model_suffix(),
        }
    }
}

impl ClientConfig {
    /// The crate name as written in Rust paths (`movie-client` -> `movie_client`).
    pub fn crate_ident(&self) -> String {
        self.crate_name.replace('-', "_")
    }

    /// Module path models live in (`movie_client::model`).
    pub fn model_path(&self) -> String {
        if self.model_module.is_empty() {
            self.crate_ident()
        } else {
            format!("{}::{}", self.crate_ident(), self.model_module)
        }
    }

    /// Fully qualified client entry type (`movie_client::MovieClient`).
    pub fn client_path(&self) -> String {
        format!("{}::{}", self.crate_ident(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli: CliConfig = toml::from_str(r#"name = "movies""#).unwrap();
        assert_eq!(cli.namespace, "generated");
        assert_eq!(cli.auth, AuthMode::None);
        assert_eq!(cli.version.to_string(), "0.1.0");
    }

    #[test]
    fn test_client_paths() {
        let client: ClientConfig = toml::from_str(
            r#"
            crate = "movie-client"
            name = "MovieClient"
            "#,
        )
        .unwrap();
        assert_eq!(client.crate_ident(), "movie_client");
        assert_eq!(client.model_path(), "movie_client::model");
        assert_eq!(client.client_path(), "movie_client::MovieClient");
        assert_eq!(client.model_suffix, "Model");
    }

    #[test]
    fn test_empty_model_module() {
        let client = ClientConfig {
            crate_name: "petstore".to_string(),
            model_module: String::new(),
            ..ClientConfig::default()
        };
        assert_eq!(client.model_path(), "petstore");
    }
}
