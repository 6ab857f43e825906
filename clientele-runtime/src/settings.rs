use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{Error, Result};

/// Keys written by generated CLIs.
pub mod keys {
    pub const URL: &str = "general.url";
    pub const USERNAME: &str = "basic.username";
    /// Stored base64-encoded.
    pub const PASSWORD: &str = "basic.password";
    pub const KEY_ID: &str = "signature.key-id";
    pub const KEY_LOCATION: &str = "signature.key-location";
}

/// Persistent string settings of one generated CLI.
///
/// Stored as a flat TOML table at `~/.<name>/.<name>config`.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Settings file of the CLI called `name`.
    pub fn path_for(name: &str) -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(Error::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", name)).join(format!(".{}config", name)))
    }

    /// Load the settings of `name`, creating an empty file on first use.
    pub fn load_or_create(name: &str) -> Result<Self> {
        Self::open(Self::path_for(name)?)
    }

    /// Load settings from `path`, creating the file and its directory when
    /// missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
            std::fs::write(&path, "").map_err(|e| Error::io(&path, e))?;
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let values = toml::from_str(&content).map_err(|source| Error::Parse {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Read a value stored with [`Settings::set_encoded`].
    pub fn get_decoded(&self, key: &str) -> Result<Option<String>> {
        let Some(encoded) = self.get(key) else {
            return Ok(None);
        };
        let bytes = STANDARD.decode(encoded).map_err(|_| Error::Decode {
            key: key.to_string(),
        })?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| Error::Decode {
                key: key.to_string(),
            })
    }

    pub fn set_encoded(&mut self, key: impl Into<String>, value: &str) {
        self.set(key, STANDARD.encode(value));
    }

    /// Reconcile a flag with the store.
    ///
    /// A supplied value replaces the stored one; an absent flag takes the
    /// stored value, if any.
    pub fn merge(&mut self, key: &str, value: &mut Option<String>) {
        match value {
            Some(supplied) => self.set(key, supplied.clone()),
            None => *value = self.get(key).map(str::to_string),
        }
    }

    /// [`Settings::merge`] for values kept base64-encoded.
    ///
    /// A stored value that does not decode is removed and reported as
    /// [`Error::Decode`]; the store stays usable and can still be saved.
    pub fn merge_encoded(&mut self, key: &str, value: &mut Option<String>) -> Result<()> {
        match value {
            Some(supplied) => self.set_encoded(key, supplied),
            None => match self.get_decoded(key) {
                Ok(decoded) => *value = decoded,
                Err(err) => {
                    self.remove(key);
                    return Err(err);
                }
            },
        }
        Ok(())
    }

    /// Write the settings back to their file.
    pub fn save(&self) -> Result<()> {
        let content = toml::to_string(&self.values)?;
        std::fs::write(&self.path, content).map_err(|e| Error::io(&self.path, e))
    }
}
