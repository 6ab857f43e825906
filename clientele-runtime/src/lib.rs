//! Runtime support for CLIs generated with clientele.
//!
//! Generated binaries persist connection settings between runs in a small
//! per-CLI file. Values supplied on the command line overwrite what is
//! stored; flags left out are filled from the store.
//!
//! ```no_run
//! use clientele_runtime::Settings;
//!
//! let mut url = Some("https://api.example.com".to_string());
//! let mut username = None;
//!
//! let mut settings = Settings::load_or_create("movies")?;
//! settings.merge("general.url", &mut url);
//! settings.merge("basic.username", &mut username);
//! settings.save()?;
//! # Ok::<(), clientele_runtime::Error>(())
//! ```

mod error;
mod settings;

pub use error::{Error, Result};
pub use settings::{Settings, keys};
