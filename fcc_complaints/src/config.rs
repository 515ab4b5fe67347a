//! Layered INI configuration.
//!
//! Files are read in order and merged key-by-key: a later file replaces
//! individual keys of an earlier one and leaves the rest of the section
//! alone. Section names are case-sensitive, key names are not.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};

/// Name used for the system-wide and per-user configuration files.
pub const APP_NAME: &str = "fcc_complaints";

/// Configuration shipped with the library. Always the lowest-priority layer.
const BUNDLED_DEFAULT: &str = include_str!("../default.config");

/// Errors from reading or querying configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed config in {origin}: {message}")]
    Parse { origin: String, message: String },
    #[error("No config value for [{section}] {key}")]
    KeyNotFound { section: String, key: String },
}

/// Flat section -> key -> value lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl Config {
    /// Loads the bundled default, then `/etc/default/fcc_complaints`, then
    /// `~/.fcc_complaints`, later files overriding earlier ones.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_ini_str(BUNDLED_DEFAULT, "<bundled default>")?;
        config.merge(Self::resolve(&Self::default_locations())?);
        Ok(config)
    }

    /// On-disk locations searched by [`Config::load`], lowest priority first.
    pub fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![Path::new("/etc/default").join(APP_NAME)];
        if let Some(home) = dirs::home_dir() {
            locations.push(home.join(format!(".{}", APP_NAME)));
        }
        locations
    }

    /// Reads and merges `paths` in order. Files that do not exist are skipped.
    pub fn resolve<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for path in paths {
            let path = path.as_ref();
            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!("Config file {} not found, skipping", path.display());
                    continue;
                }
                Err(source) => {
                    return Err(ConfigError::Io {
                        path: path.to_path_buf(),
                        source,
                    })
                }
            };
            tracing::debug!("Reading config file {}", path.display());
            config.merge(Self::from_ini_str(&content, &path.display().to_string())?);
        }
        Ok(config)
    }

    /// Parses a single INI document. `origin` names it in error messages.
    pub fn from_ini_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            enabled_indented_mutiline_value: true,
            ..Default::default()
        };
        let parsed = Ini::load_from_str_opt(content, opt).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;

        let mut config = Self::default();
        for (section, props) in parsed.iter() {
            let Some(section) = section else {
                if props.iter().next().is_some() {
                    return Err(ConfigError::Parse {
                        origin: origin.to_string(),
                        message: "key found before any section header".to_string(),
                    });
                }
                continue;
            };
            let entries = config.sections.entry(section.to_string()).or_default();
            for (key, value) in props.iter() {
                entries.insert(key.to_lowercase(), join_continuation_lines(value));
            }
        }
        Ok(config)
    }

    /// Overlays `other` on top of `self`, key by key.
    pub fn merge(&mut self, other: Config) {
        for (section, entries) in other.sections {
            self.sections.entry(section).or_default().extend(entries);
        }
    }

    /// Returns the value for `key` in `section`.
    pub fn get(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(&key.to_lowercase()))
            .map(String::as_str)
            .ok_or_else(|| ConfigError::KeyNotFound {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    /// Like [`Config::get`], but treats a missing or empty value as absent.
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).ok().filter(|v| !v.is_empty())
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }
}

/// Indented continuation lines become one value, one line per row, with
/// surrounding whitespace removed.
fn join_continuation_lines(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
