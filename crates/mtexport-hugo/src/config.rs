//! Conversion settings loaded from an optional TOML file.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration. Command-line flags are applied on top.

use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use mtexport_parser::{BUILTIN_MULTILINE_KEYS, MultilineKeys};
use serde::{Deserialize, Serialize};

use crate::post::BODY_KEY;
use crate::{Error, Result};

fn default_output_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_timezone() -> String {
    "Asia/Tokyo".to_string()
}

fn default_extra_multiline_keys() -> Vec<String> {
    vec!["IMAGE".to_string()]
}

/// Every built-in block except `BODY`
fn default_ignored_sections() -> Vec<String> {
    BUILTIN_MULTILINE_KEYS
        .iter()
        .filter(|key| **key != BODY_KEY)
        .map(|key| key.to_string())
        .collect()
}

/// Settings for one conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertConfig {
    /// Directory the `.md` files are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// IANA zone that `DATE` fields are interpreted in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Keys parsed as multi-line blocks in addition to the built-in set
    #[serde(default = "default_extra_multiline_keys")]
    pub extra_multiline_keys: Vec<String>,

    /// Multi-line sections skipped without failing the entry
    #[serde(default = "default_ignored_sections")]
    pub ignored_sections: Vec<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            timezone: default_timezone(),
            extra_multiline_keys: default_extra_multiline_keys(),
            ignored_sections: default_ignored_sections(),
        }
    }
}

impl ConvertConfig {
    /// Parse a configuration from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use mtexport_hugo::ConvertConfig;
    ///
    /// let config = ConvertConfig::parse(r#"timezone = "UTC""#).unwrap();
    /// assert_eq!(config.timezone, "UTC");
    /// assert_eq!(config.extra_multiline_keys, vec!["IMAGE"]);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let config: ConvertConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(?path, "Loading config");
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The multi-line key set to parse with
    pub fn multiline_keys(&self) -> MultilineKeys {
        MultilineKeys::builtin().with_extra(self.extra_multiline_keys.iter().cloned())
    }

    /// Resolve the configured time zone
    pub fn time_zone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| Error::InvalidTimeZone {
                name: self.timezone.clone(),
            })
    }
}
