//! # Configuration
//!
//! Loaded once at startup from a TOML file. Command line flags are applied on
//! top by the binary.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "nono.toml";
pub const TOKEN_ENV: &str = "NONO_ACCESS_TOKEN";
pub const DEFAULT_API_BASE: &str = "https://people.googleapis.com";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// OAuth bearer token for the contacts service.
    pub access_token: Option<String>,
    pub api_base: String,
    /// Restricts the scan to one contact group (e.g. `contactGroups/myContacts`).
    pub group: Option<String>,
    /// Scan and report without sending any update.
    pub dry_run: bool,
    pub rules: Rules,
}

/// Knobs of the classification procedure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    /// Leading digits at or above this value are mobile-only.
    ///
    /// Matches below it are ambiguous and need a label or the operator.
    pub mobile_threshold: u8,
    /// Labels naming a mobile network operator.
    pub mnos: BTreeSet<String>,
    /// Labels of known landline/VOIP numbers.
    pub ignore_labels: BTreeSet<String>,
    /// Dialing prefix removed from numbers after the digit insertion.
    pub strip_prefix: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base: DEFAULT_API_BASE.to_string(),
            group: None,
            dry_run: false,
            rules: Rules::default(),
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            mobile_threshold: 8,
            mnos: BTreeSet::new(),
            ignore_labels: BTreeSet::new(),
            strip_prefix: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut cfg: Config = toml::from_str(raw)?;
        cfg.rules.strip_prefix = cfg.rules.strip_prefix.filter(|p| !p.is_empty());
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.rules.mobile_threshold;
        if !(5..=10).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        Ok(())
    }

    /// Fills in the token from the environment when the file has none.
    pub fn with_fallback_token(mut self, env_token: Option<String>) -> Self {
        if self.access_token.as_deref().is_none_or(str::is_empty) {
            self.access_token = env_token.filter(|t| !t.is_empty());
        }
        self
    }

    pub fn access_token(&self) -> Result<&str, ConfigError> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken(TOKEN_ENV))
    }
}
