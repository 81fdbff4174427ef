//! Configuration for symbol graph transforms.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`SYMGRAPH_TRANSFORM__` prefix)
//! 2. Config file `[transform]` section
//! 3. Defaults

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{Result, SymgraphError};
use crate::types::AccessLevel;

/// Which symbols a configured transform keeps.
///
/// Every field defaults to "keep everything".
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TransformConfig {
    /// Drop symbols less visible than this level (e.g. "public").
    #[serde(default)]
    pub minimum_access_level: Option<String>,

    /// Kind identifiers to drop (e.g. "swift.property").
    #[serde(default)]
    pub exclude_kinds: Vec<String>,

    /// When set, only these precise identifiers are kept.
    #[serde(default)]
    pub include_identifiers: Option<Vec<String>>,

    /// Drop symbols whose precise identifier starts with any of these.
    #[serde(default)]
    pub exclude_identifier_prefixes: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Settings {
    #[serde(default)]
    transform: TransformConfig,
}

impl TransformConfig {
    /// Load from an optional config file plus the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, environment())
    }

    /// Parse the `[transform]` section of a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings.transform)
    }

    fn load_from(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;

        info!(
            file = ?path,
            minimum_access_level = ?settings.transform.minimum_access_level,
            exclude_kinds = settings.transform.exclude_kinds.len(),
            "Loaded transform configuration"
        );
        Ok(settings.transform)
    }

    /// The configured minimum access level, validated against the known levels.
    pub fn minimum_access_level(&self) -> Result<Option<AccessLevel>> {
        match &self.minimum_access_level {
            None => Ok(None),
            Some(raw) => {
                let level = AccessLevel::new(raw.as_str());
                if level.rank().is_none() {
                    return Err(SymgraphError::InvalidAccessLevel { value: raw.clone() });
                }
                Ok(Some(level))
            }
        }
    }

    /// True when no filter is configured.
    pub fn is_empty(&self) -> bool {
        self.minimum_access_level.is_none()
            && self.exclude_kinds.is_empty()
            && self.include_identifiers.is_none()
            && self.exclude_identifier_prefixes.is_empty()
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("SYMGRAPH")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("transform.exclude_kinds")
        .with_list_parse_key("transform.include_identifiers")
        .with_list_parse_key("transform.exclude_identifier_prefixes")
}
