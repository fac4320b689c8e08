// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::ConfigError;
use camino::Utf8Path;
use serde::Deserialize;
use std::{collections::BTreeSet, io};
use tracing::{debug, warn};

/// The file name looked up by [`ConfigLocation::Default`].
pub const CONFIG_FILE_NAME: &str = "failnav.toml";

/// Specifies where to load configuration from.
#[derive(Clone, Copy, Debug)]
pub enum ConfigLocation<'a> {
    /// Look for [`CONFIG_FILE_NAME`] in this directory, falling back to built-in defaults if it
    /// doesn't exist.
    Default(&'a Utf8Path),

    /// Skip loading a config file entirely, using only built-in defaults.
    ///
    /// This is useful for test isolation.
    Isolated,

    /// Load configuration from an explicit path.
    ///
    /// Returns an error if the file does not exist.
    Explicit(&'a Utf8Path),
}

/// Which defective nodes make up the failing set after a snapshot update.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "kebab-case")]
pub enum FailingSetScope {
    /// Every defective node that isn't in progress, in traversal order. Suites are included
    /// alongside the tests that made them defective.
    #[default]
    AllDefective,

    /// Only defective nodes that have no children.
    LeavesOnly,
}

/// Tracker configuration after user settings have been applied over the defaults.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrackerConfig {
    /// Which defective nodes make up the failing set.
    pub scope: FailingSetScope,

    /// Whether a run-started event clears the previous run's failures.
    pub clear_on_run_start: bool,
}

impl TrackerConfig {
    /// Loads configuration from the given location and resolves it against the built-in
    /// defaults.
    pub fn from_location(location: ConfigLocation<'_>) -> Result<Self, ConfigError> {
        Self::from_location_with_warnings(location, &mut DefaultConfigWarnings)
    }

    fn from_location_with_warnings(
        location: ConfigLocation<'_>,
        warnings: &mut impl ConfigWarnings,
    ) -> Result<Self, ConfigError> {
        let user_config = match location {
            ConfigLocation::Isolated => {
                debug!("config: skipping (isolated)");
                None
            }
            ConfigLocation::Explicit(path) => {
                debug!("config: loading from explicit path {path}");
                match DeserializedConfig::from_path_with_warnings(path, warnings)? {
                    Some(config) => Some(config),
                    None => {
                        return Err(ConfigError::FileNotFound {
                            path: path.to_owned(),
                        });
                    }
                }
            }
            ConfigLocation::Default(dir) => {
                let path = dir.join(CONFIG_FILE_NAME);
                DeserializedConfig::from_path_with_warnings(&path, warnings)?
            }
        };

        Ok(Self::resolve(&DefaultConfig::from_embedded(), user_config.as_ref()))
    }

    fn resolve(defaults: &DefaultConfig, user: Option<&DeserializedConfig>) -> Self {
        let tracker = user.map(|config| &config.tracker);
        Self {
            scope: tracker
                .and_then(|tracker| tracker.scope)
                .unwrap_or(defaults.tracker.scope),
            clear_on_run_start: tracker
                .and_then(|tracker| tracker.clear_on_run_start)
                .unwrap_or(defaults.tracker.clear_on_run_start),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::resolve(&DefaultConfig::from_embedded(), None)
    }
}

/// Handling for configuration warnings.
///
/// Logged through tracing by default; tests collect them instead.
trait ConfigWarnings {
    /// Handle unknown configuration keys found in a config file.
    fn unknown_config_keys(&mut self, config_file: &Utf8Path, unknown: &BTreeSet<String>);
}

struct DefaultConfigWarnings;

impl ConfigWarnings for DefaultConfigWarnings {
    fn unknown_config_keys(&mut self, config_file: &Utf8Path, unknown: &BTreeSet<String>) {
        let mut unknown_str = String::new();
        match unknown.iter().next() {
            Some(key) if unknown.len() == 1 => {
                // Print this on the same line.
                unknown_str.push_str("key: ");
                unknown_str.push_str(key);
            }
            _ => {
                unknown_str.push_str("keys:\n");
                for ignored_key in unknown {
                    unknown_str.push('\n');
                    unknown_str.push_str("  - ");
                    unknown_str.push_str(ignored_key);
                }
            }
        }

        warn!(
            "in config file {}, ignoring unknown configuration {unknown_str}",
            config_file,
        );
    }
}

/// Configuration as written by the user. Every setting is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedConfig {
    #[serde(default)]
    tracker: DeserializedTrackerConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedTrackerConfig {
    scope: Option<FailingSetScope>,
    clear_on_run_start: Option<bool>,
}

impl DeserializedConfig {
    /// Loads config from a specific path.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    fn from_path_with_warnings(
        path: &Utf8Path,
        warnings: &mut impl ConfigWarnings,
    ) -> Result<Option<Self>, ConfigError> {
        debug!("config: attempting to load from {path}");
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("config: file does not exist at {path}");
                return Ok(None);
            }
            Err(error) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    error,
                });
            }
        };

        let (config, unknown) =
            Self::deserialize_toml(&contents).map_err(|error| ConfigError::Parse {
                path: path.to_owned(),
                error,
            })?;

        if !unknown.is_empty() {
            warnings.unknown_config_keys(path, &unknown);
        }

        debug!("config: loaded successfully from {path}");
        Ok(Some(config))
    }

    /// Deserializes TOML content and returns the config along with any unknown keys.
    fn deserialize_toml(contents: &str) -> Result<(Self, BTreeSet<String>), toml::de::Error> {
        let deserializer = toml::Deserializer::parse(contents)?;
        let mut unknown = BTreeSet::new();
        let config: DeserializedConfig = serde_ignored::deserialize(deserializer, |path| {
            unknown.insert(path.to_string());
        })?;
        Ok((config, unknown))
    }
}

/// The built-in defaults. Every setting is required.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DefaultConfig {
    tracker: DefaultTrackerConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DefaultTrackerConfig {
    scope: FailingSetScope,
    clear_on_run_start: bool,
}

impl DefaultConfig {
    /// The embedded default config TOML.
    const DEFAULT_CONFIG: &'static str = include_str!("../../default-config.toml");

    /// Parses the default config.
    ///
    /// Panics if the embedded TOML is invalid or contains unknown keys.
    fn from_embedded() -> Self {
        let deserializer = toml::Deserializer::parse(Self::DEFAULT_CONFIG)
            .expect("embedded default config should parse");
        let mut unknown = BTreeSet::new();
        let config: DefaultConfig =
            serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
                unknown.insert(path.to_string());
            })
            .expect("embedded default config should be valid");

        // The default config ships with this crate, so unknown keys are a bug.
        if !unknown.is_empty() {
            panic!(
                "found unknown keys in default config: {}",
                unknown.into_iter().collect::<Vec<_>>().join(", ")
            );
        }

        config
    }
}
