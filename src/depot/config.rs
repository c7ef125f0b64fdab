//! Depot configuration.
//!
//! A [`DepotConfig`] describes one configured depot: a display name, a
//! registrar-specific location string, the registrar discriminator, and a
//! free-form options mapping that each registrar interprets with its own
//! typed options struct.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MasonError, Result};

/// One configured depot.
///
/// Immutable for the life of a provider instance. The `registrar_options`
/// mapping is stored untyped because persistence is shared across registrar
/// kinds; each provider parses it into its own options struct at
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepotConfig {
    /// Display name of the depot, also the first path segment in the
    /// template store.
    pub name: String,
    /// Registrar-specific location (for `github-releases`: `owner/repo`).
    pub location: String,
    /// Registrar discriminator selecting the provider implementation.
    pub registrar: String,
    /// Registrar-specific options, interpreted by the selected provider.
    #[serde(default)]
    pub registrar_options: Map<String, Value>,
}

impl DepotConfig {
    /// Create a config with empty registrar options.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        registrar: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            registrar: registrar.into(),
            registrar_options: Map::new(),
        }
    }

    /// Replace the registrar options mapping.
    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.registrar_options = options;
        self
    }
}

/// Typed options for the `github-releases` registrar.
///
/// Parsed from [`DepotConfig::registrar_options`] when the provider is
/// constructed, so malformed options fail before any network call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GithubReleasesOptions {
    /// Include releases marked as pre-releases.
    #[serde(default)]
    pub include_prerelease: bool,
    /// Include draft releases (requires authentication).
    #[serde(default)]
    pub include_draft: bool,
    /// OAuth token attached as `Authorization: token <value>` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_token: Option<String>,
}

impl GithubReleasesOptions {
    /// Parse options from a depot's untyped registrar options mapping.
    pub fn from_config(config: &DepotConfig) -> Result<Self> {
        serde_json::from_value(Value::Object(config.registrar_options.clone())).map_err(|e| {
            MasonError::InvalidRegistrarOptions {
                registrar: config.registrar.clone(),
                message: e.to_string(),
            }
        })
    }

    /// Serialize back into the untyped mapping stored on a [`DepotConfig`].
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
