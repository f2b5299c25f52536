//! Config loading.
//!
//! `SlaConfigStore` parses an `SlaConfig` from a TOML string or file at
//! startup and hands out the same immutable value for every lookup — there is
//! no hot-reload. A document that fails to parse is a fatal
//! `ConfigError`, not a runtime condition.

use std::path::Path;

use tracing::info;

use shipguard_contracts::error::{ShipguardError, ShipguardResult};

use crate::config::SlaConfig;

/// The built-in reference configuration document.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Loads and owns one immutable [`SlaConfig`].
#[derive(Debug, Clone)]
pub struct SlaConfigStore {
    config: SlaConfig,
}

impl SlaConfigStore {
    /// Load the built-in reference configuration.
    ///
    /// # Panics
    ///
    /// Panics if the embedded document does not parse — a build defect, not a
    /// runtime condition, and covered by tests.
    pub fn builtin() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG)
            .expect("embedded SLA configuration must be structurally valid")
    }

    /// Parse `s` as a TOML SLA configuration document.
    pub fn from_toml_str(s: &str) -> ShipguardResult<Self> {
        let config: SlaConfig = toml::from_str(s).map_err(|e| ShipguardError::ConfigError {
            reason: format!("failed to parse SLA config TOML: {e}"),
        })?;

        info!(
            version = %config.version,
            vendors = config.vendor_overrides.len(),
            routes = config.route_rules.len(),
            "SLA configuration loaded"
        );
        Ok(Self { config })
    }

    /// Read the file at `path` and parse it as an SLA configuration.
    pub fn from_file(path: &Path) -> ShipguardResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ShipguardError::ConfigError {
            reason: format!("failed to read SLA config file '{}': {e}", path.display()),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The loaded configuration. Same immutable value on every call.
    pub fn config(&self) -> &SlaConfig {
        &self.config
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
