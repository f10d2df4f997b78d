//! Reconciliation settings.

use serde::{Deserialize, Serialize};

use packstock_core::{DomainError, DomainResult};

pub const ENV_DEFAULT_COLOR: &str = "PACKSTOCK_DEFAULT_COLOR";
pub const ENV_DIMENSION_PRECISION: &str = "PACKSTOCK_DIMENSION_PRECISION";
pub const ENV_GAS_MATERIALS: &str = "PACKSTOCK_GAS_MATERIALS";

/// Largest supported number of decimal places for dimension keys.
///
/// 10^9 keeps every realistic dimension (well under a million cm) inside i64.
pub const MAX_DIMENSION_PRECISION: u32 = 9;

/// Settings for one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    /// Color category used when a record carries no color.
    pub default_color: String,
    /// Decimal places kept when normalizing dimensions into variant keys.
    pub dimension_precision: u32,
    /// Material names (any case) whose consumption is the summed production gas weight.
    pub gas_materials: Vec<String>,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            default_color: "Normal".to_string(),
            dimension_precision: 3,
            gas_materials: vec!["GAS".to_string(), "GAZ".to_string()],
        }
    }
}

impl ReconciliationConfig {
    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();

        match lookup(ENV_DEFAULT_COLOR) {
            Some(color) if !color.trim().is_empty() => {
                config.default_color = color.trim().to_string();
            }
            Some(_) => tracing::warn!(
                "{ENV_DEFAULT_COLOR} is blank; using \"{}\"",
                config.default_color
            ),
            None => {}
        }

        if let Some(raw) = lookup(ENV_DIMENSION_PRECISION) {
            config.dimension_precision = raw.trim().parse().map_err(|e| {
                DomainError::validation(format!("{ENV_DIMENSION_PRECISION}={raw:?}: {e}"))
            })?;
        }

        if let Some(raw) = lookup(ENV_GAS_MATERIALS) {
            config.gas_materials = raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
            if config.gas_materials.is_empty() {
                tracing::warn!(
                    "{ENV_GAS_MATERIALS} lists no materials; gas consumption will not be tracked"
                );
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.default_color.trim().is_empty() {
            return Err(DomainError::validation("default_color cannot be empty"));
        }
        if self.dimension_precision > MAX_DIMENSION_PRECISION {
            return Err(DomainError::validation(format!(
                "dimension_precision must be <= {MAX_DIMENSION_PRECISION} (got {})",
                self.dimension_precision
            )));
        }
        Ok(())
    }
}
