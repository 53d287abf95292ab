use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::AppError;
use crate::models::pricing::PricingConfig;

/// Flat key/value settings. Unset keys fall back to the pricing defaults.
#[derive(Default)]
pub struct SettingsStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the current settings into the config one operation runs with.
    pub fn pricing_config(&self) -> Result<PricingConfig, AppError> {
        let values = self
            .values
            .read()
            .map_err(|_| AppError::Internal("settings lock poisoned".to_string()))?;

        PricingConfig::from_settings(&values)
    }

    /// Merges `updates` into the stored settings. Nothing is written unless
    /// the merged set still parses.
    pub fn update(&self, updates: BTreeMap<String, String>) -> Result<PricingConfig, AppError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| AppError::Internal("settings lock poisoned".to_string()))?;

        let mut merged = values.clone();
        merged.extend(updates);

        let config = PricingConfig::from_settings(&merged)?;
        *values = merged;
        Ok(config)
    }
}
