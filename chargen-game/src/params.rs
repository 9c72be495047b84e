//! Caller-tunable generation parameters.

use serde::{Deserialize, Serialize};

use crate::constants::{ADVANTAGE_LIMIT, DEFAULT_POWER_STAT};

/// Rule-specific overrides supplied alongside the seed.
///
/// Layers that do not use a field ignore it; missing fields default to one dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub gnosis: u8,
    pub blood_potency: u8,
}

impl GenerationParams {
    /// Parse parameters from JSON, defaulting absent fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field is out of `u8` range.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub const fn with_gnosis(mut self, gnosis: u8) -> Self {
        self.gnosis = gnosis;
        self
    }

    #[must_use]
    pub const fn with_blood_potency(mut self, blood_potency: u8) -> Self {
        self.blood_potency = blood_potency;
        self
    }

    /// Copy with every power stat clamped into the advantage range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            gnosis: self.gnosis.min(ADVANTAGE_LIMIT),
            blood_potency: self.blood_potency.min(ADVANTAGE_LIMIT),
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            gnosis: DEFAULT_POWER_STAT,
            blood_potency: DEFAULT_POWER_STAT,
        }
    }
}
