//! Intro timings.
//!
//! Defaults reproduce the shipped sequence: 600ms start delay, then
//! bubbling 2000ms, heating 2000ms, boiling 1500ms, exploding 600ms,
//! revealing 2200ms and fade 900ms before completion.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntroConfig {
    pub start_delay_ms: u64,
    pub bubbling_ms: u64,
    pub heating_ms: u64,
    pub boiling_ms: u64,
    pub exploding_ms: u64,
    pub revealing_ms: u64,
    pub fade_ms: u64,
    pub heating_tick_ms: u64,
    pub boiling_tick_ms: u64,
    pub bubble_tick_ms: u64,
    /// Virtual animation-frame cadence for the explosion.
    pub frame_ms: u64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 600,
            bubbling_ms: 2000,
            heating_ms: 2000,
            boiling_ms: 1500,
            exploding_ms: 600,
            revealing_ms: 2200,
            fade_ms: 900,
            heating_tick_ms: 50,
            boiling_tick_ms: 40,
            bubble_tick_ms: 50,
            frame_ms: 16,
        }
    }
}

impl IntroConfig {
    /// Parse a JSON object; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Malformed JSON, unknown fields, or a zero period.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Phase durations may be zero. Periods may not.
    ///
    /// # Errors
    ///
    /// `ConfigError::ZeroPeriod` naming the first zero period.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("heating_tick_ms", self.heating_tick_ms),
            ("boiling_tick_ms", self.boiling_tick_ms),
            ("bubble_tick_ms", self.bubble_tick_ms),
            ("frame_ms", self.frame_ms),
        ];
        match periods.iter().find(|&&(_, period)| period == 0) {
            Some(&(field, _)) => Err(ConfigError::ZeroPeriod { field }),
            None => Ok(()),
        }
    }
}
