//! Automation configuration
//!
//! Every threshold the disposition chain consults lives in one
//! [`AutomationConfig`] value. The engine reads a single snapshot per
//! decision; changing a threshold means replacing the whole value.

use serde::{Deserialize, Serialize};

use core_kernel::CoreError;

/// Thresholds and switches for automatic claim disposition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    /// When false, no claim is decided automatically
    pub enabled: bool,
    /// Reject claims whose policy is missing, cancelled or out of period
    pub require_active_policy: bool,
    /// Claims in the history window at which a claim is rejected
    pub suspicious_claim_count: u32,
    /// Claims in the history window at which a claim goes to review
    pub high_frequency_claim_count: u32,
    /// Length of the claim history window in calendar months
    pub history_window_months: u32,
    /// Minimum ML confidence for any automatic outcome
    pub min_confidence: f64,
    /// Severities at or below this are rejected as too minor
    pub low_severity_ceiling: u8,
    /// Severities above this are approved
    pub high_severity_floor: u8,
    /// Damage-part keywords that always need a human
    pub critical_parts: Vec<String>,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            require_active_policy: true,
            suspicious_claim_count: 5,
            high_frequency_claim_count: 3,
            history_window_months: 12,
            min_confidence: 0.7,
            low_severity_ceiling: 10,
            high_severity_floor: 45,
            critical_parts: ["engine", "transmission", "chassis", "frame", "airbag", "brake system"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl AutomationConfig {
    /// Loads configuration from `CLAIM_AUTOMATION_*` environment variables
    ///
    /// Unset variables keep their defaults, so `CLAIM_AUTOMATION_ENABLED=false`
    /// alone switches automation off. `CLAIM_AUTOMATION_CRITICAL_PARTS` is a
    /// comma-separated list.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::load(config::Environment::with_prefix("CLAIM_AUTOMATION"))
    }

    /// Same as [`from_env`](Self::from_env) but reads the given variables
    /// instead of the process environment
    pub fn from_vars(vars: config::Map<String, String>) -> Result<Self, CoreError> {
        Self::load(config::Environment::with_prefix("CLAIM_AUTOMATION").source(Some(vars)))
    }

    fn load(env: config::Environment) -> Result<Self, CoreError> {
        let loaded: AutomationConfig = config::Config::builder()
            .add_source(
                env.try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("critical_parts"),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks thresholds are in range and consistently ordered
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(CoreError::validation(format!(
                "min_confidence must be between 0 and 1, got {}",
                self.min_confidence
            )));
        }
        if self.high_severity_floor > 100 {
            return Err(CoreError::validation("high_severity_floor must not exceed 100"));
        }
        if self.low_severity_ceiling > self.high_severity_floor {
            return Err(CoreError::validation(format!(
                "low_severity_ceiling ({}) must not exceed high_severity_floor ({})",
                self.low_severity_ceiling, self.high_severity_floor
            )));
        }
        if self.high_frequency_claim_count > self.suspicious_claim_count {
            return Err(CoreError::validation(format!(
                "high_frequency_claim_count ({}) must not exceed suspicious_claim_count ({})",
                self.high_frequency_claim_count, self.suspicious_claim_count
            )));
        }
        if self.history_window_months == 0 {
            return Err(CoreError::validation("history_window_months must be at least 1"));
        }
        Ok(())
    }

    /// Returns the first critical keyword contained in any damage part
    pub fn critical_part_in<'a, I>(&self, parts: I) -> Option<&str>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let parts: Vec<String> = parts.into_iter().map(|p| p.to_lowercase()).collect();
        self.critical_parts
            .iter()
            .find(|keyword| {
                let keyword = keyword.to_lowercase();
                parts.iter().any(|p| p.contains(&keyword))
            })
            .map(String::as_str)
    }
}
