use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Environment variable that points the CLI at a specific config file.
pub const CONFIG_PATH_ENV: &str = "TALLY_CONFIG";

/// Longest ledger span accepted in days, matching the engine's cap.
pub const MAX_DOMAIN_DAYS: i64 = 146_097;

/// Decimals kept when `output_precision` is unset, before trailing zeros are trimmed.
pub const DEFAULT_PRECISION: usize = 10;

/// Stores user-configurable ledger and output preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// First day of the ledger. Defaults to the engine's built-in domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_start: Option<NaiveDate>,

    /// First day past the ledger (exclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_end: Option<NaiveDate>,

    /// Fixed number of decimals for computed income. When unset, values are
    /// rounded to [`DEFAULT_PRECISION`] decimals with trailing zeros dropped,
    /// so float noise such as `0.30000000000000004` prints as `0.3`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_precision: Option<u8>,
}

impl Config {
    /// Rejects settings that can never produce a usable ledger.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(start), Some(end)) = (self.domain_start, self.domain_end) {
            if end <= start {
                return Err(ConfigError::Invalid(format!(
                    "domain_end {} must be after domain_start {}",
                    end, start
                )));
            }
            let days = (end - start).num_days();
            if days > MAX_DOMAIN_DAYS {
                return Err(ConfigError::Invalid(format!(
                    "domain spans {} days, more than the maximum of {}",
                    days, MAX_DOMAIN_DAYS
                )));
            }
        }
        if let Some(precision) = self.output_precision {
            if precision > 17 {
                return Err(ConfigError::Invalid(format!(
                    "output_precision {} exceeds 17 decimals",
                    precision
                )));
            }
        }
        Ok(())
    }

    /// Formats a computed value according to `output_precision`.
    pub fn format_amount(&self, value: f64) -> String {
        match self.output_precision {
            Some(precision) => format!("{:.*}", precision as usize, value),
            None => trimmed(value),
        }
    }

    /// Config file location: `$TALLY_CONFIG`, else the platform config dir.
    pub fn resolve_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }

        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("tally").join("config.json")
    }
}

fn trimmed(value: f64) -> String {
    let fixed = format!("{:.*}", DEFAULT_PRECISION, value);
    let digits = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    match digits {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_hides_float_noise() {
        let cfg = Config::default();
        assert_eq!(cfg.format_amount(0.1 + 0.2), "0.3");
        assert_eq!(cfg.format_amount(2.0 * 0.87 * 0.87), "1.5138");
        assert_eq!(cfg.format_amount(-1e-12), "0");
        assert_eq!(cfg.format_amount(-4.5), "-4.5");
        assert_eq!(cfg.format_amount(1200.0), "1200");
    }
}
