//! Phone Lookup - phone number analysis for security research
//!
//! This library parses a phone number against libphonenumber metadata, reports
//! its formats, region and timezones, and runs heuristic digit-pattern checks
//! that assign a qualitative risk level.

pub mod core;
pub mod utils;

// Re-export main analyzer types for convenience
pub use crate::core::analyzer::{AnalysisOptions, LookupReport, PhoneAnalyzer};
pub use crate::core::numbering_plan::{LookupError, NumberingPlan, PhonenumberPlan};
pub use crate::core::patterns::run_pattern_checks;
pub use crate::core::risk::assess_risk;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Analyze a single phone number and return the full report
///
/// This is a convenience function for simple use cases. The number must be in
/// international format (`+<country code><number>`) and web suggestions are
/// not included.
///
/// # Arguments
///
/// * `phone_number` - Number to analyze, e.g. "+16502530000"
pub fn analyze_number(phone_number: &str) -> anyhow::Result<LookupReport> {
    let config = config::LookupConfig::default();
    let report = app::run_lookup(phone_number, &config, AnalysisOptions::default())?;
    Ok(report)
}

/// Library configuration and utilities
pub mod config {
    use std::collections::HashMap;

    use lazy_static::lazy_static;
    use log::LevelFilter;
    use regex::Regex;
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    use crate::core::numbering_plan::LookupError;

    lazy_static! {
        static ref REGION_CODE: Regex = Regex::new(r"^[A-Z]{2}$").unwrap();
    }

    /// Settings read from a JSON configuration file
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct LookupConfig {
        /// Region used to resolve numbers typed without a `+` prefix
        pub default_region: Option<String>,
        /// Typical national number lengths, overriding the bundled table
        pub typical_lengths: HashMap<String, usize>,
        /// Always include web search suggestions
        pub web_search: bool,
        /// Always include verbose details
        pub verbose: bool,
        /// Log level used when `--log-level` is not given
        pub log_level: Option<String>,
        /// Log file used when `--log-file` is not given
        pub log_file: Option<String>,
    }

    impl LookupConfig {
        /// Build a configuration from a parsed JSON value
        ///
        /// Unknown keys are ignored; missing keys take their defaults.
        pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
            LookupConfig::deserialize(value).map(LookupConfig::normalized)
        }

        /// Trim and upper-case every region code
        pub fn normalized(mut self) -> Self {
            self.default_region = self.default_region.map(|code| normalize_region(&code));
            self.typical_lengths = self
                .typical_lengths
                .into_iter()
                .map(|(code, length)| (normalize_region(&code), length))
                .collect();
            self
        }

        /// Parse the configured log level
        ///
        /// Returns `Err` with the configured text when it is not a level name.
        pub fn log_level_filter(&self) -> Result<Option<LevelFilter>, String> {
            match &self.log_level {
                Some(level) => level
                    .trim()
                    .parse::<LevelFilter>()
                    .map(Some)
                    .map_err(|_| level.clone()),
                None => Ok(None),
            }
        }

        /// Check that every region code is two upper-case letters
        pub fn validate(&self) -> Result<(), LookupError> {
            let codes = self
                .default_region
                .iter()
                .chain(self.typical_lengths.keys());

            for code in codes {
                if !REGION_CODE.is_match(code) {
                    return Err(LookupError::InvalidRegion(code.clone()));
                }
            }
            Ok(())
        }
    }

    fn normalize_region(code: &str) -> String {
        code.trim().to_ascii_uppercase()
    }

    /// Create default configuration
    pub fn default_config() -> Value {
        serde_json::json!({
            "default_region": null,
            "typical_lengths": {},
            "web_search": false,
            "verbose": false,
            "log_level": null,
            "log_file": null
        })
    }
}

/// Command-line application functionality
pub mod app {
    use crate::config::LookupConfig;
    use crate::core::analyzer::{AnalysisOptions, LookupReport, PhoneAnalyzer};
    use crate::core::numbering_plan::{LookupError, PhonenumberPlan};

    /// Build an analyzer over libphonenumber metadata from configuration
    pub fn build_analyzer(config: &LookupConfig) -> Result<PhoneAnalyzer<PhonenumberPlan>, LookupError> {
        let config = config.clone().normalized();
        config.validate()?;

        let plan = match &config.default_region {
            Some(region) => PhonenumberPlan::with_default_region(region)?,
            None => PhonenumberPlan::new(),
        };

        Ok(PhoneAnalyzer::with_typical_lengths(plan, config.typical_lengths))
    }

    /// Run the full lookup for one number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - Number as typed by the user
    /// * `config` - Configuration options
    /// * `options` - Optional report sections
    pub fn run_lookup(
        phone_number: &str,
        config: &LookupConfig,
        options: AnalysisOptions,
    ) -> Result<LookupReport, LookupError> {
        let analyzer = build_analyzer(config)?;
        let options = AnalysisOptions {
            web_search: options.web_search || config.web_search,
        };
        analyzer.analyze(phone_number, options)
    }
}

#[cfg(test)]
mod tests {
    use super::config::{default_config, LookupConfig};
    use log::LevelFilter;

    #[test]
    fn test_default_config_round_trips() {
        let config = LookupConfig::from_value(&default_config()).unwrap();
        assert_eq!(config, LookupConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let value = serde_json::json!({
            "default_region": "GB",
            "typical_lengths": { "JP": 10 },
            "unrelated": true
        });
        let config = LookupConfig::from_value(&value).unwrap();
        assert_eq!(config.default_region.as_deref(), Some("GB"));
        assert_eq!(config.typical_lengths.get("JP"), Some(&10));
        assert!(!config.web_search);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_region_codes_are_normalized() {
        let value = serde_json::json!({
            "default_region": " gb ",
            "typical_lengths": { "jp": 10 }
        });
        let config = LookupConfig::from_value(&value).unwrap();
        assert_eq!(config.default_region.as_deref(), Some("GB"));
        assert_eq!(config.typical_lengths.get("JP"), Some(&10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_keys() {
        let value = serde_json::json!({ "log_level": "debug", "log_file": "lookup.log" });
        let config = LookupConfig::from_value(&value).unwrap();
        assert_eq!(config.log_file.as_deref(), Some("lookup.log"));
        assert_eq!(config.log_level_filter(), Ok(Some(LevelFilter::Debug)));

        let config = LookupConfig {
            log_level: Some("chatty".to_string()),
            ..LookupConfig::default()
        };
        assert_eq!(config.log_level_filter(), Err("chatty".to_string()));
        assert_eq!(LookupConfig::default().log_level_filter(), Ok(None));
    }

    #[test]
    fn test_invalid_region_code() {
        let config = LookupConfig {
            default_region: Some("gbr".to_string()),
            ..LookupConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
