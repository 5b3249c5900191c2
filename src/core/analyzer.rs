//! Core phone analyzer implementation
//!
//! This file contains the implementation of the PhoneAnalyzer which coordinates
//! number validation, the basic numbering plan lookup, digit pattern analysis
//! and web search suggestions into a single report.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, info, warn};
use serde::Serialize;

use crate::core::numbering_plan::{LineType, LookupError, NumberFormat, NumberingPlan};
use crate::core::patterns::{self, DigitCharacteristics, PatternFinding};
use crate::core::regions;
use crate::core::risk::{self, RiskAssessment};
use crate::utils::web_search::{self, WebSuggestions};

/// Result of the basic numbering plan lookup
#[derive(Debug, Clone, Serialize)]
pub struct NumberInfo {
    pub international: String,
    pub national_format: String,
    pub e164: String,
    pub rfc3966: String,
    pub valid: bool,
    pub possible: bool,
    pub line_type: LineType,
    pub location: String,
    pub carrier: String,
    pub timezones: Vec<String>,
    pub country_code: u16,
    pub region_code: Option<String>,
    pub national_number: String,
}

/// Comparison of the number length with the region's usual length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthCheck {
    pub region_code: String,
    pub expected: usize,
    pub actual: usize,
    pub typical: bool,
}

/// Result of the digit pattern analysis
#[derive(Debug, Clone, Serialize)]
pub struct AdvancedAnalysis {
    pub digits: String,
    pub patterns: Vec<PatternFinding>,
    pub risk: RiskAssessment,
    pub characteristics: DigitCharacteristics,
    pub country: Option<String>,
    pub length_check: Option<LengthCheck>,
}

/// Everything produced for one analyzed number
#[derive(Debug, Clone, Serialize)]
pub struct LookupReport {
    pub target: String,
    pub generated: String,
    pub info: NumberInfo,
    pub advanced: AdvancedAnalysis,
    pub web: Option<WebSuggestions>,
}

/// Which optional sections to produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub web_search: bool,
}

/// Coordinates lookups against a numbering plan
pub struct PhoneAnalyzer<P: NumberingPlan> {
    /// Source of parsing, validation and region metadata
    plan: P,

    /// Typical national lengths by region, overriding the bundled values
    typical_lengths: HashMap<String, usize>,
}

impl<P: NumberingPlan> PhoneAnalyzer<P> {
    /// Create a new PhoneAnalyzer using only the bundled typical lengths
    pub fn new(plan: P) -> Self {
        Self::with_typical_lengths(plan, HashMap::new())
    }

    /// Create a new PhoneAnalyzer with extra typical lengths
    ///
    /// # Arguments
    ///
    /// * `plan` - Numbering plan to resolve numbers against
    /// * `typical_lengths` - Region code to national number length, taking
    ///   precedence over the bundled table
    pub fn with_typical_lengths(plan: P, typical_lengths: HashMap<String, usize>) -> Self {
        Self { plan, typical_lengths }
    }

    /// Check that the input parses and is a valid number
    pub fn validate(&self, raw: &str) -> bool {
        match self.plan.parse(raw) {
            Ok(number) => self.plan.is_valid(&number),
            Err(e) => {
                debug!("Validation failed for {}: {}", raw, e);
                false
            }
        }
    }

    /// Parse the input and require it to be valid
    fn parse_valid(&self, raw: &str) -> Result<P::Number, LookupError> {
        let number = self.plan.parse(raw)?;
        if !self.plan.is_valid(&number) {
            warn!("Number {} parsed but is not valid", raw);
            return Err(LookupError::InvalidNumber(raw.to_string()));
        }
        Ok(number)
    }

    /// Resolve formats, line type, location and timezones
    pub fn basic_lookup(&self, raw: &str) -> Result<NumberInfo, LookupError> {
        let number = self.parse_valid(raw)?;
        Ok(self.number_info(&number))
    }

    fn number_info(&self, number: &P::Number) -> NumberInfo {
        let plan = &self.plan;
        NumberInfo {
            international: plan.format(number, NumberFormat::International),
            national_format: plan.format(number, NumberFormat::National),
            e164: plan.format(number, NumberFormat::E164),
            rfc3966: plan.format(number, NumberFormat::Rfc3966),
            valid: plan.is_valid(number),
            possible: plan.is_possible(number),
            line_type: plan.line_type(number),
            location: plan.location(number).unwrap_or_else(|| "Unknown".to_string()),
            carrier: plan.carrier_name(number).unwrap_or_else(|| "Unknown".to_string()),
            timezones: plan.timezones(number),
            country_code: plan.country_code(number),
            region_code: plan.region_code(number),
            national_number: plan.national_number(number),
        }
    }

    /// Run the pattern checks and risk scoring over the national number
    ///
    /// Invalid numbers are rejected before the digits are inspected.
    pub fn advanced_analysis(&self, raw: &str) -> Result<AdvancedAnalysis, LookupError> {
        let number = self.parse_valid(raw)?;
        Ok(self.analyze_digits(&number))
    }

    fn analyze_digits(&self, number: &P::Number) -> AdvancedAnalysis {
        let digits = self.plan.national_number(number);
        let length_check = self
            .plan
            .region_code(number)
            .and_then(|code| self.length_check(&code, digits.chars().count()));

        AdvancedAnalysis {
            patterns: patterns::run_pattern_checks(&digits),
            risk: risk::assess_risk(&digits),
            characteristics: patterns::digit_characteristics(&digits),
            country: self.plan.region_name(number),
            length_check,
            digits,
        }
    }

    fn length_check(&self, region_code: &str, actual: usize) -> Option<LengthCheck> {
        let expected = self
            .typical_lengths
            .get(region_code)
            .copied()
            .or_else(|| regions::typical_length(region_code))?;

        Some(LengthCheck {
            region_code: region_code.to_string(),
            expected,
            actual,
            typical: actual == expected,
        })
    }

    /// Build search queries and API hints for the input as typed
    pub fn web_suggestions(&self, raw: &str) -> WebSuggestions {
        web_search::suggestions(raw)
    }

    /// Run the complete analysis
    ///
    /// Invalid input is rejected before any pattern analysis takes place.
    pub fn analyze(&self, raw: &str, options: AnalysisOptions) -> Result<LookupReport, LookupError> {
        let start_time = Instant::now();
        info!("Analyzing: {}", raw);

        let number = self.parse_valid(raw)?;
        let info = self.number_info(&number);
        let advanced = self.analyze_digits(&number);
        let web = options.web_search.then(|| self.web_suggestions(raw));

        info!(
            "Analysis of {} completed in {:?} (risk: {})",
            raw,
            start_time.elapsed(),
            advanced.risk.level
        );

        Ok(LookupReport {
            target: raw.to_string(),
            generated: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            info,
            advanced,
            web,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::risk::RiskLevel;

    /// Plan that accepts "+<cc>-<digits>" and treats a trailing "x" as invalid
    struct StubPlan;

    struct StubNumber {
        country_code: u16,
        national: String,
        valid: bool,
    }

    impl NumberingPlan for StubPlan {
        type Number = StubNumber;

        fn parse(&self, raw: &str) -> Result<StubNumber, LookupError> {
            let rest = raw
                .strip_prefix('+')
                .ok_or_else(|| LookupError::Parse("missing +".to_string()))?;
            let (code, national) = rest
                .split_once('-')
                .ok_or_else(|| LookupError::Parse("missing separator".to_string()))?;
            let valid = !national.ends_with('x');
            Ok(StubNumber {
                country_code: code.parse().map_err(|_| LookupError::Parse(code.to_string()))?,
                national: national.trim_end_matches('x').to_string(),
                valid,
            })
        }

        fn is_valid(&self, number: &StubNumber) -> bool {
            number.valid
        }

        fn is_possible(&self, number: &StubNumber) -> bool {
            (7..=10).contains(&number.national.len())
        }

        fn format(&self, number: &StubNumber, _style: NumberFormat) -> String {
            format!("+{}{}", number.country_code, number.national)
        }

        fn region_code(&self, number: &StubNumber) -> Option<String> {
            match number.country_code {
                1 => Some("US".to_string()),
                44 => Some("GB".to_string()),
                _ => None,
            }
        }

        fn region_name(&self, number: &StubNumber) -> Option<String> {
            self.region_code(number)
                .and_then(|code| regions::lookup(&code))
                .map(|info| info.name.to_string())
        }

        fn carrier_name(&self, _number: &StubNumber) -> Option<String> {
            None
        }

        fn timezones(&self, _number: &StubNumber) -> Vec<String> {
            Vec::new()
        }

        fn line_type(&self, _number: &StubNumber) -> LineType {
            LineType::Mobile
        }

        fn country_code(&self, number: &StubNumber) -> u16 {
            number.country_code
        }

        fn national_number(&self, number: &StubNumber) -> String {
            number.national.clone()
        }
    }

    #[test]
    fn test_validate() {
        let analyzer = PhoneAnalyzer::new(StubPlan);
        assert!(analyzer.validate("+1-4155552671"));
        assert!(!analyzer.validate("+1-4155552671x"));
        assert!(!analyzer.validate("4155552671"));
    }

    #[test]
    fn test_invalid_number_stops_analysis() {
        let analyzer = PhoneAnalyzer::new(StubPlan);
        let result = analyzer.analyze("+1-0000000x", AnalysisOptions::default());
        assert!(matches!(result, Err(LookupError::InvalidNumber(_))));
    }

    #[test]
    fn test_invalid_number_skips_pattern_analysis() {
        let analyzer = PhoneAnalyzer::new(StubPlan);
        let result = analyzer.advanced_analysis("+1-0000000x");
        assert!(matches!(result, Err(LookupError::InvalidNumber(_))));

        let result = analyzer.advanced_analysis("0000000");
        assert!(matches!(result, Err(LookupError::Parse(_))));
    }

    #[test]
    fn test_basic_lookup_fills_unknowns() {
        let analyzer = PhoneAnalyzer::new(StubPlan);
        let info = analyzer.basic_lookup("+7-9161234567").unwrap();
        assert_eq!(info.location, "Unknown");
        assert_eq!(info.carrier, "Unknown");
        assert_eq!(info.region_code, None);
        assert_eq!(info.national_number, "9161234567");
        assert!(info.possible);
    }

    #[test]
    fn test_advanced_analysis_of_repeated_zeros() {
        let analyzer = PhoneAnalyzer::new(StubPlan);
        let advanced = analyzer.advanced_analysis("+44-0000000").unwrap();

        assert_eq!(advanced.digits, "0000000");
        assert_eq!(advanced.risk.level, RiskLevel::High);
        assert!(advanced.patterns.contains(&PatternFinding::RepeatedBlock("0".to_string())));
        assert_eq!(advanced.country.as_deref(), Some("United Kingdom"));
        assert_eq!(
            advanced.length_check,
            Some(LengthCheck {
                region_code: "GB".to_string(),
                expected: 10,
                actual: 7,
                typical: false,
            })
        );
    }

    #[test]
    fn test_typical_length_override() {
        let mut lengths = HashMap::new();
        lengths.insert("GB".to_string(), 7);
        let analyzer = PhoneAnalyzer::with_typical_lengths(StubPlan, lengths);

        let advanced = analyzer.advanced_analysis("+44-1234567").unwrap();
        let check = advanced.length_check.expect("GB has a typical length");
        assert!(check.typical);
        assert_eq!(advanced.risk.level, RiskLevel::Medium);
    }

    #[test]
    fn test_no_length_check_without_region() {
        let analyzer = PhoneAnalyzer::new(StubPlan);
        let advanced = analyzer.advanced_analysis("+7-9161234567").unwrap();
        assert!(advanced.length_check.is_none());
        assert!(advanced.country.is_none());
    }

    #[test]
    fn test_web_section_is_optional() {
        let analyzer = PhoneAnalyzer::new(StubPlan);

        let report = analyzer.analyze("+1-4155552671", AnalysisOptions::default()).unwrap();
        assert!(report.web.is_none());

        let report = analyzer
            .analyze("+1-4155552671", AnalysisOptions { web_search: true })
            .unwrap();
        assert_eq!(report.web.map(|w| w.queries.len()), Some(4));
    }
}
