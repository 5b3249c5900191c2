//! Risk scoring over digit patterns
//!
//! Each rule adds to an integer score independently; the final score maps to a
//! qualitative level.

use std::fmt;

use serde::Serialize;

use crate::core::patterns;

/// Numbers shorter than this are flagged as very short
const SHORT_NUMBER_LENGTH: usize = 7;

/// Reason reported for low-risk numbers
pub const NORMAL_PATTERN_REASON: &str = "Normal number pattern";

/// Qualitative risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    fn from_score(score: u32) -> Self {
        if score >= 3 {
            RiskLevel::High
        } else if score >= 2 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(name)
    }
}

/// Outcome of scoring a digit string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: u32,
    pub reasons: Vec<String>,
}

impl RiskAssessment {
    /// Reasons joined for single-line display
    pub fn reason(&self) -> String {
        self.reasons.join("; ")
    }
}

/// Score a digit string and derive its risk level
///
/// | Rule | Score |
/// |---|---|
/// | All digits identical | +2 |
/// | Sequential digits (either direction) | +2 |
/// | Very short number (< 7 digits) | +1 |
/// | Repeated pattern | +1 |
///
/// Low results carry the single reason "Normal number pattern" in place of
/// whatever was accumulated.
pub fn assess_risk(digits: &str) -> RiskAssessment {
    let mut score = 0;
    let mut reasons = Vec::new();

    if patterns::detect_all_same_digit(digits) {
        score += 2;
        reasons.push("All digits identical".to_string());
    }

    if patterns::detect_sequential(digits, true) || patterns::detect_sequential(digits, false) {
        score += 2;
        reasons.push("Sequential digits".to_string());
    }

    if digits.chars().count() < SHORT_NUMBER_LENGTH {
        score += 1;
        reasons.push("Very short number".to_string());
    }

    if patterns::detect_repeated_block(digits).is_some() {
        score += 1;
        reasons.push("Repeated pattern".to_string());
    }

    let level = RiskLevel::from_score(score);
    if level == RiskLevel::Low {
        reasons = vec![NORMAL_PATTERN_REASON.to_string()];
    }

    RiskAssessment { level, score, reasons }
}
