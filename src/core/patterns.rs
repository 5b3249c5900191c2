//! Digit pattern detection for the phone analyzer
//!
//! This module contains the heuristic checks run over the national number of a
//! parsed phone number: identical digits, ascending and descending runs,
//! palindromes, repeated blocks and adjacent duplicate pairs.

use std::fmt;

use serde::{Serialize, Serializer};

/// A single triggered digit pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternFinding {
    /// Every digit is the same
    AllSameDigit,
    /// Each digit is one more than the previous
    SequentialAscending,
    /// Each digit is one less than the previous
    SequentialDescending,
    /// The number reads the same backwards
    Palindrome,
    /// The number is covered by repetitions of this block
    RepeatedBlock(String),
    /// At least two adjacent digits are equal
    AdjacentDuplicate,
}

impl fmt::Display for PatternFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternFinding::AllSameDigit => write!(f, "All digits are the same"),
            PatternFinding::SequentialAscending => write!(f, "Sequential ascending digits"),
            PatternFinding::SequentialDescending => write!(f, "Sequential descending digits"),
            PatternFinding::Palindrome => write!(f, "Palindrome number"),
            PatternFinding::RepeatedBlock(block) => write!(f, "Repeated pattern: {}", block),
            PatternFinding::AdjacentDuplicate => write!(f, "Contains consecutive digit pairs"),
        }
    }
}

impl Serialize for PatternFinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Check whether every digit equals the first one
///
/// The empty string has no first digit and is not considered uniform.
pub fn detect_all_same_digit(digits: &str) -> bool {
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

/// Check whether the digits form an unbroken run in one direction
///
/// # Arguments
///
/// * `digits` - Digit string to check
/// * `ascending` - `true` for +1 steps, `false` for -1 steps
///
/// # Returns
///
/// `true` only for strings of at least two digits where every step matches.
/// There is no wraparound between 9 and 0.
pub fn detect_sequential(digits: &str, ascending: bool) -> bool {
    let values: Vec<Option<u32>> = digits.chars().map(|c| c.to_digit(10)).collect();
    if values.len() < 2 {
        return false;
    }

    values.windows(2).all(|pair| match (pair[0], pair[1]) {
        (Some(current), Some(next)) if ascending => next == current + 1,
        (Some(current), Some(next)) => current > 0 && next == current - 1,
        _ => false,
    })
}

/// Check whether the digits read the same in both directions
pub fn detect_palindrome(digits: &str) -> bool {
    digits.chars().eq(digits.chars().rev())
}

/// Find the shortest prefix whose repetition covers the number
///
/// Block lengths from 1 up to half the string are tried in order. A block
/// matches when every whole block-sized chunk equals the prefix; a trailing
/// remainder shorter than the block is not compared.
///
/// # Returns
///
/// The matching prefix, or `None` when no length qualifies
pub fn detect_repeated_block(digits: &str) -> Option<&str> {
    let bytes = digits.as_bytes();

    (1..=bytes.len() / 2)
        .find(|&len| {
            let block = &bytes[..len];
            bytes.chunks_exact(len).all(|chunk| chunk == block)
        })
        .and_then(|len| digits.get(..len))
}

/// Check whether any two neighbouring digits are equal
pub fn detect_adjacent_duplicate(digits: &str) -> bool {
    let chars: Vec<char> = digits.chars().collect();
    chars.windows(2).any(|pair| pair[0] == pair[1])
}

/// Run every pattern check in fixed order
///
/// Order: all-same, ascending, descending, palindrome, repeated block,
/// adjacent duplicate. Checks that do not trigger contribute nothing.
pub fn run_pattern_checks(digits: &str) -> Vec<PatternFinding> {
    let mut findings = Vec::new();

    if detect_all_same_digit(digits) {
        findings.push(PatternFinding::AllSameDigit);
    }

    if detect_sequential(digits, true) {
        findings.push(PatternFinding::SequentialAscending);
    }

    if detect_sequential(digits, false) {
        findings.push(PatternFinding::SequentialDescending);
    }

    if detect_palindrome(digits) {
        findings.push(PatternFinding::Palindrome);
    }

    if let Some(block) = detect_repeated_block(digits) {
        findings.push(PatternFinding::RepeatedBlock(block.to_string()));
    }

    if detect_adjacent_duplicate(digits) {
        findings.push(PatternFinding::AdjacentDuplicate);
    }

    findings
}

/// Counts describing the digit makeup of a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigitCharacteristics {
    pub total_digits: usize,
    pub even_digits: usize,
    pub odd_digits: usize,
    pub unique_digits: usize,
}

/// Count even, odd and distinct digits
pub fn digit_characteristics(digits: &str) -> DigitCharacteristics {
    let values: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    let mut unique: Vec<char> = digits.chars().collect();
    unique.sort_unstable();
    unique.dedup();

    DigitCharacteristics {
        total_digits: digits.chars().count(),
        even_digits: values.iter().filter(|d| *d % 2 == 0).count(),
        odd_digits: values.iter().filter(|d| *d % 2 == 1).count(),
        unique_digits: unique.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_digit() {
        for digit in '0'..='9' {
            let digits = digit.to_string();
            assert!(detect_all_same_digit(&digits), "{}", digits);
            assert!(detect_palindrome(&digits), "{}", digits);
            assert!(!detect_sequential(&digits, true), "{}", digits);
            assert!(!detect_sequential(&digits, false), "{}", digits);
            assert_eq!(detect_repeated_block(&digits), None);
            assert!(!detect_adjacent_duplicate(&digits), "{}", digits);
            assert_eq!(
                run_pattern_checks(&digits),
                vec![PatternFinding::AllSameDigit, PatternFinding::Palindrome]
            );
        }
    }

    #[test]
    fn test_empty_string() {
        assert!(!detect_all_same_digit(""));
        assert!(!detect_sequential("", true));
        assert!(!detect_sequential("", false));
        assert!(detect_palindrome(""));
        assert_eq!(detect_repeated_block(""), None);
        assert!(!detect_adjacent_duplicate(""));
        assert_eq!(run_pattern_checks(""), vec![PatternFinding::Palindrome]);
    }

    #[test]
    fn test_sequential_no_wraparound() {
        assert!(detect_sequential("1234567", true));
        assert!(detect_sequential("7654321", false));
        assert!(!detect_sequential("7890", true));
        assert!(!detect_sequential("3210987", false));
        assert!(!detect_sequential("1234567", false));
    }

    #[test]
    fn test_repeated_block() {
        assert_eq!(detect_repeated_block("0000000"), Some("0"));
        assert_eq!(detect_repeated_block("121212"), Some("12"));
        assert_eq!(detect_repeated_block("1221"), None);
        // Trailing remainder shorter than the block is not compared
        assert_eq!(detect_repeated_block("1231239"), Some("123"));
        assert_eq!(detect_repeated_block("6502530000"), None);
    }

    #[test]
    fn test_palindrome_and_pairs() {
        assert!(detect_palindrome("1221"));
        assert!(detect_palindrome("12321"));
        assert!(!detect_palindrome("1223"));
        assert!(detect_adjacent_duplicate("1221"));
        assert!(!detect_adjacent_duplicate("1212"));
    }

    #[test]
    fn test_check_order() {
        let findings = run_pattern_checks("0000000");
        assert_eq!(
            findings,
            vec![
                PatternFinding::AllSameDigit,
                PatternFinding::Palindrome,
                PatternFinding::RepeatedBlock("0".to_string()),
                PatternFinding::AdjacentDuplicate,
            ]
        );

        let descriptions: Vec<String> = run_pattern_checks("121212")
            .iter()
            .map(|f| f.to_string())
            .collect();
        assert_eq!(descriptions, vec!["Repeated pattern: 12"]);
    }

    #[test]
    fn test_checks_are_idempotent() {
        for digits in ["", "1221", "4155552671", "999"] {
            assert_eq!(run_pattern_checks(digits), run_pattern_checks(digits));
        }
    }

    #[test]
    fn test_digit_characteristics() {
        let stats = digit_characteristics("6502530000");
        assert_eq!(stats.total_digits, 10);
        assert_eq!(stats.even_digits, 7);
        assert_eq!(stats.odd_digits, 3);
        assert_eq!(stats.unique_digits, 5);
    }

    #[test]
    fn test_finding_serializes_as_description() {
        let json = serde_json::to_string(&PatternFinding::RepeatedBlock("12".into())).unwrap();
        assert_eq!(json, "\"Repeated pattern: 12\"");
    }
}
