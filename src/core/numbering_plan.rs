//! Numbering plan collaborator
//!
//! Parsing, validation, formatting and region resolution for phone numbers.
//! The analyzer only talks to the [`NumberingPlan`] trait; [`PhonenumberPlan`]
//! is the default implementation over the `phonenumber` crate and the bundled
//! region table.

use std::fmt;

use log::debug;
use phonenumber::country;
use phonenumber::metadata::DATABASE;
use phonenumber::{Mode, PhoneNumber, Type};
use serde::Serialize;

use crate::core::regions;

/// Errors surfaced by number lookups
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The input could not be parsed as a phone number
    #[error("Failed to parse phone number: {0}")]
    Parse(String),

    /// The input parsed but is not a valid number in its region
    #[error("Invalid phone number: {0}")]
    InvalidNumber(String),

    /// A configured default region is not a known region code
    #[error("Unknown region code: {0}")]
    InvalidRegion(String),
}

/// Output style for formatted numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    E164,
    International,
    National,
    Rfc3966,
}

/// Kind of line a number is allocated to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineType {
    Mobile,
    FixedLine,
    FixedLineOrMobile,
    Voip,
    TollFree,
    PremiumRate,
    SharedCost,
    PersonalNumber,
    Pager,
    Uan,
    Voicemail,
    Unknown,
}

impl LineType {
    /// Console label with an emoji marker
    pub fn label(&self) -> &'static str {
        match self {
            LineType::Mobile => "📱 Mobile",
            LineType::FixedLine => "🏠 Fixed Line",
            LineType::FixedLineOrMobile => "📞 Fixed Line or Mobile",
            LineType::Voip => "💻 VOIP",
            LineType::TollFree => "🆓 Toll Free",
            LineType::PremiumRate => "💰 Premium Rate",
            LineType::SharedCost => "👥 Shared Cost",
            LineType::PersonalNumber => "👤 Personal Number",
            LineType::Pager => "📟 Pager",
            LineType::Uan => "🏢 UAN",
            LineType::Voicemail => "📭 Voicemail",
            LineType::Unknown => "❓ Unknown",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Source of phone number metadata
pub trait NumberingPlan {
    /// Parsed number representation
    type Number;

    /// Parse raw user input
    fn parse(&self, raw: &str) -> Result<Self::Number, LookupError>;

    /// Whether the number is assigned in its region's plan
    fn is_valid(&self, number: &Self::Number) -> bool;

    /// Whether the number length fits its country's plan, assigned or not
    fn is_possible(&self, number: &Self::Number) -> bool;

    /// Render the number in the given style
    fn format(&self, number: &Self::Number, style: NumberFormat) -> String;

    /// ISO region code such as "US"
    fn region_code(&self, number: &Self::Number) -> Option<String>;

    /// English country name
    fn region_name(&self, number: &Self::Number) -> Option<String>;

    /// Most specific location description available
    fn location(&self, number: &Self::Number) -> Option<String> {
        self.region_name(number)
    }

    /// Carrier the number range was allocated to
    fn carrier_name(&self, number: &Self::Number) -> Option<String>;

    /// IANA timezones the number may be in
    fn timezones(&self, number: &Self::Number) -> Vec<String>;

    fn line_type(&self, number: &Self::Number) -> LineType;

    /// Country calling code without the leading plus
    fn country_code(&self, number: &Self::Number) -> u16;

    /// National significant number as a digit string
    fn national_number(&self, number: &Self::Number) -> String;
}

/// Numbering plan backed by libphonenumber metadata
#[derive(Debug, Clone, Default)]
pub struct PhonenumberPlan {
    default_region: Option<country::Id>,
}

impl PhonenumberPlan {
    /// Create a plan that requires international (`+`) input
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plan that resolves national-format input against a region
    ///
    /// # Arguments
    ///
    /// * `region_code` - ISO 3166-1 alpha-2 code, e.g. "GB"
    pub fn with_default_region(region_code: &str) -> Result<Self, LookupError> {
        let id = region_code
            .trim()
            .to_ascii_uppercase()
            .parse::<country::Id>()
            .map_err(|_| LookupError::InvalidRegion(region_code.to_string()))?;

        Ok(Self { default_region: Some(id) })
    }

    fn region_info(&self, number: &PhoneNumber) -> Option<&'static regions::RegionInfo> {
        self.region_code(number)
            .and_then(|code| regions::lookup(&code))
    }
}

impl NumberingPlan for PhonenumberPlan {
    type Number = PhoneNumber;

    fn parse(&self, raw: &str) -> Result<PhoneNumber, LookupError> {
        debug!("Parsing {} (default region: {:?})", raw, self.default_region);
        phonenumber::parse(self.default_region, raw)
            .map_err(|e| LookupError::Parse(e.to_string()))
    }

    fn is_valid(&self, number: &PhoneNumber) -> bool {
        phonenumber::is_valid(number)
    }

    fn is_possible(&self, number: &PhoneNumber) -> bool {
        let national = number.national();
        let length = national.value().to_string().len() + usize::from(national.zeros());

        DATABASE
            .by_code(&number.country().code())
            .map(|plans| {
                plans.iter().any(|meta| {
                    meta.descriptors()
                        .general()
                        .possible_length()
                        .iter()
                        .any(|&possible| usize::from(possible) == length)
                })
            })
            .unwrap_or(false)
    }

    fn format(&self, number: &PhoneNumber, style: NumberFormat) -> String {
        let mode = match style {
            NumberFormat::E164 => Mode::E164,
            NumberFormat::International => Mode::International,
            NumberFormat::National => Mode::National,
            NumberFormat::Rfc3966 => Mode::Rfc3966,
        };
        phonenumber::format(number).mode(mode).to_string()
    }

    fn region_code(&self, number: &PhoneNumber) -> Option<String> {
        number.country().id().map(|id| format!("{:?}", id))
    }

    fn region_name(&self, number: &PhoneNumber) -> Option<String> {
        self.region_info(number).map(|info| info.name.to_string())
    }

    fn carrier_name(&self, _number: &PhoneNumber) -> Option<String> {
        // No carrier prefix data is bundled
        None
    }

    fn timezones(&self, number: &PhoneNumber) -> Vec<String> {
        self.region_info(number)
            .map(|info| info.timezones.iter().map(|tz| tz.to_string()).collect())
            .unwrap_or_default()
    }

    fn line_type(&self, number: &PhoneNumber) -> LineType {
        match number.number_type(&DATABASE) {
            Type::Mobile => LineType::Mobile,
            Type::FixedLine => LineType::FixedLine,
            Type::FixedLineOrMobile => LineType::FixedLineOrMobile,
            Type::Voip => LineType::Voip,
            Type::TollFree => LineType::TollFree,
            Type::PremiumRate => LineType::PremiumRate,
            Type::SharedCost => LineType::SharedCost,
            Type::PersonalNumber => LineType::PersonalNumber,
            Type::Pager => LineType::Pager,
            Type::Uan => LineType::Uan,
            Type::Voicemail => LineType::Voicemail,
            _ => LineType::Unknown,
        }
    }

    fn country_code(&self, number: &PhoneNumber) -> u16 {
        number.country().code()
    }

    fn national_number(&self, number: &PhoneNumber) -> String {
        number.national().value().to_string()
    }
}
