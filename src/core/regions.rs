//! Bundled region metadata
//!
//! Country names, IANA timezones and typical national number lengths keyed by
//! ISO 3166-1 alpha-2 region code. Complements the numbering plan metadata
//! shipped with the `phonenumber` crate, which carries no geographic names.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Static description of one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionInfo {
    /// English country name
    pub name: &'static str,
    /// IANA timezones covering the region
    pub timezones: &'static [&'static str],
    /// Usual length of a national significant number, when well defined
    pub typical_length: Option<usize>,
}

const fn region(
    name: &'static str,
    timezones: &'static [&'static str],
    typical_length: Option<usize>,
) -> RegionInfo {
    RegionInfo { name, timezones, typical_length }
}

lazy_static! {
    static ref REGIONS: HashMap<&'static str, RegionInfo> = {
        let mut regions = HashMap::new();
        regions.insert("US", region("United States", &[
            "America/New_York", "America/Chicago", "America/Denver",
            "America/Los_Angeles", "America/Anchorage", "Pacific/Honolulu",
        ], Some(10)));
        regions.insert("CA", region("Canada", &[
            "America/St_Johns", "America/Halifax", "America/Toronto",
            "America/Winnipeg", "America/Edmonton", "America/Vancouver",
        ], Some(10)));
        regions.insert("GB", region("United Kingdom", &["Europe/London"], Some(10)));
        regions.insert("IE", region("Ireland", &["Europe/Dublin"], None));
        regions.insert("AU", region("Australia", &[
            "Australia/Sydney", "Australia/Brisbane", "Australia/Adelaide",
            "Australia/Darwin", "Australia/Perth",
        ], Some(9)));
        regions.insert("NZ", region("New Zealand", &["Pacific/Auckland"], None));
        regions.insert("DE", region("Germany", &["Europe/Berlin"], Some(10)));
        regions.insert("FR", region("France", &["Europe/Paris"], Some(9)));
        regions.insert("IT", region("Italy", &["Europe/Rome"], Some(10)));
        regions.insert("ES", region("Spain", &["Europe/Madrid", "Atlantic/Canary"], Some(9)));
        regions.insert("PT", region("Portugal", &["Europe/Lisbon", "Atlantic/Azores"], None));
        regions.insert("NL", region("Netherlands", &["Europe/Amsterdam"], None));
        regions.insert("BE", region("Belgium", &["Europe/Brussels"], None));
        regions.insert("CH", region("Switzerland", &["Europe/Zurich"], None));
        regions.insert("AT", region("Austria", &["Europe/Vienna"], None));
        regions.insert("SE", region("Sweden", &["Europe/Stockholm"], None));
        regions.insert("NO", region("Norway", &["Europe/Oslo"], None));
        regions.insert("DK", region("Denmark", &["Europe/Copenhagen"], None));
        regions.insert("FI", region("Finland", &["Europe/Helsinki"], None));
        regions.insert("PL", region("Poland", &["Europe/Warsaw"], None));
        regions.insert("UA", region("Ukraine", &["Europe/Kyiv"], None));
        regions.insert("RU", region("Russia", &[
            "Europe/Moscow", "Asia/Yekaterinburg", "Asia/Novosibirsk",
            "Asia/Vladivostok",
        ], None));
        regions.insert("TR", region("Turkey", &["Europe/Istanbul"], None));
        regions.insert("IL", region("Israel", &["Asia/Jerusalem"], None));
        regions.insert("AE", region("United Arab Emirates", &["Asia/Dubai"], None));
        regions.insert("IN", region("India", &["Asia/Kolkata"], Some(10)));
        regions.insert("CN", region("China", &["Asia/Shanghai"], None));
        regions.insert("JP", region("Japan", &["Asia/Tokyo"], None));
        regions.insert("KR", region("South Korea", &["Asia/Seoul"], None));
        regions.insert("SG", region("Singapore", &["Asia/Singapore"], None));
        regions.insert("BR", region("Brazil", &[
            "America/Sao_Paulo", "America/Manaus", "America/Fortaleza",
            "America/Noronha",
        ], Some(11)));
        regions.insert("MX", region("Mexico", &[
            "America/Mexico_City", "America/Cancun", "America/Tijuana",
        ], None));
        regions.insert("AR", region("Argentina", &["America/Argentina/Buenos_Aires"], None));
        regions.insert("ZA", region("South Africa", &["Africa/Johannesburg"], None));
        regions.insert("NG", region("Nigeria", &["Africa/Lagos"], None));
        regions.insert("EG", region("Egypt", &["Africa/Cairo"], None));
        regions
    };
}

/// Look up bundled metadata for a region code such as "US"
pub fn lookup(region_code: &str) -> Option<&'static RegionInfo> {
    REGIONS.get(region_code)
}

/// Typical national number length for a region
pub fn typical_length(region_code: &str) -> Option<usize> {
    lookup(region_code).and_then(|info| info.typical_length)
}
