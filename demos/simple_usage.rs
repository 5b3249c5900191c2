//! Simple example demonstrating how to use the Phone Lookup library

use anyhow::Result;
use phone_lookup::{analyze_number, assess_risk, run_pattern_checks};

fn main() -> Result<()> {
    let phone_number = "+16502530000";
    println!("Analyzing number: {}", phone_number);

    let report = analyze_number(phone_number)?;
    println!("International: {}", report.info.international);
    println!("Location:      {}", report.info.location);
    println!("Risk:          {} - {}", report.advanced.risk.level, report.advanced.risk.reason());

    // The pattern heuristics also work on bare digit strings
    for digits in ["0000000", "1234567", "121212"] {
        let risk = assess_risk(digits);
        println!("\n{} ({}):", digits, risk.level);
        for pattern in run_pattern_checks(digits) {
            println!("  - {}", pattern);
        }
    }

    Ok(())
}
