//! Output formatter for lookup reports
//!
//! This module handles formatting and exporting lookup reports in various
//! formats, including console output, JSON, HTML, and CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use handlebars::Handlebars;
use serde_json::json;

use crate::core::analyzer::{LookupReport, NumberInfo};
use crate::core::risk::RiskLevel;
use crate::utils::web_search::WebSuggestions;

const BANNER: &str = r#"
        ____  _                        _                _
       |  _ \| |__   ___  _ __   ___  | |    ___   ___ | | ___   _ _ __
       | |_) | '_ \ / _ \| '_ \ / _ \ | |   / _ \ / _ \| |/ / | | | '_ \
       |  __/| | | | (_) | | | |  __/ | |__| (_) | (_) |   <| |_| | |_) |
       |_|   |_| |_|\___/|_| |_|\___| |_____\___/ \___/|_|\_\\__,_| .__/
                                                                  |_|
"#;

/// Tool banner shown before any analysis
pub fn banner() -> String {
    format!("{}\n", BANNER.cyan().bold())
}

fn section_header(title: &str) -> String {
    let rule = "=".repeat(60);
    format!("\n{}\n{}\n{}\n", rule, title.bold(), rule)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "✅ Yes"
    } else {
        "❌ No"
    }
}

/// Risk level with its traffic-light marker
pub fn risk_label(level: RiskLevel) -> String {
    match level {
        RiskLevel::Low => format!("🟢 {}", level).green().to_string(),
        RiskLevel::Medium => format!("🟡 {}", level).yellow().to_string(),
        RiskLevel::High => format!("🔴 {}", level).red().bold().to_string(),
    }
}

/// Message shown when the input is not a usable number
pub fn format_invalid_input() -> String {
    format!(
        "{}\n   Example: +14155552671 (US) or +442079460000 (UK)\n",
        "❌ Invalid phone number format. Use international format: +1234567890".red()
    )
}

fn format_basic(info: &NumberInfo, country: Option<&str>, verbose: bool) -> String {
    let mut output = section_header("🔍 BASIC PHONE NUMBER ANALYSIS");

    let timezones = if info.timezones.is_empty() {
        "Unknown".to_string()
    } else {
        info.timezones.join(", ")
    };

    output.push_str(&format!("\n{}\n", "📊 Basic Information:".cyan().bold()));
    output.push_str(&format!("  International: {}\n", info.international));
    output.push_str(&format!("  National:      {}\n", info.national_format));
    output.push_str(&format!("  E164:          {}\n", info.e164));
    output.push_str(&format!("  Valid:         {}\n", yes_no(info.valid)));
    output.push_str(&format!("  Possible:      {}\n", yes_no(info.possible)));
    output.push_str(&format!("  Type:          {}\n", info.line_type.label()));
    output.push_str(&format!("  Location:      {}\n", info.location));
    output.push_str(&format!("  Carrier:       {}\n", info.carrier));
    output.push_str(&format!("  Country Code:  +{}\n", info.country_code));
    output.push_str(&format!("  National No:   {}\n", info.national_number));
    output.push_str(&format!("  Timezones:     {}\n", timezones));

    if verbose {
        output.push_str(&format!("\n{}\n", "🔍 Verbose Information:".cyan().bold()));
        output.push_str(&format!("  Raw Type:       {}\n", info.line_type));
        output.push_str(&format!("  RFC 3966:       {}\n", info.rfc3966));
        output.push_str(&format!(
            "  Country Source: {}\n",
            country.unwrap_or("Unknown")
        ));
    }

    output
}

fn format_advanced(report: &LookupReport) -> String {
    let advanced = &report.advanced;
    let mut output = section_header("🔬 ADVANCED ANALYSIS");

    output.push_str(&format!("\n{}\n", "📈 Number Pattern Analysis:".cyan().bold()));
    output.push_str(&format!("  Total digits: {}\n", advanced.characteristics.total_digits));

    if !advanced.patterns.is_empty() {
        output.push_str("  🎭 Detected Patterns:\n");
        for pattern in &advanced.patterns {
            output.push_str(&format!("    • {}\n", pattern));
        }
    }

    output.push_str(&format!(
        "  🎯 Risk Level: {} - {}\n",
        risk_label(advanced.risk.level),
        advanced.risk.reason()
    ));

    output.push_str(&format!("\n{}\n", "🔢 Number Characteristics:".cyan().bold()));
    output.push_str(&format!("  Even digits: {}\n", advanced.characteristics.even_digits));
    output.push_str(&format!("  Odd digits: {}\n", advanced.characteristics.odd_digits));
    output.push_str(&format!("  Unique digits: {}\n", advanced.characteristics.unique_digits));

    if let Some(country) = &advanced.country {
        output.push_str(&format!("\n{}\n", "🌍 Country Information:".cyan().bold()));
        output.push_str(&format!("  Country: {}\n", country));

        if let Some(check) = &advanced.length_check {
            let status = if check.typical { "✅ Normal" } else { "⚠️  Atypical" };
            output.push_str(&format!("  Typical length: {} digits ({})\n", check.expected, status));
        }
    }

    output
}

fn format_web(web: &WebSuggestions) -> String {
    let mut output = section_header("🌐 WEB SEARCH");

    output.push_str(&format!(
        "\n{}\n",
        "⚠️  Web search features should be used responsibly".yellow()
    ));
    output.push_str("   Respect robots.txt and terms of service\n");

    output.push_str(&format!("\n{}\n", "🔍 Suggested search queries:".cyan().bold()));
    for query in &web.queries {
        output.push_str(&format!("  • {}\n", query.query));
        output.push_str(&format!("    {}\n", query.url));
    }

    output.push_str(&format!("\n{}\n", "📡 Free APIs:".cyan().bold()));
    for api in &web.apis {
        output.push_str(&format!("  • {}: {}\n", api.name, api.note));
    }

    output
}

fn format_summary(report: &LookupReport) -> String {
    let mut output = section_header("📋 SUMMARY REPORT");

    output.push_str(&format!("\n📱 Target: {}\n", report.target));
    output.push_str(&format!("📅 Generated: {}\n", report.generated));
    output.push_str(&format!("\n✅ Valid: {}\n", if report.info.valid { "Yes" } else { "No" }));
    output.push_str(&format!("🌍 Location: {}\n", report.info.location));
    output.push_str(&format!("📞 Carrier: {}\n", report.info.carrier));
    output.push_str(&format!("🎯 Type: {}\n", report.info.line_type.label()));
    output.push_str(&format!(
        "⚖️  Risk: {} - {}\n",
        risk_label(report.advanced.risk.level),
        report.advanced.risk.reason()
    ));

    output
}

/// Format a lookup report for console output
///
/// # Arguments
///
/// * `report` - Report to render
/// * `verbose` - Include raw line type and region source details
/// * `use_markdown` - Whether to wrap output in markdown triple backticks
///
/// # Returns
///
/// Formatted string for console output
pub fn format_report(report: &LookupReport, verbose: bool, use_markdown: bool) -> String {
    let mut output = String::new();

    if use_markdown {
        output.push_str("```\n");
    }

    output.push_str(&format!("🎯 Analyzing: {}\n", report.target));
    output.push_str(&format_basic(&report.info, report.advanced.country.as_deref(), verbose));
    output.push_str(&format_advanced(report));

    if let Some(web) = &report.web {
        output.push_str(&format_web(web));
    }

    output.push_str(&format_summary(report));

    let rule = "=".repeat(60);
    output.push_str(&format!("\n{}\n", rule));
    output.push_str(&format!("{}\n", "✅ Analysis complete!".green().bold()));
    output.push_str("⚠️  Remember: Use this tool responsibly and legally\n");
    output.push_str(&format!("{}\n", rule));

    if use_markdown {
        output.push_str("```\n");
    }

    output
}

/// Export a report to a JSON file
///
/// # Arguments
///
/// * `report` - Report to export
/// * `output_path` - Path where the JSON file will be written
pub fn export_results_json(report: &LookupReport, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create JSON output file: {}", output_path.display()))?;

    serde_json::to_writer_pretty(file, report)
        .context("Failed to write JSON data")?;

    Ok(())
}

/// Flatten a report into (section, field, value) rows
fn report_rows(report: &LookupReport) -> Vec<(&'static str, String, String)> {
    let info = &report.info;
    let advanced = &report.advanced;
    let mut rows = vec![
        ("Basic Information", "International".to_string(), info.international.clone()),
        ("Basic Information", "National".to_string(), info.national_format.clone()),
        ("Basic Information", "E164".to_string(), info.e164.clone()),
        ("Basic Information", "Valid".to_string(), info.valid.to_string()),
        ("Basic Information", "Possible".to_string(), info.possible.to_string()),
        ("Basic Information", "Type".to_string(), info.line_type.to_string()),
        ("Basic Information", "Location".to_string(), info.location.clone()),
        ("Basic Information", "Carrier".to_string(), info.carrier.clone()),
        ("Basic Information", "Country Code".to_string(), format!("+{}", info.country_code)),
        ("Basic Information", "National Number".to_string(), info.national_number.clone()),
        ("Basic Information", "Timezones".to_string(), info.timezones.join(", ")),
    ];

    for pattern in &advanced.patterns {
        rows.push(("Detected Patterns", "Pattern".to_string(), pattern.to_string()));
    }

    rows.push(("Risk Assessment", "Level".to_string(), advanced.risk.level.to_string()));
    rows.push(("Risk Assessment", "Score".to_string(), advanced.risk.score.to_string()));
    rows.push(("Risk Assessment", "Reason".to_string(), advanced.risk.reason()));

    let stats = &advanced.characteristics;
    rows.push(("Number Characteristics", "Total Digits".to_string(), stats.total_digits.to_string()));
    rows.push(("Number Characteristics", "Even Digits".to_string(), stats.even_digits.to_string()));
    rows.push(("Number Characteristics", "Odd Digits".to_string(), stats.odd_digits.to_string()));
    rows.push(("Number Characteristics", "Unique Digits".to_string(), stats.unique_digits.to_string()));

    if let Some(check) = &advanced.length_check {
        rows.push((
            "Country Information",
            "Typical Length".to_string(),
            format!("{} ({})", check.expected, if check.typical { "Normal" } else { "Atypical" }),
        ));
    }

    if let Some(web) = &report.web {
        for query in &web.queries {
            rows.push(("Web Search", query.query.clone(), query.url.clone()));
        }
        for api in &web.apis {
            rows.push(("Free APIs", api.name.clone(), format!("{} ({})", api.url, api.note)));
        }
    }

    rows
}

/// Create an HTML report from a lookup report
///
/// # Arguments
///
/// * `report` - Report to render
/// * `output_path` - Path where the HTML file will be written
pub fn create_html_report(report: &LookupReport, output_path: &Path) -> Result<()> {
    let mut handlebars = Handlebars::new();

    const HTML_TEMPLATE: &str = r#"
    <!DOCTYPE html>
    <html lang="en">
    <head>
        <meta charset="UTF-8">
        <meta name="viewport" content="width=device-width, initial-scale=1.0">
        <title>Phone Lookup Report</title>
        <style>
            body {
                font-family: Arial, sans-serif;
                line-height: 1.6;
                color: #333;
                max-width: 1000px;
                margin: 0 auto;
                padding: 20px;
            }
            h1 {
                color: #2c3e50;
                border-bottom: 2px solid #3498db;
                padding-bottom: 10px;
            }
            h2 {
                color: #2980b9;
                margin-top: 30px;
            }
            .timestamp {
                color: #7f8c8d;
                font-size: 0.9em;
                margin-bottom: 30px;
            }
            .summary {
                background-color: #e8f4f8;
                padding: 15px;
                border-radius: 5px;
                margin-bottom: 30px;
            }
            .risk-Low { color: #27ae60; }
            .risk-Medium { color: #f39c12; }
            .risk-High { color: #c0392b; font-weight: bold; }
            table {
                border-collapse: collapse;
                width: 100%;
            }
            td {
                padding: 5px 10px;
                border-bottom: 1px solid #eee;
                word-break: break-all;
            }
            td.field {
                width: 30%;
                font-weight: bold;
            }
        </style>
    </head>
    <body>
        <h1>Phone Lookup Report</h1>
        <div class="timestamp">Generated on: {{timestamp}}</div>

        <div class="summary">
            <h2>Summary</h2>
            <p>Target: {{target}}</p>
            <p>Risk: <span class="risk-{{risk_level}}">{{risk_level}}</span> - {{risk_reason}}</p>
        </div>

        {{#each sections}}
        <h2>{{name}}</h2>
        <table>
            {{#each rows}}
            <tr><td class="field">{{field}}</td><td>{{value}}</td></tr>
            {{/each}}
        </table>
        {{/each}}
    </body>
    </html>
    "#;

    handlebars.register_template_string("report", HTML_TEMPLATE)
        .context("Failed to register HTML template")?;

    // Group consecutive rows by section, preserving order
    let mut grouped: Vec<(&str, Vec<serde_json::Value>)> = Vec::new();
    for (section, field, value) in report_rows(report) {
        let row = json!({ "field": field, "value": value });
        match grouped.last_mut() {
            Some((name, rows)) if *name == section => rows.push(row),
            _ => grouped.push((section, vec![row])),
        }
    }
    let sections: Vec<_> = grouped
        .into_iter()
        .map(|(name, rows)| json!({ "name": name, "rows": rows }))
        .collect();

    let template_data = json!({
        "timestamp": report.generated,
        "target": report.target,
        "risk_level": report.advanced.risk.level.to_string(),
        "risk_reason": report.advanced.risk.reason(),
        "sections": sections,
    });

    let html = handlebars.render("report", &template_data)
        .context("Failed to render HTML template")?;

    let mut file = File::create(output_path)
        .context(format!("Failed to create HTML output file: {}", output_path.display()))?;

    file.write_all(html.as_bytes())
        .context("Failed to write HTML data")?;

    Ok(())
}

/// Create a CSV report from a lookup report
///
/// # Arguments
///
/// * `report` - Report to export
/// * `output_path` - Path where the CSV file will be written
pub fn create_csv_report(report: &LookupReport, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create CSV output file: {}", output_path.display()))?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(["Section", "Field", "Value"])
        .context("Failed to write CSV header")?;

    for (section, field, value) in report_rows(report) {
        writer.write_record([section, field.as_str(), value.as_str()])
            .context("Failed to write CSV record")?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analyzer::AdvancedAnalysis;
    use crate::core::numbering_plan::LineType;
    use crate::core::patterns::{self, PatternFinding};
    use crate::core::risk;
    use crate::utils::web_search;

    fn sample_report(digits: &str, web: bool) -> LookupReport {
        LookupReport {
            target: format!("+1{}", digits),
            generated: "2026-01-01 12:00:00".to_string(),
            info: NumberInfo {
                international: format!("+1 {}", digits),
                national_format: digits.to_string(),
                e164: format!("+1{}", digits),
                rfc3966: format!("tel:+1-{}", digits),
                valid: true,
                possible: true,
                line_type: LineType::FixedLineOrMobile,
                location: "United States".to_string(),
                carrier: "Unknown".to_string(),
                timezones: vec!["America/New_York".to_string()],
                country_code: 1,
                region_code: Some("US".to_string()),
                national_number: digits.to_string(),
            },
            advanced: AdvancedAnalysis {
                digits: digits.to_string(),
                patterns: patterns::run_pattern_checks(digits),
                risk: risk::assess_risk(digits),
                characteristics: patterns::digit_characteristics(digits),
                country: Some("United States".to_string()),
                length_check: None,
            },
            web: web.then(|| web_search::suggestions(&format!("+1{}", digits))),
        }
    }

    #[test]
    fn test_format_report_sections() {
        let report = sample_report("1234567", false);
        let output = format_report(&report, false, false);

        assert!(output.contains("BASIC PHONE NUMBER ANALYSIS"));
        assert!(output.contains("Sequential ascending digits"));
        assert!(output.contains("Sequential digits"));
        assert!(output.contains("Medium"));
        assert!(output.contains("Possible:"));
        assert!(!output.contains("WEB SEARCH"));
        assert!(!output.contains("Verbose Information"));
    }

    #[test]
    fn test_format_report_verbose_and_markdown() {
        let report = sample_report("6502530000", true);
        let output = format_report(&report, true, true);

        assert!(output.starts_with("```\n"));
        assert!(output.ends_with("```\n"));
        assert!(output.contains("Verbose Information"));
        assert!(output.contains("Country Source: United States"));
        assert!(!output.contains("Country Source: US\n"));
        assert!(output.contains("WEB SEARCH"));
        assert!(output.contains(&PatternFinding::AdjacentDuplicate.to_string()));
    }

    #[test]
    fn test_export_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        export_results_json(&sample_report("0000000", false), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["advanced"]["risk"]["level"], "High");
        assert_eq!(value["advanced"]["patterns"][0], "All digits are the same");
        assert!(value["web"].is_null());
    }

    #[test]
    fn test_export_csv_and_html() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report("121212", true);

        let csv_path = dir.path().join("report.csv");
        create_csv_report(&report, &csv_path).unwrap();
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        assert!(csv.starts_with("Section,Field,Value"));
        assert!(csv.contains("Detected Patterns,Pattern,Repeated pattern: 12"));
        assert!(csv.contains("Basic Information,Possible,true"));
        assert!(csv.contains("Free APIs,NumVerify,"));
        assert!(csv.contains("Free APIs,AbstractAPI,"));

        let html_path = dir.path().join("report.html");
        create_html_report(&report, &html_path).unwrap();
        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("Phone Lookup Report"));
        assert!(html.contains("risk-Medium"));
        assert!(html.contains("Repeated pattern: 12"));
        assert!(html.contains("NumVerify"));
    }
}
