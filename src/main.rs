//! Phone Lookup - phone number analysis for security research
//!
//! The main entry point for the phone lookup application. It parses
//! command-line arguments and coordinates the analysis and report output.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{ArgAction, Parser};
use colored::Colorize;
use log::{error, info, warn, LevelFilter};

use phone_lookup::app;
use phone_lookup::config::LookupConfig;
use phone_lookup::utils::output_formatter;
use phone_lookup::{AnalysisOptions, LookupError};

const EXAMPLES: &str = "Examples:
  phone_lookup +14155552671
  phone_lookup +442079460000 --verbose
  phone_lookup +33145006000 --web
  phone_lookup 020 7946 0000 --region GB --json report.json
  phone_lookup +1234567890 --all

Legal Notice:
  This tool is for educational and authorized testing purposes only.
  Users are responsible for complying with all applicable laws.";

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "phone_lookup",
    version,
    about = "Phone Number Lookup Tool - Comprehensive phone number analysis",
    long_about = "This tool analyzes a phone number and reports:
- Formats, validity and line type from libphonenumber metadata
- Region, location and timezones
- Digit patterns (sequences, repeats, palindromes) and a risk level
- Optional web search suggestions",
    after_help = EXAMPLES
)]
struct Args {
    /// Phone number in international format (e.g., +1234567890)
    #[arg(name = "phone_number", num_args = 1.., required = true)]
    phone_number: Vec<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,

    /// Enable web search suggestions
    #[arg(short = 'w', long = "web", action = ArgAction::SetTrue)]
    web: bool,

    /// Run all analysis types
    #[arg(short = 'a', long = "all", action = ArgAction::SetTrue)]
    all: bool,

    /// Default region for numbers without a country code (e.g., GB)
    #[arg(long = "region")]
    region: Option<String>,

    /// Output in markdown format (wrapped in triple backticks)
    #[arg(long = "md", action = ArgAction::SetTrue)]
    md: bool,

    /// Export the report to a JSON file
    #[arg(long = "json")]
    json: Option<String>,

    /// Export the report to an HTML file
    #[arg(long = "html")]
    html: Option<String>,

    /// Export the report to a CSV file
    #[arg(long = "csv")]
    csv: Option<String>,

    /// Suppress terminal output
    #[arg(long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Do not print the banner
    #[arg(long = "no-banner", action = ArgAction::SetTrue)]
    no_banner: bool,

    /// Path to configuration file
    #[arg(long = "config")]
    config: Option<String>,

    /// Set logging level (default: INFO, or `log_level` from the config file)
    #[arg(long = "log-level")]
    log_level: Option<LevelFilter>,

    /// Log file path (default: phone_lookup.log, or `log_file` from the config file)
    #[arg(long = "log-file")]
    log_file: Option<String>,
}

/// Outcome of reading the configuration file, logged once logging is set up
enum ConfigStatus {
    Defaults,
    Loaded(String),
    Failed(String),
}

impl ConfigStatus {
    fn log(&self) {
        match self {
            ConfigStatus::Defaults => {}
            ConfigStatus::Loaded(path) => info!("Loaded configuration from {}", path),
            ConfigStatus::Failed(message) => error!("{}", message),
        }
    }
}

/// Main entry point function
fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, status) = load_config(&args.config)?;

    let (log_level, bad_level) = match (args.log_level, config.log_level_filter()) {
        (Some(level), _) => (level, None),
        (None, Ok(level)) => (level.unwrap_or(LevelFilter::Info), None),
        (None, Err(text)) => (LevelFilter::Info, Some(text)),
    };
    let log_file = args
        .log_file
        .clone()
        .or_else(|| config.log_file.clone())
        .unwrap_or_else(|| "phone_lookup.log".to_string());

    let _ = setup_logging(log_level, &log_file);
    status.log();
    if let Some(text) = bad_level {
        warn!("Unknown log level in configuration: {}", text);
    }

    if let Some(region) = &args.region {
        config.default_region = Some(region.trim().to_ascii_uppercase());
    }

    let verbose = args.verbose || args.all || config.verbose;
    let options = AnalysisOptions {
        web_search: args.web || args.all,
    };

    // Numbers may be passed with spaces, e.g. `020 7946 0000`
    let phone_number = args.phone_number.join(" ");

    if !args.quiet && !args.no_banner {
        println!("{}", output_formatter::banner());
    }

    let report = match app::run_lookup(&phone_number, &config, options) {
        Ok(report) => report,
        Err(e @ (LookupError::Parse(_) | LookupError::InvalidNumber(_))) => {
            error!("Lookup failed for {}: {}", phone_number, e);
            eprint!("{}", output_formatter::format_invalid_input());
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    export_report(&report, &args)?;

    if !args.quiet {
        println!("{}", output_formatter::format_report(&report, verbose, args.md));
    }

    Ok(())
}

/// Set up logging with file output
fn setup_logging(log_level: LevelFilter, log_file: &str) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    builder.filter_level(log_level);

    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Ok(file) = File::create(log_file) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;

    Ok(())
}

/// Load configuration from file if provided
///
/// A missing or malformed file falls back to the defaults.
fn load_config(config_path: &Option<String>) -> Result<(LookupConfig, ConfigStatus)> {
    let loaded = match config_path {
        Some(path) => {
            let path = Path::new(path);
            if !path.exists() {
                let message = format!("Configuration file not found: {}", path.display());
                (LookupConfig::default(), ConfigStatus::Failed(message))
            } else {
                let config_str = std::fs::read_to_string(path)?;
                let parsed = serde_json::from_str::<serde_json::Value>(&config_str)
                    .and_then(|value| LookupConfig::from_value(&value));
                match parsed {
                    Ok(config) => (config, ConfigStatus::Loaded(path.display().to_string())),
                    Err(e) => {
                        let message = format!("Invalid JSON in configuration file: {}", e);
                        (LookupConfig::default(), ConfigStatus::Failed(message))
                    }
                }
            }
        }
        None => (LookupConfig::default(), ConfigStatus::Defaults),
    };

    Ok(loaded)
}

/// Write the report to every export target requested on the command line
fn export_report(report: &phone_lookup::LookupReport, args: &Args) -> Result<()> {
    if let Some(json_path) = &args.json {
        output_formatter::export_results_json(report, &PathBuf::from(json_path))?;
        info!("Wrote JSON report to {}", json_path);
    }

    if let Some(html_path) = &args.html {
        output_formatter::create_html_report(report, &PathBuf::from(html_path))?;
        info!("Wrote HTML report to {}", html_path);
    }

    if let Some(csv_path) = &args.csv {
        output_formatter::create_csv_report(report, &PathBuf::from(csv_path))?;
        info!("Wrote CSV report to {}", csv_path);
    }

    if !args.quiet && (args.json.is_some() || args.html.is_some() || args.csv.is_some()) {
        println!("{}", "Reports exported".green());
    }

    Ok(())
}
