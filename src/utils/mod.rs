//! Utility modules for the phone lookup tool
//!
//! This module contains output formatting and web search suggestion helpers.

pub mod output_formatter;
pub mod web_search;
