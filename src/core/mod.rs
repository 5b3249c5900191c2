//! Core module for phone number analysis
//!
//! This module contains the numbering plan collaborator, the bundled region
//! table, digit pattern heuristics, risk scoring and the analyzer tying them
//! together.

pub mod analyzer;
pub mod numbering_plan;
pub mod patterns;
pub mod regions;
pub mod risk;
