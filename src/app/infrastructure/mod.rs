//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - User prompts (file choosers, confirmations, alerts)
//! - Error report files
//! - Error types

pub mod error;
pub mod error_report;
pub mod prompts;

#[cfg(test)]
pub(crate) mod testing;
