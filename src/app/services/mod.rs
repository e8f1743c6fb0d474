//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Save and open workflows
//! - RTF reading and writing
//! - Status reporting
//! - Text operations

pub mod persistence;
pub mod rtf;
pub mod status;
pub mod text_ops;
