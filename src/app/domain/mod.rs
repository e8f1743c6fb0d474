//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Character attributes and run-based styled text
//! - Document and DocumentId
//! - File formats
//! - Application settings
//! - Message types for the command path

pub mod attributes;
pub mod document;
pub mod file_format;
pub mod messages;
pub mod settings;
pub mod styled_text;

pub use attributes::{AttributeChange, CharAttributes};
pub use document::{Document, DocumentId};
pub use file_format::FileFormat;
pub use messages::Message;
pub use settings::{AppSettings, PlainSaveMode};
pub use styled_text::{StyledRun, StyledText};
