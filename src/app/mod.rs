//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (StyledText, Document, Settings, Messages)
//! - `controllers/` - Orchestration (SessionManager, AttributeTracker, toolbar model)
//! - `services/` - Business operations (persistence, RTF codec, status, text_ops)
//! - `infrastructure/` - External integrations (prompts, error reports, error)
//! - `state.rs` - Editor session coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::tabs::SessionManager;
pub use controllers::toolbar::{FormattingControls, ToolbarState};
pub use domain::{
    AppSettings, AttributeChange, CharAttributes, Document, DocumentId, FileFormat, Message,
    PlainSaveMode, StyledRun, StyledText,
};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::error_report::{ErrorReporter, ErrorSink};
pub use infrastructure::prompts::UserPrompts;
pub use services::persistence::{Outcome, PersistenceService};
pub use services::status::{StatusBar, StatusNotifier, StatusReverter};
pub use state::EditorSession;
