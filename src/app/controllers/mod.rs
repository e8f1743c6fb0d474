//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the front-end:
//! - Tab management
//! - Character count and active attribute tracking
//! - Formatting toolbar model

pub mod attribute_tracker;
pub mod tabs;
pub mod toolbar;
