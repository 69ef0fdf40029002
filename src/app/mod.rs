//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (selections, surfaces, suggestions, session, settings)
//! - `controllers/` - Orchestration of the focus → select → suggest → commit cycle
//! - `services/` - Business operations (selection capture, write-back, write policy, service client)
//! - `infrastructure/` - Seams to the host page and presentation, in-memory hosts, errors

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-exports for convenient external access
pub use controllers::correction::{CorrectionController, RequestId};
pub use domain::{
    CorrectionSession, EditableSurfaceKind, FocusTarget, RequestKind, SelectionDescriptor, Settings, Suggestions,
};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::host::{EditableSurface, PlainInputHost, RichTextHost};
pub use services::field::{get_field_value, set_field_value, WriteOutcome};
pub use services::selection::{capture_selection, SelectionTrigger};
