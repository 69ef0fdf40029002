//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Selection descriptors and editable surface kinds
//! - The single-slot correction session
//! - Suggestion request/response types
//! - Runtime settings

pub mod selection;
pub mod session;
pub mod settings;
pub mod suggestions;
pub mod surface;

pub use selection::SelectionDescriptor;
pub use session::{CorrectionSession, TrackedSurface};
pub use settings::Settings;
pub use suggestions::{ActionMenu, CorrectionResult, FeedbackRecord, RequestKind, Suggestions};
pub use surface::{EditableSurfaceKind, FocusTarget, HostEvent, NodeId, PointerPosition};
