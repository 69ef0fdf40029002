//! Controllers layer - orchestration and coordination.
//!
//! This module contains the controller that coordinates the session,
//! the suggestion service and the presentation chrome.

pub mod correction;
