//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Character-offset text operations
//! - Selection capture
//! - Field read/write-back
//! - Write strategy policy
//! - Suggestion service client

pub mod field;
pub mod policy;
pub mod selection;
pub mod suggestions;
pub mod text_ops;
