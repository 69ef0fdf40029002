//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Host page surface traits
//! - Presentation chrome contract
//! - In-memory hosts
//! - Error types

pub mod chrome;
pub mod error;
pub mod host;
pub mod memory;
