//! # Workflows Module
//!
//! High-level entry points that process whole paths of rigid-body configurations.
//!
//! - **Pipeline** ([`pipeline`]) - global rotation and translation of every configuration,
//!   angle-axis alignment along the path, and optional expansion to atomistic coordinates.
//! - **Configuration** ([`config`]) - builder for pipeline settings.
//! - **Errors** ([`error`]) - the workflow error type wrapping core failures.

pub mod config;
pub mod error;
pub mod pipeline;
