//! # Core Module
//!
//! Stateless building blocks for rigid-body coordinate transforms.
//!
//! A configuration of `nrigid` rigid bodies is described by a generalized coordinate vector
//! of length `6 * nrigid`: all centers first, then all angle-axis rotations. The atomistic
//! representation lists every atom of every body, site after site.
//!
//! - **Rotation algebra** ([`rotations`]) - angle-axis to matrix, analytic derivatives,
//!   inverse map and composition
//! - **Models** ([`models`]) - rigid fragments, the packed-coordinate adaptor and the
//!   rigid-body topology with its forward, gradient and alignment operations
//! - **Cluster transforms** ([`transform`]) - global rotation and translation of a configuration
//! - **Definitions** ([`io`]) - TOML topology definitions
//! - **Errors** ([`error`]) - size-mismatch and unsupported-operation failures

pub mod error;
pub mod io;
pub mod models;
pub mod rotations;
pub mod transform;
