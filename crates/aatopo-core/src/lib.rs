//! # aatopo
//!
//! Coordinate and gradient transforms for collections of rigid bodies whose orientations are
//! parameterized by angle-axis vectors.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** The rotation algebra, the rigid-fragment and topology
//!   models, the packed-coordinate adaptor, whole-cluster transforms, and loading of
//!   topology definitions.
//!
//! - **[`workflows`]: The Public API.** Batch processing of paths of configurations:
//!   global transforms, angle-axis alignment, and expansion to atomistic coordinates.

pub mod core;
pub mod workflows;
