//! # Models Module
//!
//! - [`fragment`] - a single rigid body and its per-body transforms
//! - [`adaptor`] - sub-views of a packed configuration array
//! - [`topology`] - the ordered collection of rigid bodies and whole-system transforms

pub mod adaptor;
pub mod fragment;
pub mod topology;
