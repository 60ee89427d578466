//! Loading of rigid-body topology definitions from TOML files.

pub mod definition;
