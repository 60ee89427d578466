use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("{name} has the wrong size: expected {expected}, found {found}")]
    SizeMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("A rigid fragment must contain at least one atom")]
    EmptyFragment,

    #[error("Invalid rigid fragment: {0}")]
    InvalidFragment(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl TopologyError {
    pub(crate) fn check_size(
        name: &'static str,
        expected: usize,
        found: usize,
    ) -> Result<(), TopologyError> {
        if expected == found {
            Ok(())
        } else {
            Err(TopologyError::SizeMismatch {
                name,
                expected,
                found,
            })
        }
    }
}
