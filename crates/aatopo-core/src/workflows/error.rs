use super::config::ConfigError;
use crate::core::error::TopologyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Topology operation failed: {source}")]
    Topology {
        #[from]
        source: TopologyError,
    },

    #[error("Invalid pipeline configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Configuration {index} failed: {source}")]
    Configuration {
        index: usize,
        source: TopologyError,
    },
}
