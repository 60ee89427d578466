use nalgebra::{Matrix3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Generalized coordinates, in the same packing as the input.
    RigidBody,
    /// Atomistic coordinates, `3 * natoms_total` values per configuration.
    Atomistic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub rotation: Option<Matrix3<f64>>,
    pub translation: Option<Vector3<f64>>,
    pub align_path: bool,
    pub output: OutputKind,
}

#[derive(Default)]
pub struct PipelineConfigBuilder {
    rotation: Option<Matrix3<f64>>,
    translation: Option<Vector3<f64>>,
    align_path: Option<bool>,
    output: Option<OutputKind>,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotation(mut self, rotation: Matrix3<f64>) -> Self {
        self.rotation = Some(rotation);
        self
    }
    pub fn translation(mut self, translation: Vector3<f64>) -> Self {
        self.translation = Some(translation);
        self
    }
    pub fn align_path(mut self, align: bool) -> Self {
        self.align_path = Some(align);
        self
    }
    pub fn output(mut self, output: OutputKind) -> Self {
        self.output = Some(output);
        self
    }

    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        Ok(PipelineConfig {
            rotation: self.rotation,
            translation: self.translation,
            align_path: self
                .align_path
                .ok_or(ConfigError::MissingParameter("align_path"))?,
            output: self
                .output
                .ok_or(ConfigError::MissingParameter("output"))?,
        })
    }
}
