use crate::core::error::TopologyError;
use crate::core::models::fragment::RigidFragment;
use crate::core::models::topology::RBTopology;
use nalgebra::Point3;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FragmentTemplate {
    pub atoms: Vec<[f64; 3]>,
}

/// Declarative description of a rigid-body topology: named fragment templates and the
/// ordered list of sites that instantiate them.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TopologyDefinition {
    #[serde(default)]
    pub non_rigid_atoms: usize,
    pub sites: Vec<String>,
    #[serde(default)]
    pub fragments: HashMap<String, FragmentTemplate>,
}

#[derive(Debug, Error)]
pub enum DefinitionLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Site {index} refers to unknown fragment '{name}'")]
    UnknownFragment { index: usize, name: String },
    #[error("Fragment '{name}' is invalid: {source}")]
    Fragment {
        name: String,
        source: TopologyError,
    },
}

impl TopologyDefinition {
    pub fn load(path: &Path) -> Result<Self, DefinitionLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| DefinitionLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| DefinitionLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn build(&self) -> Result<RBTopology, DefinitionLoadError> {
        let mut templates = HashMap::with_capacity(self.fragments.len());
        for (name, template) in &self.fragments {
            let fragment = RigidFragment::new(
                template
                    .atoms
                    .iter()
                    .map(|&[x, y, z]| Point3::new(x, y, z))
                    .collect(),
            )
            .map_err(|e| DefinitionLoadError::Fragment {
                name: name.clone(),
                source: e,
            })?;
            templates.insert(name.as_str(), fragment);
        }

        let mut topology = RBTopology::new();
        for (index, name) in self.sites.iter().enumerate() {
            let fragment = templates.get(name.as_str()).ok_or_else(|| {
                DefinitionLoadError::UnknownFragment {
                    index,
                    name: name.clone(),
                }
            })?;
            topology.add_site(fragment.clone());
        }
        topology.set_non_rigid_atoms(self.non_rigid_atoms);

        debug!(
            nrigid = topology.nrigid(),
            natoms_total = topology.natoms_total(),
            "Built rigid-body topology from definition."
        );
        Ok(topology)
    }
}
