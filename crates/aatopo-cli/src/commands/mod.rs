pub mod align;
pub mod expand;
pub mod rotate;

use crate::error::{CliError, Result};
use crate::utils::coords;
use aatopo::core::io::definition::TopologyDefinition;
use aatopo::core::models::topology::RBTopology;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

pub(crate) fn load_topology(path: &Path) -> Result<RBTopology> {
    info!("Loading topology definition from {:?}", path);
    let topology = TopologyDefinition::load(path)?.build()?;
    info!(
        "Topology has {} rigid bodies, {} non-rigid atoms, {} atoms in total.",
        topology.nrigid(),
        topology.non_rigid_atoms(),
        topology.natoms_total()
    );
    Ok(topology)
}

pub(crate) fn read_path(path: &Path) -> Result<Vec<Vec<f64>>> {
    info!("Reading configurations from {:?}", path);
    let reader = BufReader::new(File::open(path)?);
    coords::read_configurations(reader).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn write_path(path: &Path, configurations: &[Vec<f64>]) -> Result<()> {
    info!(
        "Writing {} configuration(s) to {:?}",
        configurations.len(),
        path
    );
    let mut writer = BufWriter::new(File::create(path)?);
    coords::write_configurations(&mut writer, configurations)?;
    writer.flush()?;
    Ok(())
}
