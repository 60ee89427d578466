use super::config::{OutputKind, PipelineConfig};
use super::error::WorkflowError;
use crate::core::error::TopologyError;
use crate::core::models::topology::RBTopology;
use crate::core::transform::TransformAACluster;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs the configured transforms over a path of full configurations.
///
/// Each configuration is first rotated and translated as a whole (independently, and in
/// parallel with the `parallel` feature). The path is then aligned in order when requested,
/// and finally emitted either as generalized or as atomistic coordinates.
#[instrument(skip_all, name = "pipeline_workflow", fields(nconfigs = path.len()))]
pub fn run(
    topology: &RBTopology,
    mut path: Vec<Vec<f64>>,
    config: &PipelineConfig,
) -> Result<Vec<Vec<f64>>, WorkflowError> {
    let ncoords = topology.ncoords();
    for (index, x) in path.iter().enumerate() {
        TopologyError::check_size("configuration", ncoords, x.len())
            .map_err(|source| WorkflowError::Configuration { index, source })?;
    }

    if config.rotation.is_some() || config.translation.is_some() {
        apply_cluster_transforms(topology, &mut path, config)?;
    }

    if config.align_path {
        topology.align_path(&mut path)?;
        debug!("Path alignment finished.");
    }

    let result = match config.output {
        OutputKind::RigidBody => path,
        OutputKind::Atomistic => expand_to_atomistic(topology, &path)?,
    };

    info!(
        "Pipeline complete. Produced {} configuration(s).",
        result.len()
    );
    Ok(result)
}

fn apply_cluster_transforms(
    topology: &RBTopology,
    path: &mut [Vec<f64>],
    config: &PipelineConfig,
) -> Result<(), TopologyError> {
    let transform = TransformAACluster::new(topology);

    #[cfg(not(feature = "parallel"))]
    let iterator = path.iter_mut();

    #[cfg(feature = "parallel")]
    let iterator = path.par_iter_mut();

    iterator.try_for_each(|x| {
        if let Some(mx) = &config.rotation {
            transform.rotate(x, mx)?;
        }
        if let Some(d) = &config.translation {
            transform.translate(x, d)?;
        }
        Ok::<(), TopologyError>(())
    })
}

/// Expands every configuration to atomistic coordinates. Only the generalized part of each
/// configuration takes part in the mapping.
pub fn expand_to_atomistic(
    topology: &RBTopology,
    path: &[Vec<f64>],
) -> Result<Vec<Vec<f64>>, TopologyError> {
    let nrb = 6 * topology.nrigid();
    topology.finalize();

    #[cfg(not(feature = "parallel"))]
    let iterator = path.iter();

    #[cfg(feature = "parallel")]
    let iterator = path.par_iter();

    iterator
        .map(|x| topology.to_atomistic(&x[..nrb.min(x.len())]))
        .collect()
}
