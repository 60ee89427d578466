use super::{load_topology, read_path, write_path};
use crate::cli::IoArgs;
use crate::error::Result;
use aatopo::workflows::{
    self,
    config::{OutputKind, PipelineConfigBuilder},
};
use tracing::warn;

pub fn run(args: IoArgs) -> Result<()> {
    let topology = load_topology(&args.topology)?;
    let path = read_path(&args.input)?;
    if path.len() < 2 {
        warn!("Path has fewer than two configurations; nothing to align.");
    }

    let config = PipelineConfigBuilder::new()
        .align_path(true)
        .output(OutputKind::RigidBody)
        .build()
        .map_err(workflows::error::WorkflowError::from)?;

    let aligned = workflows::pipeline::run(&topology, path, &config)?;
    write_path(&args.output, &aligned)?;
    println!("Aligned a path of {} configuration(s).", aligned.len());
    Ok(())
}
