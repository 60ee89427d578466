use super::{load_topology, read_path, write_path};
use crate::cli::IoArgs;
use crate::error::Result;
use aatopo::workflows::{
    self,
    config::{OutputKind, PipelineConfigBuilder},
};

pub fn run(args: IoArgs) -> Result<()> {
    let topology = load_topology(&args.topology)?;
    let path = read_path(&args.input)?;

    let config = PipelineConfigBuilder::new()
        .align_path(false)
        .output(OutputKind::Atomistic)
        .build()
        .map_err(workflows::error::WorkflowError::from)?;

    let atomistic = workflows::pipeline::run(&topology, path, &config)?;
    write_path(&args.output, &atomistic)?;
    println!(
        "Expanded {} configuration(s) to {} atoms each.",
        atomistic.len(),
        topology.natoms_total()
    );
    Ok(())
}
