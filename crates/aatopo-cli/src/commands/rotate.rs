use super::{load_topology, read_path, write_path};
use crate::cli::RotateArgs;
use crate::error::{CliError, Result};
use aatopo::core::rotations::angle_axis_to_matrix;
use aatopo::workflows::{
    self,
    config::{OutputKind, PipelineConfigBuilder},
};
use nalgebra::Vector3;
use tracing::debug;

pub fn run(args: RotateArgs) -> Result<()> {
    if args.axis_angle.is_none() && args.translate.is_none() {
        return Err(CliError::Argument(
            "at least one of --axis-angle or --translate is required".to_string(),
        ));
    }

    let topology = load_topology(&args.io.topology)?;
    let path = read_path(&args.io.input)?;

    let mut builder = PipelineConfigBuilder::new()
        .align_path(args.align)
        .output(if args.atomistic {
            OutputKind::Atomistic
        } else {
            OutputKind::RigidBody
        });
    if let Some(p) = args.axis_angle.as_deref().map(to_vector).transpose()? {
        let mx = angle_axis_to_matrix(&p);
        debug!("Global rotation matrix: {}", mx);
        builder = builder.rotation(mx);
    }
    if let Some(d) = args.translate.as_deref().map(to_vector).transpose()? {
        builder = builder.translation(d);
    }
    let config = builder
        .build()
        .map_err(workflows::error::WorkflowError::from)?;

    let transformed = workflows::pipeline::run(&topology, path, &config)?;
    write_path(&args.io.output, &transformed)?;
    println!("Transformed {} configuration(s).", transformed.len());
    Ok(())
}

fn to_vector(values: &[f64]) -> Result<Vector3<f64>> {
    match values {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(CliError::Argument(format!(
            "expected 3 components, found {}",
            values.len()
        ))),
    }
}
