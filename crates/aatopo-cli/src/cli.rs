use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "aatopo CLI - coordinate transforms for angle-axis rigid-body clusters.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expand rigid-body configurations to atomistic coordinates.
    Expand(IoArgs),
    /// Align angle-axis vectors along a path of configurations.
    Align(IoArgs),
    /// Rotate and/or translate every configuration as a whole.
    Rotate(RotateArgs),
}

/// Input, output and topology shared by every subcommand.
#[derive(Args, Debug)]
pub struct IoArgs {
    /// Path to the topology definition file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub topology: PathBuf,

    /// Path to the input coordinates, one configuration per line.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output coordinates.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `rotate` subcommand.
#[derive(Args, Debug)]
pub struct RotateArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Global rotation as an angle-axis vector (radians).
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub axis_angle: Option<Vec<f64>>,

    /// Global translation applied after the rotation.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub translate: Option<Vec<f64>>,

    /// Also align the angle-axis vectors of the transformed path.
    #[arg(long)]
    pub align: bool,

    /// Write atomistic instead of rigid-body coordinates.
    #[arg(long)]
    pub atomistic: bool,
}
