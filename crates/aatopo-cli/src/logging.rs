use crate::error::{CliError, Result};
use std::fs::File;
use std::path::Path;
use tracing::Subscriber;
use tracing_subscriber::{Layer, filter::LevelFilter, fmt, prelude::*, registry::LookupSpan};

pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Plain-text layer appending to a freshly truncated log file, with thread ids and targets
/// so that rayon workers can be told apart.
fn log_file_layer<S>(path: &Path) -> Result<impl Layer<S> + use<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let file = File::create(path).map_err(CliError::Io)?;
    Ok(fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true))
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let file_layer = log_file.map(log_file_layer).transpose()?;

    tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info, trace};
    use tracing_subscriber::Registry;

    #[test]
    fn verbosity_maps_to_increasing_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_keeps_only_errors() {
        assert_eq!(level_filter(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn log_file_respects_verbosity_filter() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("aatopo.log");

        let subscriber = tracing_subscriber::registry()
            .with(level_filter(2, false))
            .with(log_file_layer(&log_path).unwrap());

        tracing::subscriber::with_default(subscriber, || {
            info!(nsites = 4, "Topology loaded.");
            debug!("Aligned configuration 1.");
            trace!("Hill-climb step.");
        });

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Topology loaded."));
        assert!(content.contains("nsites=4"));
        assert!(content.contains("Aligned configuration 1."));
        assert!(!content.contains("Hill-climb step."));
    }

    #[test]
    fn directory_as_log_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = log_file_layer::<Registry>(dir.path());

        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
