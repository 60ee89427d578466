use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordsParseError {
    #[error("Line {line}: '{token}' is not a number")]
    InvalidNumber { line: usize, token: String },
}

/// Reads one configuration per line. Blank lines and lines starting with `#` are skipped.
pub fn read_configurations<R: BufRead>(reader: R) -> anyhow::Result<Vec<Vec<f64>>> {
    let mut configurations = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let values = trimmed
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|_| CoordsParseError::InvalidNumber {
                        line: index + 1,
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        configurations.push(values);
    }
    Ok(configurations)
}

pub fn write_configurations<W: Write>(
    writer: &mut W,
    configurations: &[Vec<f64>],
) -> std::io::Result<()> {
    for values in configurations {
        let line = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
