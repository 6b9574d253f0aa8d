//! Output sink handling: a file or standard output.

use super::OutputWriter;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Open the output sink
///
/// **Public** - standard output when `output_path` is `None`
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::WriteFailed` - File cannot be created
pub fn open_sink(output_path: Option<&Path>) -> Result<Box<dyn Write>, OutputError> {
    let Some(output_path) = output_path else {
        debug!("Writing output to standard output");
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };

    validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Render a writer's accumulated result into the sink and flush it
///
/// **Public** - final step of a conversion run
pub fn write_output(
    writer: &dyn OutputWriter,
    output_path: Option<&Path>,
) -> Result<(), OutputError> {
    let mut sink = open_sink(output_path)?;
    writer.render(sink.as_mut())?;
    sink.flush()?;

    if let Some(path) = output_path {
        info!("✓ Output written to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_open_sink_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/out.folded");

        let mut sink = open_sink(Some(nested_path.as_path())).unwrap();
        sink.write_all(b"a 1\n").unwrap();
        sink.flush().unwrap();
        drop(sink);

        assert_eq!(std::fs::read_to_string(&nested_path).unwrap(), "a 1\n");
    }
}
