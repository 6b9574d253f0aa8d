//! Gzip decompression of compressed recordings.

use crate::utils::error::LoadError;
use flate2::read::GzDecoder;
use log::debug;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Decompress a gzip file into a temporary file
///
/// **Public** - used by `load_recording` when decompression is requested
///
/// The returned file is deleted when dropped, so callers must keep it
/// alive for as long as they read from its path.
pub fn decompress_to_temp(compressed: &Path) -> Result<NamedTempFile, LoadError> {
    debug!("Decompressing recording: {}", compressed.display());

    let input = File::open(compressed)?;
    let mut decoder = GzDecoder::new(BufReader::new(input));

    let mut temp = tempfile::Builder::new().prefix("jfr_").tempfile()?;
    let written =
        std::io::copy(&mut decoder, temp.as_file_mut()).map_err(LoadError::Decompress)?;
    temp.as_file_mut().flush()?;

    debug!(
        "Decompressed {} bytes to {}",
        written,
        temp.path().display()
    );

    Ok(temp)
}
