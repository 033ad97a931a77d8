//! Per-file analysis: read a bounded header, detect, compare with extension.

use crate::error::{Result, SigkitError};
use crate::signatures::Catalog;
use crate::types::{AnalysisResult, DetectedType, Mismatch};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Read at most `byte_count` bytes from the start of `path`.
///
/// A file shorter than `byte_count` yields a short header, not an error.
pub fn read_header(path: &Path, byte_count: usize) -> Result<Vec<u8>> {
    let read_err = |source| SigkitError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let mut header = Vec::with_capacity(byte_count);
    file.take(byte_count as u64)
        .read_to_end(&mut header)
        .map_err(read_err)?;
    Ok(header)
}

/// Three-way classification of a detection against an expectation.
///
/// - expected known and different from detected: conflict
/// - no expectation but content recognized: uncataloged extension
/// - otherwise: no mismatch
pub fn classify(detected: DetectedType, expected: Option<&'static str>) -> AnalysisResult {
    let mismatch = match expected {
        Some(expected) if detected.name() != Some(expected) => {
            Some(Mismatch::Conflict { expected, detected })
        }
        Some(_) => None,
        None if detected.is_known() => Some(Mismatch::UncatalogedExtension),
        None => None,
    };

    AnalysisResult {
        detected,
        expected,
        mismatch,
    }
}

/// Analyze a header already in memory as if it came from `path`.
pub fn analyze_header(header: &[u8], path: &Path, catalog: &Catalog) -> AnalysisResult {
    classify(catalog.detect(header), catalog.expected_type(path))
}

/// Analyze a single file.
///
/// The caller is expected to have checked that `path` exists; any failure to
/// open or read it is reported as [`SigkitError::Read`].
pub fn analyze_file(path: &Path, catalog: &Catalog) -> Result<AnalysisResult> {
    let header = read_header(path, catalog.header_len())?;
    if header.is_empty() {
        warn!(path = %path.display(), "file is empty; no signature can match");
    }

    let result = analyze_header(&header, path, catalog);
    debug!(
        path = %path.display(),
        header_len = header.len(),
        detected = %result.detected,
        expected = result.expected_label(),
        mismatch = result.is_mismatch(),
        "analyzed file"
    );
    Ok(result)
}
