//! PIN batch text output.
//!
//! Layout:
//!
//! ```text
//! PIN generation time: 2024-05-01T09:30:00
//!
//! 4-digit PINs:
//! 0001
//! 0002
//!
//! 6-digit PINs:
//! 000003
//! ```

use crate::error::Result;
use crate::types::PinBatch;
use chrono::{Local, NaiveDateTime};
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

/// ISO-8601 local timestamp with second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Render `batch` with the given capture time.
pub fn render_batch(batch: &PinBatch, captured_at: &NaiveDateTime) -> String {
    let mut out = format!(
        "PIN generation time: {}\n",
        captured_at.format(TIMESTAMP_FORMAT)
    );
    for group in &batch.groups {
        let _ = write!(out, "\n{}-digit PINs:\n", group.length);
        for pin in &group.pins {
            out.push_str(pin);
            out.push('\n');
        }
    }
    out
}

/// Write `batch` to `path`, replacing any existing file.
pub fn write_batch(path: &Path, batch: &PinBatch) -> Result<()> {
    let now = Local::now().naive_local();
    std::fs::write(path, render_batch(batch, &now))?;
    debug!(path = %path.display(), pins = batch.total(), "wrote PIN batch");
    Ok(())
}
