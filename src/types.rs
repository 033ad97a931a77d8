//! Core types for sigkit.
//!
//! This module defines the values produced by the sniffer (detection and
//! analysis results) and by the PIN generator (length groups and batches).

use serde::{Serialize, Serializer};
use std::fmt;

/// Rendering of the unknown-type sentinel.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Placeholder printed when a file extension carries no expectation.
pub const NO_EXPECTATION: &str = "<unknown>";

/// Outcome of matching a header against the signature catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectedType {
    /// A catalog type whose pattern prefixes the header.
    Known(&'static str),
    /// No pattern in the catalog matched.
    Unknown,
}

impl DetectedType {
    /// Type name, or `None` for the unknown sentinel.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            DetectedType::Known(name) => Some(name),
            DetectedType::Unknown => None,
        }
    }

    /// Returns `true` if a catalog type was recognized.
    pub fn is_known(&self) -> bool {
        matches!(self, DetectedType::Known(_))
    }
}

impl fmt::Display for DetectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or(UNKNOWN_TYPE))
    }
}

impl Serialize for DetectedType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a file's extension and content disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// The extension maps to a type that differs from the detected one.
    Conflict {
        /// Type implied by the extension
        expected: &'static str,
        /// Type implied by the header
        detected: DetectedType,
    },
    /// Content was recognized but the extension is not cataloged.
    UncatalogedExtension,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Conflict { expected, detected } => write!(
                f,
                "Extension suggests {expected}, but header indicates {detected}."
            ),
            Mismatch::UncatalogedExtension => {
                write!(f, "No known expected type for this extension.")
            }
        }
    }
}

impl Serialize for Mismatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Analysis of a single file. Built once and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// Type identified from the header bytes
    pub detected: DetectedType,
    /// Type implied by the file extension, if cataloged
    pub expected: Option<&'static str>,
    /// Discrepancy between the two, if any
    pub mismatch: Option<Mismatch>,
}

impl AnalysisResult {
    /// Returns `true` if the analysis flagged a mismatch.
    pub fn is_mismatch(&self) -> bool {
        self.mismatch.is_some()
    }

    /// Expected type for display, falling back to [`NO_EXPECTATION`].
    pub fn expected_label(&self) -> &'static str {
        self.expected.unwrap_or(NO_EXPECTATION)
    }
}

/// PINs of one digit length, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinGroup {
    /// Number of digits in every PIN of the group
    pub length: u32,
    /// Distinct zero-padded PINs
    pub pins: Vec<String>,
}

/// Ordered PIN groups produced by a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PinBatch {
    /// Groups in the order they were requested
    pub groups: Vec<PinGroup>,
}

impl PinBatch {
    /// Total number of PINs across all groups.
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.pins.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detected_display() {
        assert_eq!(DetectedType::Known("PNG").to_string(), "PNG");
        assert_eq!(DetectedType::Unknown.to_string(), "Unknown");
        assert!(!DetectedType::Unknown.is_known());
    }

    #[test]
    fn test_mismatch_messages() {
        let conflict = Mismatch::Conflict {
            expected: "JPEG",
            detected: DetectedType::Known("PNG"),
        };
        assert_eq!(
            conflict.to_string(),
            "Extension suggests JPEG, but header indicates PNG."
        );

        let unknown = Mismatch::Conflict {
            expected: "PDF",
            detected: DetectedType::Unknown,
        };
        assert!(unknown.to_string().ends_with("header indicates Unknown."));

        assert_eq!(
            Mismatch::UncatalogedExtension.to_string(),
            "No known expected type for this extension."
        );
    }

    #[test]
    fn test_result_serializes_as_strings() {
        let result = AnalysisResult {
            detected: DetectedType::Known("GIF"),
            expected: None,
            mismatch: Some(Mismatch::UncatalogedExtension),
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["detected"], "GIF");
        assert!(json["expected"].is_null());
        assert_eq!(
            json["mismatch"],
            "No known expected type for this extension."
        );
        assert_eq!(result.expected_label(), "<unknown>");
    }

    #[test]
    fn test_batch_total() {
        let batch = PinBatch {
            groups: vec![
                PinGroup {
                    length: 4,
                    pins: vec!["0001".into(), "0002".into()],
                },
                PinGroup {
                    length: 6,
                    pins: vec!["000003".into()],
                },
            ],
        };
        assert_eq!(batch.total(), 3);
    }
}
