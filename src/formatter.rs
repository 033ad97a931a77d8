//! Output formatters for sniffer reports.
//!
//! This module provides trait-based formatters for rendering per-file
//! analysis results, the closing mismatch summary and the catalog listing
//! in various output formats (human-readable, JSON, compact).

use crate::error::SigkitError;
use crate::signatures::CatalogEntry;
use crate::types::{AnalysisResult, Mismatch};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A file whose analysis flagged a mismatch, kept for the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedFile {
    /// Path as given on the command line
    pub path: PathBuf,
    /// What was wrong with it
    pub mismatch: Mismatch,
}

impl fmt::Display for FlaggedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.mismatch)
    }
}

/// Trait for formatting sniffer output.
///
/// Every method returns complete lines including the trailing newline so the
/// driver can `print!` the result verbatim.
pub trait ReportFormatter {
    /// Diagnostic for a path that does not exist.
    fn format_missing(&self, path: &Path) -> String;

    /// Diagnostic for a path that exists but could not be read.
    fn format_read_error(&self, path: &Path, error: &SigkitError) -> String;

    /// Report for one analyzed file.
    fn format_result(&self, result: &AnalysisResult, path: &Path) -> String;

    /// Closing summary over every flagged file.
    fn format_summary(&self, flagged: &[FlaggedFile]) -> String;

    /// Catalog listing for `--list`.
    fn format_catalog(&self, entries: &[CatalogEntry]) -> String;
}

/// Human-readable output formatter.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter;

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for HumanFormatter {
    fn format_missing(&self, path: &Path) -> String {
        format!("[ERROR] {} does not exist.\n", path.display())
    }

    fn format_read_error(&self, _path: &Path, error: &SigkitError) -> String {
        format!("[ERROR] {error}\n")
    }

    fn format_result(&self, result: &AnalysisResult, path: &Path) -> String {
        let mut s = format!("\nFile: {}\n", path.display());
        s.push_str(&format!("  Detected type: {}\n", result.detected));
        s.push_str(&format!("  Extension expects: {}\n", result.expected_label()));
        match &result.mismatch {
            Some(mismatch) => s.push_str(&format!("  MISMATCH: {mismatch}\n")),
            None => s.push_str("  Status: extension matches detected type.\n"),
        }
        s
    }

    fn format_summary(&self, flagged: &[FlaggedFile]) -> String {
        let mut s = String::from("\nSummary:\n");
        if flagged.is_empty() {
            s.push_str("- All inspected files match their extensions or types are unknown.\n");
        }
        for file in flagged {
            s.push_str(&format!("- {file}\n"));
        }
        s
    }

    fn format_catalog(&self, entries: &[CatalogEntry]) -> String {
        let mut s = String::from("Known magic numbers:\n\n");
        for entry in entries {
            s.push_str(&format!("- {}: {}\n", entry.name, entry.patterns.join(", ")));
        }
        s
    }
}

/// JSON output formatter. Emits one JSON document per call.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    /// Pretty-print JSON
    pub pretty: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonFormatter {
    /// Create a new JSON formatter with pretty printing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compact JSON formatter (one document per line).
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    fn render<T: Serialize>(&self, value: &T) -> String {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        let mut s = json.unwrap_or_else(|_| "{}".to_string());
        s.push('\n');
        s
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_missing(&self, path: &Path) -> String {
        #[derive(Serialize)]
        struct MissingJson {
            file: String,
            error: &'static str,
        }

        self.render(&MissingJson {
            file: path.display().to_string(),
            error: "does not exist",
        })
    }

    fn format_read_error(&self, path: &Path, error: &SigkitError) -> String {
        #[derive(Serialize)]
        struct ErrorJson {
            file: String,
            error: String,
        }

        self.render(&ErrorJson {
            file: path.display().to_string(),
            error: error.to_string(),
        })
    }

    fn format_result(&self, result: &AnalysisResult, path: &Path) -> String {
        #[derive(Serialize)]
        struct ResultJson<'a> {
            file: String,
            #[serde(flatten)]
            result: &'a AnalysisResult,
        }

        self.render(&ResultJson {
            file: path.display().to_string(),
            result,
        })
    }

    fn format_summary(&self, flagged: &[FlaggedFile]) -> String {
        #[derive(Serialize)]
        struct SummaryJson {
            mismatch_count: usize,
            mismatches: Vec<FlaggedJson>,
        }

        #[derive(Serialize)]
        struct FlaggedJson {
            file: String,
            message: String,
        }

        self.render(&SummaryJson {
            mismatch_count: flagged.len(),
            mismatches: flagged
                .iter()
                .map(|f| FlaggedJson {
                    file: f.path.display().to_string(),
                    message: f.mismatch.to_string(),
                })
                .collect(),
        })
    }

    fn format_catalog(&self, entries: &[CatalogEntry]) -> String {
        self.render(&entries)
    }
}

/// Compact single-line output formatter.
#[derive(Debug, Clone, Default)]
pub struct ShortFormatter;

impl ShortFormatter {
    /// Create a new short formatter.
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for ShortFormatter {
    fn format_missing(&self, path: &Path) -> String {
        format!("{}\tMISSING\n", path.display())
    }

    fn format_read_error(&self, path: &Path, _error: &SigkitError) -> String {
        format!("{}\tERROR\n", path.display())
    }

    fn format_result(&self, result: &AnalysisResult, path: &Path) -> String {
        let status = if result.is_mismatch() { "MISMATCH" } else { "OK" };
        format!(
            "{}\t{}\t{}\t{}\n",
            path.display(),
            result.detected,
            result.expected_label(),
            status
        )
    }

    fn format_summary(&self, flagged: &[FlaggedFile]) -> String {
        format!("mismatches: {}\n", flagged.len())
    }

    fn format_catalog(&self, entries: &[CatalogEntry]) -> String {
        entries
            .iter()
            .map(|e| format!("{}\t{}\n", e.name, e.patterns.join(",")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signatures::Catalog;
    use crate::types::DetectedType;
    use pretty_assertions::assert_eq;

    fn conflict() -> AnalysisResult {
        AnalysisResult {
            detected: DetectedType::Known("PNG"),
            expected: Some("JPEG"),
            mismatch: Some(Mismatch::Conflict {
                expected: "JPEG",
                detected: DetectedType::Known("PNG"),
            }),
        }
    }

    fn clean() -> AnalysisResult {
        AnalysisResult {
            detected: DetectedType::Known("GIF"),
            expected: Some("GIF"),
            mismatch: None,
        }
    }

    #[test]
    fn test_human_result_mismatch() {
        let output = HumanFormatter::new().format_result(&conflict(), Path::new("photo.jpg"));
        assert_eq!(
            output,
            "\nFile: photo.jpg\n\
             \x20 Detected type: PNG\n\
             \x20 Extension expects: JPEG\n\
             \x20 MISMATCH: Extension suggests JPEG, but header indicates PNG.\n"
        );
    }

    #[test]
    fn test_human_result_unknown_expectation() {
        let result = AnalysisResult {
            detected: DetectedType::Unknown,
            expected: None,
            mismatch: None,
        };
        let output = HumanFormatter::new().format_result(&result, Path::new("notes.txt"));
        assert!(output.contains("  Detected type: Unknown\n"));
        assert!(output.contains("  Extension expects: <unknown>\n"));
        assert!(output.contains("  Status: extension matches detected type.\n"));
    }

    #[test]
    fn test_human_missing() {
        let output = HumanFormatter::new().format_missing(Path::new("gone.png"));
        assert_eq!(output, "[ERROR] gone.png does not exist.\n");
    }

    #[test]
    fn test_human_summary() {
        let formatter = HumanFormatter::new();
        assert_eq!(
            formatter.format_summary(&[]),
            "\nSummary:\n- All inspected files match their extensions or types are unknown.\n"
        );

        let flagged = vec![FlaggedFile {
            path: PathBuf::from("image.xyz"),
            mismatch: Mismatch::UncatalogedExtension,
        }];
        assert_eq!(
            formatter.format_summary(&flagged),
            "\nSummary:\n- image.xyz: No known expected type for this extension.\n"
        );
    }

    #[test]
    fn test_human_catalog() {
        let output = HumanFormatter::new().format_catalog(&Catalog::builtin().listing());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Known magic numbers:");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "- 7Z: 377ABCAF271C");
        assert!(lines.contains(&"- ZIP: 504B0304, 504B0506, 504B0708"));
        assert!(lines.contains(&"- MP3: 494433, FFFB"));
    }

    #[test]
    fn test_json_result() {
        let output = JsonFormatter::compact().format_result(&conflict(), Path::new("photo.jpg"));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["file"], "photo.jpg");
        assert_eq!(value["detected"], "PNG");
        assert_eq!(value["expected"], "JPEG");
        assert_eq!(
            value["mismatch"],
            "Extension suggests JPEG, but header indicates PNG."
        );
    }

    #[test]
    fn test_json_summary() {
        let flagged = vec![FlaggedFile {
            path: PathBuf::from("a.gif"),
            mismatch: Mismatch::UncatalogedExtension,
        }];
        let output = JsonFormatter::new().format_summary(&flagged);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["mismatch_count"], 1);
        assert_eq!(value["mismatches"][0]["file"], "a.gif");
    }

    #[test]
    fn test_short_formatter() {
        let formatter = ShortFormatter::new();
        assert_eq!(
            formatter.format_result(&clean(), Path::new("anim.gif")),
            "anim.gif\tGIF\tGIF\tOK\n"
        );
        assert_eq!(
            formatter.format_result(&conflict(), Path::new("photo.jpg")),
            "photo.jpg\tPNG\tJPEG\tMISMATCH\n"
        );
        assert_eq!(formatter.format_missing(Path::new("x")), "x\tMISSING\n");
    }
}
