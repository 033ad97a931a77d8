//! sigsniff CLI
//!
//! Command-line tool for spotting files whose extension lies about their
//! content.

use clap::{Parser, ValueEnum};
use sigkit::formatter::{
    FlaggedFile, HumanFormatter, JsonFormatter, ReportFormatter, ShortFormatter,
};
use sigkit::{analyze_file, Catalog};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Identify a file's real type using binary magic numbers.
///
/// Reads the leading bytes of each file, compares them to common file
/// signatures, and reports whether the extension agrees with the content.
#[derive(Parser, Debug)]
#[command(name = "sigsniff")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path(s) to the files to inspect
    #[arg(value_name = "FILE", required_unless_present = "list")]
    files: Vec<PathBuf>,

    /// Show known file types and exit without scanning files
    #[arg(long)]
    list: bool,

    /// Output format
    #[arg(short, long, default_value = "human")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// Compact single-line output
    Short,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging if verbose
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("sigkit=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let formatter: Box<dyn ReportFormatter> = match args.format {
        OutputFormat::Human => Box::new(HumanFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::compact()),
        OutputFormat::Short => Box::new(ShortFormatter::new()),
    };

    let catalog = Catalog::builtin();

    if args.list {
        print!("{}", formatter.format_catalog(&catalog.listing()));
        return ExitCode::SUCCESS;
    }

    let flagged = sniff_files(&args.files, catalog, formatter.as_ref());
    print!("{}", formatter.format_summary(&flagged));

    // Per-file problems are reported inline and never fail the run.
    ExitCode::SUCCESS
}

fn sniff_files(
    files: &[PathBuf],
    catalog: &Catalog,
    formatter: &dyn ReportFormatter,
) -> Vec<FlaggedFile> {
    let mut flagged = Vec::new();

    for path in files {
        if !path.exists() {
            print!("{}", formatter.format_missing(path));
            continue;
        }

        match analyze_file(path, catalog) {
            Ok(result) => {
                print!("{}", formatter.format_result(&result, path));
                if let Some(mismatch) = result.mismatch {
                    flagged.push(FlaggedFile {
                        path: path.clone(),
                        mismatch,
                    });
                }
            }
            Err(e) => print!("{}", formatter.format_read_error(path, &e)),
        }
    }

    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigkit::Mismatch;
    use tempfile::TempDir;

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from(["sigsniff", "test.bin"]).unwrap();
        assert_eq!(args.files.len(), 1);
        assert!(!args.list);
        assert!(!args.verbose);
    }

    #[test]
    fn test_multiple_files() {
        let args = Args::try_parse_from(["sigsniff", "a.png", "b.jpg"]).unwrap();
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn test_no_files_is_usage_error() {
        assert!(Args::try_parse_from(["sigsniff"]).is_err());
    }

    #[test]
    fn test_list_without_files() {
        let args = Args::try_parse_from(["sigsniff", "--list"]).unwrap();
        assert!(args.list);
        assert!(args.files.is_empty());
    }

    #[test]
    fn test_format_options() {
        let args = Args::try_parse_from(["sigsniff", "-f", "json", "test.bin"]).unwrap();
        assert!(matches!(args.format, OutputFormat::Json));
    }

    #[test]
    fn test_sniff_files_collects_mismatches() {
        let dir = TempDir::new().unwrap();
        let disguised = dir.path().join("photo.jpg");
        std::fs::write(&disguised, b"\x89PNG\r\n\x1A\n\x00\x00\x00\x0DIHDR").unwrap();
        let honest = dir.path().join("anim.gif");
        std::fs::write(&honest, b"GIF89a\x01\x00\x01\x00").unwrap();
        let missing = dir.path().join("nope.png");

        let files = vec![disguised.clone(), missing, honest];
        let flagged = sniff_files(&files, Catalog::builtin(), &ShortFormatter::new());

        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].path, disguised);
        assert!(matches!(flagged[0].mismatch, Mismatch::Conflict { .. }));
    }
}
