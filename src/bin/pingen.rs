//! pingen CLI
//!
//! Generates unique 4-, 6- and 8-digit PINs using strong randomness.

use anyhow::Context;
use clap::Parser;
use sigkit::output::write_batch;
use sigkit::pins::{generate_batch, PinRequest, RULES};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Generate unique 4-, 6-, and 8-digit PINs using strong randomness.
#[derive(Parser, Debug)]
#[command(name = "pingen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of 4-digit PINs to generate
    #[arg(long, default_value_t = 10, env = "PINGEN_COUNT4", allow_negative_numbers = true)]
    count4: i64,

    /// Number of 6-digit PINs to generate
    #[arg(long, default_value_t = 10, env = "PINGEN_COUNT6", allow_negative_numbers = true)]
    count6: i64,

    /// Number of 8-digit PINs to generate
    #[arg(long, default_value_t = 10, env = "PINGEN_COUNT8", allow_negative_numbers = true)]
    count8: i64,

    /// Path to the output text file
    #[arg(long, default_value = "pins.txt", env = "PINGEN_OUTPUT")]
    output: PathBuf,

    /// Show program rules and exit
    #[arg(long)]
    info: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Validate every group up front so a bad count never leaves a partial file.
    fn requests(&self) -> sigkit::Result<Vec<PinRequest>> {
        [(4, self.count4), (6, self.count6), (8, self.count8)]
            .into_iter()
            .map(|(length, count)| PinRequest::new(length, count))
            .collect()
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("sigkit=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    if args.info {
        println!("{RULES}");
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let requests = args.requests()?;
    let batch = generate_batch(&requests).context("PIN generation failed")?;
    write_batch(&args.output, &batch)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "Generated PINs with complex randomization and saved to {}",
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["pingen"]).unwrap();
        assert_eq!((args.count4, args.count6, args.count8), (10, 10, 10));
        assert_eq!(args.output, PathBuf::from("pins.txt"));
        assert!(!args.info);
    }

    #[test]
    fn test_negative_count_is_rejected_by_validation() {
        let args = Args::try_parse_from(["pingen", "--count6", "-1"]).unwrap();
        assert_eq!(args.count6, -1);
        assert!(args.requests().is_err());
    }

    #[test]
    fn test_requests_in_length_order() {
        let args =
            Args::try_parse_from(["pingen", "--count4", "1", "--count6", "2", "--count8", "3"])
                .unwrap();
        let requests = args.requests().unwrap();
        let pairs: Vec<(u32, usize)> = requests.iter().map(|r| (r.length, r.count)).collect();
        assert_eq!(pairs, vec![(4, 1), (6, 2), (8, 3)]);
    }

    #[test]
    fn test_invalid_group_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("pins.txt");
        let args = Args::try_parse_from([
            "pingen",
            "--count4",
            "10001",
            "--output",
            out.to_str().unwrap(),
        ])
        .unwrap();

        assert!(run(&args).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_run_writes_all_groups() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("pins.txt");
        let args = Args::try_parse_from([
            "pingen",
            "--count4",
            "2",
            "--count6",
            "0",
            "--count8",
            "1",
            "--output",
            out.to_str().unwrap(),
        ])
        .unwrap();

        run(&args).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.contains("\n4-digit PINs:\n"));
        assert!(text.contains("\n6-digit PINs:\n"));
        assert!(text.contains("\n8-digit PINs:\n"));
        let four_digit = text
            .lines()
            .filter(|l| l.len() == 4 && l.bytes().all(|b| b.is_ascii_digit()))
            .count();
        assert_eq!(four_digit, 2);
    }
}
