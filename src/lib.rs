//! Sigkit - file signature sniffing and unique PIN generation
//!
//! This library backs two small command-line tools:
//!
//! - **`sigsniff`** compares the leading bytes of files against a static
//!   table of magic numbers and flags files whose extension disagrees with
//!   their content.
//! - **`pingen`** produces unique fixed-length numeric PINs from hashed
//!   secure randomness and writes them to a text file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sigkit::{analyze_file, Catalog};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let result = analyze_file(Path::new("photo.jpg"), Catalog::builtin())?;
//!     println!("Detected: {}", result.detected);
//!     if let Some(mismatch) = result.mismatch {
//!         println!("Mismatch: {mismatch}");
//!     }
//!
//!     let pins = sigkit::pins::generate_unique(6, 10)?;
//!     println!("{}", pins.join(", "));
//!     Ok(())
//! }
//! ```
//!
//! # Matching
//!
//! Detection is first-match over catalog declaration order, not
//! longest-match. See [`signatures`] for the table and its known overlaps.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod analyzer;
pub mod error;
pub mod formatter;
pub mod output;
pub mod pins;
pub mod signatures;
pub mod types;

pub use analyzer::{analyze_file, classify};
pub use error::{Result, SigkitError};
pub use signatures::{detect, Catalog, Signature};
pub use types::{AnalysisResult, DetectedType, Mismatch, PinBatch, PinGroup};

/// Get version information for this library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
