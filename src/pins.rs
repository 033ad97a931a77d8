//! Unique numeric PIN generation.
//!
//! Each PIN is derived independently: 64 bytes from the operating system's
//! secure random source are hashed with SHA3-512, the digest is read as a
//! big-endian integer, reduced modulo `10^length` and zero-padded. Draws are
//! repeated into a set until the requested number of distinct PINs exists.

use crate::error::{Result, SigkitError};
use crate::types::{PinBatch, PinGroup};
use rand::rngs::OsRng;
use rand::RngCore;
use sha3::{Digest, Sha3_512};
use std::collections::BTreeSet;
use tracing::debug;

/// Number of random bytes hashed per PIN.
pub const ENTROPY_BYTES: usize = 64;

/// Longest supported PIN; `10^38` is the largest power of ten below `2^127`.
pub const MAX_PIN_LENGTH: u32 = 38;

/// PIN lengths produced by the generator CLI, in output order.
pub const STANDARD_LENGTHS: [u32; 3] = [4, 6, 8];

/// Rules printed by `pingen --info`.
pub const RULES: &str = "\
Program rules
-------------
1) Generates only numeric PINs in three lengths: 4, 6, and 8 digits.
2) Each PIN is unique within its length group for a single run.
3) Randomness is derived from SHA3-512 hashing of 64 cryptographically
   secure random bytes, avoiding simple sequential patterns.
4) Output is written to a text file, grouped by PIN length with headers.
5) You can customize how many PINs to create per length and the output
   file location using command-line options.";

/// Number of distinct PINs of `length` digits.
pub fn pin_space(length: u32) -> Result<u128> {
    if length == 0 {
        return Err(SigkitError::invalid("Length must be positive"));
    }
    if length > MAX_PIN_LENGTH {
        return Err(SigkitError::invalid(format!(
            "Length {length} exceeds the maximum of {MAX_PIN_LENGTH} digits"
        )));
    }
    Ok(10u128.pow(length))
}

/// A validated request for `count` unique PINs of `length` digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinRequest {
    /// Digits per PIN
    pub length: u32,
    /// Distinct PINs to produce
    pub count: usize,
}

impl PinRequest {
    /// Validate a request before any randomness is consumed.
    ///
    /// Fails if `length` is zero or too large, if `count` is negative, or if
    /// `count` exceeds the number of distinct PINs of that length.
    pub fn new(length: u32, count: i64) -> Result<Self> {
        let space = pin_space(length)?;
        if count < 0 {
            return Err(SigkitError::invalid("Count cannot be negative"));
        }
        if count as u128 > space {
            return Err(SigkitError::invalid(format!(
                "Cannot generate {count} unique PINs of length {length}; maximum is {space}."
            )));
        }
        let count = usize::try_from(count).map_err(|_| {
            SigkitError::invalid(format!("Count {count} does not fit in memory"))
        })?;
        Ok(Self { length, count })
    }
}

/// Reduce a big-endian unsigned integer modulo `modulus`.
///
/// `modulus` must be non-zero and below `2^127` so doubling cannot overflow.
fn reduce_be(bytes: &[u8], modulus: u128) -> u128 {
    bytes.iter().fold(0u128, |acc, &byte| {
        let shifted = (0..8).fold(acc, |v, _| (v << 1) % modulus);
        (shifted + u128::from(byte)) % modulus
    })
}

/// Derive a zero-padded PIN from a block of entropy.
pub fn digits_from_entropy(entropy: &[u8], length: u32) -> Result<String> {
    let space = pin_space(length)?;
    let digest = Sha3_512::digest(entropy);
    let value = reduce_be(&digest, space);
    Ok(format!("{value:0width$}", width = length as usize))
}

/// Draw one PIN of `length` digits from the secure random source.
pub fn random_digits(length: u32) -> Result<String> {
    let mut entropy = [0u8; ENTROPY_BYTES];
    OsRng.try_fill_bytes(&mut entropy)?;
    digits_from_entropy(&entropy, length)
}

/// Generate `count` distinct PINs of `length` digits, sorted ascending.
///
/// Requesting every PIN of a length (`count == 10^length`) succeeds but
/// needs many redraws as the set fills.
pub fn generate_unique(length: u32, count: usize) -> Result<Vec<String>> {
    let count = i64::try_from(count)
        .map_err(|_| SigkitError::invalid(format!("Count {count} is too large")))?;
    let request = PinRequest::new(length, count)?;
    generate(&request)
}

/// Fulfil an already validated request.
pub fn generate(request: &PinRequest) -> Result<Vec<String>> {
    let mut pins = BTreeSet::new();
    let mut draws: u64 = 0;

    while pins.len() < request.count {
        pins.insert(random_digits(request.length)?);
        draws += 1;
    }

    debug!(
        length = request.length,
        count = request.count,
        draws,
        duplicates = draws - request.count as u64,
        "generated PIN group"
    );
    Ok(pins.into_iter().collect())
}

/// Generate one group per request, preserving request order.
pub fn generate_batch(requests: &[PinRequest]) -> Result<PinBatch> {
    let groups = requests
        .iter()
        .map(|request| {
            Ok(PinGroup {
                length: request.length,
                pins: generate(request)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(PinBatch { groups })
}
