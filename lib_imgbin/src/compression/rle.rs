use thiserror::Error;

use crate::constants::MAX_RUN_LENGTH;

#[derive(Error, Debug)]
pub enum RleDecompressionError {
    #[error("Invalid input length: expected multiple of 2 bytes, got {0}")]
    InvalidInputLength(usize),
    #[error("Invalid run at byte {0}: count must be at least 1")]
    ZeroLengthRun(usize),
}

/// A single `(count, value)` pair. `count` is always in `1..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub count: u8,
    pub value: u8,
}

impl Run {
    pub const ENCODED_SIZE: usize = 2;

    pub fn new(count: u8, value: u8) -> Self {
        Self { count, value }
    }
}

/// Greedy single-pass run-length encoding of a byte stream.
///
/// Runs are capped at [`MAX_RUN_LENGTH`]; a longer stretch of the same byte
/// is split into consecutive full runs followed by the remainder.
pub fn rle_compression(data: &[u8]) -> Vec<Run> {
    let mut runs = Vec::new();
    let Some((&first, rest)) = data.split_first() else {
        return runs;
    };

    let mut current = Run::new(1, first);
    for &byte in rest {
        if byte == current.value && current.count < MAX_RUN_LENGTH {
            current.count += 1;
        } else {
            runs.push(current);
            current = Run::new(1, byte);
        }
    }
    runs.push(current);

    runs
}

/// Serialized size of a run list, without any length prefix.
pub fn encoded_len(runs: &[Run]) -> usize {
    runs.len() * Run::ENCODED_SIZE
}

/// Flattens runs into `count, value` byte pairs.
pub fn runs_to_bytes(runs: &[Run]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(encoded_len(runs));
    for run in runs {
        encoded.push(run.count);
        encoded.push(run.value);
    }
    encoded
}

/// Expands serialized `count, value` pairs back into the original stream.
///
/// # Errors
/// - `RleDecompressionError::InvalidInputLength` if the data is not made of whole pairs
/// - `RleDecompressionError::ZeroLengthRun` if a pair has a count of zero
pub fn rle_decompression(data: &[u8]) -> Result<Vec<u8>, RleDecompressionError> {
    if !data.len().is_multiple_of(Run::ENCODED_SIZE) {
        return Err(RleDecompressionError::InvalidInputLength(data.len()));
    }

    let mut decoded = Vec::with_capacity(data.len());
    for (i, pair) in data.chunks_exact(Run::ENCODED_SIZE).enumerate() {
        let (count, value) = (pair[0], pair[1]);
        if count == 0 {
            return Err(RleDecompressionError::ZeroLengthRun(i * Run::ENCODED_SIZE));
        }
        decoded.resize(decoded.len() + count as usize, value);
    }

    Ok(decoded)
}
