pub const FILE_EXT: &str = "bin";

/// Longest run a single (count, value) pair can describe.
pub const MAX_RUN_LENGTH: u8 = u8::MAX;

/// Largest palette the format accepts; indices are stored as single bytes.
pub const MAX_PALETTE_SIZE: usize = 255;
