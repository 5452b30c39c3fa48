pub mod palette;
pub mod rle;

use log::{debug, info, trace};
use palette::{
    PackedColor, PaletteCompression, PaletteCompressionError, PaletteDecompressionError,
};
use rle::{RleDecompressionError, Run};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Palette compression failed")]
    PaletteCompressionFailed(#[from] PaletteCompressionError),
}

#[derive(Error, Debug)]
pub enum DecompressionError {
    #[error("Palette decompression failed")]
    PaletteDecompressionFailed(#[from] PaletteDecompressionError),
    #[error("RLE decompression failed")]
    RleDecompressionFailed(#[from] RleDecompressionError),
}

pub struct CompressionResult {
    pub palette: Vec<PackedColor>,
    pub indices: Vec<u8>,
    pub runs: Vec<Run>,
}

impl CompressionResult {
    pub fn fits_in_byte(&self) -> bool {
        palette::fits_in_byte(&self.palette)
    }
}

/// Runs the palette and RLE stages over a raw RGBA buffer.
///
/// The RLE stage is skipped when the palette overflows a byte, since the
/// index stream is incomplete in that case and will not be written.
pub fn compress(data: &[u8]) -> Result<CompressionResult, CompressionError> {
    info!("Starting compression");
    debug!("Input data length: {}", data.len());

    // Step 1: Palette Compression
    let PaletteCompression { palette, indices } = palette::palette_compression(data)?;
    debug!(
        "Palette compressed: {} unique colors, {} indices",
        palette.len(),
        indices.len()
    );
    trace!("Palette: {:08X?}", palette);

    let mut result = CompressionResult {
        palette,
        indices,
        runs: Vec::new(),
    };
    if !result.fits_in_byte() {
        debug!("Palette does not fit one-byte indices, skipping RLE");
        return Ok(result);
    }

    // Step 2: RLE
    result.runs = rle::rle_compression(&result.indices);
    debug!(
        "RLE encoding: {} runs, {} bytes",
        result.runs.len(),
        rle::encoded_len(&result.runs)
    );

    info!("Compression completed");
    Ok(result)
}

/// Expands serialized runs into an index stream.
pub fn decompress_runs(data: &[u8]) -> Result<Vec<u8>, DecompressionError> {
    let indices = rle::rle_decompression(data)?;
    debug!(
        "RLE decoding: {} bytes -> {} indices",
        data.len(),
        indices.len()
    );
    Ok(indices)
}

/// Maps an index stream back to RGBA through its palette.
pub fn decompress(data: &PaletteCompression) -> Result<Vec<u8>, DecompressionError> {
    info!("Starting decompression");

    let expanded_pixels = palette::palette_decompression(data)?;
    debug!("Palette expansion: {} bytes", expanded_pixels.len());

    info!("Decompression completed successfully");
    Ok(expanded_pixels)
}
