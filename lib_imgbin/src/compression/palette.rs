use std::collections::HashMap;

use thiserror::Error;

use crate::constants::MAX_PALETTE_SIZE;

/// RGBA color packed as `R << 24 | G << 16 | B << 8 | A`.
pub type PackedColor = u32;

#[derive(Error, Debug)]
pub enum PaletteCompressionError {
    #[error("Invalid pixel data length: expected multiple of 4 bytes, got {0}")]
    InvalidPixelDataLength(usize),
}

#[derive(Error, Debug)]
pub enum PaletteDecompressionError {
    #[error("Invalid palette index: {0} exceeds palette size of {1}")]
    InvalidPaletteIndex(usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteCompression {
    pub palette: Vec<PackedColor>, // Unique colors in order of first appearance
    pub indices: Vec<u8>,          // Palette index for each pixel
}

impl PaletteCompression {
    pub fn fits_in_byte(&self) -> bool {
        fits_in_byte(&self.palette)
    }
}

/// Whether every palette entry is addressable by a one-byte index.
pub fn fits_in_byte(palette: &[PackedColor]) -> bool {
    palette.len() <= MAX_PALETTE_SIZE
}

pub fn pack_color(r: u8, g: u8, b: u8, a: u8) -> PackedColor {
    (r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32
}

pub fn unpack_color(color: PackedColor) -> [u8; 4] {
    color.to_be_bytes()
}

/// Builds an insertion-ordered palette from a raw RGBA pixel buffer and maps
/// every pixel to its palette index.
///
/// # Parameters
/// - `pixels`: A slice of raw pixel data in RGBA format, row-major.
///
/// # Returns
/// A `PaletteCompression` holding the palette and one index per pixel.
///
/// Counting continues past [`MAX_PALETTE_SIZE`] so the caller can report the
/// real number of distinct colors, but no indices are emitted once the
/// palette no longer fits in a byte. Check [`PaletteCompression::fits_in_byte`]
/// before using `indices`.
///
/// # Errors
/// - Returns `PaletteCompressionError::InvalidPixelDataLength` if input length is not a multiple of 4
pub fn palette_compression(pixels: &[u8]) -> Result<PaletteCompression, PaletteCompressionError> {
    // Validate input length
    if !pixels.len().is_multiple_of(4) {
        return Err(PaletteCompressionError::InvalidPixelDataLength(
            pixels.len(),
        ));
    }

    let mut unique_colors: HashMap<PackedColor, usize> = HashMap::new();
    let mut palette = Vec::new();
    let mut indices = Vec::with_capacity(pixels.len() / 4);

    for pixel in pixels.chunks_exact(4) {
        let color = pack_color(pixel[0], pixel[1], pixel[2], pixel[3]);

        let index = match unique_colors.get(&color) {
            Some(&index) => index,
            None => {
                let index = palette.len();
                palette.push(color);
                unique_colors.insert(color, index);
                index
            }
        };

        if fits_in_byte(&palette) {
            indices.push(index as u8);
        }
    }

    Ok(PaletteCompression { palette, indices })
}

/// Expands palette indices back into RGBA pixel data.
///
/// # Errors
/// - Returns `PaletteDecompressionError::InvalidPaletteIndex` if any index exceeds the palette size
pub fn palette_decompression(
    compression: &PaletteCompression,
) -> Result<Vec<u8>, PaletteDecompressionError> {
    let palette_size = compression.palette.len();
    let mut decoded_pixels = Vec::with_capacity(compression.indices.len() * 4);

    for &index in &compression.indices {
        let index_usize = index as usize;

        // Validate index before accessing palette
        if index_usize >= palette_size {
            return Err(PaletteDecompressionError::InvalidPaletteIndex(
                index_usize,
                palette_size,
            ));
        }

        decoded_pixels.extend_from_slice(&unpack_color(compression.palette[index_usize]));
    }

    Ok(decoded_pixels)
}
