use log::{debug, error, info};
use thiserror::Error;

use super::format::{AssetHeader, Image, Payload};
use crate::compression::palette::PackedColor;
use crate::compression::rle::{self, Run};
use crate::compression::{compress, CompressionError};
use crate::constants::MAX_PALETTE_SIZE;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Failed to compress image data")]
    CompressionFailed(#[from] CompressionError),
    #[error("Palette has {colors} colors, at most 255 fit one-byte indices")]
    PaletteOverflow { colors: usize },
    #[error("Pixel data is {actual} bytes, expected {expected} for the given dimensions")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Compressed payload of {0} bytes does not fit its u32 length prefix")]
    PayloadTooLarge(usize),
    #[error("Failed to serialize header")]
    HeaderSerializationFailed(#[from] bincode::Error),
}

/// Picks the smaller of the raw index stream and its run list.
///
/// The run list pays for a 4-byte length prefix. Ties keep the raw form.
pub fn select_payload(indices: Vec<u8>, runs: Vec<Run>) -> Payload {
    let compressed_size = Payload::LENGTH_PREFIX_SIZE + rle::encoded_len(&runs);
    debug!("Payload sizes: raw={} rle={}", indices.len(), compressed_size);

    if compressed_size < indices.len() {
        Payload::Rle(runs)
    } else {
        Payload::Raw(indices)
    }
}

/// Serializes header, palette, flag and payload into the final asset bytes.
///
/// # Errors
/// - `EncodingError::PaletteOverflow` if the palette exceeds [`MAX_PALETTE_SIZE`]
/// - `EncodingError::PayloadTooLarge` if a run list is too long for its prefix
pub fn write_asset(
    width: u32,
    height: u32,
    palette: &[PackedColor],
    payload: &Payload,
) -> Result<Vec<u8>, EncodingError> {
    if palette.len() > MAX_PALETTE_SIZE {
        error!(
            "Palette size {} exceeds the maximum allowed limit of {} colors",
            palette.len(),
            MAX_PALETTE_SIZE
        );
        return Err(EncodingError::PaletteOverflow {
            colors: palette.len(),
        });
    }

    let header = AssetHeader {
        width,
        height,
        palette_count: palette.len() as u16,
    };

    let mut encoded_data = bincode::serialize(&header)?;
    encoded_data.reserve(
        palette.len() * Image::PALETTE_ENTRY_SIZE + Image::FLAG_SIZE + payload.encoded_size(),
    );
    debug!("Header written: {:?}", header);

    for color in palette {
        encoded_data.extend_from_slice(&color.to_le_bytes());
    }
    debug!("Palette data written with {} colors", palette.len());

    encoded_data.push(payload.flag());
    match payload {
        Payload::Raw(indices) => {
            encoded_data.extend_from_slice(indices);
            debug!("Raw indices written: {} bytes", indices.len());
        }
        Payload::Rle(runs) => {
            let bytes = rle::runs_to_bytes(runs);
            let len = u32::try_from(bytes.len())
                .map_err(|_| EncodingError::PayloadTooLarge(bytes.len()))?;
            encoded_data.extend_from_slice(&len.to_le_bytes());
            encoded_data.extend_from_slice(&bytes);
            debug!("RLE payload written: {} runs, {} bytes", runs.len(), len);
        }
    }

    Ok(encoded_data)
}

/// Encodes a row-major RGBA buffer into an indexed asset.
pub fn encode(width: u32, height: u32, rgba_data: &[u8]) -> Result<Vec<u8>, EncodingError> {
    info!("Starting encoding of {}x{} image", width, height);

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .unwrap_or(usize::MAX);
    if rgba_data.len() != expected {
        error!(
            "Pixel buffer of {} bytes does not match {}x{}",
            rgba_data.len(),
            width,
            height
        );
        return Err(EncodingError::DimensionMismatch {
            expected,
            actual: rgba_data.len(),
        });
    }

    let compressed = compress(rgba_data)?;
    if !compressed.fits_in_byte() {
        error!(
            "Image has {} distinct colors, at most {} are supported",
            compressed.palette.len(),
            MAX_PALETTE_SIZE
        );
        return Err(EncodingError::PaletteOverflow {
            colors: compressed.palette.len(),
        });
    }

    let payload = select_payload(compressed.indices, compressed.runs);
    let encoded_data = write_asset(width, height, &compressed.palette, &payload)?;

    info!(
        "Encoding completed: {} bytes, {}",
        encoded_data.len(),
        match &payload {
            Payload::Raw(_) => "raw",
            Payload::Rle(_) => "rle",
        }
    );
    Ok(encoded_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::format::{FLAG_RAW, FLAG_RLE};

    #[test]
    fn test_select_raw_without_repeats() {
        let indices: Vec<u8> = (0..10).collect();
        let runs = rle::rle_compression(&indices);
        let payload = select_payload(indices.clone(), runs);
        assert_eq!(payload.flag(), FLAG_RAW);
        assert_eq!(payload, Payload::Raw(indices));
    }

    #[test]
    fn test_select_rle_for_uniform_stream() {
        let indices = vec![0u8; 1000];
        let runs = rle::rle_compression(&indices);
        assert_eq!(runs.len(), 4);

        let payload = select_payload(indices, runs);
        assert_eq!(payload.flag(), FLAG_RLE);
        assert_eq!(payload.encoded_size(), 12);
    }

    #[test]
    fn test_select_tie_keeps_raw() {
        // One run: 4 + 2 = 6 bytes against 6 raw bytes.
        let indices = vec![5u8; 6];
        let runs = rle::rle_compression(&indices);
        assert_eq!(select_payload(indices, runs).flag(), FLAG_RAW);

        let indices = vec![5u8; 7];
        let runs = rle::rle_compression(&indices);
        assert_eq!(select_payload(indices, runs).flag(), FLAG_RLE);
    }

    #[test]
    fn test_write_asset_layout() {
        let palette = vec![0x1122_3344, 0xAABB_CCDD];
        let payload = Payload::Raw(vec![0, 1, 1]);

        let bytes = write_asset(3, 1, &palette, &payload).unwrap();
        assert_eq!(
            bytes,
            vec![
                3, 0, 0, 0, // width
                1, 0, 0, 0, // height
                2, 0, // palette count
                0x44, 0x33, 0x22, 0x11, //
                0xDD, 0xCC, 0xBB, 0xAA, //
                0, // raw
                0, 1, 1,
            ]
        );
    }

    #[test]
    fn test_write_asset_rle_layout() {
        let payload = Payload::Rle(vec![Run::new(255, 0), Run::new(45, 0)]);
        let bytes = write_asset(300, 1, &[0xFF], &payload).unwrap();

        assert_eq!(&bytes[..4], &300u32.to_le_bytes());
        assert_eq!(bytes[14], FLAG_RLE);
        assert_eq!(&bytes[15..19], &4u32.to_le_bytes());
        assert_eq!(&bytes[19..], &[255, 0, 45, 0]);
    }

    #[test]
    fn test_write_asset_rejects_oversized_palette() {
        let palette: Vec<PackedColor> = (0..256).collect();
        let result = write_asset(1, 1, &palette, &Payload::Raw(vec![0]));
        assert!(matches!(
            result,
            Err(EncodingError::PaletteOverflow { colors: 256 })
        ));
    }

    #[test]
    fn test_write_asset_exact_length() {
        let palette = vec![1, 2, 3];
        let payload = Payload::Rle(vec![Run::new(9, 0), Run::new(9, 2)]);
        let bytes = write_asset(6, 3, &palette, &payload).unwrap();
        assert_eq!(
            bytes.len(),
            AssetHeader::SIZE
                + palette.len() * Image::PALETTE_ENTRY_SIZE
                + Image::FLAG_SIZE
                + payload.encoded_size()
        );
    }

    #[test]
    fn test_encode_dimension_mismatch() {
        let result = encode(2, 2, &[0; 12]);
        assert!(matches!(
            result,
            Err(EncodingError::DimensionMismatch {
                expected: 16,
                actual: 12
            })
        ));
    }

    #[test]
    fn test_encode_empty_image() {
        let bytes = encode(0, 5, &[]).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0, 5, 0, 0, 0, 0, 0, FLAG_RAW]);
    }
}
