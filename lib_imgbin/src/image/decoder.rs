use super::format::{AssetHeader, Image, Payload, FLAG_RAW, FLAG_RLE};
use crate::compression::palette::{PackedColor, PaletteCompression};
use crate::compression::{decompress, decompress_runs, DecompressionError};
use log::{debug, error, info};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Asset is {0} bytes, too short for the header")]
    TruncatedHeader(usize),
    #[error("Failed to parse header")]
    HeaderParsingFailed(#[from] bincode::Error),
    #[error("Unexpected end of data while reading palette color #{0}")]
    UnexpectedEofPaletteColor(usize),
    #[error("Missing compression flag")]
    MissingCompressionFlag,
    #[error("Unknown compression flag {0}")]
    UnknownCompressionFlag(u8),
    #[error("Missing length of the compressed payload")]
    MissingPayloadLength,
    #[error("Payload truncated: expected {expected} bytes, found {actual}")]
    TruncatedPayload { expected: usize, actual: usize },
    #[error("Payload holds {actual} pixels, header declares {expected}")]
    PixelCountMismatch { expected: usize, actual: usize },

    #[error("Decompression failed")]
    DecompressionFailed(#[from] DecompressionError),
}

fn take<'a>(data: &'a [u8], cursor: &mut usize, len: usize) -> Option<&'a [u8]> {
    let end = cursor.checked_add(len)?;
    let slice = data.get(*cursor..end)?;
    *cursor = end;
    Some(slice)
}

pub fn decode(encoded_data: &[u8]) -> Result<Image, DecodeError> {
    let mut cursor = 0;

    // Read width, height and palette size
    let header_bytes = take(encoded_data, &mut cursor, AssetHeader::SIZE).ok_or_else(|| {
        error!("Asset too short for header: {} bytes", encoded_data.len());
        DecodeError::TruncatedHeader(encoded_data.len())
    })?;
    let header: AssetHeader = bincode::deserialize(header_bytes)?;
    debug!(
        "Image dimensions read: width={} height={} palette={}",
        header.width, header.height, header.palette_count
    );

    // Read palette
    let palette_size = header.palette_count as usize;
    let mut palette: Vec<PackedColor> = Vec::with_capacity(palette_size);
    for i in 0..palette_size {
        let entry =
            take(encoded_data, &mut cursor, Image::PALETTE_ENTRY_SIZE).ok_or_else(|| {
                error!("Unexpected end of data while reading palette color #{}", i);
                DecodeError::UnexpectedEofPaletteColor(i)
            })?;
        palette.push(PackedColor::from_le_bytes([
            entry[0], entry[1], entry[2], entry[3],
        ]));
    }

    let flag = take(encoded_data, &mut cursor, Image::FLAG_SIZE)
        .ok_or(DecodeError::MissingCompressionFlag)?[0];

    let pixel_count = header.pixel_count();
    let indices = match flag {
        FLAG_RAW => {
            let raw = take(encoded_data, &mut cursor, pixel_count).ok_or_else(|| {
                error!("Raw payload truncated");
                DecodeError::TruncatedPayload {
                    expected: pixel_count,
                    actual: encoded_data.len() - cursor,
                }
            })?;
            debug!("Raw payload: {} bytes", raw.len());
            raw.to_vec()
        }
        FLAG_RLE => {
            let len_bytes = take(encoded_data, &mut cursor, Payload::LENGTH_PREFIX_SIZE)
                .ok_or(DecodeError::MissingPayloadLength)?;
            let len =
                u32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]])
                    as usize;
            let runs = take(encoded_data, &mut cursor, len).ok_or_else(|| {
                error!("RLE payload truncated");
                DecodeError::TruncatedPayload {
                    expected: len,
                    actual: encoded_data.len() - cursor,
                }
            })?;
            debug!("RLE payload: {} bytes", runs.len());
            decompress_runs(runs)?
        }
        other => {
            error!("Unknown compression flag {}", other);
            return Err(DecodeError::UnknownCompressionFlag(other));
        }
    };

    if indices.len() != pixel_count {
        error!(
            "Payload holds {} pixels, header declares {}",
            indices.len(),
            pixel_count
        );
        return Err(DecodeError::PixelCountMismatch {
            expected: pixel_count,
            actual: indices.len(),
        });
    }

    let compression = PaletteCompression { palette, indices };
    let rgba_data = decompress(&compression)?;
    info!("Decoding successful");

    Ok(Image::new(
        header.width,
        header.height,
        compression.palette,
        compression.indices,
        rgba_data,
    ))
}
