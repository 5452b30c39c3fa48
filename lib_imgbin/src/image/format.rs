use serde::{Deserialize, Serialize};

use crate::compression::palette::PackedColor;
use crate::compression::rle::Run;

pub const FLAG_RAW: u8 = 0;
pub const FLAG_RLE: u8 = 1;

/// Fixed-size header at the start of every asset. bincode's default
/// configuration writes it as fixed-width little-endian fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetHeader {
    pub width: u32,
    pub height: u32,
    pub palette_count: u16,
}

impl AssetHeader {
    pub const SIZE: usize = 2 * std::mem::size_of::<u32>() + std::mem::size_of::<u16>();

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Index stream as stored after the flag byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Raw(Vec<u8>),
    Rle(Vec<Run>),
}

impl Payload {
    pub const LENGTH_PREFIX_SIZE: usize = std::mem::size_of::<u32>();

    pub fn flag(&self) -> u8 {
        match self {
            Payload::Raw(_) => FLAG_RAW,
            Payload::Rle(_) => FLAG_RLE,
        }
    }

    /// Bytes the payload occupies after the flag, length prefix included.
    pub fn encoded_size(&self) -> usize {
        match self {
            Payload::Raw(indices) => indices.len(),
            Payload::Rle(runs) => Self::LENGTH_PREFIX_SIZE + runs.len() * Run::ENCODED_SIZE,
        }
    }
}

#[derive(Debug)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub palette: Vec<PackedColor>,
    pub indices: Vec<u8>,
    pub rgba_data: Vec<u8>,
}

impl Image {
    pub const PALETTE_ENTRY_SIZE: usize = std::mem::size_of::<PackedColor>();
    pub const FLAG_SIZE: usize = std::mem::size_of::<u8>();

    pub fn new(
        width: u32,
        height: u32,
        palette: Vec<PackedColor>,
        indices: Vec<u8>,
        rgba_data: Vec<u8>,
    ) -> Self {
        Self {
            width,
            height,
            palette,
            indices,
            rgba_data,
        }
    }
}
