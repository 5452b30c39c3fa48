#![allow(dead_code)]

/// 4x4 image using three colors.
pub const RANDOM_RGB: [u8; 64] = [
    255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 0, 0, 255, //
    0, 255, 0, 255, 0, 255, 0, 255, 255, 0, 0, 255, 0, 0, 255, 255, //
    0, 0, 255, 255, 255, 0, 0, 255, 0, 255, 0, 255, 0, 255, 0, 255, //
    255, 0, 0, 255, 0, 0, 255, 255, 0, 0, 255, 255, 255, 0, 0, 255, //
];
pub const RANDOM_RGB_PALETTE_SIZE: usize = 3;

/// Horizontal gray ramp of `width` distinct colors repeated over `height` rows.
pub fn gradient(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..height {
        for x in 0..width {
            let v = x as u8;
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    data
}

/// `count` distinct colors, one pixel each.
pub fn distinct_colors(count: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((count * 4) as usize);
    for i in 0..count {
        data.extend_from_slice(&[(i % 256) as u8, (i / 256) as u8, 7, 255]);
    }
    data
}

pub fn solid(color: [u8; 4], pixels: usize) -> Vec<u8> {
    color.repeat(pixels)
}
