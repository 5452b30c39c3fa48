use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use image::ImageError;
use lib_imgbin::constants::FILE_EXT;
use lib_imgbin::encode;
use lib_imgbin::image::encoder::EncodingError;
use log::{debug, info};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageHandlingError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] ImageError),

    #[error("Encoding error: {0}")]
    EncodingError(#[from] EncodingError),
}

/// Decodes any format the `image` crate understands into RGBA8.
pub fn load_rgba(path: &Path) -> Result<(u32, u32, Vec<u8>), ImageHandlingError> {
    let rgba = image::open(path)?.into_rgba8();
    let (width, height) = rgba.dimensions();
    debug!("Loaded {}: {}x{}", path.display(), width, height);
    Ok((width, height, rgba.into_raw()))
}

pub fn output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension(FILE_EXT),
    }
}

/// Writes `data` next to `path` first, then renames it into place so a failed
/// write never leaves a truncated asset under the final name.
pub fn write_asset(path: &Path, data: &[u8]) -> Result<(), ImageHandlingError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, path));

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Full pipeline: decode the source image, encode it, then write the asset.
/// Nothing is written unless encoding succeeds.
pub fn convert(input: &Path, output: &Path) -> Result<(), ImageHandlingError> {
    let (width, height, rgba) = load_rgba(input)?;
    let encoded = encode(width, height, &rgba)?;
    write_asset(output, &encoded)?;
    info!(
        "{} -> {} ({} bytes)",
        input.display(),
        output.display(),
        encoded.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("imgbin-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_output_path_replaces_extension() {
        assert_eq!(
            output_path(Path::new("data/images/spawn.png"), None),
            PathBuf::from("data/images/spawn.bin")
        );
        assert_eq!(
            output_path(Path::new("noext"), None),
            PathBuf::from("noext.bin")
        );
        assert_eq!(
            output_path(Path::new("a.png"), Some(Path::new("out/b.dat"))),
            PathBuf::from("out/b.dat")
        );
    }

    #[test]
    fn test_convert_png() {
        let dir = scratch_dir("convert");
        let input = dir.join("spawn.png");
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 0]));
        img.put_pixel(3, 4, Rgba([255, 128, 0, 255]));
        img.save(&input).unwrap();

        let output = output_path(&input, None);
        convert(&input, &output).unwrap();

        let decoded = lib_imgbin::decode(&fs::read(&output).unwrap()).unwrap();
        assert_eq!(decoded.width, 20);
        assert_eq!(decoded.height, 20);
        assert_eq!(decoded.rgba_data, img.into_raw());
        assert!(!dir.join("spawn.bin.tmp").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_convert_overflow_writes_nothing() {
        let dir = scratch_dir("overflow");
        let input = dir.join("noisy.png");
        let img = RgbaImage::from_fn(16, 16, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        img.save(&input).unwrap();

        let output = output_path(&input, None);
        let result = convert(&input, &output);
        assert!(matches!(
            result,
            Err(ImageHandlingError::EncodingError(
                EncodingError::PaletteOverflow { colors: 256 }
            ))
        ));
        assert!(!output.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_convert_missing_input() {
        let dir = scratch_dir("missing");
        let input = dir.join("absent.png");
        let output = output_path(&input, None);

        assert!(matches!(
            convert(&input, &output),
            Err(ImageHandlingError::ImageError(_))
        ));
        assert!(!output.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_asset_replaces_existing() {
        let dir = scratch_dir("replace");
        let path = dir.join("asset.bin");
        fs::write(&path, b"old").unwrap();

        write_asset(&path, &[1, 2, 3]).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);

        fs::remove_dir_all(&dir).unwrap();
    }
}
