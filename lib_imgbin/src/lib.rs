pub mod compression;
pub mod constants;
pub mod image;

use log::*;
use std::io::Write;

pub use crate::compression::palette::{pack_color, unpack_color, PackedColor};
pub use crate::image::format::{Image, Payload};
pub use crate::image::{decode, encode};

/// Installs the stderr logger for the codec and its front end.
///
/// `level` applies to crates of this workspace; `RUST_LOG` takes precedence
/// when set.
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter(Some("lib_imgbin"), level)
        .filter(Some("imgbin"), level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
