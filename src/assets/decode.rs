use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{StampError, StampResult};

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> StampResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode the image at `path`.
///
/// A file that does not exist is reported as [`StampError::MissingAsset`]; any other IO or
/// decode failure is wrapped as [`StampError::Other`].
pub fn load_rgba(path: &Path) -> StampResult<RgbaImage> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(StampError::missing_asset(path));
        }
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!("read image '{}'", path.display()))
                .into());
        }
    };
    decode_image(&bytes).map_err(|err| match err {
        StampError::Other(e) => StampError::Other(e.context(format!("'{}'", path.display()))),
        other => other,
    })
}

/// Encode `img` as PNG at `path`, creating parent directories as needed.
pub fn save_png(path: &Path, img: &RgbaImage) -> StampResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
