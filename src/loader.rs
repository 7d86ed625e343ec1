// Opens an image file and decodes it into a bitmap the engine can blit.
// Visual expectation: when main.rs calls `load_bitmap()`, you get the full
// picture as RGBA, already decoded; the engine never looks at file formats.

use crate::error::Error;
use crate::types::Bitmap;
use std::path::Path;

/// Decode any format the `image` crate understands into an RGBA bitmap.
pub fn load_bitmap(path: impl AsRef<Path>) -> Result<Bitmap, Error> {
    let path = path.as_ref();

    // 1) Open + decode (format guessed from the content / extension).
    let decoded = image::open(path)
        .map_err(|e| Error::ImageLoad(format!("{}: {e}", path.display())))?;

    // 2) Normalize to 8-bit RGBA so every pixel read has an alpha channel.
    let rgba = decoded.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(Error::ImageLoad(format!("{}: image is empty", path.display())));
    }

    log::info!("loaded {} ({}x{})", path.display(), rgba.width(), rgba.height());
    Ok(Bitmap::from_rgba(rgba))
}
