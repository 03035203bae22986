use crate::error::AppError;
use base64::Engine;
use image::{ImageFormat, RgbaImage};
use moonraker_thumbnail::ThumbnailImage;

/// Decodes the PNG bytes of a thumbnail into RGBA pixels.
///
/// The decoded image must be square with the edge length Moonraker listed.
pub fn decode_thumbnail(thumbnail: &ThumbnailImage) -> Result<RgbaImage, AppError> {
    let decoded = image::load_from_memory_with_format(thumbnail.data(), ImageFormat::Png)?;
    let rgba = decoded.to_rgba8();

    let edge = thumbnail.width_height();
    if rgba.width() != edge || rgba.height() != edge {
        return Err(AppError::ImageProcessing(format!(
            "expected {}x{} pixels, decoded {}x{}",
            edge,
            edge,
            rgba.width(),
            rgba.height()
        )));
    }

    Ok(rgba)
}

/// Returns a Data-URL (Base64) of the thumbnail for web views
pub fn thumbnail_to_data_url(thumbnail: &ThumbnailImage) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(thumbnail.data());
    format!("data:image/png;base64,{}", b64)
}
