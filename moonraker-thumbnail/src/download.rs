//! Fetching the encoded bytes of a selected preview

use std::io::Read;

use crate::error::ThumbnailError;
use crate::models::{MoonrakerConfig, ThumbnailDescriptor, ThumbnailImage};
use crate::transport::Transport;

/// Downloads exactly `descriptor.size` bytes into a new buffer.
///
/// A body shorter than the declared size is a `ShortRead`; anything past
/// the declared size is left unread.
pub(crate) fn download_thumbnail<T: Transport>(
    config: &MoonrakerConfig,
    transport: &T,
    descriptor: &ThumbnailDescriptor,
) -> Result<ThumbnailImage, ThumbnailError> {
    let url = config.gcode_file_url(&descriptor.thumbnail_path)?;
    log::info!("Fetching thumbnail: {}", descriptor.thumbnail_path);
    log::debug!("Thumbnail URL: {}", url);

    let response = transport.get(&url)?;
    if !response.is_success() {
        return Err(ThumbnailError::Status(response.status()));
    }

    let expected = descriptor.size as usize;
    let mut data = Vec::with_capacity(expected);
    response
        .into_body()
        .take(expected as u64)
        .read_to_end(&mut data)?;

    if data.len() < expected {
        return Err(ThumbnailError::ShortRead {
            expected,
            actual: data.len(),
        });
    }

    ThumbnailImage::new(descriptor.width, data).ok_or(ThumbnailError::NoCandidate)
}
