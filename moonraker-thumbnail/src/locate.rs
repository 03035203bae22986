//! Finding the best preview for a G-code file
//!
//! Moonraker lists every preview the slicer embedded, usually a small
//! (32x32) and a large (300x300 or 400x300) one. Only square previews that
//! fit the display limits are eligible; among those the largest encoded
//! size wins, and ties keep the candidate listed first.

use serde_json::Value;

use crate::error::ThumbnailError;
use crate::models::{MoonrakerConfig, ThumbnailDescriptor};
use crate::transport::Transport;

/// Queries the metadata endpoint and selects one preview
pub(crate) fn locate_thumbnail<T: Transport>(
    config: &MoonrakerConfig,
    transport: &T,
    file_name: &str,
) -> Result<ThumbnailDescriptor, ThumbnailError> {
    if file_name.is_empty() {
        return Err(ThumbnailError::MissingFileName);
    }

    let url = config.thumbnails_url(file_name)?;
    log::debug!("Requesting thumbnail list: {}", url);

    let response = transport.get(&url)?;
    if !response.is_success() {
        return Err(ThumbnailError::Status(response.status()));
    }

    let body = response.text()?;
    let candidates = parse_candidates(&body);
    log::debug!("{} thumbnail candidates for {}", candidates.len(), file_name);

    match select_thumbnail(candidates) {
        Some(chosen) if !chosen.thumbnail_path.is_empty() => Ok(chosen),
        _ => Err(ThumbnailError::NoCandidate),
    }
}

/// Parses the `result` list of a `/server/files/thumbnails` response.
///
/// Missing or mistyped fields read as zero (or an empty path); floats are
/// truncated. Entries with a negative or oversized number are dropped. A
/// body that is not JSON, or whose `result` is not a list, yields no
/// candidates.
pub fn parse_candidates(body: &str) -> Vec<ThumbnailDescriptor> {
    let doc: Value = match serde_json::from_str(body) {
        Ok(doc) => doc,
        Err(e) => {
            log::debug!("Thumbnail list is not valid JSON: {}", e);
            return Vec::new();
        }
    };

    doc.get("result")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    Some(ThumbnailDescriptor {
                        width: int_field(item, "width")?,
                        height: int_field(item, "height")?,
                        size: int_field(item, "size")?,
                        thumbnail_path: item
                            .get("thumbnail_path")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// `None` for numbers that do not fit an unsigned 32-bit field
fn int_field(item: &Value, key: &str) -> Option<u32> {
    let Some(number) = item.get(key).filter(|v| v.is_number()) else {
        return Some(0);
    };

    if let Some(v) = number.as_u64() {
        return u32::try_from(v).ok();
    }

    match number.as_f64() {
        Some(v) if v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX) => {
            Some(v.trunc() as u32)
        }
        _ => None,
    }
}

/// Picks the eligible candidate with the strictly largest size.
///
/// A later candidate only replaces the current choice when it is strictly
/// larger, so the first candidate reaching the maximum is kept.
pub fn select_thumbnail<I>(candidates: I) -> Option<ThumbnailDescriptor>
where
    I: IntoIterator<Item = ThumbnailDescriptor>,
{
    let mut chosen: Option<ThumbnailDescriptor> = None;

    for candidate in candidates {
        if !candidate.is_eligible() {
            continue;
        }

        let chosen_size = chosen.as_ref().map_or(0, |c| c.size);
        if candidate.size <= chosen_size {
            continue;
        }

        chosen = Some(candidate);
    }

    chosen
}
