//! # Moonraker Thumbnail
//!
//! Fetches the embedded preview image of a G-code file from a Moonraker
//! (Klipper) print server.
//!
//! The pipeline runs in two blocking steps:
//! - **Locate**: ask `/server/files/thumbnails` which previews exist for a
//!   file and pick the largest square one that fits the display limits
//!   (at most 64x64 pixels and 10 000 bytes)
//! - **Download**: fetch the chosen preview from `/server/files/gcodes/...`
//!   into a freshly owned buffer
//!
//! Every failure (empty file name, transport error, non-200 status, no
//! eligible candidate, short body) is logged and collapses to `None`.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use moonraker_thumbnail::{fetch_thumbnail, MoonrakerConfig};
//!
//! let config = MoonrakerConfig::new("voron.local", 7125);
//!
//! match fetch_thumbnail(&config, "benchy.gcode") {
//!     Some(image) => println!("{}x{} preview, {} bytes", image.width_height(), image.width_height(), image.size()),
//!     None => println!("no preview available"),
//! }
//! ```

pub mod download;
pub mod error;
pub mod locate;
pub mod models;
pub mod service;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ThumbnailError;
pub use locate::{parse_candidates, select_thumbnail};
pub use models::{
    MoonrakerConfig, ThumbnailDescriptor, ThumbnailImage, MAX_THUMBNAIL_RESOLUTION,
    MAX_THUMBNAIL_SIZE,
};
pub use service::ThumbnailService;
pub use transport::{Transport, TransportError, TransportResponse};

#[cfg(feature = "http")]
pub use service::fetch_thumbnail;

#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
