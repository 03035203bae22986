use std::time::Duration;

use url::Url;

use crate::error::ThumbnailError;

/// Largest encoded preview (in bytes) that is considered for display
pub const MAX_THUMBNAIL_SIZE: u32 = 10_000;

/// Largest preview edge length (in pixels) that is considered for display
pub const MAX_THUMBNAIL_RESOLUTION: u32 = 64;

/// Default Moonraker API port
pub const DEFAULT_MOONRAKER_PORT: u16 = 7125;

/// Connection settings for the Moonraker print server
#[derive(Debug, Clone, PartialEq)]
pub struct MoonrakerConfig {
    pub host: String,
    pub port: u16,
    /// Time allowed for establishing the TCP connection
    pub connect_timeout: Duration,
    /// Time allowed for a whole request, body included
    pub request_timeout: Duration,
}

impl MoonrakerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// `http://host:port/`
    pub fn base_url(&self) -> Result<Url, ThumbnailError> {
        Ok(Url::parse(&format!("http://{}:{}/", self.host, self.port))?)
    }

    /// Metadata endpoint listing the previews of a G-code file
    pub fn thumbnails_url(&self, file_name: &str) -> Result<Url, ThumbnailError> {
        let mut url = self.base_url()?.join("server/files/thumbnails")?;
        url.query_pairs_mut().append_pair("filename", file_name);
        Ok(url)
    }

    /// File endpoint for a preview path relative to the gcodes root
    pub fn gcode_file_url(&self, thumbnail_path: &str) -> Result<Url, ThumbnailError> {
        let mut url = self.base_url()?;
        let base = url.to_string();

        url.path_segments_mut()
            .map_err(|_| ThumbnailError::InvalidUrl(base))?
            .pop_if_empty()
            .extend(["server", "files", "gcodes"])
            .extend(thumbnail_path.split('/').filter(|s| !s.is_empty()));

        Ok(url)
    }
}

impl Default for MoonrakerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_MOONRAKER_PORT,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// One preview candidate as listed by the metadata endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailDescriptor {
    pub width: u32,
    pub height: u32,
    /// Encoded size in bytes
    pub size: u32,
    /// Path relative to the gcodes root, e.g. `.thumbs/benchy-32x32.png`
    pub thumbnail_path: String,
}

impl ThumbnailDescriptor {
    /// Square, non-empty and within both display limits
    pub fn is_eligible(&self) -> bool {
        self.width > 0
            && self.width == self.height
            && self.size <= MAX_THUMBNAIL_SIZE
            && self.width <= MAX_THUMBNAIL_RESOLUTION
    }
}

/// A downloaded preview. The encoded bytes are owned by the value and move
/// with it; `data().len()` always equals `size()` and the edge length is
/// never zero.
#[derive(Debug, PartialEq, Eq)]
pub struct ThumbnailImage {
    width_height: u32,
    data: Vec<u8>,
}

impl ThumbnailImage {
    /// `None` for a zero edge length
    pub fn new(width_height: u32, data: Vec<u8>) -> Option<Self> {
        if width_height == 0 {
            return None;
        }
        Some(Self { width_height, data })
    }

    /// Edge length in pixels (previews are square)
    pub fn width_height(&self) -> u32 {
        self.width_height
    }

    /// Length of the encoded data in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
