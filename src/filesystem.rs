use std::fs;
use std::io::Result;
use std::path::{Path, PathBuf};

use moonraker_thumbnail::ThumbnailImage;

/// Get the app data directory
pub fn get_app_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

/// Default location of the printer settings file
pub fn default_settings_path() -> PathBuf {
    get_app_data_dir().join("printer.toml")
}

/// `<data dir>/thumbnails/<gcode stem>.png`
pub fn default_output_path(gcode_filename: &str) -> PathBuf {
    let stem = Path::new(gcode_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("thumbnail");

    get_app_data_dir()
        .join("thumbnails")
        .join(format!("{}.png", stem))
}

/// Writes the encoded thumbnail to `path`, creating parent directories
pub fn save_thumbnail(path: &Path, thumbnail: &ThumbnailImage) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, thumbnail.data())?;
    log::debug!(
        "Saved {} byte thumbnail to {}",
        thumbnail.size(),
        path.display()
    );
    Ok(())
}
