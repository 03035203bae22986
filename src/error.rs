use std::fmt;

/// Central error types for the preview tool
#[derive(Debug)]
pub enum AppError {
    /// Settings file could not be parsed or written
    Config(String),
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Image decoding error
    ImageProcessing(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::ImageProcessing(msg) => write!(f, "Image processing error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(e: toml::ser::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        AppError::ImageProcessing(e.to_string())
    }
}

/// Short messages for the terminal
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(msg) => format!("Could not read printer settings: {}", msg),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check the output path.".to_string()
            }
            AppError::ImageProcessing(_) => "The thumbnail is not a valid PNG image.".to_string(),
        }
    }
}
