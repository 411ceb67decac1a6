use std::fmt;
use std::path::PathBuf;

/// Configuration loading error
///
/// Returned by [`CorsOptions::load`](super::CorsOptions::load) when the file
/// cannot be read, has an unknown extension, or does not deserialize.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The file extension does not map to a supported format
    UnsupportedFormat {
        /// Path with the unrecognized extension
        path: PathBuf,
    },
    /// The file was read but its content is not a valid CORS configuration
    Parse {
        /// Format that was attempted (`yaml`, `toml`, `json`)
        format: &'static str,
        /// Parser message
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(
                    f,
                    "CORS configuration error: cannot read '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::UnsupportedFormat { path } => {
                write!(
                    f,
                    "CORS configuration error: unsupported file format '{}'. \
                    Expected a .yaml, .yml, .toml or .json file",
                    path.display()
                )
            }
            ConfigError::Parse { format, message } => {
                write!(f, "CORS configuration error: invalid {format}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
