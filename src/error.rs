use thiserror::Error;

/// Main error type for the video-pairing library
///
/// Pairing itself never fails; these errors come from loading input records
/// and configuration around it.
#[derive(Error, Debug)]
pub enum PairingError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading video records
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to load video records: {path}")]
    LoadFailed { path: String },

    #[error("Unsupported input format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Failed to parse video records from {source_name}: {reason}")]
    ParseFailed { source_name: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using PairingError
pub type Result<T> = std::result::Result<T, PairingError>;

impl PairingError {
    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Input(InputError::LoadFailed { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(InputError::LoadFailed { path }) => {
                format!("Could not read video records from '{}'. Please check the file exists.", path)
            }
            Self::Input(InputError::UnsupportedFormat { format }) => {
                format!("Input format '{}' is not supported. Provide a .json export of the videos.", format)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
