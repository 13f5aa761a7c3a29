// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

use std::fmt;
use std::process::ExitCode;

/// CLI-specific error type with exit code mapping
#[derive(Debug)]
pub enum CliError {
    /// Invalid command-line arguments
    InvalidArgs(String),
    /// Media device or TPG entity not found or inaccessible
    DeviceNotFound(String),
    /// A control write was rejected by the driver
    ControlFailed(String),
    /// Pad format setup was rejected by the driver
    FormatFailed(String),
    /// General error from the TPG control library
    General(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidArgs(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            CliError::ControlFailed(msg) => write!(f, "Control write failed: {}", msg),
            CliError::FormatFailed(msg) => write!(f, "Format setup failed: {}", msg),
            CliError::General(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidArgs(_) => 2,
            CliError::DeviceNotFound(_) => 3,
            CliError::ControlFailed(_) => 4,
            CliError::FormatFailed(_) => 5,
            CliError::General(_) => 1,
        }
    }
}

/// Map tpgctl::Error to CliError with appropriate exit codes
impl From<tpgctl::Error> for CliError {
    fn from(err: tpgctl::Error) -> Self {
        use tpgctl::Error;

        match err {
            // IO errors - the media node itself is the usual culprit
            Error::Io(io_err) => match io_err.kind() {
                std::io::ErrorKind::NotFound => {
                    CliError::DeviceNotFound(format!("Media device not found: {}", io_err))
                }
                std::io::ErrorKind::PermissionDenied => {
                    CliError::DeviceNotFound(format!("Permission denied: {}", io_err))
                }
                _ => CliError::General(format!("I/O error: {}", io_err)),
            },

            // Entity resolution failures
            Error::EntityNotFound(name) => {
                CliError::DeviceNotFound(format!("Media entity not found: \"{}\"", name))
            }
            Error::DevnodeNotFound(name) => {
                CliError::DeviceNotFound(format!("No device node for entity: \"{}\"", name))
            }

            // Hardware programming failures
            Error::ControlWrite { id, source } => {
                CliError::ControlFailed(format!("control {:#010x}: {}", id, source))
            }
            Error::FormatSetup { entity, source } => {
                CliError::FormatFailed(format!("entity \"{}\": {}", entity, source))
            }

            // Enumeration and format-table errors
            Error::Enumerate(e) => {
                CliError::General(format!("Failed to enumerate media entities: {}", e))
            }
            Error::UnknownFormat(name) => {
                CliError::General(format!("Unknown media-bus format: \"{}\"", name))
            }
        }
    }
}

/// Helper function to convert result to exit code
pub fn result_to_exit_code<T>(result: Result<T, CliError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::InvalidArgs("test".into()).exit_code(), 2);
        assert_eq!(CliError::DeviceNotFound("test".into()).exit_code(), 3);
        assert_eq!(CliError::ControlFailed("test".into()).exit_code(), 4);
        assert_eq!(CliError::FormatFailed("test".into()).exit_code(), 5);
        assert_eq!(CliError::General("test".into()).exit_code(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = CliError::DeviceNotFound("/dev/media0".to_string());
        assert_eq!(format!("{}", err), "Device not found: /dev/media0");
    }
}
