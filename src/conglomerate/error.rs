// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for mesh conglomeration

use thiserror::Error;

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that can abort a merge before any patch is processed.
///
/// Empty patches and degenerate triangles are not errors; they are
/// skipped and counted in the [`MergeReport`](super::MergeReport).
#[derive(Debug, Error)]
pub enum MergeError {
    /// Weld tolerance must be a positive, finite distance.
    #[error("invalid weld tolerance {tolerance}: must be positive and finite")]
    InvalidTolerance {
        /// The rejected tolerance.
        tolerance: f64,
    },

    /// Configuration text could not be parsed.
    #[error("failed to parse merge configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be serialized.
    #[error("failed to serialize merge configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration value from the environment was malformed.
    #[error("invalid value {value:?} for {key}")]
    InvalidOverride {
        /// Environment variable name.
        key: String,
        /// The value that failed to parse.
        value: String,
    },

    /// Configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// Report could not be encoded.
    #[error("failed to encode merge report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Check that `tolerance` can be used as a weld distance and grid cell size.
pub fn check_tolerance(tolerance: f64) -> MergeResult<f64> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(tolerance)
    } else {
        Err(MergeError::InvalidTolerance { tolerance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tolerance() {
        assert!(check_tolerance(1e-6).is_ok());
        assert!(matches!(
            check_tolerance(0.0),
            Err(MergeError::InvalidTolerance { .. })
        ));
        assert!(check_tolerance(-1.0).is_err());
        assert!(check_tolerance(f64::NAN).is_err());
        assert!(check_tolerance(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = MergeError::InvalidTolerance { tolerance: -0.5 };
        assert!(err.to_string().contains("-0.5"));
    }
}
