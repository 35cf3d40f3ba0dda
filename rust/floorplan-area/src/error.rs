// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the area calculation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed drawing scale. Always recovered by falling back to 1:100.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScaleError {
    #[error("Scale '{0}' has no ':' separator")]
    MissingSeparator(String),

    #[error("Scale component '{0}' is not a number")]
    InvalidNumber(String),

    #[error("Scale '{0}' does not give a positive finite multiplier")]
    NotPositive(String),

    #[error("Scale '{0}' exceeds 1:1000000")]
    OutOfRange(String),
}

/// Failure to turn the first PDF page into a raster image.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("PDF conversion failed: file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("PDF conversion failed: could not run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF conversion failed: {tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("PDF conversion failed: Failed to convert PDF to image")]
    EmptyOutput,

    #[error("PDF conversion failed: document has no pages")]
    NoPages,

    #[error("PDF conversion failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("PDF conversion failed: {0}")]
    Pdfium(String),
}

/// Errors that end an area calculation.
#[derive(Debug, Error)]
pub enum AreaError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Could not detect building outline")]
    DetectionFailure,

    #[error("Failed to write debug image: {0}")]
    DebugImage(#[from] image::ImageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AreaError {
    /// Fixed user-facing summary that accompanies the error text.
    pub fn user_message(&self) -> &'static str {
        match self {
            AreaError::DetectionFailure => "No clear building boundary found in the PDF",
            _ => "Area calculation failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_failure_messages() {
        let err = AreaError::DetectionFailure;
        assert_eq!(err.to_string(), "Could not detect building outline");
        assert_eq!(err.user_message(), "No clear building boundary found in the PDF");
    }

    #[test]
    fn test_conversion_error_is_transparent() {
        let err = AreaError::from(ConversionError::NoPages);
        assert_eq!(err.to_string(), "PDF conversion failed: document has no pages");
        assert_eq!(err.user_message(), "Area calculation failed");
    }
}
