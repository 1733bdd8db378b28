//! Error handling for the pitch front end
//!
//! Every fallible entry point validates its inputs once and reports a
//! [`PitchError`]. Numeric overload is never an error: autocorrelation
//! rescales and the allpass filters saturate.

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for pitch front end operations
pub type Result<T> = std::result::Result<T, PitchError>;

/// Error type for pitch front end operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PitchError {
    /// Frame length violates the precondition of the called routine
    #[error("Invalid frame length {length}: {requirement}")]
    InvalidFrameLength {
        length: usize,
        requirement: &'static str,
    },

    /// Autocorrelation order out of range for the frame
    #[error("Invalid autocorrelation order {order} (must be below frame length {frame_len})")]
    InvalidOrder { order: usize, frame_len: usize },

    /// Output buffer too small for the result
    #[error("Buffer too small: need {needed} elements, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Invalid front end configuration
    #[error("Invalid front end configuration: {details}")]
    InvalidConfig { details: String },

    /// A forced autocorrelation kernel is not supported by this CPU or build
    #[error("Autocorrelation kernel not available: {kernel}")]
    KernelUnavailable { kernel: &'static str },

    /// Number of frames does not match number of channel streams
    #[error("Channel mismatch: {streams} streams, {frames} frames")]
    ChannelMismatch { streams: usize, frames: usize },
}

impl PitchError {
    /// Create a new invalid frame length error
    pub fn invalid_frame_length(length: usize, requirement: &'static str) -> Self {
        Self::InvalidFrameLength {
            length,
            requirement,
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig { .. }
            | Self::KernelUnavailable { .. }
            | Self::ChannelMismatch { .. } => ErrorCategory::Configuration,

            Self::InvalidFrameLength { .. } | Self::InvalidOrder { .. } => {
                ErrorCategory::Precondition
            }

            Self::BufferTooSmall { .. } => ErrorCategory::Memory,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration and setup errors
    Configuration,
    /// Per-call input contract violations
    Precondition,
    /// Caller-provided buffer errors
    Memory,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Precondition => write!(f, "Precondition"),
            Self::Memory => write!(f, "Memory"),
        }
    }
}
