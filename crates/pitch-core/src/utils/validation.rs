//! Input validation for the autocorrelation and decimation entry points
//!
//! Each public routine validates once here and then runs without further
//! fallible operations.

use crate::error::{PitchError, Result};

/// Smallest frame accepted by the autocorrelation engine
pub const MIN_AUTOCORR_FRAME: usize = 8;

/// Validate an autocorrelation frame length and order
pub fn validate_autocorr_input(frame_len: usize, order: usize) -> Result<()> {
    if frame_len < MIN_AUTOCORR_FRAME {
        return Err(PitchError::invalid_frame_length(
            frame_len,
            "autocorrelation needs at least 8 samples",
        ));
    }

    if frame_len % 4 != 0 {
        return Err(PitchError::invalid_frame_length(
            frame_len,
            "autocorrelation needs a multiple of 4 samples",
        ));
    }

    if order >= frame_len {
        return Err(PitchError::InvalidOrder { order, frame_len });
    }

    Ok(())
}

/// Validate a decimator frame length
pub fn validate_decimator_input(frame_len: usize) -> Result<()> {
    if frame_len == 0 {
        return Err(PitchError::invalid_frame_length(
            frame_len,
            "decimation needs a non-empty frame",
        ));
    }

    if frame_len % 2 != 0 {
        return Err(PitchError::invalid_frame_length(
            frame_len,
            "decimation by 2 needs an even number of samples",
        ));
    }

    Ok(())
}

/// Validate that an output buffer can hold `needed` elements
pub fn validate_output_len(needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        return Err(PitchError::BufferTooSmall { needed, actual });
    }

    Ok(())
}
