//! Streaming decimator
//!
//! Owns one [`AllpassState`] and a scratch buffer that is reused across
//! frames, so steady-state processing does not allocate.

use super::{decimate_by_2_with_scratch, AllpassState};
use crate::error::Result;

/// Decimate-by-2 stream
///
/// # Example
/// ```
/// use pitch_core::allpass::Decimator;
///
/// let mut decimator = Decimator::new();
/// let half = decimator.process(&[0i16; 240])?;
/// assert_eq!(half.len(), 120);
/// # Ok::<(), pitch_core::PitchError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decimator {
    state: AllpassState,
    scratch: Vec<i16>,
}

impl Decimator {
    /// Create a decimator with zeroed state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decimator whose scratch buffer fits `frame_len` samples
    pub fn with_frame_len(frame_len: usize) -> Self {
        Self {
            state: AllpassState::new(),
            scratch: Vec::with_capacity(frame_len),
        }
    }

    /// Decimate one frame, returning `input.len() / 2` samples
    pub fn process(&mut self, input: &[i16]) -> Result<Vec<i16>> {
        let mut output = vec![0i16; input.len() / 2];
        self.process_into(input, &mut output)?;
        Ok(output)
    }

    /// Decimate one frame into `output`
    pub fn process_into(&mut self, input: &[i16], output: &mut [i16]) -> Result<()> {
        decimate_by_2_with_scratch(input, &mut self.state, output, &mut self.scratch)
    }

    /// Clear the filter memory, as at stream start
    pub fn reset(&mut self) {
        tracing::debug!("allpass decimator reset");
        self.state.reset();
    }

    /// Current filter memory
    pub fn state(&self) -> &AllpassState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allpass::decimate_by_2;

    fn ramp(len: usize, step: i16) -> Vec<i16> {
        (0..len).map(|i| (i as i16).wrapping_mul(step)).collect()
    }

    #[test]
    fn test_matches_free_function() {
        let frames = [ramp(16, 97), ramp(16, -311), ramp(16, 1024)];

        let mut decimator = Decimator::with_frame_len(16);
        let mut state = AllpassState::new();

        for frame in &frames {
            let streamed = decimator.process(frame).unwrap();
            let mut direct = vec![0i16; 8];
            decimate_by_2(frame, &mut state, &mut direct).unwrap();
            assert_eq!(streamed, direct);
        }
        assert_eq!(decimator.state(), &state);
    }

    #[test]
    fn test_reset_restores_initial_behaviour() {
        let frame = ramp(32, 523);
        let mut decimator = Decimator::new();

        let first = decimator.process(&frame).unwrap();
        let second = decimator.process(&frame).unwrap();
        assert_ne!(first, second);

        decimator.reset();
        assert!(decimator.state().is_zero());
        assert_eq!(decimator.process(&frame).unwrap(), first);
    }

    #[test]
    fn test_odd_frame_is_rejected() {
        let mut decimator = Decimator::new();
        assert!(decimator.process(&[1, 2, 3]).is_err());
        assert!(decimator.state().is_zero());
    }
}
