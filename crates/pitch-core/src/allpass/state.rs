//! Allpass decimator state
//!
//! One instance per decimation stream. It is zeroed on creation and mutated
//! in place by every call; only a reset returns it to zero.

use super::ALLPASS_SECTIONS;

/// Filter memory of a two-band allpass decimator
///
/// Holds the Q16 accumulators of the upper and lower band sections and the
/// previous frame's last sample, also in Q16.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllpassState {
    /// Upper band section accumulators (Q16)
    pub(crate) upper: [i32; ALLPASS_SECTIONS],

    /// Lower band section accumulators (Q16)
    pub(crate) lower: [i32; ALLPASS_SECTIONS],

    /// Last input sample of the previous frame (Q16)
    carry: i32,
}

impl AllpassState {
    /// Create a zeroed state
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all accumulators and the carry cell to zero
    pub fn reset(&mut self) {
        self.upper = [0; ALLPASS_SECTIONS];
        self.lower = [0; ALLPASS_SECTIONS];
        self.carry = 0;
    }

    /// Whether the state is at its initial value
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Upper band accumulators (Q16)
    pub fn upper(&self) -> [i32; ALLPASS_SECTIONS] {
        self.upper
    }

    /// Lower band accumulators (Q16)
    pub fn lower(&self) -> [i32; ALLPASS_SECTIONS] {
        self.lower
    }

    /// Raw carry cell (Q16)
    pub fn carry_q16(&self) -> i32 {
        self.carry
    }

    /// Carry cell as a Q0 sample
    pub fn carry_sample(&self) -> i16 {
        (self.carry >> 16) as i16
    }

    pub(crate) fn set_carry(&mut self, sample: i16) {
        self.carry = i32::from(sample) << 16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero() {
        let state = AllpassState::new();
        assert!(state.is_zero());
        assert_eq!(state.upper(), [0, 0]);
        assert_eq!(state.lower(), [0, 0]);
        assert_eq!(state.carry_q16(), 0);
    }

    #[test]
    fn test_carry_round_trips_extremes() {
        let mut state = AllpassState::new();
        state.set_carry(i16::MIN);
        assert_eq!(state.carry_q16(), i32::MIN);
        assert_eq!(state.carry_sample(), i16::MIN);

        state.set_carry(-1);
        assert_eq!(state.carry_sample(), -1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = AllpassState::new();
        state.upper = [7, -7];
        state.lower = [1, 2];
        state.set_carry(99);
        assert!(!state.is_zero());

        state.reset();
        assert!(state.is_zero());
    }
}
