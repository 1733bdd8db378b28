//! Two-band allpass decimator
//!
//! Halves the sample rate of a stream of 16-bit frames. The frame, prefixed
//! with the last sample of the previous frame, is split into its odd and even
//! positions. Each sub-sequence runs through its own cascade of two
//! first-order allpass sections and the two filtered sub-sequences are added
//! back together with saturation.
//!
//! The filters are stateful: accumulators and the one-sample carry persist in
//! an [`AllpassState`] across calls and are only cleared by a reset.
//!
//! # Architecture
//!
//! - `state`: the per-stream filter memory
//! - `decimator`: the [`Decimator`] stream object with its scratch buffer

pub mod decimator;
pub mod state;

pub use decimator::Decimator;
pub use state::AllpassState;

use crate::error::Result;
use crate::fixed_point::{add_sat_w16, add_sat_w32};
use crate::utils::validation::{validate_decimator_input, validate_output_len};

/// Number of cascaded allpass sections per band
pub const ALLPASS_SECTIONS: usize = 2;

/// Upper band section coefficients (Q15), applied to the odd positions
pub const UPPER_ALLPASS_Q15: [i16; ALLPASS_SECTIONS] = [1137, 12537];

/// Lower band section coefficients (Q15), applied to the even positions
pub const LOWER_ALLPASS_Q15: [i16; ALLPASS_SECTIONS] = [5059, 24379];

/// One first-order allpass section.
///
/// `acc` is the section memory in Q16. Returns the section output in Q0.
/// Every Q15 coefficient is accepted; `i16::MIN * i16::MIN` saturates.
#[inline]
pub fn allpass_section(sample: i16, coefficient: i16, acc: &mut i32) -> i16 {
    let forward = (i32::from(coefficient) * i32::from(sample)).saturating_mul(2); // Q15 -> Q16
    let b = add_sat_w32(forward, *acc);
    let out = (b >> 16) as i16;

    let feedback = -i32::from(coefficient) * i32::from(out); // Q15
    *acc = add_sat_w32(feedback << 1, i32::from(sample) << 16);

    out
}

/// Run a cascade of allpass sections in place over every second sample
/// starting at `offset`.
pub fn allpass_cascade_strided(
    buffer: &mut [i16],
    offset: usize,
    coefficients: &[i16; ALLPASS_SECTIONS],
    acc: &mut [i32; ALLPASS_SECTIONS],
) {
    for sample in buffer.iter_mut().skip(offset).step_by(2) {
        let mut value = *sample;
        for (&coefficient, section) in coefficients.iter().zip(acc.iter_mut()) {
            value = allpass_section(value, coefficient, section);
        }
        *sample = value;
    }
}

/// Decimate one frame by 2, writing `input.len() / 2` samples to `output`.
///
/// `scratch` is resized to the frame length and overwritten.
pub(crate) fn decimate_by_2_with_scratch(
    input: &[i16],
    state: &mut AllpassState,
    output: &mut [i16],
    scratch: &mut Vec<i16>,
) -> Result<()> {
    validate_decimator_input(input.len())?;
    let half = input.len() / 2;
    validate_output_len(half, output.len())?;

    // Working buffer: previous frame's last sample, then all but the last
    // sample of this frame. The last sample only feeds the next call.
    scratch.clear();
    scratch.push(state.carry_sample());
    scratch.extend_from_slice(&input[..input.len() - 1]);
    state.set_carry(input[input.len() - 1]);

    allpass_cascade_strided(scratch, 1, &UPPER_ALLPASS_Q15, &mut state.upper);
    allpass_cascade_strided(scratch, 0, &LOWER_ALLPASS_Q15, &mut state.lower);

    for (out, pair) in output[..half].iter_mut().zip(scratch.chunks_exact(2)) {
        *out = add_sat_w16(pair[0], pair[1]);
    }

    Ok(())
}

/// Decimate one frame by 2 into `output`, updating `state`.
///
/// `input` must be non-empty and even; `output` must hold `input.len() / 2`
/// samples. Allocates a scratch buffer per call; use [`Decimator`] to reuse one.
pub fn decimate_by_2(
    input: &[i16],
    state: &mut AllpassState,
    output: &mut [i16],
) -> Result<()> {
    let mut scratch = Vec::with_capacity(input.len());
    decimate_by_2_with_scratch(input, state, output, &mut scratch)
}
