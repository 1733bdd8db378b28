//! Second-order AR low-pass applied to the decimated pitch signal
//!
//! `y[n] = x[n] + 0.75 y[n-1] - 0.25 y[n-2]` with Q12 coefficients. The
//! accumulator is clamped before rounding so overload saturates instead of
//! wrapping; the two most recent outputs persist across frames.

/// Filter coefficients `{1, -0.75, 0.25}` in Q12
pub const LOWPASS_AR_Q12: [i16; 3] = [4096, -3072, 1024];

const ACC_MIN: i64 = -134_217_728;
const ACC_MAX: i64 = 134_215_679;

/// Streaming AR low-pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PitchLowpass {
    /// `[y[n-1], y[n-2]]`
    history: [i16; 2],
}

impl PitchLowpass {
    /// Create a low-pass with zeroed history
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter `data` in place
    pub fn process_in_place(&mut self, data: &mut [i16]) {
        let [c0, c1, c2] = LOWPASS_AR_Q12.map(i64::from);
        let [mut y1, mut y2] = self.history;

        for sample in data.iter_mut() {
            let feedback = c1 * i64::from(y1) + c2 * i64::from(y2);
            let acc = (c0 * i64::from(*sample) - feedback).clamp(ACC_MIN, ACC_MAX);
            let y = ((acc + 2048) >> 12) as i16;

            y2 = y1;
            y1 = y;
            *sample = y;
        }

        self.history = [y1, y2];
    }

    /// Zero the filter history
    pub fn reset(&mut self) {
        self.history = [0; 2];
    }

    /// `[y[n-1], y[n-2]]`
    pub fn history(&self) -> [i16; 2] {
        self.history
    }
}
