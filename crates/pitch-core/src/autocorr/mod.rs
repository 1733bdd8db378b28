//! Scaled autocorrelation engine
//!
//! Computes `r[0..=order]` for a frame of 16-bit samples. Products are exact
//! and summed in 64 bits; one right shift, chosen from the lag-0 energy, is
//! then applied to every lag so that `r[0]` fits a signed 32-bit word with as
//! little precision loss as possible.
//!
//! Higher lags reuse the lag-0 shift even when their own range would allow a
//! smaller one. The pitch search downstream depends on that single
//! normalization, so it is kept as is.
//!
//! # Kernels
//!
//! The inner products come from one of several kernels ([`AutocorrKernel`]).
//! They group and reorder the summation differently, but integer addition is
//! exact, so every kernel yields bit-identical coefficients and scale. That
//! equivalence is required: coefficient values end up in the bitstream.
//!
//! # Example
//! ```
//! use pitch_core::autocorr::autocorrelate;
//!
//! let frame = [1i16, 2, 3, 4, 5, 6, 7, 8];
//! let result = autocorrelate(&frame, 2)?;
//! assert_eq!(result.coefficients(), &[204, 168, 133]);
//! assert_eq!(result.scale(), 0);
//! # Ok::<(), pitch_core::PitchError>(())
//! ```

pub mod lanes;

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod sse2;

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
mod neon;

use crate::error::{PitchError, Result};
use crate::fixed_point::{norm_u32, norm_w32};
use crate::utils::simd::get_simd_support;
use crate::utils::validation::{validate_autocorr_input, validate_output_len};

/// Inner-product kernel used by the autocorrelation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutocorrKernel {
    /// Straight scalar loop, the reference
    Scalar,
    /// Portable fixed-width groups with per-lane accumulators
    Lanes,
    /// x86_64 SSE2 intrinsics
    Sse2,
    /// AArch64 NEON intrinsics
    Neon,
}

impl AutocorrKernel {
    /// All kernels, in order of preference from slowest to fastest
    pub const ALL: [AutocorrKernel; 4] = [Self::Scalar, Self::Lanes, Self::Sse2, Self::Neon];

    /// Pick the fastest kernel this CPU and build support
    pub fn detect() -> Self {
        let support = get_simd_support();
        let kernel = if support.neon && Self::Neon.is_compiled() {
            Self::Neon
        } else if support.sse2 && Self::Sse2.is_compiled() {
            Self::Sse2
        } else {
            Self::Lanes
        };
        tracing::trace!(kernel = kernel.name(), "autocorrelation kernel selected");
        kernel
    }

    /// Kernels usable on this machine
    pub fn available() -> Vec<Self> {
        Self::ALL.into_iter().filter(|k| k.is_available()).collect()
    }

    /// Returns the name of this kernel
    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Lanes => "lanes",
            Self::Sse2 => "sse2",
            Self::Neon => "neon",
        }
    }

    /// Whether this kernel can run here
    pub fn is_available(self) -> bool {
        let support = get_simd_support();
        match self {
            Self::Scalar | Self::Lanes => true,
            Self::Sse2 => support.sse2 && self.is_compiled(),
            Self::Neon => support.neon && self.is_compiled(),
        }
    }

    fn is_compiled(self) -> bool {
        match self {
            Self::Scalar | Self::Lanes => true,
            Self::Sse2 => cfg!(all(feature = "simd", target_arch = "x86_64")),
            Self::Neon => cfg!(all(feature = "simd", target_arch = "aarch64")),
        }
    }

    fn ensure_available(self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(PitchError::KernelUnavailable {
                kernel: self.name(),
            })
        }
    }

    /// Exact inner product. Only called after `ensure_available`.
    fn dot(self, a: &[i16], b: &[i16]) -> i64 {
        match self {
            Self::Scalar => scalar_dot(a, b),
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            // SAFETY: callers check `is_available`, which requires detected SSE2.
            Self::Sse2 => unsafe { sse2::dot(a, b) },
            #[cfg(all(feature = "simd", target_arch = "aarch64"))]
            // SAFETY: callers check `is_available`, which requires detected NEON.
            Self::Neon => unsafe { neon::dot(a, b) },
            _ => lanes::dot(a, b),
        }
    }
}

impl Default for AutocorrKernel {
    fn default() -> Self {
        Self::detect()
    }
}

/// Autocorrelation coefficients sharing one scale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autocorrelation {
    coefficients: Vec<i32>,
    scale: i16,
}

impl Autocorrelation {
    /// Coefficients `r[0..=order]`
    pub fn coefficients(&self) -> &[i32] {
        &self.coefficients
    }

    /// Right shift applied to every coefficient
    pub fn scale(&self) -> i16 {
        self.scale
    }

    /// Highest lag computed
    pub fn order(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Energy term `r[0]`
    pub fn energy(&self) -> i32 {
        self.coefficients[0]
    }

    /// Q-domain of the coefficients when the input samples were in `q_input`
    pub fn q_domain(&self, q_input: i32) -> i32 {
        2 * q_input - i32::from(self.scale)
    }

    /// Shift every coefficient left so `r[0]` uses the full 32-bit headroom.
    ///
    /// Returns the coefficients and their Q-domain. The shift is safe for
    /// every lag: `|r[k]| <= r[0] + 1`, the extra one coming from the
    /// arithmetic shift of a negative lag rounding towards minus infinity.
    pub fn normalized(&self, q_input: i32) -> (Vec<i32>, i32) {
        let shift = norm_w32(self.energy());
        let coefficients = self.coefficients.iter().map(|&r| r << shift).collect();
        (coefficients, self.q_domain(q_input) + shift as i32)
    }

    /// Consume into coefficients and scale
    pub fn into_parts(self) -> (Vec<i32>, i16) {
        (self.coefficients, self.scale)
    }
}

/// Shift that brings a non-negative 64-bit energy inside `i32`.
///
/// Zero when bits 31..63 are clear, otherwise the bit length of `energy >> 31`.
pub fn scale_for_energy(energy: i64) -> i16 {
    debug_assert!(energy >= 0);
    let top = (energy >> 31) as u32;
    if top == 0 {
        0
    } else {
        (32 - norm_u32(top)) as i16
    }
}

/// Autocorrelation with the fastest available kernel
pub fn autocorrelate(samples: &[i16], order: usize) -> Result<Autocorrelation> {
    autocorrelate_with(AutocorrKernel::detect(), samples, order)
}

/// Autocorrelation with a specific kernel
pub fn autocorrelate_with(
    kernel: AutocorrKernel,
    samples: &[i16],
    order: usize,
) -> Result<Autocorrelation> {
    validate_autocorr_input(samples.len(), order)?;
    kernel.ensure_available()?;

    let mut coefficients = vec![0i32; order + 1];
    let scale = compute(kernel, samples, &mut coefficients);

    Ok(Autocorrelation {
        coefficients,
        scale,
    })
}

/// Autocorrelation into a caller buffer.
///
/// The order is `output.len() - 1`; the buffer must hold at least one element.
/// Returns the scale.
pub fn autocorrelate_into(
    kernel: AutocorrKernel,
    samples: &[i16],
    output: &mut [i32],
) -> Result<i16> {
    validate_output_len(1, output.len())?;
    let order = output.len() - 1;
    validate_autocorr_input(samples.len(), order)?;
    kernel.ensure_available()?;

    Ok(compute(kernel, samples, output))
}

/// Scalar reference, without kernel selection
pub fn autocorrelate_scalar(samples: &[i16], order: usize) -> Result<Autocorrelation> {
    autocorrelate_with(AutocorrKernel::Scalar, samples, order)
}

fn compute(kernel: AutocorrKernel, samples: &[i16], output: &mut [i32]) -> i16 {
    let n = samples.len();

    let energy = kernel.dot(samples, samples);
    let scale = scale_for_energy(energy);
    output[0] = (energy >> scale) as i32;

    for (lag, slot) in output.iter_mut().enumerate().skip(1) {
        let product = kernel.dot(&samples[..n - lag], &samples[lag..]);
        // |product| <= energy, so the shifted value fits as well.
        *slot = (product >> scale) as i32;
    }

    if scale > 0 {
        tracing::trace!(scale, energy, "autocorrelation rescaled");
    }

    scale
}

fn scalar_dot(a: &[i16], b: &[i16]) -> i64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| i64::from(x) * i64::from(y))
        .sum()
}
