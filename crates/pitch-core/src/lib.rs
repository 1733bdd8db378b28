//! # Pitch-Core: Fixed-Point Pitch Analysis Front End
//!
//! The integer signal path that feeds the pitch search of a low-bitrate speech
//! encoder. Everything is exact fixed-point arithmetic, so results are
//! bit-identical across platforms and kernels.
//!
//! ## Features
//!
//! - **Scaled autocorrelation**: lag-0..order coefficients with one dynamic
//!   right shift chosen from the frame energy
//! - **Allpass decimation**: two-band, two-section allpass halving of the
//!   sample rate, with filter memory carried across frames
//! - **Pitch low-pass**: Q12 AR smoothing of the decimated signal
//! - **Front end streams**: per-channel stream objects, processed in parallel
//!
//! ## Performance
//!
//! - **SIMD kernels**: x86_64 SSE2 and AArch64 NEON autocorrelation, selected
//!   at runtime and bit-identical to the scalar reference
//! - **No steady-state allocation** in the decimator
//!
//! ## Usage
//!
//! ```rust
//! use pitch_core::{FrontEndConfig, PitchFrontEnd};
//!
//! let mut front_end = PitchFrontEnd::new(FrontEndConfig::default())?;
//!
//! let samples = vec![0i16; 240];
//! let frame = front_end.process(&samples)?;
//! assert_eq!(frame.decimated.len(), 120);
//! assert_eq!(frame.autocorrelation.coefficients().len(), 13);
//! # Ok::<(), pitch_core::PitchError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `simd`: SSE2/NEON autocorrelation kernels (enabled by default)

#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod allpass;
pub mod autocorr;
pub mod config;
pub mod error;
pub mod fixed_point;
pub mod front_end;
pub mod lowpass;
pub mod utils;

// Re-export commonly used types and functions
pub use allpass::{decimate_by_2, AllpassState, Decimator};
pub use autocorr::{autocorrelate, autocorrelate_with, AutocorrKernel, Autocorrelation};
pub use config::{FrontEndConfig, KernelPreference};
pub use error::{PitchError, Result};
pub use front_end::{analyze_channels, PitchFrame, PitchFrontEnd};
pub use lowpass::PitchLowpass;

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
///
/// Installs a default `tracing` subscriber if none is set and caches CPU
/// feature detection. Safe to call multiple times.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for setup that can fail.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    utils::simd::init_simd_support();

    tracing::info!("Pitch-Core v{} initialized", VERSION);
    tracing::info!("Autocorrelation kernel: {}", AutocorrKernel::detect().name());
    tracing::info!(
        "SIMD kernels: {}",
        if utils::simd::has_simd_support() { "enabled" } else { "disabled" }
    );

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        kernel: AutocorrKernel::detect(),
        available_kernels: AutocorrKernel::available(),
        simd_support: utils::simd::get_simd_support(),
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// Kernel [`autocorrelate`] uses
    pub kernel: AutocorrKernel,
    /// Every kernel usable on this machine
    pub available_kernels: Vec<AutocorrKernel>,
    /// SIMD support information
    pub simd_support: utils::simd::SimdSupport,
}
