//! CPU feature detection for the vectorized autocorrelation kernels
//!
//! Detection runs once and is cached for the life of the process. With the
//! `simd` feature disabled every capability reports `false`, which makes the
//! kernel selector fall back to the portable lane kernel.

use std::sync::OnceLock;

/// SIMD support information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimdSupport {
    /// x86_64 SSE2 support
    pub sse2: bool,
    /// AArch64 NEON support
    pub neon: bool,
}

/// Global SIMD support detection
static SIMD_SUPPORT: OnceLock<SimdSupport> = OnceLock::new();

/// Initialize SIMD support detection
pub fn init_simd_support() {
    let support = get_simd_support();
    tracing::debug!(sse2 = support.sse2, neon = support.neon, "SIMD support detected");
}

#[cfg(not(feature = "simd"))]
fn detect_simd_support() -> SimdSupport {
    SimdSupport::default()
}

#[cfg(feature = "simd")]
fn detect_simd_support() -> SimdSupport {
    #[cfg(target_arch = "x86_64")]
    {
        SimdSupport {
            sse2: is_x86_feature_detected!("sse2"),
            neon: false,
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        SimdSupport {
            sse2: false,
            neon: std::arch::is_aarch64_feature_detected!("neon"),
        }
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        SimdSupport::default()
    }
}

/// Get SIMD support information
pub fn get_simd_support() -> SimdSupport {
    *SIMD_SUPPORT.get_or_init(detect_simd_support)
}

/// Check if any SIMD support is available
pub fn has_simd_support() -> bool {
    let support = get_simd_support();
    support.sse2 || support.neon
}
