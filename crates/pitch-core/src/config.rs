//! Pitch front end configuration

use crate::autocorr::AutocorrKernel;
use crate::error::{PitchError, Result};
use crate::utils::validation::validate_autocorr_input;

/// Default frame length in samples
pub const DEFAULT_FRAME_LEN: usize = 240;

/// Default autocorrelation order
pub const DEFAULT_ORDER: usize = 12;

/// Which autocorrelation kernel the front end should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelPreference {
    /// Fastest kernel detected at construction
    #[default]
    Auto,
    /// A specific kernel; construction fails if it is unavailable
    Forced(AutocorrKernel),
}

impl KernelPreference {
    /// Resolve to a concrete kernel
    pub fn resolve(self) -> Result<AutocorrKernel> {
        match self {
            Self::Auto => Ok(AutocorrKernel::detect()),
            Self::Forced(kernel) if kernel.is_available() => Ok(kernel),
            Self::Forced(kernel) => Err(PitchError::KernelUnavailable {
                kernel: kernel.name(),
            }),
        }
    }
}

/// Configuration of a [`PitchFrontEnd`](crate::front_end::PitchFrontEnd)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontEndConfig {
    /// Samples per input frame
    pub frame_len: usize,
    /// Highest autocorrelation lag
    pub order: usize,
    /// Low-pass the decimated signal
    pub lowpass: bool,
    /// Autocorrelation kernel selection
    pub kernel: KernelPreference,
}

impl Default for FrontEndConfig {
    fn default() -> Self {
        Self {
            frame_len: DEFAULT_FRAME_LEN,
            order: DEFAULT_ORDER,
            lowpass: true,
            kernel: KernelPreference::Auto,
        }
    }
}

impl FrontEndConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set frame length
    pub fn with_frame_len(mut self, frame_len: usize) -> Self {
        self.frame_len = frame_len;
        self
    }

    /// Set autocorrelation order
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Enable or disable the low-pass stage
    pub fn with_lowpass(mut self, lowpass: bool) -> Self {
        self.lowpass = lowpass;
        self
    }

    /// Force a specific autocorrelation kernel
    pub fn with_kernel(mut self, kernel: AutocorrKernel) -> Self {
        self.kernel = KernelPreference::Forced(kernel);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_autocorr_input(self.frame_len, self.order).map_err(|err| {
            PitchError::invalid_config(format!(
                "frame_len {} / order {}: {}",
                self.frame_len, self.order, err
            ))
        })?;

        self.kernel.resolve()?;

        Ok(())
    }
}
