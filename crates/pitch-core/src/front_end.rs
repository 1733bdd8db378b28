//! Pitch-analysis front end
//!
//! One [`PitchFrontEnd`] per audio stream. Each frame is autocorrelated at the
//! full rate and, independently, decimated by 2 (and optionally low-passed)
//! for the lower-rate lag search. Filter memory persists between frames.
//!
//! Streams are independent, so several channels can be processed in parallel
//! with [`analyze_channels`]; each stream is still only touched by one thread
//! at a time.

use rayon::prelude::*;

use crate::allpass::Decimator;
use crate::autocorr::{autocorrelate_with, AutocorrKernel, Autocorrelation};
use crate::config::FrontEndConfig;
use crate::error::{PitchError, Result};
use crate::lowpass::PitchLowpass;

/// Output of one front end frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchFrame {
    /// Full-rate autocorrelation of the input frame
    pub autocorrelation: Autocorrelation,
    /// Half-rate signal for the lag search
    pub decimated: Vec<i16>,
}

/// Streaming pitch front end
#[derive(Debug, Clone)]
pub struct PitchFrontEnd {
    config: FrontEndConfig,
    kernel: AutocorrKernel,
    decimator: Decimator,
    lowpass: Option<PitchLowpass>,
    frames_processed: u64,
}

impl PitchFrontEnd {
    /// Create a front end from a validated configuration
    pub fn new(config: FrontEndConfig) -> Result<Self> {
        config.validate()?;
        let kernel = config.kernel.resolve()?;

        tracing::debug!(
            frame_len = config.frame_len,
            order = config.order,
            lowpass = config.lowpass,
            kernel = kernel.name(),
            "pitch front end created"
        );

        Ok(Self {
            kernel,
            decimator: Decimator::with_frame_len(config.frame_len),
            lowpass: config.lowpass.then(PitchLowpass::new),
            frames_processed: 0,
            config,
        })
    }

    /// Process one frame of exactly `frame_len` samples
    pub fn process(&mut self, frame: &[i16]) -> Result<PitchFrame> {
        if frame.len() != self.config.frame_len {
            return Err(PitchError::invalid_frame_length(
                frame.len(),
                "frame length must match the configured frame_len",
            ));
        }

        let autocorrelation = autocorrelate_with(self.kernel, frame, self.config.order)?;

        let mut decimated = vec![0i16; frame.len() / 2];
        self.decimator.process_into(frame, &mut decimated)?;
        if let Some(lowpass) = self.lowpass.as_mut() {
            lowpass.process_in_place(&mut decimated);
        }

        self.frames_processed += 1;
        tracing::trace!(
            frame = self.frames_processed,
            scale = autocorrelation.scale(),
            energy = autocorrelation.energy(),
            "pitch frame processed"
        );

        Ok(PitchFrame {
            autocorrelation,
            decimated,
        })
    }

    /// Zero all filter memory, as at stream start
    pub fn reset(&mut self) {
        self.decimator.reset();
        if let Some(lowpass) = self.lowpass.as_mut() {
            lowpass.reset();
        }
        self.frames_processed = 0;
        tracing::debug!("pitch front end reset");
    }

    /// Active configuration
    pub fn config(&self) -> &FrontEndConfig {
        &self.config
    }

    /// Kernel in use
    pub fn kernel(&self) -> AutocorrKernel {
        self.kernel
    }

    /// Frames processed since creation or the last reset
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Decimator of this stream
    pub fn decimator(&self) -> &Decimator {
        &self.decimator
    }
}

/// Process one frame per channel, each with its own stream, in parallel.
///
/// `frames[i]` goes to `streams[i]`. Results are in channel order. The first
/// failing channel's error is returned; streams of other channels may already
/// have advanced.
pub fn analyze_channels(
    streams: &mut [PitchFrontEnd],
    frames: &[&[i16]],
) -> Result<Vec<PitchFrame>> {
    if streams.len() != frames.len() {
        return Err(PitchError::ChannelMismatch {
            streams: streams.len(),
            frames: frames.len(),
        });
    }

    streams
        .par_iter_mut()
        .zip(frames.par_iter())
        .map(|(stream, frame)| stream.process(frame))
        .collect()
}
