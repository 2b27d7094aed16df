//! Configuration of the analysis pipeline: the frame geometry and the
//! detection sensitivity. All values are validated on construction, so the
//! pipeline itself never has to re-check them.

use thiserror::Error;

/// Possible errors when constructing an [`AnalysisConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The frame size must be an even amount of at least two samples, as
    /// the magnitude spectrum of a frame has `frame_size / 2 + 1` bins.
    #[error("frame size {0} must be an even amount of at least 2 samples")]
    InvalidFrameSize(usize),
    /// The sample rate must be positive.
    #[error("sample rate must be positive")]
    InvalidSampleRate,
    /// The threshold window radius must be at least 1.
    #[error("threshold window radius must be at least 1")]
    InvalidWindowRadius,
}

/// The sensitivity is not a positive, finite multiplier.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
#[error("sensitivity {0} must be a positive, finite multiplier")]
pub struct InvalidSensitivityError(f32);

/// Multiplier on the adaptive flux threshold. Higher values suppress more
/// candidate onsets.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Sensitivity(f32);

impl Sensitivity {
    /// Aggressive detection. Reports the most onsets.
    pub const AGGRESSIVE: Self = Self(1.0);
    /// Reasonable middle ground for most material.
    pub const STANDARD: Self = Self(1.4);
    /// Conservative detection. Only the strongest onsets survive.
    pub const CONSERVATIVE: Self = Self(1.7);

    /// Creates a validated sensitivity. A non-positive or non-finite
    /// multiplier makes the threshold meaningless and is rejected here,
    /// before any processing starts.
    pub fn new(value: f32) -> Result<Self, InvalidSensitivityError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(InvalidSensitivityError(value))
        }
    }

    /// Returns the raw multiplier.
    #[must_use]
    pub const fn raw(&self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Sensitivity {
    type Error = InvalidSensitivityError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated geometry of the analysis pipeline.
///
/// The defaults (1024-sample frames at 44100 Hz, threshold window radius
/// of 10 frames) match the reference parameters of the algorithm. The
/// millisecond timestamps of the detected onsets derive from frame size
/// and sample rate, so both must describe the actual input signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    frame_size: usize,
    sample_rate_hz: u32,
    threshold_window_radius: usize,
}

impl AnalysisConfig {
    /// Creates a new validated configuration.
    ///
    /// `threshold_window_radius` is the number of neighbors to each side
    /// of a flux value that contribute to its adaptive threshold.
    pub fn new(
        frame_size: usize,
        sample_rate_hz: u32,
        threshold_window_radius: usize,
    ) -> Result<Self, ConfigError> {
        if frame_size < 2 || frame_size % 2 != 0 {
            return Err(ConfigError::InvalidFrameSize(frame_size));
        }
        if sample_rate_hz == 0 {
            return Err(ConfigError::InvalidSampleRate);
        }
        if threshold_window_radius == 0 {
            return Err(ConfigError::InvalidWindowRadius);
        }

        Ok(Self {
            frame_size,
            sample_rate_hz,
            threshold_window_radius,
        })
    }

    /// Returns the frame size in samples.
    #[must_use]
    pub const fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Returns the sample rate in Hertz.
    #[must_use]
    pub const fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Returns the threshold window radius in frames.
    #[must_use]
    pub const fn threshold_window_radius(&self) -> usize {
        self.threshold_window_radius
    }

    /// Returns the number of bins in the magnitude spectrum of one frame.
    #[must_use]
    pub const fn spectrum_len(&self) -> usize {
        self.frame_size / 2 + 1
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_size: 1024,
            sample_rate_hz: 44100,
            threshold_window_radius: 10,
        }
    }
}
