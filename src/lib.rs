//! onset-detector finds the rhythmic onsets ("beats") in fully decoded
//! audio: the discrete points in time where the spectral energy of the
//! signal rises abruptly, each with a normalized strength in `[0, 1]`.
//!
//! The crate consumes a [`FrameSource`], something that hands out
//! sequential fixed-length mono PCM frames, and is agnostic to how those
//! frames were produced. [`SliceSource`] serves in-memory samples,
//! [`WavSource`] decodes WAV files; adapters for other codecs plug in at
//! the same trait. The signal must be bounded and fully available, this
//! is not a live-input detector.
//!
//! The pipeline runs strictly forward in a single pass:
//! frames → windowed magnitude spectra → spectral flux → adaptive
//! threshold → peaks → time-stamped, normalized [`Onset`]s. The
//! [`postprocess`] filters (minimum-gap thinning, energy filtering) are
//! separate, pure functions over the result.
//!
//! ## Example
//! ```rust
//! use onset_detector::{thin_by_min_gap, OnsetDetector, Sensitivity, SliceSource};
//!
//! let pcm: Vec<i16> = vec![0; 4 * 1024]; // silence, for the sake of the example
//! let detector = OnsetDetector::new(Sensitivity::STANDARD);
//! let onsets = detector.detect(&mut SliceSource::new(&pcm)).unwrap();
//! let onsets = thin_by_min_gap(&onsets, 120);
//! assert!(onsets.is_empty());
//! ```

mod config;
mod frame_source;
mod onset;
mod onset_detector;
pub mod postprocess;
mod spectral_flux;
#[cfg(test)]
mod test_utils;
pub mod util;
mod wav_source;

pub use config::{AnalysisConfig, ConfigError, InvalidSensitivityError, Sensitivity};
pub use frame_source::{FrameSource, SliceSource, SourceError};
pub use onset::Onset;
pub use onset_detector::OnsetDetector;
pub use postprocess::{filter_by_energy, thin_by_min_gap};
pub use wav_source::WavSource;
