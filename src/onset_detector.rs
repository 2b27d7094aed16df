/*
MIT License

Copyright (c) 2024 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Module for [`OnsetDetector`].

use crate::config::{AnalysisConfig, Sensitivity};
use crate::frame_source::{FrameSource, SourceError};
use crate::onset::{build_onsets, Onset};
use crate::spectral_flux::SpectralFluxAnalyzer;

/// Onset detector over a bounded, fully available mono PCM signal.
///
/// The detector consumes a [`FrameSource`] until exhaustion and runs the
/// spectral-flux pipeline over it: windowed magnitude spectra, half-wave
/// rectified flux, adaptive thresholding and peak extraction, then
/// conversion into time-stamped, normalized [`Onset`]s.
///
/// ## Example
/// ```rust
/// use onset_detector::{OnsetDetector, Sensitivity, SliceSource};
///
/// let pcm: Vec<i16> = vec![0; 44100]; // one second of silence
/// let detector = OnsetDetector::new(Sensitivity::STANDARD);
/// let onsets = detector.detect(&mut SliceSource::new(&pcm)).unwrap();
/// assert!(onsets.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OnsetDetector {
    config: AnalysisConfig,
    sensitivity: Sensitivity,
}

impl OnsetDetector {
    /// Creates a detector with the default analysis geometry: 1024-sample
    /// frames at 44100 Hz.
    #[must_use]
    pub fn new(sensitivity: Sensitivity) -> Self {
        Self::with_config(sensitivity, AnalysisConfig::default())
    }

    /// Creates a detector with a custom analysis geometry.
    #[must_use]
    pub const fn with_config(sensitivity: Sensitivity, config: AnalysisConfig) -> Self {
        Self {
            config,
            sensitivity,
        }
    }

    /// Consumes the source until exhaustion and returns all detected
    /// onsets, ascending by time, with energies normalized to `[0, 1]`.
    ///
    /// Fewer than two full frames of input yield an empty result. A read
    /// failure aborts the analysis and is reported once; the source is
    /// never retried, as the spectrum state of the partial pass is
    /// already gone.
    pub fn detect(&self, source: &mut impl FrameSource) -> Result<Vec<Onset>, SourceError> {
        let mut analyzer = SpectralFluxAnalyzer::new(&self.config);
        let fluxes = analyzer.analyze(source)?;
        let peaks = detect_peaks(
            &fluxes,
            self.sensitivity,
            self.config.threshold_window_radius(),
        );
        let onsets = build_onsets(&peaks, &self.config);
        log::debug!("detected {} onsets in {} frames", onsets.len(), fluxes.len());
        Ok(onsets)
    }
}

/// Extracts the peaks of a flux sequence. The result has the same length
/// as the input; indices that hold no peak carry `0.0`.
///
/// The threshold of an index is the mean flux over the surrounding window
/// of `radius` neighbors to each side (clipped at the sequence ends),
/// scaled by the sensitivity. The mean divides by `(end - start)` instead
/// of the window length, which inflates the threshold slightly, strongest
/// at the boundaries. This matches the reference behavior of the
/// algorithm bit for bit and is pinned by tests; see DESIGN.md before
/// touching it.
///
/// An index is a peak iff its thresholded flux exceeds the one of its
/// immediate successor. Only this single neighbor is consulted, so a
/// value directly followed by a larger one is dropped even if it
/// dominates the rest of its neighborhood. The last index has no
/// successor and is never a peak.
pub(crate) fn detect_peaks(fluxes: &[f32], sensitivity: Sensitivity, radius: usize) -> Vec<f32> {
    let mut pruned = Vec::with_capacity(fluxes.len());
    for (i, &flux) in fluxes.iter().enumerate() {
        let start = i.saturating_sub(radius);
        let end = (i + radius).min(fluxes.len() - 1);
        let sum = fluxes[start..=end].iter().sum::<f32>();
        let threshold = sum / (end - start) as f32 * sensitivity.raw();
        pruned.push(if flux >= threshold { flux - threshold } else { 0.0 });
    }

    let mut peaks = vec![0.0; pruned.len()];
    for i in 0..pruned.len().saturating_sub(1) {
        if pruned[i] > pruned[i + 1] {
            peaks[i] = pruned[i];
        }
    }
    peaks
}
