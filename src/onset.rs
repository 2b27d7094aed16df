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
//! Module for [`Onset`] and the conversion of raw peak sequences into
//! time-stamped events.

use crate::config::AnalysisConfig;

/// A single rhythmic onset: a discrete point in time at which the spectral
/// energy of the signal rises abruptly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Onset {
    /// Position of the onset relative to the beginning of the signal, in
    /// milliseconds.
    pub time_ms: u32,
    /// Strength of the onset, normalized to `[0, 1]` over the whole
    /// analysis. The strongest onset of a non-empty result is exactly
    /// `1.0`.
    pub energy: f32,
}

/// Converts a peak sequence into [`Onset`]s, ordered ascending by time.
///
/// Every non-zero peak becomes one event; its index determines the
/// timestamp via `floor(index * frame_size * 1000 / sample_rate)`, in
/// exact integer arithmetic. Afterwards all energies are divided by the
/// maximum. No peaks yield an empty result, never an error.
pub(crate) fn build_onsets(peaks: &[f32], config: &AnalysisConfig) -> Vec<Onset> {
    let frame_size = config.frame_size() as u64;
    let sample_rate = u64::from(config.sample_rate_hz());

    let mut onsets = peaks
        .iter()
        .enumerate()
        .filter(|(_, &peak)| peak > 0.0)
        .map(|(index, &peak)| Onset {
            time_ms: (index as u64 * frame_size * 1000 / sample_rate) as u32,
            energy: peak,
        })
        .collect::<Vec<_>>();

    let max = onsets
        .iter()
        .map(|onset| onset.energy)
        .fold(0.0_f32, f32::max);
    // Kept peaks are always positive; the guard keeps a hypothetical
    // all-zero set from producing NaN energies.
    if max > 0.0 {
        for onset in &mut onsets {
            onset.energy /= max;
        }
    }

    onsets
}
