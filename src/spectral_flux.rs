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
//! Module for [`SpectralFluxAnalyzer`].

use crate::config::AnalysisConfig;
use crate::frame_source::{FrameSource, SourceError};
use crate::util::i16_sample_to_f32;
use core::f32::consts::PI;
use realfft::num_complex::Complex32;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Computes the spectral-flux sequence of a frame stream.
///
/// Each consumed frame is normalized to `[-1, 1]`, multiplied with a
/// Hamming window and transformed with a real-input FFT into a magnitude
/// spectrum of `frame_size / 2 + 1` bins. The flux of a frame is the sum
/// of all positive magnitude increases over the spectrum of the previous
/// frame; decreasing bins contribute nothing (half-wave rectification).
/// The very first frame is compared against an all-zero spectrum, so its
/// flux equals the sum of its own magnitudes.
///
/// The analyzer owns window, plan and all buffers, and can be reused for
/// several sources of the same configuration.
pub(crate) struct SpectralFluxAnalyzer {
    window: Box<[f32]>,
    fft: Arc<dyn RealToComplex<f32>>,
    frame: Box<[i16]>,
    fft_in: Box<[f32]>,
    fft_out: Box<[Complex32]>,
    scratch: Box<[Complex32]>,
    current_spectrum: Box<[f32]>,
    previous_spectrum: Box<[f32]>,
}

impl SpectralFluxAnalyzer {
    pub(crate) fn new(config: &AnalysisConfig) -> Self {
        let frame_size = config.frame_size();
        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(frame_size);
        let fft_in = fft.make_input_vec().into_boxed_slice();
        let fft_out = fft.make_output_vec().into_boxed_slice();
        let scratch = fft.make_scratch_vec().into_boxed_slice();
        debug_assert_eq!(fft_out.len(), config.spectrum_len());

        Self {
            window: hamming_window(frame_size),
            fft,
            frame: vec![0; frame_size].into_boxed_slice(),
            fft_in,
            fft_out,
            scratch,
            current_spectrum: vec![0.0; config.spectrum_len()].into_boxed_slice(),
            previous_spectrum: vec![0.0; config.spectrum_len()].into_boxed_slice(),
        }
    }

    /// Consumes the source until exhaustion and returns the complete
    /// flux sequence, one value per full frame, in input order.
    ///
    /// The threshold stage needs look-ahead over the whole sequence, so
    /// this materializes all values instead of streaming them.
    pub(crate) fn analyze(
        &mut self,
        source: &mut impl FrameSource,
    ) -> Result<Vec<f32>, SourceError> {
        self.current_spectrum.fill(0.0);
        self.previous_spectrum.fill(0.0);

        let mut fluxes = Vec::new();
        loop {
            let read = source.next_frame(&mut self.frame)?;
            if read < self.frame.len() {
                // A short (or absent) frame signals end of input.
                break;
            }
            fluxes.push(self.next_flux());
        }

        log::debug!("computed the spectral flux of {} frames", fluxes.len());
        Ok(fluxes)
    }

    /// Windows and transforms the frame buffer and returns its flux
    /// against the previous spectrum.
    fn next_flux(&mut self) -> f32 {
        for (index, &sample) in self.frame.iter().enumerate() {
            self.fft_in[index] = i16_sample_to_f32(sample) * self.window[index];
        }

        self.fft
            .process_with_scratch(
                self.fft_in.as_mut(),
                self.fft_out.as_mut(),
                self.scratch.as_mut(),
            )
            .expect("buffers match the planned FFT length");

        core::mem::swap(&mut self.current_spectrum, &mut self.previous_spectrum);
        for (magnitude, bin) in self.current_spectrum.iter_mut().zip(self.fft_out.iter()) {
            *magnitude = libm::sqrtf(bin.re * bin.re + bin.im * bin.im);
        }

        self.current_spectrum
            .iter()
            .zip(self.previous_spectrum.iter())
            .map(|(&current, &previous)| (current - previous).max(0.0))
            .sum()
    }
}

/// Precomputes the Hamming window coefficients for the frame length.
fn hamming_window(len: usize) -> Box<[f32]> {
    (0..len)
        .map(|n| 0.54 - 0.46 * libm::cosf(2.0 * PI * n as f32 / (len - 1) as f32))
        .collect()
}
