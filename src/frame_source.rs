//! The capability the analysis pipeline consumes: something that hands out
//! sequential, fixed-length mono PCM frames.

use std::io;
use thiserror::Error;

/// Possible errors while reading from a [`FrameSource`].
///
/// Running out of input is not an error; sources signal it through a short
/// read. Every error here is fatal to a running analysis: the pipeline
/// keeps its spectrum state only for a single forward pass, so a failed
/// read can not be resumed.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The underlying reader failed.
    #[error("i/o error while reading audio frames")]
    Io(#[from] io::Error),
    /// The stream contains data that could not be interpreted as audio.
    #[error("malformed audio stream: {0}")]
    Malformed(String),
}

/// Supplies sequential fixed-length mono PCM frames to the analysis.
///
/// Implementations wrap a concrete sample producer, e.g. an in-memory
/// buffer ([`SliceSource`]) or a WAV file ([`crate::WavSource`]). The
/// pipeline is agnostic to the origin of the samples as long as they are
/// in 16-bit PCM range and share one sample rate.
pub trait FrameSource {
    /// Fills `frame` from index 0 with the next mono samples and returns
    /// how many were written. A return value smaller than `frame.len()`
    /// signals that the source is exhausted; such a trailing short frame
    /// is not analyzed.
    fn next_frame(&mut self, frame: &mut [i16]) -> Result<usize, SourceError>;
}

/// [`FrameSource`] over an in-memory mono sample buffer.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    samples: &'a [i16],
    position: usize,
}

impl<'a> SliceSource<'a> {
    /// Creates a source that serves the given mono samples from the
    /// beginning.
    #[must_use]
    pub const fn new(samples: &'a [i16]) -> Self {
        Self {
            samples,
            position: 0,
        }
    }
}

impl FrameSource for SliceSource<'_> {
    fn next_frame(&mut self, frame: &mut [i16]) -> Result<usize, SourceError> {
        let remaining = &self.samples[self.position..];
        let n = remaining.len().min(frame.len());
        frame[..n].copy_from_slice(&remaining[..n]);
        self.position += n;
        Ok(n)
    }
}
