//! WAV adapter for [`FrameSource`].

use crate::frame_source::{FrameSource, SourceError};
use crate::util::stereo_to_mono;
use hound::{SampleFormat, WavReader, WavSamples};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// [`FrameSource`] that reads 16-bit integer PCM WAV data.
///
/// Mono material is passed through unchanged; stereo material is merged
/// into mono by averaging each LR pair. Other channel layouts and sample
/// formats are rejected on construction, not silently reinterpreted.
pub struct WavSource<R: Read> {
    reader: WavReader<R>,
    channels: u16,
}

impl WavSource<BufReader<File>> {
    /// Opens a WAV file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let reader = WavReader::open(path).map_err(map_hound_err)?;
        Self::from_reader(reader)
    }
}

impl<R: Read> WavSource<R> {
    /// Creates a source from anything `hound` can read, e.g. an in-memory
    /// cursor over WAV bytes.
    pub fn new(reader: R) -> Result<Self, SourceError> {
        let reader = WavReader::new(reader).map_err(map_hound_err)?;
        Self::from_reader(reader)
    }

    fn from_reader(reader: WavReader<R>) -> Result<Self, SourceError> {
        let spec = reader.spec();
        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(SourceError::Malformed(format!(
                "unsupported sample format: {:?} {}bit",
                spec.sample_format, spec.bits_per_sample
            )));
        }
        if spec.channels == 0 || spec.channels > 2 {
            return Err(SourceError::Malformed(format!(
                "unsupported channel count: {}",
                spec.channels
            )));
        }

        Ok(Self {
            reader,
            channels: spec.channels,
        })
    }

    /// Returns the sample rate the data was recorded with. Pass this into
    /// [`crate::AnalysisConfig`] when it differs from the 44100 Hz
    /// default, as the onset timestamps derive from it.
    #[must_use]
    pub fn sample_rate_hz(&self) -> u32 {
        self.reader.spec().sample_rate
    }
}

impl<R: Read> FrameSource for WavSource<R> {
    fn next_frame(&mut self, frame: &mut [i16]) -> Result<usize, SourceError> {
        let channels = self.channels;
        let mut samples = self.reader.samples::<i16>();
        for (written, slot) in frame.iter_mut().enumerate() {
            match next_mono_sample(&mut samples, channels)? {
                Some(sample) => *slot = sample,
                None => return Ok(written),
            }
        }
        Ok(frame.len())
    }
}

/// Pulls one mono sample off the decoded stream, averaging LR pairs for
/// stereo material.
fn next_mono_sample<R: Read>(
    samples: &mut WavSamples<'_, R, i16>,
    channels: u16,
) -> Result<Option<i16>, SourceError> {
    let first = match samples.next() {
        Some(sample) => sample.map_err(map_hound_err)?,
        None => return Ok(None),
    };
    if channels == 1 {
        return Ok(Some(first));
    }

    match samples.next() {
        Some(second) => {
            let second = second.map_err(map_hound_err)?;
            Ok(Some(stereo_to_mono(first, second)))
        }
        None => Err(SourceError::Malformed(
            "stereo stream ends within an LR sample pair".to_string(),
        )),
    }
}

fn map_hound_err(err: hound::Error) -> SourceError {
    match err {
        hound::Error::IoError(err) => SourceError::Io(err),
        other => SourceError::Malformed(other.to_string()),
    }
}
