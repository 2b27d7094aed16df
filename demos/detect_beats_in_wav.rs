//! Demo that analyzes a WAV file and prints all detected onsets to the
//! terminal.
//!
//! Run it like this:
//! `cargo run --example detect-beats-in-wav -- song.wav [sensitivity]`

use onset_detector::{thin_by_min_gap, AnalysisConfig, OnsetDetector, Sensitivity, WavSource};
use std::error::Error;

/// Minimum gap between two printed onsets. Smaller gaps than this are
/// usually one physical beat smeared over several frames.
const MIN_GAP_MS: u32 = 120;

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::init_with_level(log::Level::Debug)?;

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: detect-beats-in-wav <file.wav> [sensitivity]")?;
    let sensitivity = match args.next() {
        Some(raw) => Sensitivity::new(raw.parse()?)?,
        None => Sensitivity::STANDARD,
    };

    let mut source = WavSource::open(&path)?;
    let config = AnalysisConfig::new(1024, source.sample_rate_hz(), 10)?;
    let detector = OnsetDetector::with_config(sensitivity, config);

    let onsets = detector.detect(&mut source)?;
    let onsets = thin_by_min_gap(&onsets, MIN_GAP_MS);

    println!("{} onsets in {}:", onsets.len(), path);
    for onset in onsets {
        let minutes = onset.time_ms / 60_000;
        let seconds = (onset.time_ms % 60_000) as f32 / 1000.0;
        println!(
            "  {:>2}:{:06.3}  energy {:.3}",
            minutes, seconds, onset.energy
        );
    }

    Ok(())
}
