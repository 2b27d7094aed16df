//! Synthetic audio fixtures and helpers shared by the tests. All
//! generators are deterministic so that test expectations stay exact
//! across runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// Full scale of the burst samples, well below `i16::MAX` so that stereo
/// averaging and windowing stay far from any clipping concerns.
pub const BURST_AMPLITUDE: i16 = 20_000;

/// Returns the cargo target dir.
pub fn target_dir() -> PathBuf {
    // 1. Check if CARGO_TARGET_DIR is set
    if let Ok(dir) = std::env::var("CARGO_TARGET_DIR") {
        PathBuf::from(dir)
    } else {
        // 2. Fall back to default: go up from CARGO_MANIFEST_DIR
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        manifest_dir.join("target")
    }
}

/// Returns a directory within the cargo target dir to store test
/// artifacts. The directory is created if necessary.
pub fn target_dir_test_artifacts() -> PathBuf {
    let mut path = target_dir();
    path.push("test_generated");
    std::fs::create_dir_all(&path).unwrap();
    path
}

/// Mono silence of the given length.
pub fn silence(len: usize) -> Vec<i16> {
    vec![0; len]
}

/// A quiet mono noise floor, deterministic through the seed.
pub fn noise_floor(len: usize, amplitude: i16, seed: u64) -> Vec<i16> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| rng.random_range(-amplitude..=amplitude))
        .collect()
}

/// A mono signal of `frames` frames that is silent except for loud
/// broadband bursts filling each of the given frame indices.
pub fn burst_signal(frames: usize, frame_size: usize, burst_frames: &[usize]) -> Vec<i16> {
    let mut samples = silence(frames * frame_size);
    add_bursts(&mut samples, frame_size, burst_frames);
    samples
}

/// Like [`burst_signal`], but over a quiet noise floor instead of
/// silence.
pub fn bursts_over_noise(
    frames: usize,
    frame_size: usize,
    burst_frames: &[usize],
    noise_amplitude: i16,
    seed: u64,
) -> Vec<i16> {
    let mut samples = noise_floor(frames * frame_size, noise_amplitude, seed);
    add_bursts(&mut samples, frame_size, burst_frames);
    samples
}

fn add_bursts(samples: &mut [i16], frame_size: usize, burst_frames: &[usize]) {
    for &frame in burst_frames {
        let begin = frame * frame_size;
        for (offset, sample) in samples[begin..begin + frame_size].iter_mut().enumerate() {
            // An alternating full-scale square wave. Its energy sits at
            // the top of the spectrum and makes the flux jump regardless
            // of what the surrounding frames contain.
            *sample = if offset % 2 == 0 {
                BURST_AMPLITUDE
            } else {
                -BURST_AMPLITUDE
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn noise_floor_is_deterministic_and_bounded() {
        let a = noise_floor(512, 100, 42);
        let b = noise_floor(512, 100, 42);
        check!(a == b);
        check!(a.iter().all(|&s| (-100..=100).contains(&s)));
    }

    #[test]
    fn burst_signal_is_silent_outside_bursts() {
        let samples = burst_signal(4, 8, &[2]);
        check!(samples.len() == 32);
        check!(samples[..16].iter().all(|&s| s == 0));
        check!(samples[16..24].iter().all(|&s| s.unsigned_abs() == 20_000));
        check!(samples[24..].iter().all(|&s| s == 0));
    }
}
