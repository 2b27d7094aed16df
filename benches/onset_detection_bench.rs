use criterion::{black_box, criterion_group, criterion_main, Criterion};
use onset_detector::{OnsetDetector, Sensitivity, SliceSource};

fn criterion_benchmark(c: &mut Criterion) {
    let samples = samples::synthetic_track();

    let detector = OnsetDetector::new(Sensitivity::STANDARD);
    c.bench_function("onset detection over 512 frames of synthetic audio", |b| {
        b.iter(|| {
            let mut source = SliceSource::new(black_box(&samples));
            detector.detect(&mut source).unwrap()
        })
    });

    let detector = OnsetDetector::new(Sensitivity::CONSERVATIVE);
    c.bench_function(
        "onset detection over 512 frames of synthetic audio (conservative)",
        |b| {
            b.iter(|| {
                let mut source = SliceSource::new(black_box(&samples));
                detector.detect(&mut source).unwrap()
            })
        },
    );
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

mod samples {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const FRAME_SIZE: usize = 1024;
    const FRAMES: usize = 512;

    /// About twelve seconds of a quiet noise floor with a loud broadband
    /// burst every 32 frames. We do not care about the detection result,
    /// only about exercising every pipeline stage on realistic volume.
    pub fn synthetic_track() -> Vec<i16> {
        let mut rng = StdRng::seed_from_u64(1);
        let mut samples = (0..FRAMES * FRAME_SIZE)
            .map(|_| rng.random_range(-200..=200))
            .collect::<Vec<i16>>();

        for frame in (0..FRAMES).step_by(32) {
            let begin = frame * FRAME_SIZE;
            for (offset, sample) in samples[begin..begin + FRAME_SIZE].iter_mut().enumerate() {
                *sample = if offset % 2 == 0 { 20_000 } else { -20_000 };
            }
        }

        samples
    }
}
