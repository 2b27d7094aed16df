//! Some common utilities required internally but also useful for external
//! users, when working with this library.

/// Transforms an audio sample in range `i16::MIN..=i16::MAX` to a `f32` in
/// range `[-1.0, 1.0)` by dividing through 32768.
#[inline]
#[must_use]
pub fn i16_sample_to_f32(val: i16) -> f32 {
    val as f32 / 32768.0
}

/// Transforms two stereo samples (that reflect the same point in time on
/// different channels) into one mono sample.
#[inline]
#[must_use]
pub const fn stereo_to_mono(l: i16, r: i16) -> i16 {
    let l = l as i32;
    let r = r as i32;
    let avg = (l + r) / 2;
    avg as i16
}
