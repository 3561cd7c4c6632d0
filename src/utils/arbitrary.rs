//! Helper functions for using `quickcheck`'s `Arbitrary` trait

use quickcheck::Arbitrary;

#[must_use]
pub fn finite_float(gen: &mut quickcheck::Gen) -> f64 {
    let raw = f64::arbitrary(gen);
    if raw.is_infinite() || raw.is_nan() {
        0.0
    } else {
        raw
    }
}

/// Mostly small factors, which exercise the rounding,
/// with the occasional huge one that exercises clamping.
#[must_use]
pub fn non_negative_factor(gen: &mut quickcheck::Gen) -> f64 {
    if u8::arbitrary(gen) < 224 {
        f64::from(u16::arbitrary(gen)) / 10_000.0
    } else {
        finite_float(gen).abs()
    }
}
