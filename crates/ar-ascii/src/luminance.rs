//! Brightness models. Both return a value in [0, 1].

/// Standard luma (BT.601 weights), linear in the channel values.
///
/// # Example
/// ```
/// use ar_ascii::luminance::luma;
/// assert_eq!(luma(0, 0, 0), 0.0);
/// assert!((luma(255, 0, 0) - 0.299).abs() < 1e-9);
/// ```
#[inline(always)]
#[must_use]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    (f64::from(r) * 0.299 + f64::from(g) * 0.587 + f64::from(b) * 0.114) / 255.0
}

/// Perceptual-quadratic brightness used for color output.
///
/// `sqrt(0.299 r² + 0.587 g² + 0.114 b²)` on normalized channels. Mid-tones
/// land brighter than with [`luma`], which gives color art more punch.
///
/// # Example
/// ```
/// use ar_ascii::luminance::{luma, perceptual};
/// assert!(perceptual(128, 64, 200) > luma(128, 64, 200));
/// assert_eq!(perceptual(0, 0, 0), 0.0);
/// ```
#[inline(always)]
#[must_use]
pub fn perceptual(r: u8, g: u8, b: u8) -> f64 {
    let (r, g, b) = (
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    );
    (0.299 * r * r + 0.587 * g * g + 0.114 * b * b).sqrt()
}

/// Brightness of a pixel for the selected mode, inverted on request.
#[inline(always)]
#[must_use]
pub fn brightness(r: u8, g: u8, b: u8, grayscale: bool, invert: bool) -> f64 {
    let value = if grayscale {
        luma(r, g, b)
    } else {
        perceptual(r, g, b)
    };
    if invert { 1.0 - value } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_is_monotonic_on_gray_ramp() {
        let mut prev = -1.0;
        for v in 0..=255u8 {
            let l = luma(v, v, v);
            assert!(l > prev, "luma non monotone à {v}");
            prev = l;
        }
    }

    #[test]
    fn both_models_stay_in_unit_range() {
        for r in (0..=255u8).step_by(51) {
            for g in (0..=255u8).step_by(51) {
                for b in (0..=255u8).step_by(51) {
                    for value in [luma(r, g, b), perceptual(r, g, b)] {
                        assert!((0.0..=1.0 + 1e-9).contains(&value));
                    }
                }
            }
        }
    }

    #[test]
    fn invert_mirrors_brightness() {
        let plain = brightness(90, 140, 30, true, false);
        let inverted = brightness(90, 140, 30, true, true);
        assert!((plain + inverted - 1.0).abs() < 1e-12);
    }
}
