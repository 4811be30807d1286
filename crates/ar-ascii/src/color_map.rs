use ar_core::color::CellColor;

/// Plancher par canal : garde les glyphes lisibles sur fond noir.
pub const MIN_CHANNEL: u8 = 60;

/// Brightness multiplier for a palette position.
///
/// `max(index / max_index * 1.5 + 0.5, 0.8)`: sparse glyphs are dimmed,
/// dense glyphs boosted up to 2×.
///
/// # Example
/// ```
/// use ar_ascii::color_map::brightness_factor;
/// assert!((brightness_factor(0, 9) - 0.8).abs() < 1e-12);
/// assert!((brightness_factor(9, 9) - 2.0).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn brightness_factor(index: usize, max_index: usize) -> f64 {
    let position = index as f64 / max_index.max(1) as f64;
    (position * 1.5 + 0.5).max(0.8)
}

/// Derive the foreground color of a colored cell.
///
/// Each channel becomes `clamp(round(c * factor), 60, 255)`.
///
/// # Example
/// ```
/// use ar_ascii::color_map::derive_color;
/// use ar_core::CellColor;
/// assert_eq!(derive_color(0, 0, 0, 0, 9), CellColor::Rgb(60, 60, 60));
/// assert_eq!(derive_color(200, 100, 50, 9, 9), CellColor::Rgb(255, 200, 100));
/// ```
#[must_use]
pub fn derive_color(r: u8, g: u8, b: u8, index: usize, max_index: usize) -> CellColor {
    let factor = brightness_factor(index, max_index);
    let adjust = |c: u8| {
        (f64::from(c) * factor)
            .round()
            .clamp(f64::from(MIN_CHANNEL), 255.0) as u8
    };
    CellColor::Rgb(adjust(r), adjust(g), adjust(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_always_within_floor_and_ceiling() {
        for max_index in [1usize, 4, 9, 14] {
            for index in 0..=max_index {
                for c in (0..=255u8).step_by(5) {
                    let CellColor::Rgb(r, g, b) = derive_color(c, 255 - c, c / 2, index, max_index)
                    else {
                        panic!("colored cells are always Rgb");
                    };
                    for channel in [r, g, b] {
                        assert!((MIN_CHANNEL..=255).contains(&channel));
                    }
                }
            }
        }
    }

    #[test]
    fn factor_never_drops_below_floor() {
        for index in 0..=14 {
            assert!(brightness_factor(index, 14) >= 0.8);
        }
        // index 1 of 9 : 1/9 * 1.5 + 0.5 ≈ 0.667 → relevé à 0.8
        assert!((brightness_factor(1, 9) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn rounds_to_nearest() {
        // 101 * 0.8 = 80.8 → 81
        assert_eq!(derive_color(101, 101, 101, 0, 9), CellColor::Rgb(81, 81, 81));
    }
}
