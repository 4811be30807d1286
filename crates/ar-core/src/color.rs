use std::fmt;

/// Foreground color of a grid cell.
///
/// Color conversions produce `Rgb`; grayscale conversions paint every cell
/// with the neutral `White`.
///
/// # Example
/// ```
/// use ar_core::color::CellColor;
/// assert_eq!(CellColor::Rgb(60, 128, 255).to_string(), "rgb(60, 128, 255)");
/// assert_eq!(CellColor::White.to_string(), "white");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellColor {
    /// Truecolor foreground.
    Rgb(u8, u8, u8),
    /// Neutral foreground used in grayscale mode.
    #[default]
    White,
}

impl CellColor {
    /// RGB triple of this color; `White` resolves to (255, 255, 255).
    #[inline]
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            CellColor::Rgb(r, g, b) => (r, g, b),
            CellColor::White => (255, 255, 255),
        }
    }

    /// Fade toward black by `opacity` in [0, 1].
    ///
    /// # Example
    /// ```
    /// use ar_core::color::CellColor;
    /// assert_eq!(CellColor::White.faded(0.5), (128, 128, 128));
    /// assert_eq!(CellColor::Rgb(100, 0, 0).faded(1.0), (100, 0, 0));
    /// ```
    #[must_use]
    pub fn faded(self, opacity: f32) -> (u8, u8, u8) {
        let a = opacity.clamp(0.0, 1.0);
        let (r, g, b) = self.rgb();
        let scale = |c: u8| (f32::from(c) * a).round() as u8;
        (scale(r), scale(g), scale(b))
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellColor::Rgb(r, g, b) => write!(f, "rgb({r}, {g}, {b})"),
            CellColor::White => f.write_str("white"),
        }
    }
}
