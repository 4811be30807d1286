use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 10 caractères — compact, bon contraste.
pub const PALETTE_STANDARD: &str = " .:-=+*#%@";

/// 15 caractères — plus de paliers intermédiaires.
pub const PALETTE_DETAILED: &str = " .,:;i1tfLCG08@";

/// Blocs Unicode — pseudo-pixels.
pub const PALETTE_BLOCKS: &str = " ░▒▓█";

/// Minimal — haut contraste.
pub const PALETTE_MINIMAL: &str = " .:█";

/// Identifier of a built-in palette.
///
/// # Example
/// ```
/// use ar_core::charset::PaletteId;
/// assert_eq!(PaletteId::default(), PaletteId::Standard);
/// assert_eq!(PaletteId::Standard.next(), PaletteId::Detailed);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PaletteId {
    /// `" .:-=+*#%@"`
    #[default]
    Standard,
    /// `" .,:;i1tfLCG08@"`
    Detailed,
    /// `" ░▒▓█"`
    Blocks,
    /// `" .:█"`
    Minimal,
}

impl PaletteId {
    /// All built-in palettes, in cycling order.
    pub const ALL: [PaletteId; 4] = [
        PaletteId::Standard,
        PaletteId::Detailed,
        PaletteId::Blocks,
        PaletteId::Minimal,
    ];

    /// Characters of this palette, sparsest first.
    #[must_use]
    pub fn chars(self) -> &'static str {
        match self {
            PaletteId::Standard => PALETTE_STANDARD,
            PaletteId::Detailed => PALETTE_DETAILED,
            PaletteId::Blocks => PALETTE_BLOCKS,
            PaletteId::Minimal => PALETTE_MINIMAL,
        }
    }

    /// Next palette in [`PaletteId::ALL`], wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Parse a case-insensitive palette name (`"standard"`, `"blocks"`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Lowercase display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PaletteId::Standard => "standard",
            PaletteId::Detailed => "detailed",
            PaletteId::Blocks => "blocks",
            PaletteId::Minimal => "minimal",
        }
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered characters mapping brightness levels to glyphs.
///
/// Index 0 is the sparsest glyph (minimum brightness), the last index the
/// densest one. Always holds at least two characters.
///
/// # Example
/// ```
/// use ar_core::charset::Palette;
/// let palette = Palette::new(" .:#@").unwrap();
/// assert_eq!(palette.index_for(0.0), 0);
/// assert_eq!(palette.index_for(1.0), 4);
/// assert_eq!(palette.char_at(4), '@');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    chars: Vec<char>,
}

impl Palette {
    /// Build a palette from characters ordered sparsest→densest.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if fewer than 2 characters are given.
    pub fn new(chars: &str) -> Result<Self, CoreError> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.len() < 2 {
            return Err(CoreError::Config(format!(
                "a palette needs at least 2 characters, got {}",
                chars.len()
            )));
        }
        Ok(Self { chars })
    }

    /// Palette for a built-in identifier, checked like any other palette.
    ///
    /// # Errors
    /// Same as [`Palette::new`].
    ///
    /// # Example
    /// ```
    /// use ar_core::charset::{Palette, PaletteId};
    /// let palette = Palette::builtin(PaletteId::Blocks).unwrap();
    /// assert_eq!(palette.len(), 5);
    /// ```
    pub fn builtin(id: PaletteId) -> Result<Self, CoreError> {
        Self::new(id.chars())
    }

    /// Number of characters (≥ 2).
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Highest valid index.
    #[inline]
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.chars.len() - 1
    }

    /// Map a brightness in [0, 1] to a palette index.
    ///
    /// `floor(brightness * (len - 1))`, clamped to a valid position. NaN maps
    /// to 0.
    #[inline]
    #[must_use]
    pub fn index_for(&self, brightness: f64) -> usize {
        let scaled = (brightness * self.max_index() as f64).floor();
        if scaled.is_nan() || scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(self.max_index())
        }
    }

    /// Character at `index`; out-of-range indices fall back to the blank glyph.
    #[inline]
    #[must_use]
    pub fn char_at(&self, index: usize) -> char {
        self.chars.get(index).copied().unwrap_or_else(|| self.blank())
    }

    /// The sparsest glyph (index 0).
    #[inline]
    #[must_use]
    pub fn blank(&self) -> char {
        self.chars[0]
    }
}
