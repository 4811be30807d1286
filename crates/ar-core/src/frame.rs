use crate::color::CellColor;
use crate::error::CoreError;

/// Off-screen pixel surface. Stocke les pixels en RGBA row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use ar_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use ar_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Acquire a zeroed surface without aborting on allocation failure.
    ///
    /// # Errors
    /// Returns [`CoreError::RenderContext`] if the byte size overflows or the
    /// allocator refuses the request.
    ///
    /// # Example
    /// ```
    /// use ar_core::frame::FrameBuffer;
    /// assert!(FrameBuffer::try_new(4, 4).is_ok());
    /// assert!(FrameBuffer::try_new(u32::MAX, u32::MAX).is_err());
    /// ```
    pub fn try_new(width: u32, height: u32) -> Result<Self, CoreError> {
        let surface_error = |reason: String| CoreError::RenderContext {
            width,
            height,
            reason,
        };
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .filter(|&n| n <= isize::MAX as usize)
            .ok_or_else(|| surface_error("surface size overflows".into()))?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| surface_error(e.to_string()))?;
        data.resize(len, 0);
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Pixel (x, y) → (r, g, b, a), or `None` when the backing buffer does not
    /// cover that position.
    ///
    /// # Example
    /// ```
    /// use ar_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(2, 2);
    /// assert_eq!(fb.pixel(1, 1), Some((0, 0, 0, 0)));
    /// assert_eq!(fb.pixel(2, 0), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        match self.data.get(idx..idx + 4) {
            Some(&[r, g, b, a]) => Some((r, g, b, a)),
            _ => None,
        }
    }

    /// Write pixel (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if let Some(slot) = self.data.get_mut(idx..idx + 4) {
            slot.copy_from_slice(&rgba);
        }
    }

    /// Check that the backing buffer can be read as RGBA pixels.
    ///
    /// # Errors
    /// Returns [`CoreError::PixelRead`] if the buffer is empty or not made of
    /// whole 4-byte pixels.
    pub fn check_readable(&self) -> Result<(), CoreError> {
        if self.data.is_empty() {
            return Err(CoreError::PixelRead("pixel buffer is empty".into()));
        }
        if self.data.len() % 4 != 0 {
            return Err(CoreError::PixelRead(format!(
                "{} bytes is not a whole number of RGBA pixels",
                self.data.len()
            )));
        }
        Ok(())
    }
}

/// Single cell in the character grid.
///
/// # Example
/// ```
/// use ar_core::frame::Cell;
/// let cell = Cell::default();
/// assert_eq!(cell.ch, ' ');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Caractère à afficher.
    pub ch: char,
    /// Couleur foreground.
    pub color: CellColor,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            color: CellColor::White,
        }
    }
}

/// Rectangular character grid, row-major.
///
/// Built once per conversion and never mutated afterwards.
///
/// # Example
/// ```
/// use ar_core::frame::{Cell, Grid};
/// let cells = vec![Cell::default(); 6];
/// let grid = Grid::from_cells(3, 2, cells).unwrap();
/// assert_eq!(grid.rows().count(), 2);
/// assert_eq!(grid.to_text(), "   \n   ");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Wrap a flat, row-major cell vector.
    ///
    /// # Errors
    /// Returns [`CoreError::DegenerateConfiguration`] if either dimension is 0,
    /// or [`CoreError::Config`] if `cells` is not exactly `width * height` long.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::DegenerateConfiguration {
                columns: width as u32,
                rows: height as u32,
            });
        }
        if cells.len() != width * height {
            return Err(CoreError::Config(format!(
                "{} cells cannot fill a {width}×{height} grid",
                cells.len()
            )));
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Width in characters.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in characters (row count).
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row `y`, or `None` past the last row.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        let start = y.checked_mul(self.width)?;
        self.cells.get(start..start + self.width)
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    /// Cell at (x, y).
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    /// Plain-text rendering: characters only, rows joined by `'\n'`.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height);
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| c.ch));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(ch: char) -> Cell {
        Cell {
            ch,
            color: CellColor::White,
        }
    }

    #[test]
    fn grid_rejects_degenerate_dimensions() {
        assert!(matches!(
            Grid::from_cells(0, 3, Vec::new()),
            Err(CoreError::DegenerateConfiguration { columns: 0, rows: 3 })
        ));
    }

    #[test]
    fn grid_rejects_ragged_cells() {
        assert!(matches!(
            Grid::from_cells(2, 2, vec![cell('a'); 3]),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn grid_text_joins_rows() {
        let cells = "abcdef".chars().map(cell).collect();
        let grid = Grid::from_cells(3, 2, cells).unwrap();
        assert_eq!(grid.to_text(), "abc\ndef");
        assert_eq!(grid.row(1).map(|r| r[0].ch), Some('d'));
        assert!(grid.row(2).is_none());
        assert_eq!(grid.get(2, 0).map(|c| c.ch), Some('c'));
        assert!(grid.get(3, 0).is_none());
    }

    #[test]
    fn default_cell_is_blank_white() {
        let blank = Cell::default();
        assert_eq!(blank.ch, ' ');
        assert_eq!(blank.color, CellColor::White);

        let grid = Grid::from_cells(2, 2, vec![Cell::default(); 4]).unwrap();
        assert_eq!(grid.to_text(), "  \n  ");
        assert!(!grid.to_text().contains('\0'));
    }

    #[test]
    fn frame_readability() {
        assert!(FrameBuffer::new(1, 1).check_readable().is_ok());
        let empty = FrameBuffer {
            data: Vec::new(),
            width: 1,
            height: 1,
        };
        assert!(matches!(empty.check_readable(), Err(CoreError::PixelRead(_))));
        let ragged = FrameBuffer {
            data: vec![0; 6],
            width: 1,
            height: 1,
        };
        assert!(matches!(ragged.check_readable(), Err(CoreError::PixelRead(_))));
    }

    #[test]
    fn truncated_buffer_reports_missing_pixels() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(0, 0, [1, 2, 3, 4]);
        assert_eq!(fb.pixel(0, 0), Some((1, 2, 3, 4)));
        fb.data.truncate(8);
        assert!(fb.pixel(1, 0).is_some());
        assert!(fb.pixel(0, 1).is_none());
    }
}
