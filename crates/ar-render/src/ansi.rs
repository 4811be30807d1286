//! Truecolor ANSI rendering of a grid, for `--print --color`.

use std::io::{self, Write};

use ar_core::color::CellColor;
use ar_core::frame::Grid;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

/// Write `grid` as rows of colored characters, one line per row.
///
/// A color escape is emitted only when the color changes; the color is reset
/// at the end of every row.
///
/// # Errors
/// Propagates write failures of `out`.
pub fn write_ansi(grid: &Grid, out: &mut impl Write) -> io::Result<()> {
    for row in grid.rows() {
        let mut current: Option<CellColor> = None;
        for cell in row {
            if current != Some(cell.color) {
                let (r, g, b) = cell.color.rgb();
                queue!(out, SetForegroundColor(Color::Rgb { r, g, b }))?;
                current = Some(cell.color);
            }
            queue!(out, Print(cell.ch))?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()
}
