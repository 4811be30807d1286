use std::time::Instant;

use ar_core::frame::Grid;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::reveal::RevealEngine;

/// Écrit les lignes révélées d'une `Grid` dans un `ratatui::Buffer`.
///
/// Only rows the engine has disclosed take part in layout: the visible block
/// is centered in `area`, each row shifted by its motion offset and colored at
/// its current opacity. Cells that fall outside `area` are clipped.
///
/// # Example
/// ```
/// use std::time::Instant;
/// use ar_core::color::CellColor;
/// use ar_core::frame::{Cell, Grid};
/// use ar_render::canvas::render_reveal;
/// use ar_render::reveal::RevealEngine;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let grid = Grid::from_cells(1, 1, vec![Cell { ch: '@', color: CellColor::White }]).unwrap();
/// let engine = RevealEngine::new(false);
/// let area = Rect::new(0, 0, 4, 4);
/// let mut buf = Buffer::empty(area);
/// // Nothing revealed yet: the buffer stays blank.
/// render_reveal(&mut buf, area, &grid, &engine, Instant::now());
/// assert_eq!(buf.cell((1, 1)).unwrap().symbol(), " ");
/// ```
pub fn render_reveal(
    buf: &mut Buffer,
    area: Rect,
    grid: &Grid,
    engine: &RevealEngine,
    now: Instant,
) {
    let visible = engine.revealed_rows().min(grid.height());
    if visible == 0 || area.is_empty() {
        return;
    }

    let width = grid.width();
    let x0 = i64::from(area.x) + i64::from(area.width).saturating_sub(width as i64).max(0) / 2;
    let visible_height = u16::try_from(visible).unwrap_or(u16::MAX);
    let y0 = area.y + area.height.saturating_sub(visible_height) / 2;
    let x_end = i64::from(area.right());

    for (row, cells) in grid.rows().take(visible).enumerate() {
        let Ok(dy) = u16::try_from(row) else { break };
        let y = y0.saturating_add(dy);
        if y >= area.bottom() {
            break;
        }
        let Some(presentation) = engine.row_presentation(row, now) else {
            continue;
        };
        if presentation.opacity <= 0.0 {
            continue;
        }
        let shift = presentation.offset_columns(width);

        for (cx, cell) in cells.iter().enumerate() {
            let x = x0 + cx as i64 + shift;
            if x < i64::from(area.x) || x >= x_end {
                continue;
            }
            let Ok(x) = u16::try_from(x) else { continue };
            if let Some(buf_cell) = buf.cell_mut((x, y)) {
                let (r, g, b) = cell.color.faded(presentation.opacity);
                buf_cell.set_char(cell.ch).set_fg(Color::Rgb(r, g, b));
            }
        }
    }
}
