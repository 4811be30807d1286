use std::time::Instant;

use ar_core::config::ConversionConfig;
use ar_core::frame::Grid;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::canvas;
use crate::reveal::{RevealEngine, RevealPhase};

/// Everything one frame needs, borrowed from the host loop.
pub struct DrawContext<'a> {
    /// Last successful conversion, if any.
    pub grid: Option<&'a Grid>,
    /// Reveal state driving row visibility and motion.
    pub reveal: &'a RevealEngine,
    /// Conversion settings shown in the status line.
    pub config: &'a ConversionConfig,
    /// Message of the last failed conversion.
    pub error: Option<&'a str>,
    /// Reference being (or last) loaded.
    pub reference: &'a str,
    /// Frame clock.
    pub now: Instant,
}

/// Draw the full UI: canvas + status line, plus the error panel on failure.
pub fn draw(frame: &mut Frame, ctx: &DrawContext<'_>) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        area,
    );

    // Vertical split: [canvas | status(1)]
    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

    if let Some(grid) = ctx.grid {
        canvas::render_reveal(frame.buffer_mut(), chunks[0], grid, ctx.reveal, ctx.now);
    }
    draw_status(frame, chunks[1], ctx);

    if let Some(message) = ctx.error {
        draw_error_overlay(frame, chunks[0], message, ctx.reference);
    }
}

fn draw_status(frame: &mut Frame, area: Rect, ctx: &DrawContext<'_>) {
    let cfg = ctx.config;
    let phase = match ctx.reveal.phase() {
        RevealPhase::Empty => "empty".to_string(),
        RevealPhase::Revealing => format!(
            "{}/{}",
            ctx.reveal.revealed_rows(),
            ctx.reveal.total_rows()
        ),
        RevealPhase::Settled => "settled".to_string(),
    };
    let dim = Style::default().fg(Color::DarkGray);
    let line = Line::from(vec![
        Span::styled(format!(" {} ", cfg.palette), Style::default().fg(Color::Cyan)),
        Span::styled(format!("res {:.2} ", cfg.resolution), dim),
        Span::styled(if cfg.grayscale { "gray " } else { "color " }, dim),
        Span::styled(if cfg.invert { "inv " } else { "" }, dim),
        Span::styled(format!("│ {phase} "), dim),
        Span::styled("│ q quit  r reload  i g p +/-", dim),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_error_overlay(frame: &mut Frame, area: Rect, message: &str, reference: &str) {
    let text = vec![
        Line::from(Span::styled(
            format!("Error: {message}"),
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Trying to load: {reference}"),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let width = area.width.min(60);
    let height = area.height.min(7);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let panel = Rect::new(x, y, width, height);

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" asciireveal ")
            .style(Style::default().bg(Color::Black).fg(Color::Red)),
    );

    frame.render_widget(Clear, panel);
    frame.render_widget(paragraph, panel);
}

#[cfg(test)]
mod tests {
    use ar_core::color::CellColor;
    use ar_core::frame::Cell;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::reveal::REVEAL_DURATION;

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn error_panel_shows_message_and_reference() {
        let mut terminal = Terminal::new(TestBackend::new(70, 12)).unwrap();
        let reveal = RevealEngine::new(false);
        let config = ConversionConfig::default();
        let ctx = DrawContext {
            grid: None,
            reveal: &reveal,
            config: &config,
            error: Some("Chargement impossible"),
            reference: "missing.png",
            now: Instant::now(),
        };
        terminal.draw(|f| draw(f, &ctx)).unwrap();

        let screen: String = (0..12).map(|y| row_text(&terminal, y)).collect();
        assert!(screen.contains("Error: Chargement impossible"));
        assert!(screen.contains("Trying to load: missing.png"));
    }

    #[test]
    fn settled_grid_and_status_are_drawn() {
        let grid = Grid::from_cells(
            2,
            1,
            vec![
                Cell { ch: '@', color: CellColor::White },
                Cell { ch: '%', color: CellColor::White },
            ],
        )
        .unwrap();
        let mut reveal = RevealEngine::new(true);
        let t0 = Instant::now();
        let req = reveal.present(1, t0).unwrap();
        reveal.on_tick(req, t0 + REVEAL_DURATION);

        let mut terminal = Terminal::new(TestBackend::new(60, 4)).unwrap();
        let config = ConversionConfig::default();
        let ctx = DrawContext {
            grid: Some(&grid),
            reveal: &reveal,
            config: &config,
            error: None,
            reference: "img.png",
            now: t0 + REVEAL_DURATION,
        };
        terminal.draw(|f| draw(f, &ctx)).unwrap();

        assert!(row_text(&terminal, 1).contains("@%"));
        let status = row_text(&terminal, 3);
        assert!(status.contains("standard"));
        assert!(status.contains("settled"));
    }
}
