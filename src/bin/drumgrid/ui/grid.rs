//! Step grid widget - one row per track, playhead column highlighted

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use drumgrid::{Drumgrid, Instrument, STEPS};

use super::Cursor;

const LABEL_WIDTH: usize = 11;

pub fn render_grid(frame: &mut Frame, area: Rect, grid: &Drumgrid, cursor: Cursor) {
    let block = Block::default().title(" Pattern ").borders(Borders::ALL);
    let playhead = grid.playhead();

    let mut lines = Vec::with_capacity(Instrument::ALL.len() + 1);

    // Step numbers, beats emphasised
    let mut header = vec![Span::raw(" ".repeat(LABEL_WIDTH))];
    for step in 0..STEPS {
        let style = if step % 4 == 0 {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        header.push(Span::styled(format!("{:<3}", step + 1), style));
    }
    lines.push(Line::from(header));

    for (row, instrument) in Instrument::ALL.into_iter().enumerate() {
        let mut spans = Vec::with_capacity(STEPS + 2);
        spans.push(Span::styled(
            format!("{:<width$}", instrument.display_name(), width = LABEL_WIDTH),
            Style::default().fg(if row == cursor.track {
                Color::Cyan
            } else {
                Color::Gray
            }),
        ));

        for step in 0..STEPS {
            let active = grid.pattern().is_active(instrument, step);
            let symbol = if active { "■  " } else { "·  " };

            let mut style = Style::default().fg(if active { Color::Green } else { Color::DarkGray });
            if playhead == Some(step) {
                style = style.bg(Color::Rgb(40, 40, 60));
            }
            if row == cursor.track && step == cursor.step {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(symbol, style));
        }

        spans.push(Span::styled(
            format!(" {:>3.0}%", grid.track_volume(instrument) * 100.0),
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
