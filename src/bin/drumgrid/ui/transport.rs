//! Transport bar widget - shows BPM, play state, step and audio status

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use drumgrid::{Drumgrid, Transport, STEPS};

pub fn render_transport(frame: &mut Frame, area: Rect, grid: &Drumgrid, status: Option<&str>) {
    let block = Block::default().title(" drumgrid ").borders(Borders::ALL);

    let (play_symbol, play_state_str, color) = match grid.transport() {
        Transport::Running => ("▶", "Playing", Color::Green),
        Transport::Paused => ("⏸", "Paused", Color::Yellow),
        Transport::Stopped => ("■", "Stopped", Color::DarkGray),
    };

    let position = grid
        .playhead()
        .map_or_else(|| "--".to_string(), |step| format!("{:>2}", step + 1));

    let mut spans = vec![
        Span::styled(
            format!(" BPM: {:.0}  ", grid.tempo()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} {}  ", play_symbol, play_state_str),
            Style::default().fg(color),
        ),
        Span::styled(
            format!("Step {}/{}  ", position, STEPS),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Master: {:.0}%  ", grid.master_volume() * 100.0),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    match status {
        Some(message) => spans.push(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )),
        None if !grid.is_audio_ready() => spans.push(Span::styled(
            "audio starts on first play",
            Style::default().fg(Color::DarkGray),
        )),
        None => spans.push(Span::styled(
            format!("t = {:.2}s", grid.now()),
            Style::default().fg(Color::Magenta),
        )),
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
