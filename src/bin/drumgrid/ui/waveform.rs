//! Waveform oscilloscope widget

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use drumgrid::scope::{FrameKind, WaveformFrame};

/// Render a rasterized oscilloscope frame.
///
/// Frame coordinates grow downward; the chart's y axis grows upward, so y is
/// flipped against the frame height.
pub fn render_waveform(frame: &mut Frame, area: Rect, waveform: &WaveformFrame) {
    let mut block = Block::default().title(" Waveform ").borders(Borders::ALL);
    if let Some(label) = &waveform.label {
        block = block.title_bottom(Line::from(label.text).alignment(Alignment::Center));
    }

    let flip = |&(x, y): &(f32, f32)| (x as f64, (waveform.height - y) as f64);

    let data: Vec<(f64, f64)> = waveform.points.iter().map(flip).collect();
    let center: Vec<(f64, f64)> = [(0.0, waveform.grid.center), (waveform.width, waveform.grid.center)]
        .iter()
        .map(flip)
        .collect();

    let color = match waveform.kind {
        FrameKind::Signal => Color::Cyan,
        FrameKind::Placeholder => Color::Blue,
    };

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&center),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, waveform.width.max(1.0) as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, waveform.height.max(1.0) as f64])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
