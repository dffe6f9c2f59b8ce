//! TUI for drumgrid
//!
//! Grid editor, transport bar and a live oscilloscope of the master bus.

mod grid;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::time::{Duration, Instant};

use drumgrid::{Drumgrid, Instrument, Transport, STEPS};

use grid::render_grid;
use transport::render_transport;
use waveform::render_waveform;

/// Virtual canvas the oscilloscope frame is rasterized into.
const SCOPE_WIDTH: f32 = 512.0;
const SCOPE_HEIGHT: f32 = 128.0;

const TEMPO_STEP: f64 = 5.0;
const VOLUME_STEP: f32 = 0.1;

/// Row/column of the edit cursor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cursor {
    pub track: usize,
    pub step: usize,
}

pub struct UiApp {
    grid: Drumgrid,
    cursor: Cursor,
    started: Instant,
    /// Upper bound on how long input polling may block.
    frame_interval: Duration,
    status: Option<String>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(grid: Drumgrid, frame_interval: Duration) -> Self {
        Self {
            grid,
            cursor: Cursor::default(),
            started: Instant::now(),
            frame_interval,
            status: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.grid.run_timers(self.host_time());
            // Playhead is read directly from the grid each frame
            self.grid.poll_events();
            self.grid.display_refresh(SCOPE_WIDTH, SCOPE_HEIGHT);

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(self.poll_timeout())? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.grid.stop();
        Ok(())
    }

    fn host_time(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Wake up in time for the next scheduler timer.
    fn poll_timeout(&self) -> Duration {
        self.grid
            .next_deadline()
            .map(|deadline| Duration::from_secs_f64((deadline - self.host_time()).max(0.0)))
            .map_or(self.frame_interval, |until| until.min(self.frame_interval))
    }

    fn selected_track(&self) -> Instrument {
        Instrument::ALL[self.cursor.track]
    }

    fn handle_key(&mut self, key: KeyCode) {
        let tracks = Instrument::ALL.len();
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => match self.grid.transport() {
                Transport::Running => self.grid.pause(),
                _ => {
                    let result = self.grid.start();
                    self.report(result.err());
                }
            },
            KeyCode::Char('s') => self.grid.stop(),
            KeyCode::Up => self.cursor.track = (self.cursor.track + tracks - 1) % tracks,
            KeyCode::Down => self.cursor.track = (self.cursor.track + 1) % tracks,
            KeyCode::Left => self.cursor.step = (self.cursor.step + STEPS - 1) % STEPS,
            KeyCode::Right => self.cursor.step = (self.cursor.step + 1) % STEPS,
            KeyCode::Enter | KeyCode::Char('x') => {
                let id = self.selected_track().as_str();
                self.grid.toggle_step(id, self.cursor.step);
            }
            KeyCode::Char('a') => {
                let result = self.grid.audition(self.selected_track());
                self.report(result.err());
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.grid.set_tempo(self.grid.tempo() + TEMPO_STEP);
            }
            KeyCode::Char('-') => {
                self.grid.set_tempo((self.grid.tempo() - TEMPO_STEP).max(TEMPO_STEP));
            }
            KeyCode::Char(']') => self.nudge_volume(VOLUME_STEP),
            KeyCode::Char('[') => self.nudge_volume(-VOLUME_STEP),
            KeyCode::Char('c') => self.grid.clear_pattern(),
            KeyCode::Char('d') => self.grid.load_demo(),
            _ => {}
        }
    }

    fn nudge_volume(&mut self, delta: f32) {
        let instrument = self.selected_track();
        let volume = self.grid.track_volume(instrument) + delta;
        self.grid.set_track_volume(instrument.as_str(), volume);
    }

    fn report(&mut self, err: Option<drumgrid::Error>) {
        if let Some(err) = err {
            tracing::warn!(%err, "audio action failed");
            self.status = Some(err.to_string());
        } else {
            self.status = None;
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: transport, grid, waveform, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                               // Transport bar
                Constraint::Length(Instrument::ALL.len() as u16 + 3), // Grid
                Constraint::Min(6),                                  // Waveform
                Constraint::Length(1),                               // Help bar
            ])
            .split(area);

        render_transport(frame, chunks[0], &self.grid, self.status.as_deref());
        render_grid(frame, chunks[1], &self.grid, self.cursor);
        render_waveform(frame, chunks[2], self.grid.waveform());

        let help = Paragraph::new(
            " [Space] Play/Pause  [S] Stop  [Arrows] Move  [Enter] Toggle  [A] Audition  [+/-] Tempo  [[/]] Volume  [C] Clear  [D] Demo  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
