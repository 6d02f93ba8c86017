//! Main TUI application state and logic

use crate::config::SPEED_STEP_MS;
use crate::input::InputGenerator;
use crate::player::{PlaybackStatus, Player};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use super::panes::{
    render_array_pane, render_details_pane, render_pseudocode_pane, render_status_bar,
};
use super::theme::DEFAULT_THEME;

/// Longest wait for input while nothing is scheduled
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Array,
    Watch,
    Pseudocode,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: array -> watch -> pseudocode)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Array => FocusedPane::Watch,
            FocusedPane::Watch => FocusedPane::Pseudocode,
            FocusedPane::Pseudocode => FocusedPane::Array,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Array => FocusedPane::Pseudocode,
            FocusedPane::Watch => FocusedPane::Array,
            FocusedPane::Pseudocode => FocusedPane::Watch,
        }
    }
}

/// The main application state
pub struct App {
    pub player: Player,

    /// Source of fresh inputs for the `n` key
    pub generator: InputGenerator,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub watch_scroll: usize,
    pub pseudocode_scroll: usize,

    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create an app around a player that already holds a trace
    pub fn new(player: Player, generator: InputGenerator) -> Self {
        App {
            player,
            generator,
            focused_pane: FocusedPane::Array,
            watch_scroll: 0,
            pseudocode_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let mut last_frame = Instant::now();
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Wake up in time for the next autoplay tick
            let timeout = self
                .player
                .next_tick_in()
                .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            let now = Instant::now();
            self.advance(now.duration_since(last_frame));
            last_frame = now;
        }

        Ok(())
    }

    /// Feed elapsed wall time to the player
    pub fn advance(&mut self, elapsed: Duration) {
        let was_playing = self.player.is_playing();
        let state = self.player.advance_time(elapsed);
        if was_playing && state.status == PlaybackStatus::Finished {
            self.status_message = "Playback complete".to_string();
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        // Left column: array (top) | step message (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(columns[0]);

        // Right column: watch (top) | pseudocode (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        let message = match (self.player.current_snapshot(), self.player.descriptor()) {
            (Some(snapshot), Some(descriptor)) => {
                render_array_pane(
                    frame,
                    left_rows[0],
                    snapshot,
                    descriptor.notation,
                    descriptor.name,
                    self.focused_pane == FocusedPane::Array,
                );
                render_details_pane(
                    frame,
                    right_rows[0],
                    snapshot,
                    self.focused_pane == FocusedPane::Watch,
                    &mut self.watch_scroll,
                );
                if let Some(params) = self.player.params() {
                    render_pseudocode_pane(
                        frame,
                        right_rows[1],
                        descriptor,
                        params,
                        self.focused_pane == FocusedPane::Pseudocode,
                        &mut self.pseudocode_scroll,
                    );
                }
                snapshot.message.clone()
            }
            _ => "(no trace loaded)".to_string(),
        };

        let message_block = Block::default()
            .title(" Step ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
            .padding(Padding::new(1, 0, 0, 0));
        frame.render_widget(
            Paragraph::new(message)
                .block(message_block)
                .style(Style::default().fg(DEFAULT_THEME.fg))
                .wrap(Wrap { trim: true }),
            left_rows[1],
        );

        render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.player.state(),
            self.player.speed(),
            self.player.validation_error(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let before = self.player.current_step();
                let state = self.player.seek(before + n);
                self.status_message = format!("Stepped forward {} step(s)", state.step - before);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                let before = self.player.current_step();
                let state = self.player.step_back();
                self.status_message = if state.step == before {
                    "Already at the start".to_string()
                } else {
                    "Stepped backward".to_string()
                };
            }
            KeyCode::Right => {
                let before = self.player.current_step();
                let state = self.player.step();
                self.status_message = if state.step == before {
                    "Already at the end".to_string()
                } else {
                    "Stepped forward".to_string()
                };
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Watch => self.watch_scroll = self.watch_scroll.saturating_sub(1),
                FocusedPane::Pseudocode => {
                    self.pseudocode_scroll = self.pseudocode_scroll.saturating_sub(1)
                }
                FocusedPane::Array => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Watch => self.watch_scroll = self.watch_scroll.saturating_add(1),
                FocusedPane::Pseudocode => {
                    self.pseudocode_scroll = self.pseudocode_scroll.saturating_add(1)
                }
                FocusedPane::Array => {}
            },
            KeyCode::Char(' ') => {
                let state = self.player.toggle();
                self.status_message = match state.status {
                    PlaybackStatus::Playing => "Playing...".to_string(),
                    PlaybackStatus::Finished => "At the end, ⌫ to restart".to_string(),
                    PlaybackStatus::Idle => "Paused".to_string(),
                };
            }
            KeyCode::Enter => {
                let total = self.player.total_steps();
                self.player.seek(total);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.player.reset();
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let ms = (self.player.speed().as_millis() as u64).saturating_sub(SPEED_STEP_MS);
                let speed = self.player.set_speed_ms(ms);
                self.status_message = format!("Speed {}ms", speed.as_millis());
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let ms = self.player.speed().as_millis() as u64 + SPEED_STEP_MS;
                let speed = self.player.set_speed_ms(ms);
                self.status_message = format!("Speed {}ms", speed.as_millis());
            }
            KeyCode::Char('n') => self.regenerate(),
            _ => {}
        }
    }

    /// Reload the current algorithm on a fresh random input
    fn regenerate(&mut self) {
        let (Some(id), Some(params)) = (self.player.algorithm_id(), self.player.params().cloned())
        else {
            return;
        };
        let generated = self.generator.generate(None);
        let shown = self
            .player
            .descriptor()
            .map(|d| d.notation.format(&generated.input))
            .unwrap_or_default();
        self.status_message = match self.player.load_algorithm(id, &generated.input, &params) {
            Ok(state) => format!(
                "New input {} (seed {}), {} steps",
                shown, generated.seed, state.total
            ),
            Err(e) => format!("Cannot load new input: {}", e),
        };
        self.watch_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{GeneratorConfig, Shape};
    use crate::registry::Params;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app(id: &str, input: &[i64], params: &Params) -> App {
        let mut player = Player::default();
        player.load_algorithm(id, input, params).unwrap();
        App::new(player, InputGenerator::default())
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app("insertion-sort", &[3, 2, 1], &Params::new());
        let total = app.player.total_steps();

        press(&mut app, KeyCode::Right);
        assert_eq!(app.player.current_step(), 1);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.player.current_step(), 0);
        assert_eq!(app.status_message, "Already at the start");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.player.current_step(), total);
        assert_eq!(app.player.status(), PlaybackStatus::Finished);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.player.current_step(), 0);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.player.current_step(), 3.min(total));
    }

    #[test]
    fn test_space_plays_and_completes() {
        let mut app = app("bubble-sort", &[2, 1], &Params::new());
        press(&mut app, KeyCode::Char(' '));
        assert!(app.player.is_playing());

        let speed = app.player.speed();
        for _ in 0..app.player.total_steps() {
            app.advance(speed);
        }
        assert_eq!(app.player.status(), PlaybackStatus::Finished);
        assert_eq!(app.status_message, "Playback complete");
    }

    #[test]
    fn test_speed_keys() {
        let mut app = app("bubble-sort", &[2, 1], &Params::new());
        let before = app.player.speed();
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.player.speed(), before - Duration::from_millis(SPEED_STEP_MS));
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.player.speed(), before + Duration::from_millis(SPEED_STEP_MS));
    }

    #[test]
    fn test_regenerate_loads_new_input() {
        let mut player = Player::default();
        player
            .load_algorithm("counting-sort", &[2, 1], &Params::new())
            .unwrap();
        let generator = InputGenerator::new(GeneratorConfig {
            len: 8,
            min: 0,
            max: 20,
            shape: Shape::Random,
        });
        let mut app = App::new(player, generator);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.player.input().map(<[i64]>::len), Some(8));
        assert!(app.status_message.starts_with("New input"));
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app("bubble-sort", &[2, 1], &Params::new());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Watch);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Pseudocode);
    }

    #[test]
    fn test_renders_every_family() {
        let cases: [(&str, Vec<i64>, Params); 4] = [
            ("heap-sort", vec![4, -1, 7, 2], Params::new()),
            (
                "binary-search",
                vec![1, 3, 5, 7],
                Params::new().with_number("target", 5),
            ),
            ("balanced-brackets", "([])".chars().map(|c| c as i64).collect(), Params::new()),
            ("radix-sort", vec![170, 45, 75], Params::new()),
        ];
        for (id, input, params) in cases {
            let mut app = app(id, &input, &params);
            let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
            for _ in 0..=app.player.total_steps() {
                terminal.draw(|f| app.render(f)).unwrap();
                app.player.step();
            }
        }
    }

    #[test]
    fn test_quit() {
        let mut app = app("bubble-sort", &[2, 1], &Params::new());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
