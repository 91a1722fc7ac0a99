//! TUI application state and logic
//!
//! The dashboard drives a [`Session`] one submission per tick and renders a
//! fresh [`SessionSnapshot`] after each one.

use crate::game::{Environment, GameStatus, Session, SessionSnapshot, StepOutcome, StepReport};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::error;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

const MIN_TICK: Duration = Duration::from_millis(10);
const MAX_TICK: Duration = Duration::from_secs(5);
const MAX_MESSAGES: usize = 8;

/// Application state
pub struct App<E> {
    pub session: Session<E>,
    pub snapshot: SessionSnapshot,
    pub messages: Vec<Message>,
    pub paused: bool,
    pub tick: Duration,
    pub should_quit: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl<E: Environment> App<E> {
    #[must_use]
    pub fn new(session: Session<E>, tick: Duration) -> Self {
        let snapshot = session.snapshot();
        let mut app = Self {
            session,
            snapshot,
            messages: Vec::new(),
            paused: false,
            tick: tick.clamp(MIN_TICK, MAX_TICK),
            should_quit: false,
        };
        app.add_message(
            &format!(
                "Starting with {} known words. Space pauses, q quits.",
                app.snapshot.vocabulary_size
            ),
            MessageStyle::Info,
        );
        app
    }

    /// Make one submission and refresh the snapshot
    ///
    /// A failing step pauses the dashboard instead of tearing it down.
    pub fn step(&mut self) {
        match self.session.step() {
            Ok(report) => self.describe(&report),
            Err(e) => {
                error!("Step failed: {e:#}");
                self.add_message(&format!("Error: {e:#}"), MessageStyle::Error);
                self.paused = true;
            }
        }
        self.snapshot = self.session.snapshot();
    }

    fn describe(&mut self, report: &StepReport) {
        match &report.outcome {
            StepOutcome::Rejected { word, .. } => self.add_message(
                &format!("{} rejected, not a word", word.text().to_uppercase()),
                MessageStyle::Error,
            ),
            StepOutcome::Accepted {
                learned: true,
                guess,
                ..
            } => self.add_message(
                &format!("Learned {}", guess.word.text().to_uppercase()),
                MessageStyle::Success,
            ),
            StepOutcome::Accepted { feedback: None, .. } => {
                self.add_message("Feedback unreadable, continuing", MessageStyle::Error);
            }
            StepOutcome::Accepted { .. } => {}
        }

        match report.status {
            GameStatus::Won => self.add_message(
                &format!(
                    "Game {} won in {} attempts",
                    report.game_number,
                    self.session
                        .history()
                        .last()
                        .map_or(0, |game| game.attempts.len())
                ),
                MessageStyle::Success,
            ),
            GameStatus::Lost => {
                let answer = self
                    .session
                    .history()
                    .last()
                    .and_then(|game| game.target_word.as_ref())
                    .map_or_else(|| "unknown".to_string(), |word| word.text().to_uppercase());
                self.add_message(
                    &format!("Game {} lost, answer {answer}", report.game_number),
                    MessageStyle::Error,
                );
            }
            GameStatus::InProgress => {}
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        let text = if self.paused { "Paused" } else { "Resumed" };
        self.add_message(text, MessageStyle::Info);
    }

    pub fn faster(&mut self) {
        self.tick = (self.tick / 2).max(MIN_TICK);
    }

    pub fn slower(&mut self) {
        self.tick = (self.tick * 2).min(MAX_TICK);
    }

    /// Stop the session, save it and leave the loop
    pub fn quit(&mut self) {
        self.session.close();
        self.should_quit = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only process key press events (fixes Windows double-input bug)
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char(' ') => self.toggle_pause(),
            KeyCode::Char('+' | '=') => self.faster(),
            KeyCode::Char('-') => self.slower(),
            KeyCode::Char('s') if self.paused => self.step(),
            _ => {}
        }
    }
}

/// Run the dashboard until the user quits
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_dashboard<E: Environment>(app: App<E>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend, E: Environment>(
    terminal: &mut Terminal<B>,
    mut app: App<E>,
) -> Result<()> {
    let mut last_step = Instant::now();

    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        let timeout = if app.paused {
            app.tick
        } else {
            app.tick.saturating_sub(last_step.elapsed())
        };
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        } else if !app.paused {
            app.step();
            last_step = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
