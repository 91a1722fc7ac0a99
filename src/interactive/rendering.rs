//! TUI rendering with ratatui
//!
//! Live view of the learner: the current board, running statistics,
//! vocabulary growth and recent events.

use super::app::{App, MessageStyle};
use crate::core::{LetterStatus, WORD_LENGTH};
use crate::game::{AttemptRecord, Environment, GameStatus, SessionSnapshot};
use crate::output::formatters::letter_counts;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Sparkline, Wrap},
};

/// Main UI rendering function
pub fn ui<E: Environment>(f: &mut Frame, app: &App<E>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(14),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, &app.snapshot, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Board and guess
            Constraint::Percentage(55), // Statistics
        ])
        .split(chunks[1]);

    render_game_panel(f, &app.snapshot, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_status(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let title = if snapshot.game_number == 0 {
        "🧠 WORDLE LEARNER - Waiting for first game".to_string()
    } else {
        format!("🧠 WORDLE LEARNER - Game {}", snapshot.game_number)
    };
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_game_panel(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(snapshot.max_attempts as u16 + 2), // Board
            Constraint::Min(5),                                   // Current guess
        ])
        .split(area);

    render_board(f, snapshot, chunks[0]);
    render_current_guess(f, snapshot, chunks[1]);
}

fn render_board(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let mut lines: Vec<Line> = snapshot.attempts.iter().map(board_row).collect();
    while lines.len() < snapshot.max_attempts {
        lines.push(Line::styled(
            " _ ".repeat(WORD_LENGTH),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn board_row(attempt: &AttemptRecord) -> Line<'static> {
    let letters = attempt.word.text().to_uppercase();
    let Some(feedback) = attempt.feedback() else {
        let mut spans: Vec<Span> = letters
            .chars()
            .map(|letter| {
                Span::styled(
                    format!(" {letter} "),
                    Style::default().fg(Color::White).bg(Color::Gray),
                )
            })
            .collect();
        spans.push(Span::raw(" ?"));
        return Line::from(spans);
    };

    let spans: Vec<Span> = feedback
        .tiles()
        .iter()
        .map(|tile| {
            let background = match tile.status {
                LetterStatus::Correct => Color::Green,
                LetterStatus::Present => Color::Yellow,
                LetterStatus::Absent => Color::DarkGray,
            };
            Span::styled(
                format!(" {} ", char::from(tile.letter).to_ascii_uppercase()),
                Style::default()
                    .fg(Color::Black)
                    .bg(background)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    Line::from(spans)
}

fn render_current_guess(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let mut content = match &snapshot.last_guess {
        Some(guess) => vec![
            Line::from(vec![
                Span::raw("Last guess: "),
                Span::styled(
                    guess.word.text().to_uppercase(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(format!("Chosen by:  {}", guess.kind)),
            Line::from(format!("Candidates: {}", guess.candidates)),
        ],
        None => vec![Line::from("No guess yet")],
    };

    let state = match snapshot.status {
        Some(GameStatus::Won) => "won",
        Some(GameStatus::Lost) => "lost",
        Some(GameStatus::InProgress) => "in progress",
        None => "not started",
    };
    content.push(Line::from(format!(
        "Game:       {state} ({} rejected)",
        snapshot.rejections
    )));

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Current Guess ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_info_panel<E: Environment>(f: &mut Frame, app: &App<E>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Win rate gauge
            Constraint::Length(6), // Statistics
            Constraint::Length(6), // Vocabulary growth
            Constraint::Min(4),    // Messages
        ])
        .split(area);

    render_win_rate(f, &app.snapshot, chunks[0]);
    render_statistics(f, &app.snapshot, chunks[1]);
    render_vocabulary_growth(f, &app.snapshot, chunks[2]);
    render_messages(f, app, chunks[3]);
}

fn render_win_rate(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Win Rate ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .percent(snapshot.win_rate.clamp(0.0, 100.0) as u16)
        .label(format!(
            "{:.1}% | {} won, {} lost",
            snapshot.win_rate, snapshot.games_won, snapshot.games_lost
        ));
    f.render_widget(gauge, area);
}

fn render_statistics(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let recent: Vec<String> = snapshot
        .recent_words
        .iter()
        .take(5)
        .map(|word| word.text().to_uppercase())
        .collect();

    let content = vec![
        Line::from(format!(
            "Known words: {} | Rejected: {}",
            snapshot.vocabulary_size, snapshot.invalid_words
        )),
        Line::from(format!(
            "Games: {} | Attempts per win: {:.2}",
            snapshot.games_played, snapshot.attempts_per_win
        )),
        Line::from(format!("Top letters: {}", letter_counts(&snapshot.top_letters))),
        Line::from(format!("Recent: {}", recent.join(" "))),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Statistics ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(paragraph, area);
}

fn render_vocabulary_growth(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let width = usize::from(area.width.saturating_sub(2));
    let series = &snapshot.vocabulary_series;
    let data: Vec<u64> = series
        .iter()
        .skip(series.len().saturating_sub(width))
        .map(|&(_, size)| size as u64)
        .collect();

    let title = match (series.first(), series.last()) {
        (Some(first), Some(last)) => format!(
            " Vocabulary: {} → {} words over {} games ",
            first.1,
            last.1,
            series.len()
        ),
        _ => " Vocabulary growth ".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .data(&data)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(sparkline, area);
}

fn render_messages<E: Environment>(f: &mut Frame, app: &App<E>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));
    f.render_widget(messages_list, area);
}

fn render_status<E: Environment>(f: &mut Frame, app: &App<E>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let (mode_text, mode_color) = if app.paused {
        ("Mode: Paused", Color::Yellow)
    } else {
        ("Mode: Learning", Color::Green)
    };
    let mode = Paragraph::new(mode_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(mode_color));
    f.render_widget(mode, chunks[0]);

    let speed = Paragraph::new(format!("Tick: {} ms", app.tick.as_millis()))
        .alignment(Alignment::Center);
    f.render_widget(speed, chunks[1]);

    let help_text = if app.paused {
        "q: Quit | Space: Resume | s: Step | +/-: Speed"
    } else {
        "q: Quit | Space: Pause | +/-: Speed"
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
