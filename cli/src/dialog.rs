//! Confirm dialog rendered for each pending request.

use std::fmt;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap};
use thiserror::Error;

use summon_core::Instance;
use summon_tui::{InstanceView, centered_rect};

/// Default wait before `l` settles.
pub const DELAYED_RESOLVE: Duration = Duration::from_millis(1200);

const DIALOG_WIDTH: u16 = 44;
const DIALOG_HEIGHT: u16 = 7;
const STACK_OFFSET: u16 = 2;

mod colors {
    use ratatui::style::Color;

    pub const BG_POPUP: Color = Color::Rgb(54, 54, 70);
    pub const BORDER: Color = Color::Rgb(149, 127, 184);
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186);
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105);
    pub const GREEN: Color = Color::Rgb(152, 187, 108);
    pub const YELLOW: Color = Color::Rgb(230, 195, 132);
    pub const RED: Color = Color::Rgb(255, 93, 98);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    Ok,
    Cancel,
}

impl fmt::Display for DialogResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogResult::Ok => f.write_str("ok"),
            DialogResult::Cancel => f.write_str("cancel"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DialogError {
    #[error("dialog {0} was rejected")]
    Rejected(String),
}

pub type Dialog = Instance<DialogResult, String, DialogError>;

/// Bordered confirm box. Later dialogs stack down and to the right.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmView {
    delay: Duration,
}

impl ConfirmView {
    /// How long `l` waits before resolving.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for ConfirmView {
    fn default() -> Self {
        Self {
            delay: DELAYED_RESOLVE,
        }
    }
}

impl InstanceView<DialogResult, String, DialogError> for ConfirmView {
    fn render(&self, dialog: &Dialog, area: Rect, buf: &mut Buffer) {
        let resolving = dialog.is_resolving();
        let border = if resolving { colors::YELLOW } else { colors::BORDER };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors::BG_POPUP))
            .title(format!(" confirm {} ", dialog.key()));

        let hint = if resolving {
            Line::from(Span::styled(
                "resolving…",
                Style::default()
                    .fg(colors::YELLOW)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(vec![
                key_hint("y", colors::GREEN),
                Span::raw(" ok  "),
                key_hint("n", colors::RED),
                Span::raw(" cancel  "),
                key_hint("l", colors::YELLOW),
                Span::raw(" later  "),
                key_hint("r", colors::RED),
                Span::raw(" reject"),
            ])
        };

        let lines = vec![
            Line::from(Span::styled(
                dialog.args().as_str(),
                Style::default().fg(colors::TEXT_PRIMARY),
            )),
            Line::default(),
            hint.style(Style::default().fg(colors::TEXT_MUTED)),
        ];

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn area(&self, dialog: &Dialog, viewport: Rect) -> Rect {
        let base = centered_rect(viewport, DIALOG_WIDTH, DIALOG_HEIGHT);
        let step = u16::try_from(dialog.key().raw() % 4).unwrap_or(0) * STACK_OFFSET;
        Rect {
            x: base.x.saturating_add(step),
            y: base.y.saturating_add(step / 2),
            ..base
        }
    }

    fn handle_key(&self, dialog: &Dialog, key: KeyEvent) -> bool {
        if dialog.is_resolving() {
            return false;
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => dialog.resolve(DialogResult::Ok),
            KeyCode::Char('n') | KeyCode::Esc => dialog.resolve(DialogResult::Cancel),
            KeyCode::Char('l') => {
                let delay = self.delay;
                dialog.resolve_with(async move {
                    tokio::time::sleep(delay).await;
                    Ok(DialogResult::Ok)
                });
            }
            KeyCode::Char('r') => dialog.reject(DialogError::Rejected(dialog.key().to_string())),
            _ => return false,
        }
        true
    }
}

fn key_hint(key: &'static str, color: Color) -> Span<'static> {
    Span::styled(
        key,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}
