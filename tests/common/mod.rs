//! Shared test utilities and fixtures

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Paragraph, Widget};

use summon_core::Instance;
use summon_tui::InstanceView;

pub type Prompt = Instance<String, String, String>;

/// One-line view: the prompt on row `key`, `y` resolves with the prompt,
/// `r` rejects with it.
pub struct RowView;

impl InstanceView<String, String, String> for RowView {
    fn render(&self, instance: &Prompt, area: Rect, buf: &mut Buffer) {
        Paragraph::new(instance.args().as_str()).render(area, buf);
    }

    fn area(&self, instance: &Prompt, viewport: Rect) -> Rect {
        let row = u16::try_from(instance.key().raw()).unwrap_or(u16::MAX);
        Rect::new(viewport.x, viewport.y.saturating_add(row), viewport.width, 1)
    }

    fn handle_key(&self, instance: &Prompt, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('y') => instance.resolve(instance.args().clone()),
            KeyCode::Char('r') => instance.reject(instance.args().clone()),
            _ => return false,
        }
        true
    }
}

pub fn press(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

/// Buffer contents, one trimmed string per row.
pub fn rows(buf: &Buffer) -> Vec<String> {
    let width = buf.area.width as usize;
    buf.content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .map(|row| row.trim_end().to_string())
        .collect()
}
