//! Shared screen building blocks
//!
//! Text input, help bars, theming and popup placement used by several
//! screens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Single-line editable text owned by a screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    max_chars: Option<usize>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input that ignores characters past `max_chars`
    pub fn with_limit(max_chars: usize) -> Self {
        Self {
            value: String::new(),
            max_chars: Some(max_chars),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
    }

    /// Apply an editing key. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                if let Some(limit) = self.max_chars {
                    if self.value.chars().count() >= limit {
                        return true;
                    }
                }
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }
}

/// Color set for a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
}

impl Theme {
    pub const ACCENT: Color = Color::Rgb(124, 58, 237);

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(246, 247, 251),
            text: Color::Rgb(17, 24, 39),
            muted: Color::Rgb(107, 114, 128),
            accent: Self::ACCENT,
            border: Color::Rgb(229, 231, 235),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(11, 16, 32),
            text: Color::White,
            muted: Color::Gray,
            accent: Self::ACCENT,
            border: Color::DarkGray,
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }
}

/// Style for a key hint in help bars
pub fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Render a bordered help bar from (key, description) pairs
pub fn render_help(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(key.to_string(), key_style()));
        spans.push(Span::raw(format!(" {}  ", description)));
    }

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(help, area);
}

/// Render the "N / 5 - title" header shared by every screen
pub fn render_step_header(f: &mut Frame, area: Rect, step: usize, title: &str, subtitle: &str) {
    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{} / 5  ", step), Style::default().fg(Color::DarkGray)),
            Span::styled(
                title.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            subtitle.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ];
    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

/// Button label, dimmed when disabled and highlighted when focused
pub fn button<'a>(label: &'a str, focused: bool, enabled: bool) -> Span<'a> {
    let style = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue)
    };
    Span::styled(format!("[ {} ]", label), style)
}

/// Rectangle of `percent_x` width and fixed `height` centered in `r`
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new();
        assert!(input.handle_key(key(KeyCode::Char('일'))));
        assert!(input.handle_key(key(KeyCode::Char('본'))));
        assert_eq!(input.value(), "일본");
        assert!(input.handle_key(key(KeyCode::Backspace)));
        assert_eq!(input.value(), "일");
        assert!(!input.handle_key(key(KeyCode::Enter)));
        assert!(!input.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL)));
        assert_eq!(input.value(), "일");
    }

    #[test]
    fn test_text_input_limit() {
        let mut input = TextInput::with_limit(3);
        for c in "12345".chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(input.value(), "123");
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 10, area);
        assert_eq!(popup.height, 10);
        assert!(popup.width <= 51 && popup.width >= 49);
        assert!(popup.x + popup.width <= area.width);
        assert!(popup.y + popup.height <= area.height);
    }
}
