//! SearchInput — wraps tui-input as the picker's query box.

use ratatui::crossterm::event::{Event, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{style_focused_border, style_input, style_muted, style_unfocused_border};

const SEARCH_ICON: &str = "⌕ ";

#[derive(Debug, PartialEq)]
pub enum InputAction {
    Changed(String),
    Unchanged,
}

pub struct SearchInput {
    input: Input,
    placeholder: String,
}

impl SearchInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            placeholder: placeholder.into(),
        }
    }

    /// Feed an editing key to the input. Reports whether the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        let before = self.input.value().len();
        let changed = self
            .input
            .handle_event(&Event::Key(key))
            .is_some_and(|c| c.value);
        if changed || before != self.input.value().len() {
            InputAction::Changed(self.input.value().to_string())
        } else {
            InputAction::Unchanged
        }
    }

    /// Render `text` in a bordered input box (expects a height of 3).
    /// The cursor position comes from the edit buffer.
    pub fn draw(&self, frame: &mut Frame, area: Rect, focused: bool, text: &str) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                style_focused_border()
            } else {
                style_unfocused_border()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let prefix_w = SEARCH_ICON.chars().count() as u16;
        let scroll = self
            .input
            .visual_scroll(inner.width.saturating_sub(prefix_w + 1) as usize);
        let shown = if text.is_empty() {
            Span::styled(self.placeholder.as_str(), style_muted())
        } else {
            Span::styled(text.chars().skip(scroll).collect::<String>(), style_input())
        };
        let line = Line::from(vec![Span::styled(SEARCH_ICON, style_muted()), shown]);
        frame.render_widget(Paragraph::new(line), inner);

        if focused && inner.width > 0 {
            let cursor_x = inner.x + prefix_w + (self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(inner.x + inner.width - 1), inner.y));
        }
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new("Type to begin searching")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_reports_changes() {
        let mut input = SearchInput::default();
        assert_eq!(
            input.handle_key(key(KeyCode::Char('e'))),
            InputAction::Changed("e".into())
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Char('u'))),
            InputAction::Changed("eu".into())
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Backspace)),
            InputAction::Changed("e".into())
        );
        assert_eq!(input.input.value(), "e");
    }

    #[test]
    fn test_cursor_movement_is_not_a_change() {
        let mut input = SearchInput::default();
        input.handle_key(key(KeyCode::Char('x')));
        assert_eq!(input.handle_key(key(KeyCode::Left)), InputAction::Unchanged);
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), InputAction::Unchanged);
        assert_eq!(input.input.value(), "x");
    }
}
