//! SelectedList component — the "Selected Currencies" panel.
//!
//! Read-only view of `AppState.selection` in selection order. Focusable so it
//! can be scrolled when the selection outgrows the pane.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_default, style_muted, C_CHECKED, C_CODE},
    typeahead::viewport::Viewport,
    widgets::pane_chrome::{pane_chrome, Badge},
};

#[derive(Default)]
pub struct SelectedList {
    viewport: Viewport,
    /// Rows available at the last draw.
    height: usize,
}

impl SelectedList {
    pub fn new() -> Self {
        Self::default()
    }

    fn scroll_by(&mut self, delta: isize, len: usize) {
        let max = len.saturating_sub(self.height);
        let next = self.viewport.offset.saturating_add_signed(delta);
        self.viewport.offset = next.min(max);
    }
}

impl Component for SelectedList {
    fn id(&self) -> ComponentId {
        ComponentId::SelectedList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let len = state.selection.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1, len),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1, len),
            KeyCode::PageDown => self.scroll_by(self.height as isize, len),
            KeyCode::PageUp => self.scroll_by(-(self.height as isize), len),
            KeyCode::Home | KeyCode::Char('g') => self.viewport.reset(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_by(len as isize, len),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let len = state.selection.len();
        match event.kind {
            MouseEventKind::ScrollDown => self.scroll_by(1, len),
            MouseEventKind::ScrollUp => self.scroll_by(-1, len),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let count = state.selection.len();
        let count_text = count.to_string();
        let badge = (count > 0).then(|| Badge {
            text: count_text.as_str(),
            color: C_CHECKED,
        });
        let block = pane_chrome("Selected Currencies", Some('3'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.height = inner.height as usize;
        if state.selection.is_empty() {
            self.viewport.reset();
            frame.render_widget(
                Paragraph::new(Span::styled("No currencies selected", style_muted())),
                inner,
            );
            return;
        }

        self.viewport.ensure_visible(None, count, self.height);
        let range = self.viewport.visible_range(count, self.height);
        let lines: Vec<Line> = state
            .selection
            .iter()
            .skip(range.start)
            .take(range.len())
            .map(|c| {
                let mut spans = Vec::with_capacity(4);
                if !c.flag.is_empty() {
                    spans.push(Span::raw(format!("{} ", c.flag)));
                }
                spans.push(Span::styled(c.code.as_str(), Style::default().fg(C_CODE)));
                spans.push(Span::styled(" - ", style_muted()));
                spans.push(Span::styled(c.name.as_str(), style_default()));
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
