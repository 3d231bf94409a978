//! CurrencyPicker component — a search box with a typeahead dropdown.
//!
//! Two instances live on screen, one per `EmptyQueryBehavior`. The pane itself
//! holds a short description and the input box; the dropdown is drawn as an
//! overlay after every other pane so it can hang over them.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tracing::debug;
use unicode_width::UnicodeWidthChar;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        style_dropdown, style_highlighted_row, style_muted, style_secondary, C_CHECKED, C_CODE,
        C_LOADING, C_MUTED,
    },
    typeahead::{debounce::FilterReady, regions::hit, NavKey, Phase, Typeahead},
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        search_input::{InputAction, SearchInput},
        spinner::Spinner,
    },
};

/// Rows shown before the dropdown starts scrolling.
const MAX_DROPDOWN_ROWS: u16 = 8;
const INPUT_HEIGHT: u16 = 3;

pub struct CurrencyPicker {
    title: &'static str,
    number_key: char,
    blurb: &'static str,
    input: SearchInput,
    pub typeahead: Typeahead,
    spinner: Spinner,
    /// Where result rows were last drawn; empty while loading or closed.
    row_area: Rect,
}

impl CurrencyPicker {
    pub fn new(
        title: &'static str,
        number_key: char,
        blurb: &'static str,
        typeahead: Typeahead,
    ) -> Self {
        Self {
            title,
            number_key,
            blurb,
            input: SearchInput::default(),
            typeahead,
            spinner: Spinner::default(),
            row_area: Rect::default(),
        }
    }

    pub fn on_filter_ready(&mut self, ready: FilterReady) -> bool {
        let before = self.typeahead.phase();
        let applied = self.typeahead.on_filter_ready(ready);
        self.log_transition(before);
        applied
    }

    /// Offer a primary press anywhere on screen. Returns whether it hit this picker.
    pub fn on_pointer_down(&mut self, pos: Position) -> bool {
        let before = self.typeahead.phase();
        let inside = self.typeahead.on_pointer_down(pos);
        self.log_transition(before);
        inside
    }

    pub fn is_loading_visible(&self) -> bool {
        self.typeahead.phase() == Phase::OpenLoading
    }

    fn log_transition(&self, before: Phase) {
        let after = self.typeahead.phase();
        if after != before {
            debug!("[{:?}] {:?} -> {:?}", self.typeahead.id(), before, after);
        }
    }

    fn route_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let nav = match key.code {
            KeyCode::Down => Some(NavKey::Down),
            KeyCode::Up => Some(NavKey::Up),
            KeyCode::Enter => Some(NavKey::Enter),
            KeyCode::Esc => Some(NavKey::Escape),
            _ => None,
        };
        if let Some(nav) = nav {
            return self.typeahead.on_key_navigate(nav);
        }
        if let InputAction::Changed(q) = self.input.handle_key(key) {
            self.typeahead.on_query_change(&q);
        }
        vec![]
    }

    fn route_mouse(&mut self, event: MouseEvent, state: &AppState) -> Vec<Action> {
        let pos = Position::new(event.column, event.row);
        let in_dropdown = self.typeahead.regions.in_dropdown(pos);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if in_dropdown {
                    if hit(self.row_area, pos) {
                        let rel_row = (pos.y - self.row_area.y) as usize;
                        let len = self.typeahead.view_model(&state.selection).rows.len();
                        if let Some(idx) = self.typeahead.viewport.row_at(rel_row, len) {
                            return self.typeahead.on_row_activate(idx);
                        }
                    }
                } else if self.typeahead.regions.in_trigger(pos) {
                    self.typeahead.on_focus_gained();
                }
            }
            MouseEventKind::ScrollUp if in_dropdown => {
                return self.typeahead.on_key_navigate(NavKey::Up);
            }
            MouseEventKind::ScrollDown if in_dropdown => {
                return self.typeahead.on_key_navigate(NavKey::Down);
            }
            _ => {}
        }
        vec![]
    }

    /// Whether `pos` falls on the dropdown overlay (drawn above other panes).
    pub fn overlay_hit(&self, pos: Position) -> bool {
        self.typeahead.regions.in_dropdown(pos)
    }

    /// Pick the dropdown rectangle: below the input if it fits, else above.
    fn dropdown_area(&self, screen: Rect, content_rows: u16) -> Rect {
        let trigger = self.typeahead.regions.trigger;
        let height = content_rows + 2;
        let below_y = trigger.y + trigger.height;
        let below_room = screen.bottom().saturating_sub(below_y);
        if below_room >= height || trigger.y.saturating_sub(screen.y) < height {
            Rect {
                x: trigger.x,
                y: below_y,
                width: trigger.width,
                height: height.min(below_room),
            }
        } else {
            Rect {
                x: trigger.x,
                y: trigger.y - height,
                width: trigger.width,
                height,
            }
        }
    }

    fn row_line<'a>(
        &self,
        row: &crate::typeahead::view_model::RowView<'a>,
        width: usize,
    ) -> Line<'a> {
        let c = row.currency;
        let (check, check_style) = if row.checked {
            ("[x] ", Style::default().fg(C_CHECKED))
        } else {
            ("[ ] ", Style::default().fg(C_MUTED))
        };
        let flag = if c.flag.is_empty() {
            String::new()
        } else {
            format!("{} ", c.flag)
        };
        let code = format!("  Country: {}", c.code);
        let used = str_width(check) + str_width(&flag) + str_width(&code);
        let name = fit_width(&c.name, width.saturating_sub(used));

        let line = Line::from(vec![
            Span::styled(check, check_style),
            Span::raw(flag),
            Span::raw(name),
            Span::styled(code, Style::default().fg(C_CODE)),
        ]);
        if row.highlighted {
            line.style(style_highlighted_row())
        } else {
            line
        }
    }
}

impl Component for CurrencyPicker {
    fn id(&self) -> ComponentId {
        self.typeahead.id()
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let before = self.typeahead.phase();
        let actions = self.route_key(key);
        self.log_transition(before);
        actions
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let before = self.typeahead.phase();
        let actions = self.route_mouse(event, state);
        self.log_transition(before);
        actions
    }

    fn tick(&mut self, _state: &AppState) {
        if self.is_loading_visible() {
            self.spinner.tick();
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let vm = self.typeahead.view_model(&state.selection);
        let badge = vm.show_loading.then(|| Badge {
            text: self.spinner.glyph(),
            color: C_LOADING,
        });
        let block = pane_chrome(self.title, Some(self.number_key), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut y = inner.y;
        if inner.height > INPUT_HEIGHT {
            frame.render_widget(
                Paragraph::new(Span::styled(self.blurb, style_secondary())),
                Rect { height: 1, ..inner },
            );
            y += 1;
        }
        let input_area = Rect {
            y,
            height: INPUT_HEIGHT.min(inner.bottom().saturating_sub(y)),
            ..inner
        };
        self.input.draw(frame, input_area, focused, vm.input_text);
        self.typeahead.regions.trigger = input_area;
    }

    fn draw_overlay(&mut self, frame: &mut Frame, screen: Rect, state: &AppState) {
        let (show_dropdown, showing_rows, row_count) = {
            let vm = self.typeahead.view_model(&state.selection);
            (
                vm.show_dropdown,
                !vm.show_loading && !vm.show_empty,
                vm.rows.len(),
            )
        };
        if !show_dropdown || self.typeahead.regions.trigger.height == 0 {
            self.typeahead.regions.dropdown = None;
            self.row_area = Rect::default();
            return;
        }
        let content_rows = if showing_rows {
            (row_count as u16).min(MAX_DROPDOWN_ROWS)
        } else {
            1
        };

        let area = self.dropdown_area(screen, content_rows);
        self.typeahead.regions.dropdown = Some(area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style_muted())
            .style(style_dropdown());
        let inner = block.inner(area);
        self.row_area = if showing_rows { inner } else { Rect::default() };
        self.typeahead.ensure_visible(inner.height as usize);

        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let vm = self.typeahead.view_model(&state.selection);
        let lines: Vec<Line> = if vm.show_loading {
            vec![Line::from(Span::styled(
                format!("{} Loading…", self.spinner.glyph()),
                Style::default().fg(C_LOADING),
            ))
            .centered()]
        } else if vm.show_empty {
            vec![Line::from(Span::styled("No results found", style_muted())).centered()]
        } else {
            let range = self
                .typeahead
                .viewport
                .visible_range(vm.rows.len(), inner.height as usize);
            vm.rows[range]
                .iter()
                .map(|row| self.row_line(row, inner.width as usize))
                .collect()
        };
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn str_width(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate `s` to at most `max` columns, marking the cut with an ellipsis.
fn fit_width(s: &str, max: usize) -> String {
    if str_width(s) <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    if max > 0 {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeahead::{EmptyQueryBehavior, Phase};
    use currency_proto::{Catalog, Currency};
    use ratatui::{backend::TestBackend, buffer::Buffer, crossterm::event::KeyModifiers, Terminal};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Currency::new("USD", "US Dollar", ""),
            Currency::new("EUR", "Euro", ""),
            Currency::new("EGP", "Egyptian Pound", ""),
        ])
        .unwrap()
    }

    fn picker(behavior: EmptyQueryBehavior) -> (CurrencyPicker, mpsc::Receiver<FilterReady>) {
        let (tx, rx) = mpsc::channel(16);
        let t = Typeahead::new(
            ComponentId::BrowseAll,
            catalog(),
            behavior,
            Duration::from_millis(500),
            tx,
        );
        (CurrencyPicker::new("Sync Search", '1', "blurb", t), rx)
    }

    fn render(picker: &mut CurrencyPicker, state: &AppState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(50, 20)).unwrap();
        terminal
            .draw(|f| {
                let screen = f.area();
                picker.draw(f, Rect::new(0, 0, 50, 6), true, state);
                picker.draw_overlay(f, screen, state);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_closed_picker_draws_placeholder_only() {
        let (mut p, _rx) = picker(EmptyQueryBehavior::ShowAll);
        let state = AppState::new(catalog());
        let out = text(&render(&mut p, &state));
        assert!(out.contains("Type to begin searching"));
        assert!(!out.contains("US Dollar"));
        assert!(p.typeahead.regions.dropdown.is_none());
    }

    #[test]
    fn test_click_input_opens_and_click_row_toggles() {
        let (mut p, _rx) = picker(EmptyQueryBehavior::ShowAll);
        let mut state = AppState::new(catalog());
        render(&mut p, &state);

        let trigger = p.typeahead.regions.trigger;
        let actions = p.handle_mouse(click(trigger.x + 3, trigger.y + 1), trigger, &state);
        assert!(actions.is_empty());
        assert_eq!(p.typeahead.phase(), Phase::OpenIdle);

        let out = text(&render(&mut p, &state));
        assert!(out.contains("US Dollar"));
        assert!(out.contains("Egyptian Pound"));

        let dropdown = p.typeahead.regions.dropdown.unwrap();
        let actions = p.handle_mouse(click(dropdown.x + 2, dropdown.y + 2), dropdown, &state);
        assert_eq!(
            actions,
            vec![Action::ToggleCurrency(Currency::new("EUR", "Euro", ""))]
        );
        assert_eq!(p.typeahead.phase(), Phase::OpenIdle);

        state.selection.toggle(&Currency::new("EUR", "Euro", ""));
        assert!(p.typeahead.view_model(&state.selection).rows[1].checked);
        assert!(text(&render(&mut p, &state)).contains("[x] Euro"));
    }

    #[test]
    fn test_show_none_renders_no_results_message() {
        let (mut p, _rx) = picker(EmptyQueryBehavior::ShowNone);
        let state = AppState::new(catalog());
        p.typeahead.on_focus_gained();
        let out = text(&render(&mut p, &state));
        assert!(out.contains("No results found"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_shows_loading_then_results() {
        let (mut p, mut rx) = picker(EmptyQueryBehavior::ShowNone);
        let state = AppState::new(catalog());
        for ch in "eur".chars() {
            p.handle_key(key(KeyCode::Char(ch)), &state);
        }
        assert_eq!(p.typeahead.phase(), Phase::OpenLoading);
        assert!(text(&render(&mut p, &state)).contains("Loading"));

        let ready = rx.recv().await.unwrap();
        assert_eq!(ready.ticket.query, "eur");
        assert!(p.on_filter_ready(ready));
        let out = text(&render(&mut p, &state));
        assert!(out.contains("Euro"));
        assert!(!out.contains("Loading"));

        let actions = p.handle_key(key(KeyCode::Enter), &state);
        assert_eq!(actions.len(), 1);
        p.handle_key(key(KeyCode::Esc), &state);
        assert_eq!(p.typeahead.phase(), Phase::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_while_loading_hides_spinner_and_dropdown() {
        let (mut p, mut rx) = picker(EmptyQueryBehavior::ShowAll);
        let state = AppState::new(catalog());
        p.handle_key(key(KeyCode::Char('e')), &state);
        assert!(p.is_loading_visible());
        render(&mut p, &state);
        assert!(p.typeahead.regions.dropdown.is_some());

        p.handle_key(key(KeyCode::Esc), &state);
        assert!(!p.is_loading_visible());
        let out = text(&render(&mut p, &state));
        assert!(!out.contains("Loading"));
        assert!(p.typeahead.regions.dropdown.is_none());

        let ready = rx.recv().await.unwrap();
        assert!(p.on_filter_ready(ready));
        assert_eq!(p.typeahead.phase(), Phase::Closed);
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("Euro", 10), "Euro");
        assert_eq!(fit_width("Egyptian Pound", 6), "Egypt…");
        assert_eq!(fit_width("Euro", 0), "");
    }
}
