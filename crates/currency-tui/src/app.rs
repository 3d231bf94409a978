//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries terminal events in from a blocking reader task.
//! - Filter passes report back on their own channel; both feed `AppMessage`.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use currency_proto::{config::Config, Catalog};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{currency_picker::CurrencyPicker, header::draw_header, selected_list::SelectedList},
    focus::FocusRing,
    theme::C_BG,
    typeahead::{debounce::FilterReady, regions::hit, EmptyQueryBehavior, Typeahead},
    widgets::status_bar,
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    /// A filter pass finished; the target picker decides whether it is current.
    FilterReady(FilterReady),
}

const PICKER_PANE_HEIGHT: u16 = 6;

// ── Pane area tracking ────────────────────────────────────────────────────────

/// Stores the last-drawn layout rects for each focusable pane.
/// Used by `handle_mouse` to do hit-testing without recomputing the layout.
#[derive(Default, Clone)]
struct PaneAreas {
    browse_all: Rect,
    type_to_search: Rect,
    selected_list: Rect,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    // ── Shared state (passed read-only to components) ─────────────────────────
    pub state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    browse_all: CurrencyPicker,
    type_to_search: CurrencyPicker,
    selected_list: SelectedList,

    focus: FocusRing,
    show_keys_bar: bool,

    /// Whether to quit on next iteration.
    should_quit: bool,

    /// Last-drawn layout rects, used for mouse hit-testing.
    pane_areas: PaneAreas,
}

impl App {
    /// Build the dashboard. The returned receiver yields finished filter passes
    /// and must be handed to [`App::run`].
    pub fn new(catalog: Catalog, config: &Config) -> (Self, mpsc::Receiver<FilterReady>) {
        let (filter_tx, filter_rx) = mpsc::channel::<FilterReady>(64);
        let latency = config.search.latency();

        let browse_all = CurrencyPicker::new(
            "Sync Search Component",
            '1',
            "This search box provides real-time search results with a stable dropdown list.",
            Typeahead::new(
                ComponentId::BrowseAll,
                catalog.clone(),
                EmptyQueryBehavior::ShowAll,
                latency,
                filter_tx.clone(),
            ),
        );
        let type_to_search = CurrencyPicker::new(
            "AutoComplete Component",
            '2',
            "This search box shows results with a loading indicator during search.",
            Typeahead::new(
                ComponentId::TypeToSearch,
                catalog.clone(),
                EmptyQueryBehavior::ShowNone,
                latency,
                filter_tx,
            ),
        );

        let app = Self {
            state: AppState::new(catalog),
            browse_all,
            type_to_search,
            selected_list: SelectedList::new(),
            focus: FocusRing::new(vec![
                ComponentId::BrowseAll,
                ComponentId::TypeToSearch,
                ComponentId::SelectedList,
            ]),
            show_keys_bar: config.ui.show_keys_bar,
            should_quit: false,
            pane_areas: PaneAreas::default(),
        };
        (app, filter_rx)
    }

    pub async fn run(mut self, mut filter_rx: mpsc::Receiver<FilterReady>) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // Spinner animation while a pass is pending.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }

                Some(ready) = filter_rx.recv() => {
                    needs_redraw = self.handle_message(AppMessage::FilterReady(ready));
                }

                _ = ui_tick.tick() => {
                    let s = &self.state;
                    self.browse_all.tick(s);
                    self.type_to_search.tick(s);
                    needs_redraw = self.is_loading();
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        info!(
            "quitting with {} currencies selected",
            self.state.selection.len()
        );
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Returns whether the screen needs a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                for action in self.handle_mouse(mouse) {
                    self.dispatch(action);
                }
                !matches!(mouse.kind, MouseEventKind::Moved)
            }
            AppMessage::Event(Event::Resize(..)) => true,
            AppMessage::Event(_) => false,
            AppMessage::FilterReady(ready) => match ready.target {
                ComponentId::BrowseAll => self.browse_all.on_filter_ready(ready),
                ComponentId::TypeToSearch => self.type_to_search.on_filter_ready(ready),
                ComponentId::SelectedList => {
                    trace!("filter result addressed to the selected list, dropped");
                    false
                }
            },
        }
    }

    fn is_loading(&self) -> bool {
        self.browse_all.is_loading_visible() || self.type_to_search.is_loading_visible()
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        // Global keys, active regardless of focus
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            _ => {}
        }

        if self.focus.is_focused(ComponentId::SelectedList) {
            // Pickers swallow printable keys, so these only work here.
            match key.code {
                KeyCode::Char('q') => return vec![Action::Quit],
                KeyCode::Char(c @ '1'..='3') => {
                    self.focus.set_by_position(c as usize - '1' as usize);
                    self.on_focus_changed();
                    return vec![];
                }
                _ => {}
            }
        }

        // Dispatch to the focused component
        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::BrowseAll) => self.browse_all.handle_key(key, s),
            Some(ComponentId::TypeToSearch) => self.type_to_search.handle_key(key, s),
            Some(ComponentId::SelectedList) => self.selected_list.handle_key(key, s),
            None => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click {
            return vec![];
        }
        let pos = Position::new(event.column, event.row);

        // Every picker hears every primary press so it can dismiss its dropdown
        // when the press lands elsewhere.
        if event.kind == MouseEventKind::Down(MouseButton::Left) {
            self.browse_all.on_pointer_down(pos);
            self.type_to_search.on_pointer_down(pos);
        }

        let areas = self.pane_areas.clone();
        let s = &self.state;

        // Determine which pane was clicked and dispatch to it.
        // Also return a FocusPane action so focus follows the click. A picker
        // opens only if the press landed on its input; `handle_mouse` sees to that.
        macro_rules! click_pane {
            ($component:expr, $area:expr) => {{
                let id = $component.id();
                let mut actions = $component.handle_mouse(event, $area, s);
                if self.focus.current() != Some(id) {
                    actions.insert(0, Action::FocusPane(id));
                }
                return actions;
            }};
        }

        // Dropdowns are drawn over the panes, so they win the hit test.
        if let Some(dropdown) = self.browse_all.typeahead.regions.dropdown {
            if self.browse_all.overlay_hit(pos) {
                click_pane!(self.browse_all, dropdown);
            }
        }
        if let Some(dropdown) = self.type_to_search.typeahead.regions.dropdown {
            if self.type_to_search.overlay_hit(pos) {
                click_pane!(self.type_to_search, dropdown);
            }
        }
        if hit(areas.browse_all, pos) {
            click_pane!(self.browse_all, areas.browse_all);
        }
        if hit(areas.type_to_search, pos) {
            click_pane!(self.type_to_search, areas.type_to_search);
        }
        if hit(areas.selected_list, pos) {
            click_pane!(self.selected_list, areas.selected_list);
        }

        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::ToggleCurrency(currency) => {
                let selected = self.state.selection.toggle(&currency);
                info!(
                    "[selection] {} {} ({} total)",
                    if selected { "selected" } else { "deselected" },
                    currency.code,
                    self.state.selection.len()
                );
            }
            Action::FocusNext => {
                self.focus.next();
                self.on_focus_changed();
            }
            Action::FocusPrev => {
                self.focus.prev();
                self.on_focus_changed();
            }
            Action::FocusPane(id) => {
                self.focus.set(id);
                debug!("focus -> {:?} (pointer)", id);
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Keyboard focus on a picker focuses its input, which opens the dropdown.
    fn on_focus_changed(&mut self) {
        let focused = self.focus.current();
        debug!("focus -> {:?}", focused);
        match focused {
            Some(ComponentId::BrowseAll) => self.browse_all.typeahead.on_focus_gained(),
            Some(ComponentId::TypeToSearch) => self.type_to_search.typeahead.on_focus_gained(),
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        // ── Outer layout: header | pickers | selected | (statusbar) ──────────
        let status_h = if self.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(PICKER_PANE_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(status_h),
            ])
            .split(area);

        draw_header(frame, outer[0], &self.state);

        let pickers = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(outer[1]);

        let focused = self.focus.current();
        let s = &self.state;
        self.browse_all
            .draw(frame, pickers[0], focused == Some(ComponentId::BrowseAll), s);
        self.type_to_search
            .draw(frame, pickers[1], focused == Some(ComponentId::TypeToSearch), s);
        self.selected_list
            .draw(frame, outer[2], focused == Some(ComponentId::SelectedList), s);

        self.pane_areas = PaneAreas {
            browse_all: pickers[0],
            type_to_search: pickers[1],
            selected_list: outer[2],
        };

        if self.show_keys_bar {
            status_bar::draw_keys_bar(frame, outer[3], focused, s.selection.len());
        }

        // ── Dropdowns (on top of everything) ─────────────────────────────────
        self.browse_all.draw_overlay(frame, area, s);
        self.type_to_search.draw_overlay(frame, area, s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeahead::Phase;
    use ratatui::backend::TestBackend;

    fn app() -> (App, mpsc::Receiver<FilterReady>) {
        App::new(Catalog::builtin(), &Config::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        app.handle_message(AppMessage::Event(Event::Key(key)));
    }

    fn type_str(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn click(app: &mut App, column: u16, row: u16) {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_message(AppMessage::Event(Event::Mouse(mouse)));
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_initial_screen() {
        let (mut app, _rx) = app();
        let out = render(&mut app);
        assert!(out.contains("Currency Selection Dashboard"));
        assert!(out.contains("Sync Search Component"));
        assert!(out.contains("AutoComplete Component"));
        assert!(out.contains("No currencies selected"));
        assert_eq!(app.browse_all.typeahead.phase(), Phase::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_and_toggle_with_keys() {
        let (mut app, mut rx) = app();
        press(&mut app, KeyCode::Tab);
        assert!(app.focus.is_focused(ComponentId::TypeToSearch));
        assert_eq!(app.type_to_search.typeahead.phase(), Phase::OpenIdle);

        type_str(&mut app, "eur");
        assert_eq!(app.type_to_search.typeahead.phase(), Phase::OpenLoading);

        let ready = rx.recv().await.unwrap();
        assert!(app.handle_message(AppMessage::FilterReady(ready)));
        press(&mut app, KeyCode::Enter);
        assert!(app.state.selection.contains("EUR"));

        let out = render(&mut app);
        assert!(out.contains("EUR - Euro"));

        press(&mut app, KeyCode::Enter);
        assert!(!app.state.selection.contains("EUR"));
    }

    #[tokio::test]
    async fn test_click_outside_closes_dropdown() {
        let (mut app, _rx) = app();
        render(&mut app);
        let trigger = app.browse_all.typeahead.regions.trigger;
        click(&mut app, trigger.x + 2, trigger.y + 1);
        assert_eq!(app.browse_all.typeahead.phase(), Phase::OpenIdle);

        render(&mut app);
        let dropdown = app.browse_all.typeahead.regions.dropdown.unwrap();
        // First row is USD in the built-in table.
        click(&mut app, dropdown.x + 3, dropdown.y + 1);
        assert!(app.state.selection.contains("USD"));
        assert_eq!(app.browse_all.typeahead.phase(), Phase::OpenIdle);

        // Press on the header, outside every picker.
        click(&mut app, 1, 0);
        assert_eq!(app.browse_all.typeahead.phase(), Phase::Closed);
        assert!(app.state.selection.contains("USD"));
    }

    #[tokio::test]
    async fn test_click_on_pane_outside_input_focuses_without_opening() {
        let (mut app, _rx) = app();
        render(&mut app);
        let trigger = app.browse_all.typeahead.regions.trigger;
        click(&mut app, trigger.x + 2, trigger.y + 1);
        assert_eq!(app.browse_all.typeahead.phase(), Phase::OpenIdle);
        render(&mut app);

        // Blurb row of the other picker, above its input box.
        let pane = app.pane_areas.type_to_search;
        click(&mut app, pane.x + 3, pane.y + 1);
        assert!(app.focus.is_focused(ComponentId::TypeToSearch));
        assert_eq!(app.type_to_search.typeahead.phase(), Phase::Closed);
        assert_eq!(app.browse_all.typeahead.phase(), Phase::Closed);

        let trigger = app.type_to_search.typeahead.regions.trigger;
        click(&mut app, trigger.x + 2, trigger.y + 1);
        assert_eq!(app.type_to_search.typeahead.phase(), Phase::OpenIdle);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let (mut app, _rx) = app();
        // 'q' in a picker is just a query character.
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);

        press(&mut app, KeyCode::BackTab);
        assert!(app.focus.is_focused(ComponentId::SelectedList));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let (mut app, _rx) = self::app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.handle_message(AppMessage::Event(Event::Key(ctrl_c)));
        assert!(app.should_quit);
    }
}
