//! Typeahead — the search controller behind each currency picker.
//!
//! Owns the query, the filtered results, the loading and visibility flags and
//! the highlight cursor. It never touches the selection set: selecting a row
//! produces an `Action::ToggleCurrency` for the App to apply.
//!
//! # States
//! ```text
//!  Closed        — dropdown hidden
//!  OpenIdle      — dropdown shown, results settled
//!  OpenLoading   — dropdown shown, a filter pass is pending
//! ```
//! Non-empty query changes schedule a deferred pass (see `debounce`); empty
//! queries resolve synchronously according to `EmptyQueryBehavior`.

pub mod cursor;
pub mod debounce;
pub mod regions;
pub mod view_model;
pub mod viewport;

use std::time::Duration;

use ratatui::layout::Position;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use currency_proto::{Catalog, Currency, SelectionSet};

use crate::action::{Action, ComponentId};

use self::debounce::{FilterReady, FilterScheduler};
use self::regions::OwnedRegions;
use self::view_model::ViewModel;
use self::viewport::Viewport;

/// What the list shows while the query is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyQueryBehavior {
    /// The whole catalog.
    #[default]
    ShowAll,
    /// Nothing until the user types.
    ShowNone,
}

/// Keys the dropdown reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    OpenIdle,
    OpenLoading,
}

/// Per-widget search state. `highlight` is `None` or a valid index into `results`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    /// Catalog indices, catalog order.
    pub results: Vec<usize>,
    pub is_loading: bool,
    pub is_open: bool,
    pub highlight: Option<usize>,
}

pub struct Typeahead {
    id: ComponentId,
    catalog: Catalog,
    behavior: EmptyQueryBehavior,
    state: SearchState,
    scheduler: FilterScheduler,
    pub viewport: Viewport,
    pub regions: OwnedRegions,
}

impl Typeahead {
    pub fn new(
        id: ComponentId,
        catalog: Catalog,
        behavior: EmptyQueryBehavior,
        latency: Duration,
        tx: mpsc::Sender<FilterReady>,
    ) -> Self {
        let state = SearchState {
            results: empty_query_results(&catalog, behavior),
            ..SearchState::default()
        };
        Self {
            id,
            scheduler: FilterScheduler::new(id, catalog.clone(), latency, tx),
            catalog,
            behavior,
            state,
            viewport: Viewport::default(),
            regions: OwnedRegions::default(),
        }
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn on_query_change(&mut self, text: &str) {
        self.state.query = text.to_string();
        self.state.is_open = true;
        self.scheduler.cancel();

        if text.is_empty() {
            let results = empty_query_results(&self.catalog, self.behavior);
            self.state.highlight = cursor::revalidate(self.state.highlight, results.len());
            self.state.results = results;
            self.state.is_loading = false;
            self.viewport.reset();
            debug!("[{:?}] empty query → {} results", self.id, self.state.results.len());
        } else {
            self.state.is_loading = true;
            self.scheduler.schedule(text);
        }
    }

    /// Apply a completed filter pass. Returns `false` (and changes nothing)
    /// for a pass that has been superseded.
    pub fn on_filter_ready(&mut self, ready: FilterReady) -> bool {
        if !self.scheduler.take_if_current(&ready.ticket) {
            trace!(
                "[{:?}] discarding stale filter #{} ({:?})",
                self.id,
                ready.ticket.seq,
                ready.ticket.query
            );
            return false;
        }
        self.state.results = ready.results;
        self.state.is_loading = false;
        self.state.highlight = if self.state.results.is_empty() {
            None
        } else {
            Some(0)
        };
        self.viewport.reset();
        debug!(
            "[{:?}] filter #{} for {:?} → {} results",
            self.id,
            ready.ticket.seq,
            ready.ticket.query,
            self.state.results.len()
        );
        true
    }

    // ── Keyboard ─────────────────────────────────────────────────────────────

    pub fn on_key_navigate(&mut self, key: NavKey) -> Vec<Action> {
        let len = self.state.results.len();
        if !self.state.is_open || len == 0 {
            return vec![];
        }
        match key {
            NavKey::Down => {
                self.state.highlight = cursor::wrap_next(self.state.highlight, len);
            }
            NavKey::Up => {
                self.state.highlight = cursor::wrap_prev(self.state.highlight, len);
            }
            NavKey::Enter => {
                if let Some(pos) = self.state.highlight {
                    return self.on_row_activate(pos);
                }
            }
            NavKey::Escape => {
                // highlight is deliberately left as-is
                self.state.is_open = false;
            }
        }
        vec![]
    }

    // ── Pointer ──────────────────────────────────────────────────────────────

    /// A result row was clicked. `pos` indexes `results`.
    pub fn on_row_activate(&self, pos: usize) -> Vec<Action> {
        match self.result_at(pos) {
            Some(currency) => vec![Action::ToggleCurrency(currency.clone())],
            None => vec![],
        }
    }

    pub fn on_focus_gained(&mut self) {
        self.state.is_open = true;
    }

    pub fn on_outside_interaction(&mut self, inside: bool) {
        if !inside && self.state.is_open {
            debug!("[{:?}] dismissed by outside click", self.id);
            self.state.is_open = false;
        }
    }

    /// Offered every mouse-down on screen. Returns whether it hit this picker.
    pub fn on_pointer_down(&mut self, pos: Position) -> bool {
        let inside = self.regions.contains(pos);
        self.on_outside_interaction(inside);
        inside
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn view_model<'a>(&'a self, selection: &SelectionSet) -> ViewModel<'a> {
        view_model::project(&self.state, &self.catalog, selection)
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    #[cfg(test)]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        match (self.state.is_open, self.state.is_loading) {
            (false, _) => Phase::Closed,
            (true, true) => Phase::OpenLoading,
            (true, false) => Phase::OpenIdle,
        }
    }

    pub fn result_at(&self, pos: usize) -> Option<&Currency> {
        self.state
            .results
            .get(pos)
            .and_then(|&idx| self.catalog.get(idx))
    }

    /// Keep the highlighted row inside a dropdown of `height` rows.
    pub fn ensure_visible(&mut self, height: usize) {
        self.viewport
            .ensure_visible(self.state.highlight, self.state.results.len(), height);
    }
}

fn empty_query_results(catalog: &Catalog, behavior: EmptyQueryBehavior) -> Vec<usize> {
    match behavior {
        EmptyQueryBehavior::ShowAll => catalog.all_indices(),
        EmptyQueryBehavior::ShowNone => Vec::new(),
    }
}
