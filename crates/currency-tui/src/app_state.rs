//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use currency_proto::{Catalog, SelectionSet};

pub struct AppState {
    /// Loaded once at startup; never mutated.
    pub catalog: Catalog,
    /// Currencies toggled in from either picker, in selection order.
    pub selection: SelectionSet,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selection: SelectionSet::new(),
        }
    }
}
