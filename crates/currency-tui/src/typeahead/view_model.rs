//! Render-ready projection of a picker's search state.

use currency_proto::{Catalog, Currency, SelectionSet};

use super::SearchState;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<'a> {
    pub input_text: &'a str,
    pub show_dropdown: bool,
    pub show_loading: bool,
    pub show_empty: bool,
    pub rows: Vec<RowView<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a> {
    pub currency: &'a Currency,
    pub checked: bool,
    pub highlighted: bool,
}

/// Pure function of the search state and the current selection.
pub fn project<'a>(
    state: &'a SearchState,
    catalog: &'a Catalog,
    selection: &SelectionSet,
) -> ViewModel<'a> {
    let rows = state
        .results
        .iter()
        .enumerate()
        .filter_map(|(pos, &idx)| {
            let currency = catalog.get(idx)?;
            Some(RowView {
                currency,
                checked: selection.contains(&currency.code),
                highlighted: state.highlight == Some(pos),
            })
        })
        .collect();

    ViewModel {
        input_text: &state.query,
        show_dropdown: state.is_open,
        show_loading: state.is_open && state.is_loading,
        show_empty: state.is_open && !state.is_loading && state.results.is_empty(),
        rows,
    }
}
