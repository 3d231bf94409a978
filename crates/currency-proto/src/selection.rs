//! SelectionSet — the shared multi-select set the pickers toggle into.

use crate::currency::Currency;

/// Currencies keyed by code, at most one per code, kept in selection order.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    entries: Vec<Currency>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `currency` if absent, deselect it if present.
    /// Returns `true` when the currency ended up selected.
    pub fn toggle(&mut self, currency: &Currency) -> bool {
        if let Some(pos) = self.entries.iter().position(|c| c.code == currency.code) {
            self.entries.remove(pos);
            false
        } else {
            self.entries.push(currency.clone());
            true
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|c| c.code == code)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Currency> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_is_inverse() {
        let mut set = SelectionSet::new();
        let eur = Currency::new("EUR", "Euro", "");
        assert!(set.toggle(&eur));
        assert!(set.contains("EUR"));
        assert!(!set.toggle(&eur));
        assert!(!set.contains("EUR"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_keeps_selection_order() {
        let mut set = SelectionSet::new();
        set.toggle(&Currency::new("USD", "US Dollar", ""));
        set.toggle(&Currency::new("EUR", "Euro", ""));
        set.toggle(&Currency::new("EGP", "Egyptian Pound", ""));
        set.toggle(&Currency::new("EUR", "Euro", ""));
        let codes: Vec<&str> = set.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["USD", "EGP"]);
    }

    #[test]
    fn test_one_entry_per_code() {
        let mut set = SelectionSet::new();
        set.toggle(&Currency::new("USD", "US Dollar", ""));
        // same code, different record: still treated as the same entry
        set.toggle(&Currency::new("USD", "Dollar", "$"));
        assert_eq!(set.len(), 0);
    }
}
