//! FocusRing — keyboard focus cycling between panes.

use crate::action::ComponentId;
use crate::typeahead::cursor::{wrap_next, wrap_prev};

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        self.current = wrap_next(Some(self.current), self.items.len())?;
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        self.current = wrap_prev(Some(self.current), self.items.len())?;
        self.current()
    }

    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.current = pos;
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current() == Some(id)
    }

    /// Focus the Nth item in the ring (0-indexed). No-op if out of bounds.
    pub fn set_by_position(&mut self, pos: usize) -> Option<ComponentId> {
        let id = self.items.get(pos).copied()?;
        self.current = pos;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> FocusRing {
        FocusRing::new(vec![
            ComponentId::BrowseAll,
            ComponentId::TypeToSearch,
            ComponentId::SelectedList,
        ])
    }

    #[test]
    fn test_cycles_both_ways() {
        let mut r = ring();
        assert_eq!(r.current(), Some(ComponentId::BrowseAll));
        assert_eq!(r.prev(), Some(ComponentId::SelectedList));
        assert_eq!(r.next(), Some(ComponentId::BrowseAll));
        assert_eq!(r.next(), Some(ComponentId::TypeToSearch));
    }

    #[test]
    fn test_set_and_position() {
        let mut r = ring();
        r.set(ComponentId::SelectedList);
        assert!(r.is_focused(ComponentId::SelectedList));
        assert_eq!(r.set_by_position(1), Some(ComponentId::TypeToSearch));
        assert_eq!(r.set_by_position(9), None);
        assert!(r.is_focused(ComponentId::TypeToSearch));
    }

    #[test]
    fn test_empty_ring() {
        let mut r = FocusRing::new(Vec::new());
        assert_eq!(r.next(), None);
        assert_eq!(r.current(), None);
    }
}
