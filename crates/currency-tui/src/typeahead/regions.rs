//! Screen regions a picker owns, for outside-click dismissal.

use ratatui::layout::{Position, Rect};

/// The trigger (input box) and, while drawn, the dropdown overlay.
/// Updated on every draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnedRegions {
    pub trigger: Rect,
    pub dropdown: Option<Rect>,
}

impl OwnedRegions {
    pub fn contains(&self, pos: Position) -> bool {
        hit(self.trigger, pos) || self.dropdown.is_some_and(|r| hit(r, pos))
    }

    pub fn in_trigger(&self, pos: Position) -> bool {
        hit(self.trigger, pos)
    }

    pub fn in_dropdown(&self, pos: Position) -> bool {
        self.dropdown.is_some_and(|r| hit(r, pos))
    }
}

pub fn hit(r: Rect, pos: Position) -> bool {
    r.width > 0
        && r.height > 0
        && pos.x >= r.x
        && pos.x < r.x + r.width
        && pos.y >= r.y
        && pos.y < r.y + r.height
}
