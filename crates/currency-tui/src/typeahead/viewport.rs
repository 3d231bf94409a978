//! Scroll offset bookkeeping for the dropdown list.

use std::ops::Range;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
}

impl Viewport {
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Scroll the minimum amount needed to bring `cursor` into a window of
    /// `height` rows. Also pulls the offset back when the list shrank.
    pub fn ensure_visible(&mut self, cursor: Option<usize>, len: usize, height: usize) {
        if height == 0 {
            return;
        }
        let max_offset = len.saturating_sub(height);
        if self.offset > max_offset {
            self.offset = max_offset;
        }
        let Some(cursor) = cursor else {
            return;
        };
        if cursor < self.offset {
            self.offset = cursor;
        } else if cursor >= self.offset + height {
            self.offset = cursor.saturating_sub(height - 1);
        }
    }

    /// Indices of the rows drawn in a window of `height` rows.
    pub fn visible_range(&self, len: usize, height: usize) -> Range<usize> {
        let start = self.offset.min(len);
        let end = (self.offset + height).min(len);
        start..end
    }

    /// Map a click at `rel_row` (0 = first drawn row) to a list index.
    pub fn row_at(&self, rel_row: usize, len: usize) -> Option<usize> {
        let target = self.offset + rel_row;
        (target < len).then_some(target)
    }
}
