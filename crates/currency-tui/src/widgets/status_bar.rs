//! Status bar — bottom line with the focused pane and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::ComponentId;
use crate::theme::{C_ACCENT, C_CHECKED, C_MUTED};

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, focused: Option<ComponentId>, selected: usize) {
    let label = match focused {
        Some(ComponentId::BrowseAll) | Some(ComponentId::TypeToSearch) => "SEARCH",
        Some(ComponentId::SelectedList) | None => "NORMAL",
    };

    let keys = match focused {
        Some(ComponentId::BrowseAll) | Some(ComponentId::TypeToSearch) => {
            " type to search  ↑↓ highlight  Enter toggle  Esc close  click row toggle  Tab next pane  Ctrl-C quit"
        }
        _ => " Tab/1-3 panes  click a search box to open it  q quit",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} selected", selected), Style::default().fg(C_CHECKED)),
        Span::raw(" "),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
