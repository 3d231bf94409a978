//! Header — 2-row top bar.
//!
//! Row 1: dashboard title, catalog size and selection count.
//! Row 2: subtitle.
//!
//! Not focusable; draws to a 2-row area.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    app_state::AppState,
    theme::{style_secondary, C_ACCENT, C_CHECKED, C_MUTED},
};

const TITLE: &str = "Currency Selection Dashboard";
const SUBTITLE: &str = "Select currencies using the search boxes below:";

pub fn draw_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let selected = state.selection.len();
    let count_style = if selected > 0 {
        Style::default().fg(C_CHECKED)
    } else {
        Style::default().fg(C_MUTED)
    };

    let title = Line::from(vec![
        Span::styled(
            format!(" {TITLE}"),
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  · {} currencies", state.catalog.len()),
            Style::default().fg(C_MUTED),
        ),
        Span::styled(format!("  · {selected} selected"), count_style),
    ]);
    frame.render_widget(Paragraph::new(title), rows[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {SUBTITLE}"), style_secondary())),
        rows[1],
    );
}
