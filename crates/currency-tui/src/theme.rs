//! Color palette and style constants for the currency picker.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_ACCENT: Color = Color::Rgb(80, 160, 220);
pub const C_CHECKED: Color = Color::Rgb(80, 200, 120);
pub const C_LOADING: Color = Color::Rgb(255, 184, 80);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_HIGHLIGHT_BG: Color = Color::Rgb(37, 99, 235); // row under the keyboard cursor
pub const C_DROPDOWN_BG: Color = Color::Rgb(24, 24, 34);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 115);
pub const C_INPUT_FG: Color = Color::Rgb(255, 200, 80);
pub const C_CODE: Color = Color::Rgb(100, 160, 130);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_input() -> Style {
    Style::default().fg(C_INPUT_FG)
}

pub fn style_highlighted_row() -> Style {
    Style::default()
        .bg(C_HIGHLIGHT_BG)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn style_dropdown() -> Style {
    Style::default().bg(C_DROPDOWN_BG).fg(C_PRIMARY)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
