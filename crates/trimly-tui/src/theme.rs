//! Shared styles for the dashboard.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Green;
pub const WARN: Color = Color::Red;
pub const DIM: Color = Color::DarkGray;

pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM)
}

pub fn table_header() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn selected_row() -> Style {
    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
}

pub fn day_off_badge() -> Style {
    Style::default().fg(WARN).add_modifier(Modifier::BOLD)
}

pub fn hint() -> Style {
    Style::default().fg(DIM)
}

pub fn status_error() -> Style {
    Style::default().fg(WARN)
}
