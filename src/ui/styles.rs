use crate::domain::Mode;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Accent color for a mode (tabs, clock, gauge)
pub fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Focus => Color::LightBlue,
        Mode::Break => Color::LightGreen,
    }
}

/// Active mode tab
pub fn active_tab_style(mode: Mode) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(mode_color(mode))
        .add_modifier(Modifier::BOLD)
}

/// Inactive mode tab
pub fn inactive_tab_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Big clock digits
pub fn clock_style(mode: Mode) -> Style {
    Style::default()
        .fg(mode_color(mode))
        .add_modifier(Modifier::BOLD)
}

/// Running status badge style
pub fn running_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Paused status badge style
pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Idle status badge style
pub fn idle_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Completion banner
pub fn banner_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Interval progress gauge
pub fn gauge_style(mode: Mode) -> Style {
    Style::default().fg(mode_color(mode)).bg(Color::DarkGray)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Checkbox of a completed task
pub fn check_style() -> Style {
    Style::default().fg(Color::Green)
}
