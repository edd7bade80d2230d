use crate::domain::Category;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Cursor row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Recording item badge style
pub fn recording_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Waiting item badge style
pub fn waiting_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Over-budget warning style
pub fn over_budget_style() -> Style {
    Style::default()
        .fg(Color::Red)
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

/// Clock gauge style
pub fn gauge_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::DarkGray)
}

/// Done/completed item style
pub fn done_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Category badge color
pub fn category_style(category: Category) -> Style {
    let color = match category {
        Category::Work => Color::Blue,
        Category::Study => Color::Cyan,
        Category::Health => Color::Green,
        Category::Personal => Color::Magenta,
        Category::Errand => Color::Yellow,
        Category::Other => Color::Gray,
    };
    Style::default().fg(color)
}
