//! Color scheme and styles for the dashboard.

use ratatui::style::{Color, Modifier, Style};

/// Panel color palette.
pub struct Theme;

impl Theme {
    pub const LABEL: Color = Color::Cyan;
    pub const VALUE: Color = Color::White;
    pub const TITLE: Color = Color::Yellow;
    pub const GAUGE: Color = Color::Green;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    pub fn label() -> Style {
        Style::default().fg(Theme::LABEL)
    }

    pub fn value() -> Style {
        Style::default().fg(Theme::VALUE)
    }

    pub fn title() -> Style {
        Style::default().fg(Theme::TITLE).add_modifier(Modifier::BOLD)
    }

    pub fn gauge() -> Style {
        Style::default().fg(Theme::GAUGE)
    }
}
