//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// Every semantic UI role mapped to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Lists --
    pub list_normal: Style,
    pub list_selected: Style,
    pub list_secondary: Style,
    pub list_meta: Style,

    // -- Tabs --
    pub tab_active: Style,
    pub tab_inactive: Style,

    // -- Detail views --
    pub detail_heading: Style,
    pub detail_label: Style,
    pub detail_body: Style,
    pub tracker_done: Style,
    pub tracker_pending: Style,
    pub tracker_gauge: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub notice: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            list_normal: Style::default().add_modifier(Modifier::BOLD),
            list_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            list_secondary: Style::default().fg(Color::Gray),
            list_meta: Style::default().fg(Color::DarkGray),

            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::Gray),

            detail_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            detail_label: Style::default().fg(Color::DarkGray),
            detail_body: Style::default(),
            tracker_done: Style::default().fg(Color::Green),
            tracker_pending: Style::default().fg(Color::DarkGray),
            tracker_gauge: Style::default().fg(Color::Blue).bg(Color::Black),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default().fg(Color::Cyan),
            notice: Style::default().fg(Color::Yellow),
        }
    }

    /// Adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            list_normal: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            list_selected: Style::default().bg(Color::Blue).fg(Color::White),
            list_secondary: Style::default().fg(Color::DarkGray),
            list_meta: Style::default().fg(Color::DarkGray),

            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::DarkGray),

            detail_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            detail_label: Style::default().fg(Color::DarkGray),
            detail_body: Style::default().fg(Color::Black),
            tracker_done: Style::default().fg(Color::Green),
            tracker_pending: Style::default().fg(Color::Gray),
            tracker_gauge: Style::default().fg(Color::Blue).bg(Color::Gray),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::Blue),
            notice: Style::default().fg(Color::Magenta),
        }
    }
}

// ============================================================================
// Style Map: string-keyed lookup
// ============================================================================

/// Resolves role names (e.g. `"detail_heading"`) to concrete styles.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

const ROLE_NAMES: [&str; 15] = [
    "list_normal",
    "list_selected",
    "list_secondary",
    "list_meta",
    "tab_active",
    "tab_inactive",
    "detail_heading",
    "detail_label",
    "detail_body",
    "tracker_done",
    "tracker_pending",
    "tracker_gauge",
    "status_bar",
    "panel_border",
    "notice",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 15] = [
            p.list_normal,
            p.list_selected,
            p.list_secondary,
            p.list_meta,
            p.tab_active,
            p.tab_inactive,
            p.detail_heading,
            p.detail_label,
            p.detail_body,
            p.tracker_done,
            p.tracker_pending,
            p.tracker_gauge,
            p.status_bar,
            p.panel_border,
            p.notice,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}
