use std::fmt::Debug;

use fortune_types::CacheStatus;
use ratatui::style::{Color, Modifier, Style};

/// Semantic color roles used throughout the UI.
#[derive(Debug, Clone)]
pub struct ThemeRoles {
    pub background: Color,
    pub surface: Color,
    pub surface_muted: Color,
    pub border: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub accent_primary: Color,
    pub accent_secondary: Color,

    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub selection_bg: Color,
    pub selection_fg: Color,
    pub focus: Color,

    /// Paper the revealed fortune is printed on.
    pub fortune_paper: Color,
    /// Ink used for the fortune text on `fortune_paper`.
    pub fortune_ink: Color,

    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,
}

/// Theme trait exposes semantic roles and common style builders.
pub trait Theme: Send + Sync + Debug {
    fn roles(&self) -> &ThemeRoles;

    // Text styles
    fn text_primary_style(&self) -> Style {
        Style::default().fg(self.roles().text)
    }
    fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles().text_secondary)
    }
    fn text_muted_style(&self) -> Style {
        Style::default().fg(self.roles().text_muted)
    }

    // Borders and focus
    fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles().focus } else { self.roles().border };
        Style::default().fg(color)
    }
    fn error_border_style(&self) -> Style {
        Style::default().fg(self.roles().error)
    }

    fn selection_style(&self) -> Style {
        Style::default().fg(self.roles().selection_fg).bg(self.roles().selection_bg)
    }

    // Status styles
    fn status_success(&self) -> Style {
        Style::default().fg(self.roles().success)
    }
    fn status_warning(&self) -> Style {
        Style::default().fg(self.roles().warning)
    }
    fn status_error(&self) -> Style {
        Style::default().fg(self.roles().error)
    }

    // Accents
    fn accent_primary_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary)
    }
    fn accent_emphasis_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary).add_modifier(Modifier::BOLD)
    }

    /// Printed fortune slip.
    fn fortune_paper_style(&self) -> Style {
        Style::default().bg(self.roles().fortune_paper).fg(self.roles().fortune_ink)
    }

    /// Chip showing how the cache classified the last request.
    fn cache_chip_style(&self, status: CacheStatus) -> Style {
        let color = match status {
            CacheStatus::Hit => self.roles().success,
            CacheStatus::Miss => self.roles().warning,
            CacheStatus::NotAvailable => self.roles().text_muted,
        };
        Style::default().fg(self.roles().background).bg(color).add_modifier(Modifier::BOLD)
    }

    /// Carousel cell `offset` positions away from the current value.
    fn carousel_style(&self, offset: i64) -> Style {
        match offset.unsigned_abs() {
            0 => self.accent_emphasis_style(),
            1 => self.text_primary_style(),
            _ => self.text_muted_style(),
        }
    }
}
