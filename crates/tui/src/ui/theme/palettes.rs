//! Concrete palettes mapped onto [`ThemeRoles`].
//!
//! Each palette is a plain `ThemeRoles` value wrapped in [`PaletteTheme`];
//! the catalog decides which one is active.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Dracula (https://draculatheme.com/contribute)
pub mod dracula {
    use ratatui::style::Color;

    pub const BG: Color = Color::Rgb(0x28, 0x2A, 0x36);
    pub const CURRENT_LINE: Color = Color::Rgb(0x44, 0x47, 0x5A);
    pub const FOREGROUND: Color = Color::Rgb(0xF8, 0xF8, 0xF2);
    pub const COMMENT: Color = Color::Rgb(0x62, 0x72, 0xA4);
    pub const CYAN: Color = Color::Rgb(0x8B, 0xE9, 0xFD);
    pub const GREEN: Color = Color::Rgb(0x50, 0xFA, 0x7B);
    pub const ORANGE: Color = Color::Rgb(0xFF, 0xB8, 0x6C);
    pub const PINK: Color = Color::Rgb(0xFF, 0x79, 0xC6);
    pub const RED: Color = Color::Rgb(0xFF, 0x55, 0x55);
    pub const YELLOW: Color = Color::Rgb(0xF1, 0xFA, 0x8C);
}

// Nord (https://www.nordtheme.com/docs/colors-and-palettes)
pub mod nord {
    use ratatui::style::Color;

    pub const POLAR_0: Color = Color::Rgb(0x2E, 0x34, 0x40);
    pub const POLAR_1: Color = Color::Rgb(0x3B, 0x42, 0x52);
    pub const POLAR_2: Color = Color::Rgb(0x43, 0x4C, 0x5E);
    pub const POLAR_3: Color = Color::Rgb(0x4C, 0x56, 0x6A);
    pub const SNOW_0: Color = Color::Rgb(0xD8, 0xDE, 0xE9);
    pub const SNOW_1: Color = Color::Rgb(0xE5, 0xE9, 0xF0);
    pub const SNOW_2: Color = Color::Rgb(0xEC, 0xEF, 0xF4);
    pub const FROST_1: Color = Color::Rgb(0x88, 0xC0, 0xD0);
    pub const FROST_3: Color = Color::Rgb(0x5E, 0x81, 0xAC);
    pub const MUTED: Color = Color::Rgb(0x61, 0x6E, 0x88);
    pub const RED: Color = Color::Rgb(0xBF, 0x61, 0x6A);
    pub const ORANGE: Color = Color::Rgb(0xD0, 0x87, 0x70);
    pub const YELLOW: Color = Color::Rgb(0xEB, 0xCB, 0x8B);
    pub const GREEN: Color = Color::Rgb(0xA3, 0xBE, 0x8C);
}

/// A theme backed by a fixed set of roles.
#[derive(Debug, Clone)]
pub struct PaletteTheme {
    roles: ThemeRoles,
}

impl PaletteTheme {
    pub fn new(roles: ThemeRoles) -> Self {
        Self { roles }
    }

    /// Default palette tuned for dark truecolor terminals.
    pub fn dracula() -> Self {
        use self::dracula::*;
        Self::new(ThemeRoles {
            background: BG,
            surface: BG,
            surface_muted: CURRENT_LINE,
            border: CURRENT_LINE,
            text: FOREGROUND,
            text_secondary: COMMENT,
            text_muted: COMMENT,
            accent_primary: PINK,
            accent_secondary: CYAN,
            info: CYAN,
            success: GREEN,
            warning: ORANGE,
            error: RED,
            selection_bg: CURRENT_LINE,
            selection_fg: FOREGROUND,
            focus: CYAN,
            fortune_paper: YELLOW,
            fortune_ink: BG,
            scrollbar_track: CURRENT_LINE,
            scrollbar_thumb: COMMENT,
        })
    }

    /// Polar blues with aurora status colors.
    pub fn nord() -> Self {
        use self::nord::*;
        Self::new(ThemeRoles {
            background: POLAR_0,
            surface: POLAR_1,
            surface_muted: POLAR_2,
            border: POLAR_3,
            text: SNOW_0,
            text_secondary: SNOW_1,
            text_muted: MUTED,
            accent_primary: FROST_1,
            accent_secondary: FROST_3,
            info: FROST_1,
            success: GREEN,
            warning: ORANGE,
            error: RED,
            selection_bg: FROST_3,
            selection_fg: SNOW_2,
            focus: FROST_1,
            fortune_paper: YELLOW,
            fortune_ink: POLAR_0,
            scrollbar_track: POLAR_2,
            scrollbar_thumb: POLAR_3,
        })
    }

    /// Indexed fallback for terminals without truecolor.
    pub fn ansi256() -> Self {
        Self::new(ThemeRoles {
            background: Color::Indexed(235),
            surface: Color::Indexed(235),
            surface_muted: Color::Indexed(238),
            border: Color::Indexed(240),
            text: Color::Indexed(255),
            text_secondary: Color::Indexed(250),
            text_muted: Color::Indexed(244),
            accent_primary: Color::Indexed(212),
            accent_secondary: Color::Indexed(117),
            info: Color::Indexed(117),
            success: Color::Indexed(114),
            warning: Color::Indexed(215),
            error: Color::Indexed(203),
            selection_bg: Color::Indexed(239),
            selection_fg: Color::Indexed(255),
            focus: Color::Indexed(117),
            fortune_paper: Color::Indexed(229),
            fortune_ink: Color::Indexed(235),
            scrollbar_track: Color::Indexed(238),
            scrollbar_thumb: Color::Indexed(244),
        })
    }
}

impl Theme for PaletteTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
