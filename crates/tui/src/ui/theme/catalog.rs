use super::{PaletteTheme, Theme};

/// Describes a selectable theme.
#[derive(Clone, Copy, Debug)]
pub struct ThemeDefinition {
    /// Canonical identifier used for persistence.
    pub id: &'static str,
    /// Human-friendly display name.
    pub label: &'static str,
    /// Alternate spellings accepted from `TUI_THEME`.
    pub aliases: &'static [&'static str],
    /// Whether the palette targets ANSI/8-bit terminals.
    pub is_ansi_fallback: bool,
    factory: fn() -> PaletteTheme,
}

impl ThemeDefinition {
    /// Instantiate the theme represented by this definition.
    pub fn build(&self) -> Box<dyn Theme> {
        Box::new((self.factory)())
    }
}

const DRACULA: ThemeDefinition = ThemeDefinition {
    id: "dracula",
    label: "Dracula",
    aliases: &["default", "dark"],
    is_ansi_fallback: false,
    factory: PaletteTheme::dracula,
};

const ANSI256: ThemeDefinition = ThemeDefinition {
    id: "ansi256",
    label: "ANSI 256",
    aliases: &["256", "basic"],
    is_ansi_fallback: true,
    factory: PaletteTheme::ansi256,
};

/// Ordered list of selectable themes.
pub const THEME_DEFINITIONS: &[ThemeDefinition] = &[
    DRACULA,
    ThemeDefinition {
        id: "nord",
        label: "Nord",
        aliases: &["polar"],
        is_ansi_fallback: false,
        factory: PaletteTheme::nord,
    },
    ANSI256,
];

/// Locate a definition by id or alias (case-insensitive).
pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    THEME_DEFINITIONS.iter().find(|definition| {
        definition.id.eq_ignore_ascii_case(name) || definition.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    })
}

/// Preferred default for truecolor terminals.
pub fn default_truecolor() -> &'static ThemeDefinition {
    &DRACULA
}

/// Preferred default for ANSI-only terminals.
pub fn default_ansi() -> &'static ThemeDefinition {
    &ANSI256
}
