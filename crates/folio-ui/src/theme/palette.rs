use folio_engine::paint::Color;

use super::ResolvedTheme;

/// Colors for the theme toggle pill.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TogglePalette {
    pub track: Color,
    pub track_border: Color,
    pub active_background: Color,
    pub active_icon: Color,
    pub inactive_icon: Color,
    pub hover_background: Color,
}

/// Page-level colors for one resolved theme.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub toggle: TogglePalette,
}

impl Palette {
    pub fn for_theme(theme: ResolvedTheme) -> Self {
        let gray_400 = Color::from_hex(0x9ca3af, 1.0);
        match theme {
            ResolvedTheme::Light => Palette {
                background: Color::WHITE,
                foreground: Color::from_hex(0x020617, 1.0),
                toggle: TogglePalette {
                    track: Color::BLACK.with_opacity(0.4),
                    track_border: Color::WHITE.with_opacity(0.1),
                    active_background: Color::WHITE,
                    active_icon: Color::BLACK,
                    inactive_icon: gray_400,
                    hover_background: Color::WHITE.with_opacity(0.1),
                },
            },
            ResolvedTheme::Dark => Palette {
                background: Color::from_hex(0x09090b, 1.0),
                foreground: Color::WHITE,
                toggle: TogglePalette {
                    track: Color::WHITE.with_opacity(0.1),
                    track_border: Color::WHITE.with_opacity(0.2),
                    active_background: Color::BLACK,
                    active_icon: Color::WHITE,
                    inactive_icon: gray_400,
                    hover_background: Color::WHITE.with_opacity(0.2),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_colors_invert_between_themes() {
        let light = Palette::for_theme(ResolvedTheme::Light).toggle;
        let dark = Palette::for_theme(ResolvedTheme::Dark).toggle;
        assert_eq!(light.active_background, dark.active_icon);
        assert_eq!(light.active_icon, dark.active_background);
        assert_eq!(light.inactive_icon, dark.inactive_icon);
    }
}
