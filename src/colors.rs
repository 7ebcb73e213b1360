use crossterm::style::Color;

/// Color identifiers used by the simulation and overlay.
/// The terminal backend resolves them to real colors via `term_color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FireColor {
    Black,
    Red,
    Orange,
    Yellow,
    White,
    Blue,
    Cyan,
    Magenta,
    Green,
    UiBorder,
    UiText,
    UiHighlight,
    UiWarning,
    UiSuccess,
}

/// Colors cycled through by the rainbow scheme, in order
const RAINBOW: [FireColor; 6] = [
    FireColor::Red,
    FireColor::Orange,
    FireColor::Yellow,
    FireColor::White,
    FireColor::Blue,
    FireColor::Cyan,
];

impl FireColor {
    /// Terminal color and bold flag for this identifier
    pub fn term_color(self) -> (Color, bool) {
        match self {
            FireColor::Black => (Color::Black, false),
            FireColor::Red => (Color::Red, false),
            FireColor::Orange => (Color::DarkYellow, false), // Closest to orange
            FireColor::Yellow => (Color::Yellow, true),
            FireColor::White => (Color::White, true),
            FireColor::Blue => (Color::Blue, false),
            FireColor::Cyan => (Color::Cyan, false),
            FireColor::Magenta => (Color::Magenta, false),
            FireColor::Green => (Color::Green, false),
            FireColor::UiBorder => (Color::Cyan, false),
            FireColor::UiText => (Color::White, false),
            FireColor::UiHighlight => (Color::Yellow, true),
            FireColor::UiWarning => (Color::Red, true),
            FireColor::UiSuccess => (Color::Green, true),
        }
    }
}

/// Selectable heat-to-color palettes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Classic,
    Blue,
    Ice,
    Plasma,
    Rainbow,
    Matrix,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 6] = [
        ColorScheme::Classic,
        ColorScheme::Blue,
        ColorScheme::Ice,
        ColorScheme::Plasma,
        ColorScheme::Rainbow,
        ColorScheme::Matrix,
    ];

    /// The scheme after this one, wrapping back to classic
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Human-readable name for the control panel
    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Classic => "Classic Fire",
            ColorScheme::Blue => "Blue Flame",
            ColorScheme::Ice => "Ice Fire",
            ColorScheme::Plasma => "Plasma",
            ColorScheme::Rainbow => "Rainbow",
            ColorScheme::Matrix => "Matrix",
        }
    }

    /// Parse a scheme from a command-line or settings value
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "classic" | "fire" | "classic-fire" => Some(ColorScheme::Classic),
            "blue" | "blue-flame" => Some(ColorScheme::Blue),
            "ice" | "ice-fire" => Some(ColorScheme::Ice),
            "plasma" => Some(ColorScheme::Plasma),
            "rainbow" => Some(ColorScheme::Rainbow),
            "matrix" => Some(ColorScheme::Matrix),
            _ => None,
        }
    }

    /// Color shown for heat at the very top of the range
    fn hottest(self) -> FireColor {
        match self {
            ColorScheme::Classic => FireColor::White,
            ColorScheme::Blue => FireColor::Cyan,
            ColorScheme::Ice => FireColor::White,
            ColorScheme::Plasma => FireColor::Magenta,
            ColorScheme::Rainbow => FireColor::Yellow,
            ColorScheme::Matrix => FireColor::Green,
        }
    }
}

/// Glyph for a heat value (0-100)
pub fn glyph_for(heat: i32) -> char {
    match heat {
        h if h <= 0 => ' ', // No fire
        h if h < 15 => '.', // Embers
        h if h < 30 => '░',
        h if h < 50 => '▒',
        h if h < 70 => '▓',
        h if h < 90 => '█',
        _ => '#', // Core heat
    }
}

/// Color for a heat value under the given scheme
pub fn color_for(heat: i32, scheme: ColorScheme) -> FireColor {
    if heat <= 0 {
        return FireColor::Black;
    }
    if heat >= 100 {
        return scheme.hottest();
    }

    match scheme {
        ColorScheme::Classic => match heat {
            h if h < 20 => FireColor::Red,
            h if h < 40 => FireColor::Orange,
            h if h < 70 => FireColor::Yellow,
            _ => FireColor::White,
        },
        ColorScheme::Blue => match heat {
            h if h < 30 => FireColor::Blue,
            h if h < 60 => FireColor::Cyan,
            _ => FireColor::White,
        },
        ColorScheme::Ice => match heat {
            h if h < 25 => FireColor::Cyan,
            h if h < 50 => FireColor::White,
            _ => FireColor::Yellow,
        },
        ColorScheme::Plasma => match heat {
            h if h < 30 => FireColor::Magenta,
            h if h < 60 => FireColor::Cyan,
            _ => FireColor::White,
        },
        ColorScheme::Rainbow => RAINBOW[(heat / 15) as usize % RAINBOW.len()],
        ColorScheme::Matrix => {
            if heat < 40 {
                FireColor::Green
            } else {
                FireColor::Yellow
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_band_edges() {
        assert_eq!(glyph_for(0), ' ');
        assert_eq!(glyph_for(-5), ' ');
        assert_eq!(glyph_for(1), '.');
        assert_eq!(glyph_for(14), '.');
        assert_eq!(glyph_for(15), '░');
        assert_eq!(glyph_for(29), '░');
        assert_eq!(glyph_for(30), '▒');
        assert_eq!(glyph_for(50), '▓');
        assert_eq!(glyph_for(70), '█');
        assert_eq!(glyph_for(89), '█');
        assert_eq!(glyph_for(90), '#');
        assert_eq!(glyph_for(100), '#');
    }

    #[test]
    fn cold_is_background_in_every_scheme() {
        for scheme in ColorScheme::ALL {
            assert_eq!(color_for(0, scheme), FireColor::Black);
        }
    }

    #[test]
    fn classic_bands() {
        let s = ColorScheme::Classic;
        assert_eq!(color_for(19, s), FireColor::Red);
        assert_eq!(color_for(20, s), FireColor::Orange);
        assert_eq!(color_for(39, s), FireColor::Orange);
        assert_eq!(color_for(40, s), FireColor::Yellow);
        assert_eq!(color_for(69, s), FireColor::Yellow);
        assert_eq!(color_for(70, s), FireColor::White);
        assert_eq!(color_for(100, s), FireColor::White);
    }

    #[test]
    fn blue_ice_plasma_bands() {
        assert_eq!(color_for(29, ColorScheme::Blue), FireColor::Blue);
        assert_eq!(color_for(30, ColorScheme::Blue), FireColor::Cyan);
        assert_eq!(color_for(60, ColorScheme::Blue), FireColor::White);
        assert_eq!(color_for(100, ColorScheme::Blue), FireColor::Cyan);

        assert_eq!(color_for(24, ColorScheme::Ice), FireColor::Cyan);
        assert_eq!(color_for(25, ColorScheme::Ice), FireColor::White);
        assert_eq!(color_for(50, ColorScheme::Ice), FireColor::Yellow);
        assert_eq!(color_for(100, ColorScheme::Ice), FireColor::White);

        assert_eq!(color_for(29, ColorScheme::Plasma), FireColor::Magenta);
        assert_eq!(color_for(59, ColorScheme::Plasma), FireColor::Cyan);
        assert_eq!(color_for(60, ColorScheme::Plasma), FireColor::White);
        assert_eq!(color_for(100, ColorScheme::Plasma), FireColor::Magenta);
    }

    #[test]
    fn rainbow_cycles_every_fifteen() {
        let s = ColorScheme::Rainbow;
        assert_eq!(color_for(1, s), FireColor::Red);
        assert_eq!(color_for(15, s), FireColor::Orange);
        assert_eq!(color_for(45, s), FireColor::White);
        assert_eq!(color_for(75, s), FireColor::Cyan);
        assert_eq!(color_for(90, s), FireColor::Red);
        assert_eq!(color_for(100, s), FireColor::Yellow);
    }

    #[test]
    fn matrix_threshold() {
        assert_eq!(color_for(39, ColorScheme::Matrix), FireColor::Green);
        assert_eq!(color_for(40, ColorScheme::Matrix), FireColor::Yellow);
        assert_eq!(color_for(100, ColorScheme::Matrix), FireColor::Green);
    }

    #[test]
    fn scheme_cycle_wraps() {
        let mut s = ColorScheme::Classic;
        for _ in 0..ColorScheme::ALL.len() {
            s = s.next();
        }
        assert_eq!(s, ColorScheme::Classic);
        assert_eq!(ColorScheme::Rainbow.next(), ColorScheme::Matrix);
        assert_eq!(ColorScheme::Matrix.next(), ColorScheme::Classic);
    }

    #[test]
    fn scheme_names_parse() {
        assert_eq!(ColorScheme::from_name("Plasma"), Some(ColorScheme::Plasma));
        assert_eq!(ColorScheme::from_name("ice"), Some(ColorScheme::Ice));
        assert_eq!(ColorScheme::from_name("lava"), None);
    }
}
