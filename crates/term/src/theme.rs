//! Colour themes.
//!
//! Themes are declared as hex strings and resolved to [`Rgb`] once, when a
//! theme is selected. Unknown theme ids resolve to the default theme, and a
//! colour that fails to parse resolves to [`NEUTRAL`]; both are reported on
//! stderr.

use crate::fb::Rgb;
use crate::types::PieceKind;

/// Fallback for missing or malformed colours
pub const NEUTRAL: Rgb = Rgb::new(0x55, 0x55, 0x55);

pub const DEFAULT_THEME_ID: &str = "classicDark";

/// Declarative theme entry
#[derive(Debug, Clone, Copy)]
pub struct ThemeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub board_bg: &'static str,
    pub grid: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub body_bg: &'static str,
    /// Ghost fill as (hex colour, opacity) over the board background
    pub ghost: (&'static str, f32),
    /// Piece colours in `PieceKind::ALL` order
    pub pieces: [&'static str; 7],
}

pub const THEMES: [ThemeDef; 10] = [
    ThemeDef {
        id: "classicDark",
        name: "Classic Dark",
        board_bg: "#0f172a",
        grid: "#334155",
        border: "#475569",
        text: "#e2e8f0",
        accent: "#f59e0b",
        body_bg: "#1e293b",
        ghost: ("#e2e8f0", 0.25),
        pieces: ["#06b6d4", "#facc15", "#8b5cf6", "#22c55e", "#ef4444", "#3b82f6", "#f97316"],
    },
    ThemeDef {
        id: "neonPulse",
        name: "Neon Pulse",
        board_bg: "#050505",
        grid: "#222222",
        border: "#00ffff",
        text: "#f0f0f0",
        accent: "#ff00ff",
        body_bg: "#0d0d0d",
        ghost: ("#c8c8ff", 0.25),
        pieces: ["#00ffff", "#ffff00", "#ff00ff", "#00ff00", "#ff3300", "#3333ff", "#ff9900"],
    },
    ThemeDef {
        id: "arcticLight",
        name: "Arctic Light",
        board_bg: "#cbd5e1",
        grid: "#a8b2c2",
        border: "#94a3b8",
        text: "#2c3e50",
        accent: "#3b82f6",
        body_bg: "#e0e7ff",
        ghost: ("#2c3e50", 0.2),
        pieces: ["#60a5fa", "#a7f3d0", "#c4b5fd", "#5eead4", "#f9a8d4", "#93c5fd", "#fdba74"],
    },
    ThemeDef {
        id: "retroWave",
        name: "Retro Wave",
        board_bg: "#18112c",
        grid: "#4f3a6f",
        border: "#00f5d4",
        text: "#f3ccff",
        accent: "#ff37a6",
        body_bg: "#231942",
        ghost: ("#00f5d4", 0.2),
        pieces: ["#00f5d4", "#f7f558", "#a049f0", "#44f088", "#f04455", "#4990f0", "#f08833"],
    },
    ThemeDef {
        id: "forestCalm",
        name: "Forest Calm",
        board_bg: "#203025",
        grid: "#415849",
        border: "#5a7052",
        text: "#e0eedd",
        accent: "#d4a276",
        body_bg: "#31473a",
        ghost: ("#e0eedd", 0.3),
        pieces: ["#a8dadc", "#f1faee", "#e63946", "#a1c181", "#f28482", "#588157", "#f7b267"],
    },
    ThemeDef {
        id: "charmingPink",
        name: "Charming Pink",
        board_bg: "#581c37",
        grid: "#831843",
        border: "#9d174d",
        text: "#fce7f3",
        accent: "#ec4899",
        body_bg: "#4a2c3a",
        ghost: ("#fce7f3", 0.3),
        pieces: ["#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777", "#be185d", "#9d174d"],
    },
    ThemeDef {
        id: "sanrio",
        name: "Sanrio",
        board_bg: "#fff5f7",
        grid: "#ffe4e1",
        border: "#ffc0cb",
        text: "#735260",
        accent: "#ffadc6",
        body_bg: "#fff0f5",
        ghost: ("#bbbbcd", 0.3),
        pieces: ["#89cff0", "#fff79a", "#ffb3de", "#b2f2bb", "#f7c08c", "#c7b9ff", "#ffd1dc"],
    },
    ThemeDef {
        id: "kafkaHSR",
        name: "Kafka",
        board_bg: "#201a28",
        grid: "#403548",
        border: "#e60073",
        text: "#e8e0f0",
        accent: "#e60073",
        body_bg: "#1a141f",
        ghost: ("#e6c8ff", 0.25),
        pieces: ["#8a2be2", "#e60073", "#4b0082", "#c71585", "#9932cc", "#6a0dad", "#dcb4ea"],
    },
    ThemeDef {
        id: "topazHSR",
        name: "Topaz & Numby",
        board_bg: "#f5efea",
        grid: "#e0d5cb",
        border: "#daa520",
        text: "#5c3a3a",
        accent: "#daa520",
        body_bg: "#fdfbf5",
        ghost: ("#daa520", 0.25),
        pieces: ["#ffffff", "#ffd700", "#dc143c", "#e74c3c", "#f0e68c", "#b22222", "#fffacd"],
    },
    ThemeDef {
        id: "march7thHSR",
        name: "March 7th",
        board_bg: "#f0faff",
        grid: "#cde8f3",
        border: "#a0d2eb",
        text: "#3d5a80",
        accent: "#ff8fab",
        body_bg: "#e0f2f7",
        ghost: ("#add8e6", 0.3),
        pieces: ["#89cff0", "#ffd1dc", "#ff8fab", "#b0e0e6", "#f0a6ca", "#add8e6", "#ffffff"],
    },
];

/// A resolved theme, ready for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub board_bg: Rgb,
    pub grid: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub accent: Rgb,
    pub body_bg: Rgb,
    pub ghost: Rgb,
    pieces: [Rgb; 7],
}

fn resolve_color(theme: &str, what: &str, hex: &str) -> Rgb {
    match Rgb::from_hex(hex) {
        Some(rgb) => rgb,
        None => {
            eprintln!(
                "[Theme] invalid colour {:?} for {} in theme {}, using neutral",
                hex, what, theme
            );
            NEUTRAL
        }
    }
}

impl Theme {
    pub fn from_def(def: &ThemeDef) -> Self {
        let c = |what: &str, hex: &str| resolve_color(def.id, what, hex);
        let board_bg = c("board", def.board_bg);
        let ghost = c("ghost", def.ghost.0).blend_over(board_bg, def.ghost.1);

        let mut pieces = [NEUTRAL; 7];
        for kind in PieceKind::ALL {
            pieces[kind.index()] = c(kind.as_str(), def.pieces[kind.index()]);
        }

        Self {
            id: def.id,
            name: def.name,
            board_bg,
            grid: c("grid", def.grid),
            border: c("border", def.border),
            text: c("text", def.text),
            accent: c("accent", def.accent),
            body_bg: c("background", def.body_bg),
            ghost,
            pieces,
        }
    }

    /// Theme by id, or the default theme with a warning
    pub fn lookup(id: &str) -> Self {
        match THEMES.iter().find(|t| t.id == id) {
            Some(def) => Self::from_def(def),
            None => {
                eprintln!("[Theme] theme {:?} not found, using {}", id, DEFAULT_THEME_ID);
                Self::default()
            }
        }
    }

    /// The theme after this one, wrapping around
    pub fn next(&self) -> Self {
        let pos = THEMES.iter().position(|t| t.id == self.id).unwrap_or(0);
        Self::from_def(&THEMES[(pos + 1) % THEMES.len()])
    }

    pub fn piece_color(&self, kind: PieceKind) -> Rgb {
        self.pieces[kind.index()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_def(&THEMES[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic_dark() {
        let theme = Theme::default();
        assert_eq!(theme.id, DEFAULT_THEME_ID);
        assert_eq!(theme.piece_color(PieceKind::I), Rgb::new(0x06, 0xb6, 0xd4));
        assert_eq!(theme.board_bg, Rgb::new(0x0f, 0x17, 0x2a));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        assert_eq!(Theme::lookup("nope").id, DEFAULT_THEME_ID);
        assert_eq!(Theme::lookup("sanrio").name, "Sanrio");
    }

    #[test]
    fn test_bad_colour_resolves_to_neutral() {
        let mut def = THEMES[1];
        def.pieces[PieceKind::Z.index()] = "not-a-colour";
        let theme = Theme::from_def(&def);
        assert_eq!(theme.piece_color(PieceKind::Z), NEUTRAL);
        assert_eq!(theme.piece_color(PieceKind::S), Rgb::new(0, 0xff, 0));
    }

    #[test]
    fn test_cycle_visits_all_themes() {
        let mut theme = Theme::default();
        for _ in 0..THEMES.len() {
            theme = theme.next();
        }
        assert_eq!(theme.id, DEFAULT_THEME_ID);
        for def in THEMES.iter() {
            let resolved = Theme::from_def(def);
            for kind in PieceKind::ALL {
                assert_ne!(resolved.piece_color(kind), NEUTRAL, "{} {:?}", def.id, kind);
            }
        }
    }
}
