//! The fixed, read-only theme catalog.

use serde::Serialize;

/// A color scheme for the placeholder image. Colors are `#rrggbb` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub background_colors: [&'static str; 2],
    pub text_color: &'static str,
    pub accent_color: &'static str,
}

/// All themes, in display order. The first entry is the fallback.
pub static THEMES: [Theme; 4] = [
    Theme {
        id: "default",
        name: "Default",
        description: "Dark blue theme",
        background_colors: ["#1a1a2e", "#16213e"],
        text_color: "#eeeeee",
        accent_color: "#0f3460",
    },
    Theme {
        id: "ocean",
        name: "Ocean",
        description: "Cool blue waves",
        background_colors: ["#0077be", "#005f8c"],
        text_color: "#ffffff",
        accent_color: "#00d4ff",
    },
    Theme {
        id: "sunset",
        name: "Sunset",
        description: "Warm orange glow",
        background_colors: ["#ff6b6b", "#ee5a6f"],
        text_color: "#ffffff",
        accent_color: "#ffd93d",
    },
    Theme {
        id: "forest",
        name: "Forest",
        description: "Natural green",
        background_colors: ["#2d4a3e", "#1f3329"],
        text_color: "#e8f5e9",
        accent_color: "#66bb6a",
    },
];

/// Look up a theme by id, falling back to `default` on a miss.
pub fn get_theme(id: &str) -> &'static Theme {
    THEMES.iter().find(|t| t.id == id).unwrap_or(&THEMES[0])
}

pub fn available_themes() -> &'static [Theme] {
    &THEMES
}
