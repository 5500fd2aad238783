use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;

use crate::tiling::SplitSide;

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Theme {
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub disabled: Color,
    pub dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Yellow,
            disabled: Color::Indexed(8),
            dim: Color::DarkGray,
        }
    }
}

// ---------------------------------------------------------------------------
// Viewer
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Viewer {
    /// Which half splits first when two panes are open.
    pub split_side: SplitSide,
    pub sidebar_width: u16,
    /// Show the slot name (F, HL, TR, ...) in each pane title.
    pub show_slot_labels: bool,
}

impl Default for Viewer {
    fn default() -> Self {
        Self {
            split_side: SplitSide::Left,
            sidebar_width: 28,
            show_slot_labels: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub theme: Theme,
    pub viewer: Viewer,
    /// Catalog JSON replacing the built-in maps.
    pub catalog: Option<PathBuf>,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("planview").join("config.toml"))
        .unwrap_or_default()
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Missing file means defaults; an unparsable one is reported and ignored.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };

        match toml::from_str::<RawConfig>(&content) {
            Ok(raw) => Self::from_raw(raw),
            Err(e) => {
                eprintln!("planview: invalid config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn from_raw(raw: RawConfig) -> Self {
        let mut config = Self::default();

        if let Some(t) = raw.theme {
            let theme = &mut config.theme;
            for (value, slot) in [
                (t.accent, &mut theme.accent),
                (t.border, &mut theme.border),
                (t.border_focused, &mut theme.border_focused),
                (t.disabled, &mut theme.disabled),
                (t.dim, &mut theme.dim),
            ] {
                if let Some(c) = value.as_deref().and_then(parse_color) {
                    *slot = c;
                }
            }
        }

        if let Some(side) = raw.split_side.as_deref().and_then(parse_split_side) {
            config.viewer.split_side = side;
        }
        if let Some(w) = raw.sidebar_width {
            config.viewer.sidebar_width = w.max(12);
        }
        if let Some(v) = raw.show_slot_labels {
            config.viewer.show_slot_labels = v;
        }

        config.catalog = raw.catalog.map(PathBuf::from);
        config.log_filter = raw.log_filter;
        config
    }
}

fn parse_split_side(s: &str) -> Option<SplitSide> {
    match s.trim().to_lowercase().as_str() {
        "left" => Some(SplitSide::Left),
        "right" => Some(SplitSide::Right),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Raw TOML structs (all-optional for merge)
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default)]
struct RawConfig {
    catalog: Option<String>,
    split_side: Option<String>,
    sidebar_width: Option<u16>,
    show_slot_labels: Option<bool>,
    log_filter: Option<String>,
    theme: Option<RawTheme>,
}

#[derive(Deserialize, Default)]
struct RawTheme {
    accent: Option<String>,
    border: Option<String>,
    border_focused: Option<String>,
    disabled: Option<String>,
    dim: Option<String>,
}

// ---------------------------------------------------------------------------
// parse_color: "cyan", "dark_gray", "#ff0000", "#f00", "reset"
// ---------------------------------------------------------------------------

pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    if let Some(hex) = s.strip_prefix('#') {
        let channel = |range: std::ops::Range<usize>, scale: u8| {
            u8::from_str_radix(hex.get(range)?, 16).ok().map(|v| v * scale)
        };
        return match hex.len() {
            6 => Some(Color::Rgb(channel(0..2, 1)?, channel(2..4, 1)?, channel(4..6, 1)?)),
            3 => Some(Color::Rgb(channel(0..1, 17)?, channel(1..2, 17)?, channel(2..3, 17)?)),
            _ => None,
        };
    }

    let name = s.replace(['_', ' '], "");
    let color = match name.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "white" => Color::White,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        _ => return None,
    };
    Some(color)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
