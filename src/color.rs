use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A theme color as written in config: either an ANSI-256 index or an RGB
/// triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Ansi256(u8),
    Rgb { r: u8, g: u8, b: u8 },
}

/// What the terminal can actually display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    #[default]
    TrueColor,
    Color256,
    Ansi16,
}

#[derive(Debug, Error)]
#[error("invalid color value for field \"{field}\": \"{value}\"")]
pub struct ColorParseError {
    pub field: String,
    pub value: String,
}

impl Color {
    /// Parse a color string, with a field name for error reporting.
    ///
    /// Accepts `"0"` through `"255"` (ANSI-256 index) and `"#RRGGBB"` /
    /// `"#RGB"` hex forms.
    pub fn parse(s: &str, field: &str) -> Result<Self, ColorParseError> {
        let make_err = || ColorParseError {
            field: field.to_owned(),
            value: s.to_owned(),
        };

        if let Some(hex) = s.strip_prefix('#') {
            let wide = |pos: usize| u8::from_str_radix(&hex[2 * pos..2 * pos + 2], 16);
            let narrow = |pos: usize| u8::from_str_radix(&hex[pos..=pos], 16).map(|v| v * 17);
            match hex.len() {
                6 => Ok(Color::Rgb {
                    r: wide(0).map_err(|_| make_err())?,
                    g: wide(1).map_err(|_| make_err())?,
                    b: wide(2).map_err(|_| make_err())?,
                }),
                3 => Ok(Color::Rgb {
                    r: narrow(0).map_err(|_| make_err())?,
                    g: narrow(1).map_err(|_| make_err())?,
                    b: narrow(2).map_err(|_| make_err())?,
                }),
                _ => Err(make_err()),
            }
        } else {
            let n: u16 = s.parse().map_err(|_| make_err())?;
            u8::try_from(n).map(Color::Ansi256).map_err(|_| make_err())
        }
    }

    /// Convert to a `crossterm::style::Color` for the given depth.
    ///
    /// ANSI indices 0-15 always go through crossterm's named variants so the
    /// terminal applies its user-configured 16-color palette rather than the
    /// fixed 256-color one.
    pub fn to_crossterm_color(self, depth: ColorDepth) -> crossterm::style::Color {
        match (depth, self) {
            (ColorDepth::TrueColor, Color::Rgb { r, g, b }) => {
                crossterm::style::Color::Rgb { r, g, b }
            }
            (ColorDepth::Color256, Color::Rgb { r, g, b }) => {
                crossterm::style::Color::AnsiValue(nearest_ansi256(r, g, b))
            }
            (ColorDepth::Ansi16, Color::Rgb { r, g, b }) => {
                named_ansi(nearest_ansi16(r, g, b))
            }
            (ColorDepth::Ansi16, Color::Ansi256(n)) if n > 15 => {
                let (r, g, b) = ansi256_to_rgb(n);
                named_ansi(nearest_ansi16(r, g, b))
            }
            (_, Color::Ansi256(n)) => named_ansi(n),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Ansi256(n) => write!(f, "{n}"),
            Color::Rgb { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s, "<unknown>")
    }
}

/// Config colors are written as strings (`"245"`, `"#c0caf5"`).
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::Deserialize;
        let s = String::deserialize(deserializer)?;
        Color::parse(&s, "<theme>").map_err(serde::de::Error::custom)
    }
}

impl ColorDepth {
    /// Detect terminal color depth from environment variables.
    pub fn detect() -> Self {
        if let Ok(ct) = std::env::var("COLORTERM")
            && (ct == "truecolor" || ct == "24bit")
        {
            return ColorDepth::TrueColor;
        }
        if let Ok(term) = std::env::var("TERM")
            && term.contains("256color")
        {
            return ColorDepth::Color256;
        }
        ColorDepth::Ansi16
    }
}

/// The 16 standard colors by index, as crossterm named variants. Terminals
/// render these through their user-configured palette.
const NAMED_16: [crossterm::style::Color; 16] = {
    use crossterm::style::Color::*;
    [
        Black, DarkRed, DarkGreen, DarkYellow, DarkBlue, DarkMagenta, DarkCyan, Grey, DarkGrey,
        Red, Green, Yellow, Blue, Magenta, Cyan, White,
    ]
};

/// Canonical RGB of the 16 standard colors (used only for approximation).
const NAMED_16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (128, 0, 0),
    (0, 128, 0),
    (128, 128, 0),
    (0, 0, 128),
    (128, 0, 128),
    (0, 128, 128),
    (192, 192, 192),
    (128, 128, 128),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (0, 0, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// Map an ANSI index to a crossterm `Color`, using named variants for 0-15.
fn named_ansi(n: u8) -> crossterm::style::Color {
    NAMED_16
        .get(usize::from(n))
        .copied()
        .unwrap_or(crossterm::style::Color::AnsiValue(n))
}

/// Approximate RGB for an ANSI-256 index.
fn ansi256_to_rgb(n: u8) -> (u8, u8, u8) {
    match n {
        0..=15 => NAMED_16_RGB[usize::from(n)],
        // 6x6x6 cube.
        16..=231 => {
            let idx = n - 16;
            let level = |i: u8| if i == 0 { 0 } else { 55 + 40 * i };
            (level(idx / 36), level((idx / 6) % 6), level(idx % 6))
        }
        // Grayscale ramp.
        232..=255 => {
            let v = 8 + 10 * (n - 232);
            (v, v, v)
        }
    }
}

/// Nearest ANSI-256 index (cube or grayscale ramp) for an RGB triple.
fn nearest_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        #[allow(clippy::cast_possible_truncation)]
        return 232 + ((u16::from(r) - 8) / 10).min(23) as u8;
    }
    let step = |v: u8| -> u8 {
        if v < 48 {
            0
        } else if v < 115 {
            1
        } else {
            #[allow(clippy::cast_possible_truncation)]
            {
                ((u16::from(v) - 35) / 40).min(5) as u8
            }
        }
    };
    16 + 36 * step(r) + 6 * step(g) + step(b)
}

/// Nearest of the 16 standard colors for an RGB triple.
fn nearest_ansi16(r: u8, g: u8, b: u8) -> u8 {
    let base: u8 = match (r > 128, g > 128, b > 128) {
        (false, false, false) => 0,
        (true, false, false) => 1,
        (false, true, false) => 2,
        (true, true, false) => 3,
        (false, false, true) => 4,
        (true, false, true) => 5,
        (false, true, true) => 6,
        (true, true, true) => 7,
    };
    let brightness = (u16::from(r) + u16::from(g) + u16::from(b)) / 3;
    if brightness > 128 { base + 8 } else { base }
}
