use crate::config::model::PulseConfig;
use crate::foundation::core::Color;
use crate::foundation::error::{PulsatorError, PulsatorResult};

const NAMED: &[(&str, Color)] = &[
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("darkgray", Color::rgb(0x44, 0x44, 0x44)),
    ("darkgrey", Color::rgb(0x44, 0x44, 0x44)),
    ("gray", Color::rgb(0x88, 0x88, 0x88)),
    ("grey", Color::rgb(0x88, 0x88, 0x88)),
    ("lightgray", Color::rgb(0xCC, 0xCC, 0xCC)),
    ("lightgrey", Color::rgb(0xCC, 0xCC, 0xCC)),
    ("white", Color::rgb(0xFF, 0xFF, 0xFF)),
    ("red", Color::rgb(0xFF, 0x00, 0x00)),
    ("green", Color::rgb(0x00, 0xFF, 0x00)),
    ("blue", Color::rgb(0x00, 0x00, 0xFF)),
    ("yellow", Color::rgb(0xFF, 0xFF, 0x00)),
    ("cyan", Color::rgb(0x00, 0xFF, 0xFF)),
    ("magenta", Color::rgb(0xFF, 0x00, 0xFF)),
    ("aqua", Color::rgb(0x00, 0xFF, 0xFF)),
    ("fuchsia", Color::rgb(0xFF, 0x00, 0xFF)),
    ("lime", Color::rgb(0x00, 0xFF, 0x00)),
    ("maroon", Color::rgb(0x80, 0x00, 0x00)),
    ("navy", Color::rgb(0x00, 0x00, 0x80)),
    ("olive", Color::rgb(0x80, 0x80, 0x00)),
    ("purple", Color::rgb(0x80, 0x00, 0x80)),
    ("silver", Color::rgb(0xC0, 0xC0, 0xC0)),
    ("teal", Color::rgb(0x00, 0x80, 0x80)),
];

/// Parse a color string: `#RRGGBB`, `#AARRGGBB` or a color name (case-insensitive).
pub fn parse_color(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let Some(hex) = s.strip_prefix('#') else {
        let lower = s.to_ascii_lowercase();
        return NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, c)| *c)
            .ok_or_else(|| format!("unknown color \"{s}\""));
    };

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !hex.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }
    match hex.len() {
        6 => Ok(Color::rgb(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        )),
        8 => Ok(Color::argb(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            hex_byte(&hex[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #AARRGGBB (case-insensitive)".to_owned()),
    }
}

/// Ring colors of one configuration snapshot, with the palette decoded up front.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorResolver {
    base: Color,
    palette: Vec<Color>,
}

impl ColorResolver {
    /// Decode the palette of `cfg`; a malformed entry is a configuration error.
    pub fn new(cfg: &PulseConfig) -> PulsatorResult<Self> {
        let palette = cfg
            .palette
            .iter()
            .enumerate()
            .map(|(i, s)| {
                parse_color(s).map_err(|e| {
                    PulsatorError::configuration(format!("palette entry {i}: {e}"))
                })
            })
            .collect::<PulsatorResult<Vec<_>>>()?;
        Ok(Self {
            base: cfg.color,
            palette,
        })
    }

    /// Color of the ring created at `index`.
    pub fn color_for(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return self.base;
        }
        self.palette[index % self.palette.len()]
    }

    /// Return `true` when rings follow the base color rather than a palette.
    pub fn uses_base_color(&self) -> bool {
        self.palette.is_empty()
    }
}

/// Color of the ring created at `index` under `cfg`.
pub fn color_for(index: usize, cfg: &PulseConfig) -> PulsatorResult<Color> {
    Ok(ColorResolver::new(cfg)?.color_for(index))
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
