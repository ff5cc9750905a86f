use std::path::Path;

use anyhow::Context as _;

use crate::animation::curve::Curve;
use crate::animation::track::RepeatMode;
use crate::config::defaults::DEFAULTS;
use crate::foundation::core::Color;
use crate::foundation::error::{PulsatorError, PulsatorResult};

/// Paint style of every ring, which also selects the timing policy of the schedule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintStyle {
    /// Filled discs pulsing concurrently with staggered starts.
    #[default]
    Fill,
    /// Outlined rings pulsing one after another.
    Stroke,
}

impl PaintStyle {
    /// Map a raw host selector (`0` fill, `1` stroke), falling back to `Fill`.
    pub fn from_raw(selector: i64) -> Self {
        match selector {
            1 => Self::Stroke,
            _ => Self::Fill,
        }
    }

    /// Map a style name, falling back to `Fill`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "stroke" => Self::Stroke,
            _ => Self::Fill,
        }
    }
}

impl<'de> serde::Deserialize<'de> for PaintStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Raw(i64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Name(name) => Self::from_name(&name),
            Repr::Raw(raw) => Self::from_raw(raw),
        })
    }
}

/// Immutable snapshot of every pulse parameter.
///
/// Construct with [`PulseConfig::default`], [`crate::PulseConfigBuilder`] or from JSON. Integer
/// parameters are unsigned here; negative values are rejected where they enter (builder, setters,
/// config files).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PulseConfigDef")]
pub struct PulseConfig {
    /// Number of rings.
    pub count: u32,
    /// Length of one pulse cycle in milliseconds.
    pub duration_ms: u32,
    /// Additional cycles, `0` meaning infinite.
    pub repeat_count: u32,
    /// Direction of repeated passes.
    pub repeat_mode: RepeatMode,
    /// When `false`, rings are fast-forwarded to mid-cycle on start.
    pub start_from_scratch: bool,
    /// Fill or stroke painting.
    pub style: PaintStyle,
    /// Stroke width in pixels, used by [`PaintStyle::Stroke`].
    pub stroke_width: f64,
    /// Scale at the start of a pass.
    pub min_scale: f64,
    /// Scale at the end of a pass.
    pub max_scale: f64,
    /// Opacity at the end of a pass.
    pub min_alpha: f64,
    /// Opacity at the start of a pass.
    pub max_alpha: f64,
    /// Arc start angle in degrees.
    pub start_angle: f64,
    /// Arc sweep in degrees.
    pub sweep_angle: f64,
    /// Radius reduction applied to every ring, in pixels.
    pub margin_px: f64,
    /// Base ring color, used when `palette` is empty.
    pub color: Color,
    /// Easing curve of every track.
    pub curve: Curve,
    /// Ordered ring colors in string form, cycled by ring index.
    pub palette: Vec<String>,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            count: DEFAULTS.count,
            duration_ms: DEFAULTS.duration_ms,
            repeat_count: DEFAULTS.repeat_count,
            repeat_mode: DEFAULTS.repeat_mode,
            start_from_scratch: DEFAULTS.start_from_scratch,
            style: DEFAULTS.style,
            stroke_width: DEFAULTS.stroke_width,
            min_scale: DEFAULTS.min_scale,
            max_scale: DEFAULTS.max_scale,
            min_alpha: DEFAULTS.min_alpha,
            max_alpha: DEFAULTS.max_alpha,
            start_angle: DEFAULTS.start_angle,
            sweep_angle: DEFAULTS.sweep_angle,
            margin_px: DEFAULTS.margin_px,
            color: DEFAULTS.color,
            curve: DEFAULTS.curve,
            palette: Vec::new(),
        }
    }
}

impl PulseConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(s: &str) -> PulsatorResult<Self> {
        let def: PulseConfigDef = serde_json::from_str(s)?;
        Self::try_from(def)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> PulsatorResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read pulse config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Validate the numeric parameters.
    ///
    /// Palette strings are decoded when a schedule is built, not here.
    pub fn validate(&self) -> PulsatorResult<()> {
        let reals = [
            ("stroke_width", self.stroke_width),
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("min_alpha", self.min_alpha),
            ("max_alpha", self.max_alpha),
            ("start_angle", self.start_angle),
            ("sweep_angle", self.sweep_angle),
            ("margin_px", self.margin_px),
        ];
        for (name, v) in reals {
            if !v.is_finite() {
                return Err(PulsatorError::configuration(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
        if self.stroke_width < 0.0 {
            return Err(PulsatorError::configuration(
                "stroke_width cannot be negative",
            ));
        }
        if self.margin_px < 0.0 {
            return Err(PulsatorError::configuration("margin_px cannot be negative"));
        }
        Ok(())
    }
}

/// Check a host-provided ring count.
pub(crate) fn checked_count(count: i64) -> PulsatorResult<u32> {
    if count < 0 {
        return Err(PulsatorError::configuration("count cannot be negative"));
    }
    u32::try_from(count)
        .map_err(|_| PulsatorError::configuration(format!("count {count} is out of range")))
}

/// Check a host-provided pulse duration.
pub(crate) fn checked_duration(millis: i64) -> PulsatorResult<u32> {
    if millis < 0 {
        return Err(PulsatorError::configuration("duration cannot be negative"));
    }
    u32::try_from(millis)
        .map_err(|_| PulsatorError::configuration(format!("duration {millis} is out of range")))
}

/// Check a host-provided repeat count.
pub(crate) fn checked_repeat_count(repeat: i64) -> PulsatorResult<u32> {
    if repeat < 0 {
        return Err(PulsatorError::configuration(
            "repeat count cannot be negative",
        ));
    }
    u32::try_from(repeat)
        .map_err(|_| PulsatorError::configuration(format!("repeat count {repeat} is out of range")))
}

/// Config-file representation with signed integers, checked on conversion.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PulseConfigDef {
    count: i64,
    duration_ms: i64,
    repeat_count: i64,
    repeat_mode: RepeatMode,
    start_from_scratch: bool,
    style: PaintStyle,
    stroke_width: f64,
    min_scale: f64,
    max_scale: f64,
    min_alpha: f64,
    max_alpha: f64,
    start_angle: f64,
    sweep_angle: f64,
    margin_px: f64,
    color: Color,
    curve: Curve,
    palette: Vec<String>,
}

impl Default for PulseConfigDef {
    fn default() -> Self {
        let d = PulseConfig::default();
        Self {
            count: i64::from(d.count),
            duration_ms: i64::from(d.duration_ms),
            repeat_count: i64::from(d.repeat_count),
            repeat_mode: d.repeat_mode,
            start_from_scratch: d.start_from_scratch,
            style: d.style,
            stroke_width: d.stroke_width,
            min_scale: d.min_scale,
            max_scale: d.max_scale,
            min_alpha: d.min_alpha,
            max_alpha: d.max_alpha,
            start_angle: d.start_angle,
            sweep_angle: d.sweep_angle,
            margin_px: d.margin_px,
            color: d.color,
            curve: d.curve,
            palette: d.palette,
        }
    }
}

impl TryFrom<PulseConfigDef> for PulseConfig {
    type Error = PulsatorError;

    fn try_from(def: PulseConfigDef) -> PulsatorResult<Self> {
        let cfg = Self {
            count: checked_count(def.count)?,
            duration_ms: checked_duration(def.duration_ms)?,
            repeat_count: checked_repeat_count(def.repeat_count)?,
            repeat_mode: def.repeat_mode,
            start_from_scratch: def.start_from_scratch,
            style: def.style,
            stroke_width: def.stroke_width,
            min_scale: def.min_scale,
            max_scale: def.max_scale,
            min_alpha: def.min_alpha,
            max_alpha: def.max_alpha,
            start_angle: def.start_angle,
            sweep_angle: def.sweep_angle,
            margin_px: def.margin_px,
            color: def.color,
            curve: def.curve,
            palette: def.palette,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
