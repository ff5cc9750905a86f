use crate::animation::curve::Curve;
use crate::animation::track::RepeatMode;
use crate::config::model::PaintStyle;
use crate::foundation::core::Color;

/// Default value of every configuration parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseDefaults {
    /// Number of rings.
    pub count: u32,
    /// Length of one pulse cycle in milliseconds.
    pub duration_ms: u32,
    /// Additional cycles, `0` meaning infinite.
    pub repeat_count: u32,
    /// Whether rings wait out their stagger delay on start.
    pub start_from_scratch: bool,
    /// Base ring color.
    pub color: Color,
    /// Easing curve.
    pub curve: Curve,
    /// Direction of repeated passes.
    pub repeat_mode: RepeatMode,
    /// Fill or stroke painting.
    pub style: PaintStyle,
    /// Stroke width in pixels.
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
}

/// Defaults used by [`crate::PulseConfig::default`] and absent config-file fields.
pub const DEFAULTS: PulseDefaults = PulseDefaults {
    count: 4,
    duration_ms: 7000,
    repeat_count: 0,
    start_from_scratch: true,
    color: Color::rgb(0, 116, 193),
    curve: Curve::Linear,
    repeat_mode: RepeatMode::Restart,
    style: PaintStyle::Fill,
    stroke_width: 0.7,
    min_scale: 0.0,
    max_scale: 1.0,
    min_alpha: 0.0,
    max_alpha: 1.0,
    start_angle: 0.0,
    sweep_angle: 360.0,
    margin_px: 0.0,
};
