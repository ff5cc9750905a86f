use crate::animation::curve::Curve;
use crate::animation::track::RepeatMode;
use crate::config::model::{
    PaintStyle, PulseConfig, checked_count, checked_duration, checked_repeat_count,
};
use crate::foundation::core::Color;
use crate::foundation::error::PulsatorResult;

/// Fluent construction of a [`PulseConfig`], starting from the defaults.
///
/// Setters taking host integers reject negative values immediately.
#[derive(Clone, Debug, Default)]
pub struct PulseConfigBuilder {
    cfg: PulseConfig,
}

impl PulseConfigBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(cfg: PulseConfig) -> Self {
        Self { cfg }
    }

    /// Number of rings; negative values are rejected.
    pub fn count(mut self, count: i64) -> PulsatorResult<Self> {
        self.cfg.count = checked_count(count)?;
        Ok(self)
    }

    /// Cycle length in milliseconds; negative values are rejected.
    pub fn duration_ms(mut self, millis: i64) -> PulsatorResult<Self> {
        self.cfg.duration_ms = checked_duration(millis)?;
        Ok(self)
    }

    /// Additional cycles, `0` meaning infinite; negative values are rejected.
    pub fn repeat_count(mut self, repeat: i64) -> PulsatorResult<Self> {
        self.cfg.repeat_count = checked_repeat_count(repeat)?;
        Ok(self)
    }

    /// Direction of repeated passes.
    pub fn repeat_mode(mut self, mode: RepeatMode) -> Self {
        self.cfg.repeat_mode = mode;
        self
    }

    /// When `false`, rings start already mid-cycle.
    pub fn start_from_scratch(mut self, yes: bool) -> Self {
        self.cfg.start_from_scratch = yes;
        self
    }

    /// Fill or stroke painting (also selects the timing policy).
    pub fn style(mut self, style: PaintStyle) -> Self {
        self.cfg.style = style;
        self
    }

    /// Stroke width in pixels.
    pub fn stroke_width(mut self, width: f64) -> Self {
        self.cfg.stroke_width = width;
        self
    }

    /// Scale range of every pass.
    pub fn scale(mut self, min: f64, max: f64) -> Self {
        self.cfg.min_scale = min;
        self.cfg.max_scale = max;
        self
    }

    /// Opacity range of every pass; rings fade from `max` to `min`.
    pub fn alpha(mut self, min: f64, max: f64) -> Self {
        self.cfg.min_alpha = min;
        self.cfg.max_alpha = max;
        self
    }

    /// Arc drawn for each ring, in degrees.
    pub fn angles(mut self, start: f64, sweep: f64) -> Self {
        self.cfg.start_angle = start;
        self.cfg.sweep_angle = sweep;
        self
    }

    /// Radius reduction applied to every ring, in pixels.
    pub fn margin_px(mut self, margin: f64) -> Self {
        self.cfg.margin_px = margin;
        self
    }

    /// Base ring color.
    pub fn color(mut self, color: Color) -> Self {
        self.cfg.color = color;
        self
    }

    /// Easing curve.
    pub fn curve(mut self, curve: Curve) -> Self {
        self.cfg.curve = curve;
        self
    }

    /// Ring colors in string form (`#RRGGBB`, `#AARRGGBB` or a color name).
    pub fn palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.palette = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> PulsatorResult<PulseConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/builder.rs"]
mod tests;
