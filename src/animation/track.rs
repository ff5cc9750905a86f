use crate::animation::curve::Curve;

/// Ring view property driven by a track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingProperty {
    /// Horizontal scale around the container center.
    ScaleX,
    /// Vertical scale around the container center.
    ScaleY,
    /// Opacity in `[0, 1]`.
    Alpha,
}

/// Current animated property values of one ring view.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingProps {
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
}

impl RingProps {
    /// Props with a uniform scale.
    pub fn new(scale: f64, alpha: f64) -> Self {
        Self {
            scale_x: scale,
            scale_y: scale,
            alpha,
        }
    }

    /// Overwrite one property.
    pub fn set(&mut self, property: RingProperty, value: f64) {
        match property {
            RingProperty::ScaleX => self.scale_x = value,
            RingProperty::ScaleY => self.scale_y = value,
            RingProperty::Alpha => self.alpha = value,
        }
    }
}

/// How many times a track plays after its first pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Repeat until stopped.
    Infinite,
    /// Exact number of additional passes.
    Times(u32),
}

impl Repeat {
    /// Translate a configured repeat count, where `0` means infinite.
    pub fn from_count(count: u32) -> Self {
        if count == 0 {
            Self::Infinite
        } else {
            Self::Times(count)
        }
    }
}

/// What happens at the end of each pass when a track repeats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Jump back to the start value.
    #[default]
    Restart,
    /// Play the next pass backwards.
    Reverse,
}

impl RepeatMode {
    /// Map a raw host selector (`1` restart, `2` reverse), falling back to `Restart`.
    pub fn from_raw(selector: i64) -> Self {
        match selector {
            2 => Self::Reverse,
            _ => Self::Restart,
        }
    }

    /// Map a mode name, falling back to `Restart`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "reverse" => Self::Reverse,
            _ => Self::Restart,
        }
    }
}

impl<'de> serde::Deserialize<'de> for RepeatMode {
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

/// Timing shared by the three tracks of one ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TrackTiming {
    /// Time before the first pass begins.
    pub delay_ms: u64,
    /// Length of one pass.
    pub duration_ms: u64,
    /// Additional passes after the first one.
    pub repeat: Repeat,
    /// Direction of repeated passes.
    pub repeat_mode: RepeatMode,
}

impl TrackTiming {
    /// Total play time including the delay, or `None` when the track never finishes.
    pub fn total_ms(&self) -> Option<u64> {
        if self.duration_ms == 0 {
            return Some(self.delay_ms);
        }
        match self.repeat {
            Repeat::Infinite => None,
            Repeat::Times(n) => Some(
                self.delay_ms
                    .saturating_add(self.duration_ms.saturating_mul(u64::from(n) + 1)),
            ),
        }
    }
}

/// Result of sampling a track at some play time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackSample {
    /// The start delay has not elapsed; the property keeps its previous value.
    Pending,
    /// The track is mid-pass.
    Active(f64),
    /// The track has played all passes and rests on its end value.
    Finished(f64),
}

impl TrackSample {
    /// Sampled value, if the track has started.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Pending => None,
            Self::Active(v) | Self::Finished(v) => Some(v),
        }
    }
}

/// One property animation `from -> to` of a ring view.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropertyAnimation {
    /// Animated property.
    pub property: RingProperty,
    /// Value at the start of a forward pass.
    pub from: f64,
    /// Value at the end of a forward pass.
    pub to: f64,
    /// Delay, duration and repeat behavior.
    pub timing: TrackTiming,
}

impl PropertyAnimation {
    /// Value the property rests on once every pass has played.
    pub fn end_value(&self) -> f64 {
        match (self.timing.repeat, self.timing.repeat_mode) {
            (Repeat::Times(n), RepeatMode::Reverse) if n % 2 == 1 => self.from,
            _ => self.to,
        }
    }

    /// Sample the track at `play_time_ms` (measured from group start, delay included).
    pub fn sample(&self, play_time_ms: u64, curve: Curve) -> TrackSample {
        let timing = &self.timing;
        if play_time_ms < timing.delay_ms {
            return TrackSample::Pending;
        }
        if timing.duration_ms == 0 {
            return TrackSample::Finished(self.end_value());
        }

        let local = play_time_ms - timing.delay_ms;
        let pass = local / timing.duration_ms;
        if let Repeat::Times(n) = timing.repeat {
            if pass > u64::from(n) {
                return TrackSample::Finished(self.end_value());
            }
        }

        let frac = (local % timing.duration_ms) as f64 / timing.duration_ms as f64;
        let forward = timing.repeat_mode == RepeatMode::Restart || pass % 2 == 0;
        let t = if forward { frac } else { 1.0 - frac };
        let eased = curve.apply(t);
        TrackSample::Active(self.from + (self.to - self.from) * eased)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
