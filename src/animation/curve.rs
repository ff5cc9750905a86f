use std::f64::consts::PI;

/// Easing curve applied to every ring track of a schedule.
///
/// Host attribute systems address curves by small integers (see [`Curve::from_raw`]); any value
/// outside the known set maps to [`Curve::Linear`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    /// Constant rate.
    #[default]
    Linear,
    /// Starts slow, ends fast (`t²`).
    Accelerate,
    /// Starts fast, ends slow (`1 - (1 - t)²`).
    Decelerate,
    /// Slow at both ends, fast in the middle (cosine ramp).
    AccelerateDecelerate,
}

impl Curve {
    /// Map a raw host selector (`0..=3`) to a curve, falling back to `Linear`.
    pub fn from_raw(selector: i64) -> Self {
        match selector {
            1 => Self::Accelerate,
            2 => Self::Decelerate,
            3 => Self::AccelerateDecelerate,
            _ => Self::Linear,
        }
    }

    /// Raw host selector for this curve.
    pub fn to_raw(self) -> i64 {
        match self {
            Self::Linear => 0,
            Self::Accelerate => 1,
            Self::Decelerate => 2,
            Self::AccelerateDecelerate => 3,
        }
    }

    /// Map a curve name to a curve, falling back to `Linear`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "accelerate" => Self::Accelerate,
            "decelerate" => Self::Decelerate,
            "accelerate_decelerate" => Self::AccelerateDecelerate,
            _ => Self::Linear,
        }
    }

    /// Apply this curve to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Accelerate => t * t,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

/// Resolve a raw host selector to its easing curve.
pub fn curve_for(selector: i64) -> Curve {
    Curve::from_raw(selector)
}

impl<'de> serde::Deserialize<'de> for Curve {
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

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
