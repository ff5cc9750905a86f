use crate::animation::curve::Curve;
use crate::animation::track::{
    PropertyAnimation, Repeat, RepeatMode, RingProperty, RingProps, TrackTiming,
};
use crate::config::model::{PaintStyle, PulseConfig};
use crate::foundation::core::Color;
use crate::foundation::error::PulsatorResult;
use crate::style::color::ColorResolver;

/// Start and end value of one animated property.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ValueRange {
    /// Value at the start of a forward pass.
    pub from: f64,
    /// Value at the end of a forward pass.
    pub to: f64,
}

/// Animation plan of one ring.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RingDescriptor {
    /// Creation index of the ring (container child order).
    pub index: usize,
    /// Position in the schedule, the multiplier of the start delay.
    pub position: usize,
    /// Ring color, bound to the creation index.
    pub color: Color,
    /// Delay before the first pass.
    pub start_delay_ms: u64,
    /// Length of one pass.
    pub effective_duration_ms: u64,
    /// Scale animation shared by both axes, `min_scale -> max_scale`.
    pub scale: ValueRange,
    /// Alpha animation, `max_alpha -> min_alpha`.
    pub alpha: ValueRange,
    /// Additional passes after the first.
    pub repeat: Repeat,
    /// Direction of repeated passes.
    pub repeat_mode: RepeatMode,
    /// View state applied when the ring view is created.
    pub initial: RingProps,
}

impl RingDescriptor {
    /// Timing shared by the three tracks of this ring.
    pub fn timing(&self) -> TrackTiming {
        TrackTiming {
            delay_ms: self.start_delay_ms,
            duration_ms: self.effective_duration_ms,
            repeat: self.repeat,
            repeat_mode: self.repeat_mode,
        }
    }

    /// The synchronized scale-x, scale-y and alpha tracks of this ring.
    pub fn tracks(&self) -> [PropertyAnimation; 3] {
        let timing = self.timing();
        let track = |property, range: ValueRange| PropertyAnimation {
            property,
            from: range.from,
            to: range.to,
            timing,
        };
        [
            track(RingProperty::ScaleX, self.scale),
            track(RingProperty::ScaleY, self.scale),
            track(RingProperty::Alpha, self.alpha),
        ]
    }
}

/// Every ring descriptor of one configuration snapshot, in schedule order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Schedule {
    /// Descriptors ordered by [`RingDescriptor::position`].
    pub rings: Vec<RingDescriptor>,
    /// Curve applied to every track.
    pub curve: Curve,
    /// Paint style the timing was derived for.
    pub style: PaintStyle,
}

impl Schedule {
    /// Number of rings.
    pub fn len(&self) -> usize {
        self.rings.len()
    }

    /// Return `true` when the schedule has no rings.
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Time until every track has finished, or `None` when the schedule repeats forever.
    pub fn total_duration_ms(&self) -> Option<u64> {
        self.rings
            .iter()
            .map(|r| r.timing().total_ms())
            .try_fold(0u64, |acc, t| t.map(|t| acc.max(t)))
    }

    /// Descriptor of the ring created at `index`.
    pub fn by_index(&self, index: usize) -> Option<&RingDescriptor> {
        self.rings.iter().find(|r| r.index == index)
    }
}

/// Stateless builder from [`PulseConfig`] to [`Schedule`].
pub struct PulseScheduleBuilder;

impl PulseScheduleBuilder {
    /// Derive the pulse schedule of `cfg`.
    ///
    /// Fill style staggers rings within one shared cycle; stroke style plays them one after
    /// another, outermost first. Colors bind to the creation index, before any reordering.
    #[tracing::instrument(skip(cfg), fields(count = cfg.count, style = ?cfg.style))]
    pub fn build(cfg: &PulseConfig) -> PulsatorResult<Schedule> {
        cfg.validate()?;
        let colors = ColorResolver::new(cfg)?;

        let count = cfg.count as usize;
        let mut order: Vec<usize> = (0..count).collect();
        if cfg.style == PaintStyle::Stroke {
            order.reverse();
        }

        let duration = u64::from(cfg.duration_ms);
        let n = u64::from(cfg.count);
        let repeat = Repeat::from_count(cfg.repeat_count);

        let rings = order
            .into_iter()
            .enumerate()
            .map(|(position, index)| {
                let (start_delay_ms, effective_duration_ms) =
                    ring_timing(cfg.style, position as u64, duration, n);
                RingDescriptor {
                    index,
                    position,
                    color: colors.color_for(index),
                    start_delay_ms,
                    effective_duration_ms,
                    scale: ValueRange {
                        from: cfg.min_scale,
                        to: cfg.max_scale,
                    },
                    alpha: ValueRange {
                        from: cfg.max_alpha,
                        to: cfg.min_alpha,
                    },
                    repeat,
                    repeat_mode: cfg.repeat_mode,
                    initial: RingProps::new(cfg.min_scale, cfg.min_alpha),
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(rings = rings.len(), "built pulse schedule");
        Ok(Schedule {
            rings,
            curve: cfg.curve,
            style: cfg.style,
        })
    }
}

/// `(start delay, pass length)` of the ring at `position` out of `count`; `count` is non-zero.
fn ring_timing(style: PaintStyle, position: u64, duration: u64, count: u64) -> (u64, u64) {
    match style {
        PaintStyle::Fill => (position * duration / count, duration),
        PaintStyle::Stroke => {
            let share = duration / count;
            let share = if duration > 0 { share.max(1) } else { 0 };
            (position * duration, share)
        }
    }
}

/// Derive the pulse schedule of `cfg`.
pub fn build_schedule(cfg: &PulseConfig) -> PulsatorResult<Schedule> {
    PulseScheduleBuilder::build(cfg)
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/builder.rs"]
mod tests;
