//! Host collaborator contracts.
//!
//! The controller never talks to a UI framework directly. It adds and removes ring views through a
//! [`RingContainer`], drives property animations through an [`AnimationClock`], and paints through
//! a [`RenderSurface`]. [`ManualClock`], [`RecordingContainer`] and [`RecordingSurface`] are
//! deterministic implementations for headless rendering, tests and debugging.

pub(crate) mod manual;
pub(crate) mod recording;

use crate::animation::curve::Curve;
use crate::animation::track::{PropertyAnimation, RingProperty, RingProps};
use crate::config::model::PaintStyle;
use crate::foundation::core::{Color, Point, Rect, RingViewId};
use crate::foundation::error::PulsatorResult;

/// Layout container holding the ring views.
pub trait RingContainer {
    /// Insert `view` as child number `index`.
    fn add_ring_view(&mut self, view: RingViewId, index: usize) -> PulsatorResult<()>;
    /// Remove `view`; unknown views are ignored.
    fn remove_ring_view(&mut self, view: RingViewId);
    /// Request a redraw.
    fn invalidate(&mut self) {}
}

/// Identity of one animation group started on a clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub u64);

/// Index of a track inside its [`AnimationGroup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrackId(pub usize);

/// A property animation bound to the ring view it drives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundTrack {
    /// Position of this track in its group.
    pub id: TrackId,
    /// Target view.
    pub view: RingViewId,
    /// Values and timing.
    pub animation: PropertyAnimation,
}

/// Tracks started together as one synchronized group.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationGroup {
    /// Group identity, echoed back in [`ClockEvent::GroupEnded`].
    pub id: GroupId,
    /// Curve applied to every track.
    pub curve: Curve,
    /// Tracks in schedule order, `tracks[i].id == TrackId(i)`.
    pub tracks: Vec<BoundTrack>,
}

/// Notification from the clock back to the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClockEvent {
    /// A track wrote a new value into a ring view property.
    Property {
        /// Group the track belongs to.
        group: GroupId,
        /// Target view.
        view: RingViewId,
        /// Animated property.
        property: RingProperty,
        /// New value.
        value: f64,
    },
    /// Every track of the group has finished (natural completion or forced end).
    GroupEnded {
        /// Finished group.
        group: GroupId,
    },
}

/// Animation clock driving property tracks over time.
///
/// Event ordering contract: events of one group are reported in the order they happened, and
/// [`ClockEvent::GroupEnded`] is the last event of its group.
pub trait AnimationClock {
    /// Start every track of `group` at the same instant, replacing any previous group.
    fn start_group(&mut self, group: &AnimationGroup) -> PulsatorResult<()>;
    /// Zero the delay of `track` and move it to `play_time_ms` within its passes.
    fn seek(&mut self, track: TrackId, play_time_ms: u64) -> PulsatorResult<()>;
    /// Jump every track of the running group to its end value.
    fn end_group(&mut self);
    /// Drop the running group without reporting further events.
    fn cancel_group(&mut self);
    /// Drain events produced since the last call.
    fn poll_events(&mut self) -> Vec<ClockEvent>;
}

/// One ring paint command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcDraw {
    /// Unscaled ring bounds in container coordinates.
    pub bounds: Rect,
    /// Arc start angle in degrees.
    pub start_angle_deg: f64,
    /// Arc sweep in degrees.
    pub sweep_angle_deg: f64,
    /// Fill or stroke.
    pub style: PaintStyle,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Ring color before the ring alpha is applied.
    pub color: Color,
    /// Current scale and alpha of the ring view.
    pub props: RingProps,
    /// Scale pivot (the shared ring center).
    pub pivot: Point,
}

/// Rendering surface the rings are painted onto.
pub trait RenderSurface {
    /// Paint one ring.
    fn draw_arc(&mut self, arc: &ArcDraw) -> PulsatorResult<()>;
}
