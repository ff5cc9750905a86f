//! Pulsator renders concentric "pulsing" rings, the expanding and fading shapes used by
//! "searching nearby" indicators.
//!
//! The core is deterministic and host-agnostic:
//!
//! - Describe the rings with a [`PulseConfig`] (JSON or [`PulseConfigBuilder`])
//! - Derive per-ring timing and colors with [`PulseScheduleBuilder`]
//! - Drive them through a [`PulseController`] bound to host [`RingContainer`] and
//!   [`AnimationClock`] implementations
//! - Paint them onto any [`RenderSurface`], e.g. the raster [`CpuSurface`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod controller;
pub(crate) mod geometry;
/// Host collaborator contracts and reference implementations.
pub mod host;
pub(crate) mod render;
pub(crate) mod schedule;
pub(crate) mod style;

pub use crate::foundation::core::{Affine, Color, Insets, Point, Rect, RingViewId, Size, Vec2};
pub use crate::foundation::error::{PulsatorError, PulsatorResult};

pub use crate::animation::curve::{Curve, curve_for};
pub use crate::animation::track::{
    PropertyAnimation, Repeat, RepeatMode, RingProperty, RingProps, TrackSample, TrackTiming,
};
pub use crate::config::builder::PulseConfigBuilder;
pub use crate::config::defaults::{DEFAULTS, PulseDefaults};
pub use crate::config::model::{PaintStyle, PulseConfig};
pub use crate::controller::events::{
    Deferred, PulseEvent, PulseListener, PulseRequest, PulseState,
};
pub use crate::controller::pulsator::{PulseController, RingView};
pub use crate::geometry::ring::{SharedGeometry, bounds_for};
pub use crate::host::manual::ManualClock;
pub use crate::host::recording::{RecordingContainer, RecordingSurface};
pub use crate::host::{
    AnimationClock, AnimationGroup, ArcDraw, BoundTrack, ClockEvent, GroupId, RenderSurface,
    RingContainer, TrackId,
};
pub use crate::render::cpu::{CpuSurface, render_frame};
pub use crate::render::frame::FrameRGBA;
pub use crate::schedule::builder::{
    PulseScheduleBuilder, RingDescriptor, Schedule, ValueRange, build_schedule,
};
pub use crate::style::color::{ColorResolver, color_for, parse_color};
