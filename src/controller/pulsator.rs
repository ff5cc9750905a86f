use crate::animation::curve::Curve;
use crate::animation::track::{RepeatMode, RingProps};
use crate::config::model::{
    PaintStyle, PulseConfig, checked_count, checked_duration, checked_repeat_count,
};
use crate::controller::events::{Deferred, PulseEvent, PulseListener, PulseRequest, PulseState};
use crate::foundation::core::{Color, Insets, Rect, RingViewId, Size};
use crate::foundation::error::PulsatorResult;
use crate::geometry::ring::SharedGeometry;
use crate::host::{
    AnimationClock, AnimationGroup, ArcDraw, BoundTrack, ClockEvent, GroupId, RenderSurface,
    RingContainer, TrackId,
};
use crate::schedule::builder::{PulseScheduleBuilder, Schedule};

/// One ring as placed in the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingView {
    /// Identity in the host container.
    pub id: RingViewId,
    /// Creation index (container child order).
    pub index: usize,
    /// Paint color.
    pub color: Color,
    /// Unscaled bounds in container coordinates.
    pub bounds: Rect,
    /// Current property values, written by the clock.
    pub props: RingProps,
}

/// Owner of the pulse lifecycle.
///
/// Builds ring views from the current [`PulseConfig`], starts and stops their animation group on
/// the host clock, and rebuilds everything when a parameter changes, preserving Running/Idle.
///
/// All mutation goes through `&mut self`, which serializes start, stop and rebuild. Listeners run
/// while the controller is dispatching; what they request through [`Deferred`] is applied after
/// the dispatch returns.
pub struct PulseController<C, K> {
    config: PulseConfig,
    container: C,
    clock: K,
    schedule: Option<Schedule>,
    views: Vec<RingView>,
    state: PulseState,
    attached: bool,
    group: Option<GroupId>,
    container_size: Size,
    padding: Insets,
    geometry: SharedGeometry,
    next_view_id: u64,
    next_group_id: u64,
    listeners: Vec<PulseListener>,
    deferred: Deferred,
    draining: bool,
}

impl<C, K> PulseController<C, K>
where
    C: RingContainer,
    K: AnimationClock,
{
    /// Build the ring views of `config` into `container`. The controller starts Idle.
    pub fn new(config: PulseConfig, container: C, clock: K) -> PulsatorResult<Self> {
        let schedule = PulseScheduleBuilder::build(&config)?;
        let mut this = Self {
            config,
            container,
            clock,
            schedule: None,
            views: Vec::new(),
            state: PulseState::Idle,
            attached: true,
            group: None,
            container_size: Size::ZERO,
            padding: Insets::default(),
            geometry: SharedGeometry::default(),
            next_view_id: 0,
            next_group_id: 0,
            listeners: Vec::new(),
            deferred: Deferred::default(),
            draining: false,
        };
        this.attach_schedule(schedule)?;
        Ok(this)
    }

    /// Register a listener for lifecycle transitions.
    pub fn add_listener(&mut self, listener: impl FnMut(&PulseEvent, &mut Deferred) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Start the pulse. No-op when already Running or when no schedule exists.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) -> PulsatorResult<()> {
        if self.state == PulseState::Running || self.schedule.is_none() {
            return Ok(());
        }
        self.launch()?;
        self.notify(PulseEvent::Started);
        self.pump()
    }

    /// Force every ring to its end state and go Idle. No-op when Idle.
    #[tracing::instrument(skip(self))]
    pub fn stop(&mut self) -> PulsatorResult<()> {
        if self.state == PulseState::Idle {
            return Ok(());
        }
        self.state = PulseState::Idle;
        self.clock.end_group();
        self.notify(PulseEvent::Stopped);
        self.pump()
    }

    /// Return `true` while a schedule exists and its group is playing.
    pub fn is_started(&self) -> bool {
        self.schedule.is_some() && self.state == PulseState::Running
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PulseState {
        self.state
    }

    /// Replace the configuration and rebuild the schedule, keeping Running/Idle.
    ///
    /// The new schedule is built before anything is torn down; on failure the controller is
    /// left untouched. While detached only the configuration is replaced.
    #[tracing::instrument(skip(self, config))]
    pub fn rebuild(&mut self, config: PulseConfig) -> PulsatorResult<()> {
        let schedule = PulseScheduleBuilder::build(&config)?;
        if !self.attached {
            self.config = config;
            return Ok(());
        }

        let was_running = self.is_started();
        let old_config = std::mem::replace(&mut self.config, config);
        let old_views = self.release_views();
        let old_schedule = self.schedule.take();

        if let Err(err) = self.attach_schedule(schedule) {
            tracing::warn!(error = %err, "rebuild failed, restoring previous rings");
            self.config = old_config;
            self.restore_views(old_views, old_schedule);
            if was_running {
                self.launch()?;
                self.pump()?;
            }
            return Err(err);
        }

        let count = self.config.count;
        tracing::debug!(count, was_running, "pulse schedule rebuilt");
        self.notify(PulseEvent::Rebuilt { count });
        if was_running {
            self.launch()?;
        }
        self.pump()
    }

    /// Host callback: the container left the window. Cancels the group and releases the rings.
    #[tracing::instrument(skip(self))]
    pub fn on_detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        let was_running = self.is_started();
        self.release_views();
        self.schedule = None;
        if was_running {
            self.notify(PulseEvent::Detached);
        }
        if let Err(err) = self.drain_deferred() {
            tracing::warn!(error = %err, "deferred request failed after detach");
        }
    }

    /// Host callback: the container was attached again. Rebuilds rings released by a detach.
    #[tracing::instrument(skip(self))]
    pub fn on_attach(&mut self) -> PulsatorResult<()> {
        if self.attached {
            return Ok(());
        }
        let schedule = PulseScheduleBuilder::build(&self.config)?;
        self.attach_schedule(schedule)?;
        self.attached = true;
        Ok(())
    }

    /// Host callback: the container content box changed size.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.container_size = Size::new(width, height);
        self.relayout();
    }

    /// Host callback: one ring view was laid out again.
    pub fn on_ring_resized(&mut self, view: RingViewId) {
        let bounds = self.geometry.ring_bounds(self.config.margin_px);
        if let Some(v) = self.views.iter_mut().find(|v| v.id == view) {
            v.bounds = bounds;
        }
    }

    /// Set the container padding and lay the rings out again.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
        self.relayout();
    }

    /// Drain clock events and apply them to the ring views.
    pub fn pump(&mut self) -> PulsatorResult<()> {
        let events = self.clock.poll_events();
        let mut touched = false;
        for event in events {
            match event {
                ClockEvent::Property {
                    group,
                    view,
                    property,
                    value,
                } => {
                    if self.group != Some(group) {
                        continue;
                    }
                    match self.views.iter_mut().find(|v| v.id == view) {
                        Some(v) => {
                            v.props.set(property, value);
                            touched = true;
                        }
                        None => tracing::trace!(view = view.0, "update for released ring view"),
                    }
                }
                ClockEvent::GroupEnded { group } => {
                    if self.group != Some(group) {
                        continue;
                    }
                    self.group = None;
                    if self.state == PulseState::Running {
                        self.state = PulseState::Idle;
                        tracing::debug!("pulse finished");
                        self.notify(PulseEvent::Finished);
                    }
                }
            }
        }
        if touched {
            self.container.invalidate();
        }
        self.drain_deferred()
    }

    /// Paint every ring in container order.
    pub fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> PulsatorResult<()> {
        for view in &self.views {
            surface.draw_arc(&ArcDraw {
                bounds: view.bounds,
                start_angle_deg: self.config.start_angle,
                sweep_angle_deg: self.config.sweep_angle,
                style: self.config.style,
                stroke_width: self.config.stroke_width,
                color: view.color,
                props: view.props,
                pivot: self.geometry.center,
            })?;
        }
        Ok(())
    }

    /// Number of rings.
    pub fn count(&self) -> u32 {
        self.config.count
    }

    /// Set the number of rings; negative values are rejected and leave the controller unchanged.
    pub fn set_count(&mut self, count: i64) -> PulsatorResult<()> {
        let count = checked_count(count)?;
        if count == self.config.count {
            return Ok(());
        }
        self.rebuild(PulseConfig {
            count,
            ..self.config.clone()
        })
    }

    /// Cycle length in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        self.config.duration_ms
    }

    /// Set the cycle length; negative values are rejected and leave the controller unchanged.
    pub fn set_duration(&mut self, millis: i64) -> PulsatorResult<()> {
        let duration_ms = checked_duration(millis)?;
        if duration_ms == self.config.duration_ms {
            return Ok(());
        }
        self.rebuild(PulseConfig {
            duration_ms,
            ..self.config.clone()
        })
    }

    /// Base ring color.
    pub fn color(&self) -> Color {
        self.config.color
    }

    /// Set the base color. Takes effect immediately on rings without a palette color.
    pub fn set_color(&mut self, color: Color) {
        if color == self.config.color {
            return;
        }
        self.config.color = color;
        if self.config.palette.is_empty() {
            if let Some(schedule) = self.schedule.as_mut() {
                for ring in &mut schedule.rings {
                    ring.color = color;
                }
            }
            for view in &mut self.views {
                view.color = color;
            }
        }
        self.container.invalidate();
    }

    /// Easing curve.
    pub fn curve(&self) -> Curve {
        self.config.curve
    }

    /// Set the easing curve.
    pub fn set_curve(&mut self, curve: Curve) -> PulsatorResult<()> {
        if curve == self.config.curve {
            return Ok(());
        }
        self.rebuild(PulseConfig {
            curve,
            ..self.config.clone()
        })
    }

    /// Set the easing curve from a raw host selector; unknown selectors mean linear.
    pub fn set_curve_raw(&mut self, selector: i64) -> PulsatorResult<()> {
        self.set_curve(Curve::from_raw(selector))
    }

    /// Set the number of additional cycles, `0` meaning infinite.
    pub fn set_repeat_count(&mut self, repeat: i64) -> PulsatorResult<()> {
        let repeat_count = checked_repeat_count(repeat)?;
        if repeat_count == self.config.repeat_count {
            return Ok(());
        }
        self.rebuild(PulseConfig {
            repeat_count,
            ..self.config.clone()
        })
    }

    /// Set the direction of repeated passes.
    pub fn set_repeat_mode(&mut self, repeat_mode: RepeatMode) -> PulsatorResult<()> {
        if repeat_mode == self.config.repeat_mode {
            return Ok(());
        }
        self.rebuild(PulseConfig {
            repeat_mode,
            ..self.config.clone()
        })
    }

    /// Set fill or stroke painting, which also changes the timing policy.
    pub fn set_style(&mut self, style: PaintStyle) -> PulsatorResult<()> {
        if style == self.config.style {
            return Ok(());
        }
        self.rebuild(PulseConfig {
            style,
            ..self.config.clone()
        })
    }

    /// Replace the ring palette.
    pub fn set_palette(&mut self, palette: Vec<String>) -> PulsatorResult<()> {
        if palette == self.config.palette {
            return Ok(());
        }
        self.rebuild(PulseConfig {
            palette,
            ..self.config.clone()
        })
    }

    /// Choose whether the next start waits out the stagger delays.
    pub fn set_start_from_scratch(&mut self, yes: bool) {
        self.config.start_from_scratch = yes;
    }

    /// Apply one request, the same way a listener's deferred request is applied.
    pub fn apply(&mut self, request: PulseRequest) -> PulsatorResult<()> {
        match request {
            PulseRequest::Start => self.start(),
            PulseRequest::Stop => self.stop(),
            PulseRequest::SetCount(n) => self.set_count(n),
            PulseRequest::SetDuration(ms) => self.set_duration(ms),
            PulseRequest::SetColor(c) => {
                self.set_color(c);
                Ok(())
            }
            PulseRequest::SetCurve(c) => self.set_curve(c),
            PulseRequest::Rebuild(cfg) => self.rebuild(cfg),
        }
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    /// Current schedule, absent while detached.
    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Ring views in container order.
    pub fn ring_views(&self) -> &[RingView] {
        &self.views
    }

    /// Shared ring center and base radius.
    pub fn geometry(&self) -> SharedGeometry {
        self.geometry
    }

    /// Borrow the host container.
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Mutably borrow the host container.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Borrow the host clock.
    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Mutably borrow the host clock, e.g. to advance a [`crate::ManualClock`].
    pub fn clock_mut(&mut self) -> &mut K {
        &mut self.clock
    }

    fn relayout(&mut self) {
        self.geometry = SharedGeometry::from_container(self.container_size, self.padding);
        let bounds = self.geometry.ring_bounds(self.config.margin_px);
        for view in &mut self.views {
            view.bounds = bounds;
        }
        self.container.invalidate();
    }

    fn attach_schedule(&mut self, schedule: Schedule) -> PulsatorResult<()> {
        let bounds = self.geometry.ring_bounds(self.config.margin_px);
        let mut rings: Vec<_> = schedule.rings.iter().collect();
        rings.sort_by_key(|r| r.index);

        let mut views: Vec<RingView> = Vec::with_capacity(rings.len());
        for ring in rings {
            let id = RingViewId(self.next_view_id);
            self.next_view_id += 1;
            if let Err(err) = self.container.add_ring_view(id, ring.index) {
                for view in &views {
                    self.container.remove_ring_view(view.id);
                }
                return Err(err);
            }
            views.push(RingView {
                id,
                index: ring.index,
                color: ring.color,
                bounds,
                props: ring.initial,
            });
        }

        self.views = views;
        self.schedule = Some(schedule);
        self.container.invalidate();
        Ok(())
    }

    /// Cancel the group and remove every ring view from the container, silently going Idle.
    fn release_views(&mut self) -> Vec<RingView> {
        self.clock.cancel_group();
        self.group = None;
        self.state = PulseState::Idle;
        let views = std::mem::take(&mut self.views);
        for view in &views {
            self.container.remove_ring_view(view.id);
        }
        self.container.invalidate();
        views
    }

    fn restore_views(&mut self, views: Vec<RingView>, schedule: Option<Schedule>) {
        for view in &views {
            if let Err(err) = self.container.add_ring_view(view.id, view.index) {
                tracing::warn!(view = view.id.0, error = %err, "could not restore ring view");
            }
        }
        self.views = views;
        self.schedule = schedule;
    }

    /// Start the current schedule on the clock and go Running, without notifying.
    fn launch(&mut self) -> PulsatorResult<()> {
        let Some(schedule) = self.schedule.as_ref() else {
            return Ok(());
        };

        let id = GroupId(self.next_group_id);
        self.next_group_id += 1;

        let mut tracks = Vec::with_capacity(schedule.len() * 3);
        for ring in &schedule.rings {
            let Some(view) = self.views.iter().find(|v| v.index == ring.index) else {
                continue;
            };
            for animation in ring.tracks() {
                tracks.push(BoundTrack {
                    id: TrackId(tracks.len()),
                    view: view.id,
                    animation,
                });
            }
        }
        let group = AnimationGroup {
            id,
            curve: schedule.curve,
            tracks,
        };

        self.clock.start_group(&group)?;
        self.group = Some(id);
        self.state = PulseState::Running;

        if !self.config.start_from_scratch {
            for track in &group.tracks {
                let timing = track.animation.timing;
                if timing.duration_ms == 0 {
                    continue;
                }
                let play_time = timing.duration_ms.saturating_sub(timing.delay_ms);
                self.clock.seek(track.id, play_time)?;
            }
        }
        tracing::debug!(
            group = id.0,
            tracks = group.tracks.len(),
            from_scratch = self.config.start_from_scratch,
            "pulse group started"
        );
        Ok(())
    }

    fn notify(&mut self, event: PulseEvent) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            listener(&event, &mut self.deferred);
        }
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }

    fn drain_deferred(&mut self) -> PulsatorResult<()> {
        if self.draining {
            return Ok(());
        }
        self.draining = true;
        let mut first_err = None;
        while let Some(request) = self.deferred.pop() {
            if let Err(err) = self.apply(request) {
                tracing::warn!(error = %err, "deferred pulse request failed");
                first_err.get_or_insert(err);
            }
        }
        self.draining = false;
        first_err.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/pulsator.rs"]
mod tests;
