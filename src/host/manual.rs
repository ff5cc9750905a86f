use crate::animation::curve::Curve;
use crate::animation::track::TrackSample;
use crate::foundation::error::{PulsatorError, PulsatorResult};
use crate::host::{AnimationClock, AnimationGroup, BoundTrack, ClockEvent, GroupId, TrackId};

/// Deterministic clock advanced explicitly by the caller.
///
/// Used for headless rendering and tests: nothing moves until [`ManualClock::advance`] is called.
#[derive(Debug, Default)]
pub struct ManualClock {
    group: Option<ActiveGroup>,
    pending: Vec<ClockEvent>,
}

#[derive(Debug)]
struct ActiveGroup {
    id: GroupId,
    curve: Curve,
    tracks: Vec<ActiveTrack>,
}

#[derive(Debug)]
struct ActiveTrack {
    bound: BoundTrack,
    play_ms: u64,
    finished: bool,
}

impl ManualClock {
    /// Create an idle clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `true` while a group is playing.
    pub fn is_running(&self) -> bool {
        self.group.is_some()
    }

    /// Play time of `track` in the running group, delay included.
    pub fn play_time_ms(&self, track: TrackId) -> Option<u64> {
        let group = self.group.as_ref()?;
        group.tracks.get(track.0).map(|t| t.play_ms)
    }

    /// Start delay of `track` in the running group (zero after a seek).
    pub fn delay_ms(&self, track: TrackId) -> Option<u64> {
        let group = self.group.as_ref()?;
        group
            .tracks
            .get(track.0)
            .map(|t| t.bound.animation.timing.delay_ms)
    }

    /// Advance every running track by `dt_ms` and queue the resulting events.
    pub fn advance(&mut self, dt_ms: u64) {
        let Some(group) = self.group.as_mut() else {
            return;
        };
        for track in group.tracks.iter_mut().filter(|t| !t.finished) {
            track.play_ms = track.play_ms.saturating_add(dt_ms);
            emit_sample(group.id, group.curve, track, &mut self.pending);
        }
        self.finish_if_done();
    }

    fn finish_if_done(&mut self) {
        let done = self
            .group
            .as_ref()
            .is_some_and(|g| g.tracks.iter().all(|t| t.finished));
        if !done {
            return;
        }
        if let Some(group) = self.group.take() {
            tracing::trace!(group = group.id.0, "manual clock group finished");
            self.pending.push(ClockEvent::GroupEnded { group: group.id });
        }
    }
}

fn emit_sample(group: GroupId, curve: Curve, track: &mut ActiveTrack, out: &mut Vec<ClockEvent>) {
    let anim = &track.bound.animation;
    let value = match anim.sample(track.play_ms, curve) {
        TrackSample::Pending => return,
        TrackSample::Active(v) => v,
        TrackSample::Finished(v) => {
            track.finished = true;
            v
        }
    };
    out.push(ClockEvent::Property {
        group,
        view: track.bound.view,
        property: anim.property,
        value,
    });
}

impl AnimationClock for ManualClock {
    fn start_group(&mut self, group: &AnimationGroup) -> PulsatorResult<()> {
        self.group = Some(ActiveGroup {
            id: group.id,
            curve: group.curve,
            tracks: group
                .tracks
                .iter()
                .map(|bound| ActiveTrack {
                    bound: *bound,
                    play_ms: 0,
                    finished: false,
                })
                .collect(),
        });
        if let Some(active) = self.group.as_mut() {
            for track in &mut active.tracks {
                emit_sample(active.id, active.curve, track, &mut self.pending);
            }
        }
        self.finish_if_done();
        Ok(())
    }

    fn seek(&mut self, track: TrackId, play_time_ms: u64) -> PulsatorResult<()> {
        let group = self
            .group
            .as_mut()
            .ok_or_else(|| PulsatorError::host("seek without a running group"))?;
        let active = group
            .tracks
            .get_mut(track.0)
            .ok_or_else(|| PulsatorError::host(format!("unknown track {}", track.0)))?;
        active.bound.animation.timing.delay_ms = 0;
        active.play_ms = play_time_ms;
        active.finished = false;
        emit_sample(group.id, group.curve, active, &mut self.pending);
        self.finish_if_done();
        Ok(())
    }

    fn end_group(&mut self) {
        let Some(group) = self.group.take() else {
            return;
        };
        for track in group.tracks.iter().filter(|t| !t.finished) {
            let anim = &track.bound.animation;
            self.pending.push(ClockEvent::Property {
                group: group.id,
                view: track.bound.view,
                property: anim.property,
                value: anim.end_value(),
            });
        }
        self.pending.push(ClockEvent::GroupEnded { group: group.id });
    }

    fn cancel_group(&mut self) {
        self.group = None;
        self.pending.clear();
    }

    fn poll_events(&mut self) -> Vec<ClockEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/manual.rs"]
mod tests;
