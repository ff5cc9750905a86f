use std::collections::VecDeque;

use crate::animation::curve::Curve;
use crate::config::model::PulseConfig;
use crate::foundation::core::Color;

/// Lifecycle state of a controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum PulseState {
    /// No animation group is playing.
    #[default]
    Idle,
    /// The animation group is playing.
    Running,
}

/// Transition reported to listeners. Repeats of a running group are not reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulseEvent {
    /// `start()` moved the controller to Running.
    Started,
    /// `stop()` moved the controller to Idle.
    Stopped,
    /// Every track finished on its own; the controller is Idle.
    Finished,
    /// The host detached the container while Running; the controller is Idle.
    Detached,
    /// The schedule was rebuilt; the state is unchanged.
    Rebuilt {
        /// Ring count of the new schedule.
        count: u32,
    },
}

/// Operation requested from inside a listener, applied once the dispatch returns.
#[derive(Clone, Debug, PartialEq)]
pub enum PulseRequest {
    /// Call `start()`.
    Start,
    /// Call `stop()`.
    Stop,
    /// Call `set_count()`.
    SetCount(i64),
    /// Call `set_duration()`.
    SetDuration(i64),
    /// Call `set_color()`.
    SetColor(Color),
    /// Call `set_curve()`.
    SetCurve(Curve),
    /// Call `rebuild()`.
    Rebuild(PulseConfig),
}

/// Queue of requests made by listeners during a dispatch.
#[derive(Debug, Default)]
pub struct Deferred {
    queue: VecDeque<PulseRequest>,
}

impl Deferred {
    /// Queue `request`.
    pub fn push(&mut self, request: PulseRequest) {
        self.queue.push_back(request);
    }

    /// Queue a start.
    pub fn start(&mut self) {
        self.push(PulseRequest::Start);
    }

    /// Queue a stop.
    pub fn stop(&mut self) {
        self.push(PulseRequest::Stop);
    }

    /// Number of queued requests.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Return `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub(crate) fn pop(&mut self) -> Option<PulseRequest> {
        self.queue.pop_front()
    }
}

/// Listener invoked for every [`PulseEvent`].
pub type PulseListener = Box<dyn FnMut(&PulseEvent, &mut Deferred)>;

#[cfg(test)]
#[path = "../../tests/unit/controller/events.rs"]
mod tests;
