use crate::foundation::core::RingViewId;
use crate::foundation::error::{PulsatorError, PulsatorResult};
use crate::host::{ArcDraw, RenderSurface, RingContainer};

/// Container that records its children in order.
#[derive(Debug, Default)]
pub struct RecordingContainer {
    children: Vec<RingViewId>,
    invalidations: usize,
    /// When set, the next `add_ring_view` fails with a host error.
    pub fail_next_add: bool,
}

impl RecordingContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Children in container order.
    pub fn children(&self) -> &[RingViewId] {
        &self.children
    }

    /// Number of redraw requests received.
    pub fn invalidations(&self) -> usize {
        self.invalidations
    }
}

impl RingContainer for RecordingContainer {
    fn add_ring_view(&mut self, view: RingViewId, index: usize) -> PulsatorResult<()> {
        if std::mem::take(&mut self.fail_next_add) {
            return Err(PulsatorError::host("container refused ring view"));
        }
        let index = index.min(self.children.len());
        self.children.insert(index, view);
        Ok(())
    }

    fn remove_ring_view(&mut self, view: RingViewId) {
        self.children.retain(|v| *v != view);
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}

/// Surface that records every paint command.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Paint commands in draw order.
    pub draws: Vec<ArcDraw>,
}

impl RecordingSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for RecordingSurface {
    fn draw_arc(&mut self, arc: &ArcDraw) -> PulsatorResult<()> {
        self.draws.push(*arc);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/recording.rs"]
mod tests;
