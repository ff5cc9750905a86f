use crate::foundation::core::{Insets, Point, Rect, Size};

/// Center and unshrunk radius shared by every ring, derived from the container content box.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct SharedGeometry {
    /// Ring center in container coordinates.
    pub center: Point,
    /// Radius before any margin is applied.
    pub base_radius: f64,
}

impl SharedGeometry {
    /// Compute the shared geometry for a container of `size` with `padding` removed.
    ///
    /// Negative content extents collapse to zero.
    pub fn from_container(size: Size, padding: Insets) -> Self {
        let w = (size.width - padding.left - padding.right).max(0.0);
        let h = (size.height - padding.top - padding.bottom).max(0.0);
        Self {
            center: Point::new(padding.left + w * 0.5, padding.top + h * 0.5),
            base_radius: w.min(h) * 0.5,
        }
    }

    /// Bounds of a ring drawn with `margin`, always derived from the unshrunk base radius.
    pub fn ring_bounds(&self, margin: f64) -> Rect {
        bounds_for(self.center, self.base_radius, margin)
    }
}

/// Square bounds of half-size `radius - margin` around `center`, clamped at zero.
pub fn bounds_for(center: Point, radius: f64, margin: f64) -> Rect {
    let r = (radius - margin).max(0.0);
    Rect::new(center.x - r, center.y - r, center.x + r, center.y + r)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/ring.rs"]
mod tests;
