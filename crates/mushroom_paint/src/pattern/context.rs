//! Inputs and outputs shared by every pattern algorithm.
use std::ops::AddAssign;

use glam::Vec2;

use crate::canvas::Canvas;
use crate::color::Hsba;
use crate::geometry::{bounding_box, Bounds};
use crate::random::Entropy;

/// Animation input for a single draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub index: u64,
    /// Selects the time-driven variant of each algorithm.
    pub animated: bool,
}

impl Frame {
    /// A static frame: no algorithm folds in time.
    pub fn still() -> Self {
        Self {
            index: 0,
            animated: false,
        }
    }

    pub fn animated(index: u64) -> Self {
        Self {
            index,
            animated: true,
        }
    }

    /// Time for an algorithm advancing at `rate` per frame. An explicit time
    /// always wins and also enables the animated variant; `None` means static.
    pub fn time(&self, explicit: Option<f32>, rate: f32) -> Option<f32> {
        explicit.or_else(|| self.animated.then(|| self.index as f32 * rate))
    }
}

/// Region description handed to a pattern algorithm.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionDeps {
    /// Closed polygon; insertion order is the boundary traversal.
    pub polygon: Vec<Vec2>,
    /// Secondary boundary curve; noisy rings center on its midpoint.
    pub top_curve: Option<Vec<Vec2>>,
    /// Half-width of the owning shape.
    pub radius_hint: f32,
    pub accent1: Option<Hsba>,
    pub accent2: Option<Hsba>,
    /// Explicit origin override (track patterns).
    pub center: Option<Vec2>,
}

impl RegionDeps {
    pub fn new(polygon: Vec<Vec2>) -> Self {
        Self {
            polygon,
            ..Default::default()
        }
    }

    /// Rectangle polygon covering `bounds`.
    pub fn rect(bounds: Bounds) -> Self {
        Self::new(bounds.corners().to_vec())
    }

    pub fn with_top_curve(mut self, curve: Vec<Vec2>) -> Self {
        self.top_curve = Some(curve);
        self
    }

    pub fn with_radius_hint(mut self, radius: f32) -> Self {
        self.radius_hint = radius;
        self
    }

    pub fn with_accents(mut self, accent1: Hsba, accent2: Hsba) -> Self {
        self.accent1 = Some(accent1);
        self.accent2 = Some(accent2);
        self
    }

    pub fn with_center(mut self, center: Vec2) -> Self {
        self.center = Some(center);
        self
    }

    pub fn bounds(&self) -> Option<Bounds> {
        bounding_box(&self.polygon)
    }

    /// Bounds with positive area, or `None` when nothing may be painted.
    pub fn paintable_bounds(&self) -> Option<Bounds> {
        self.bounds().filter(|b| !b.is_degenerate())
    }

    /// Radius hint, falling back to half the region width and then 40.
    pub(crate) fn radius_or(&self, bounds: &Bounds) -> f32 {
        if self.radius_hint > 0.0 {
            self.radius_hint
        } else if bounds.width() > 0.0 {
            bounds.width() * 0.5
        } else {
            40.0
        }
    }
}

/// Mutable state threaded through a pattern run.
pub struct PaintCtx<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub entropy: &'a mut Entropy,
    pub frame: Frame,
}

impl<'a> PaintCtx<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, entropy: &'a mut Entropy, frame: Frame) -> Self {
        Self {
            canvas,
            entropy,
            frame,
        }
    }
}

/// Summary of a single pattern run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintResult {
    /// Primitives handed to the canvas.
    pub drawn: usize,
    /// Candidate placements sampled (packing algorithms only).
    pub attempts: usize,
    /// Candidates rejected for overlap.
    pub rejected: usize,
}

impl PaintResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.drawn == 0
    }
}

impl AddAssign for PaintResult {
    fn add_assign(&mut self, rhs: Self) {
        self.drawn += rhs.drawn;
        self.attempts += rhs.attempts;
        self.rejected += rhs.rejected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_frames_have_no_time() {
        assert_eq!(Frame::still().time(None, 0.1), None);
        assert_eq!(Frame::still().time(Some(2.0), 0.1), Some(2.0));
    }

    #[test]
    fn animated_frames_scale_by_rate() {
        let t = Frame::animated(50).time(None, 0.02).unwrap();
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_regions_are_not_paintable() {
        let line = RegionDeps::new(vec![Vec2::ZERO, Vec2::new(5.0, 0.0), Vec2::new(9.0, 0.0)]);
        assert!(line.bounds().is_some());
        assert!(line.paintable_bounds().is_none());
        assert!(RegionDeps::default().paintable_bounds().is_none());
    }

    #[test]
    fn radius_falls_back_to_half_width() {
        let deps = RegionDeps::rect(Bounds::from_rect(Vec2::ZERO, Vec2::new(60.0, 10.0)));
        let bb = deps.bounds().unwrap();
        assert_eq!(deps.radius_or(&bb), 30.0);
        assert_eq!(deps.clone().with_radius_hint(12.0).radius_or(&bb), 12.0);
    }
}
