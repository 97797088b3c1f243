//! Outline geometry: bounds, paths and the parametric body-part builders.
//!
//! - [`Bounds`] / [`bounding_box`]: axis-aligned bounds of a point set
//! - [`path::Path`]: move/line/cubic/close command lists
//! - [`cap`], [`stem`], [`base`]: resolve part specs into cached outlines
use glam::Vec2;

pub mod base;
pub mod cap;
pub mod path;
pub mod stem;

pub use path::{Path, PathCommand};

/// Axis-aligned bounding rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle from its top-left corner and size.
    pub fn from_rect(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// `true` when the rectangle has no positive area (or is not finite).
    /// Pattern algorithms paint nothing into degenerate bounds.
    pub fn is_degenerate(&self) -> bool {
        let w = self.width();
        let h = self.height();
        !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}

/// Bounds of a point set in a single linear scan. `None` for an empty slice.
pub fn bounding_box(points: &[Vec2]) -> Option<Bounds> {
    let (first, rest) = points.split_first()?;
    let mut min = *first;
    let mut max = *first;
    for p in rest {
        min = min.min(*p);
        max = max.max(*p);
    }
    Some(Bounds { min, max })
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly re-maps `v` from `[in_min, in_max]` to `[out_min, out_max]` without clamping.
#[inline]
pub fn map_range(v: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    out_min + (v - in_min) / span * (out_max - out_min)
}

/// Point on a cubic Bézier at parameter `t`.
#[inline]
pub fn cubic_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let mt = 1.0 - t;
    p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t)
}

/// Clamps to `[lo, hi]`, mapping NaN to `lo`.
#[inline]
pub(crate) fn clamp_or(v: f32, lo: f32, hi: f32) -> f32 {
    if v.is_nan() {
        lo
    } else {
        v.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_of_empty_is_none() {
        assert!(bounding_box(&[]).is_none());
    }

    #[test]
    fn bounding_box_covers_all_points() {
        let pts = [
            Vec2::new(3.0, -1.0),
            Vec2::new(-2.0, 4.0),
            Vec2::new(0.5, 0.5),
        ];
        let bb = bounding_box(&pts).unwrap();
        assert_eq!(bb.min, Vec2::new(-2.0, -1.0));
        assert_eq!(bb.max, Vec2::new(3.0, 4.0));
        assert!(pts.iter().all(|p| bb.contains(*p)));
    }

    #[test]
    fn degenerate_bounds_detected() {
        let line = bounding_box(&[Vec2::ZERO, Vec2::new(10.0, 0.0)]).unwrap();
        assert!(line.is_degenerate());
        let point = bounding_box(&[Vec2::ONE]).unwrap();
        assert!(point.is_degenerate());
        let square = Bounds::from_rect(Vec2::ZERO, Vec2::splat(100.0));
        assert!(!square.is_degenerate());
    }

    #[test]
    fn map_range_handles_zero_span() {
        assert_eq!(map_range(0.5, 0.0, 1.0, -10.0, 10.0), 0.0);
        assert_eq!(map_range(3.0, 2.0, 2.0, 7.0, 9.0), 7.0);
    }

    #[test]
    fn cubic_point_hits_endpoints() {
        let p0 = Vec2::new(0.0, 0.0);
        let p3 = Vec2::new(10.0, 5.0);
        let a = cubic_point(p0, Vec2::new(2.0, 8.0), Vec2::new(7.0, -3.0), p3, 0.0);
        let b = cubic_point(p0, Vec2::new(2.0, 8.0), Vec2::new(7.0, -3.0), p3, 1.0);
        assert!((a - p0).length() < 1e-6);
        assert!((b - p3).length() < 1e-5);
    }
}
