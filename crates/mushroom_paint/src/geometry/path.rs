//! Closed outline paths built from move/line/cubic commands.
use glam::Vec2;

use super::{bounding_box, cubic_point, Bounds};

/// Segments per cubic when a path is flattened for bounds.
const BOUNDS_SEGMENTS: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    CubicTo { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
    Close,
}

/// An ordered list of path commands, in the coordinate frame of its owner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed polygon through `points` in order.
    pub fn from_polygon(points: &[Vec2]) -> Self {
        let mut path = Self {
            commands: Vec::with_capacity(points.len() + 1),
        };
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            path.close();
        }
        path
    }

    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    pub fn cubic_to(&mut self, ctrl1: Vec2, ctrl2: Vec2, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Approximates the path by a polyline, sampling each cubic with `segments` steps.
    pub fn flatten(&self, segments: usize) -> Vec<Vec2> {
        let segments = segments.max(1);
        let mut out = Vec::new();
        let mut current = Vec2::ZERO;
        let mut start = Vec2::ZERO;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    out.push(p);
                    current = p;
                    start = p;
                }
                PathCommand::LineTo(p) => {
                    out.push(p);
                    current = p;
                }
                PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                    for i in 1..=segments {
                        let t = i as f32 / segments as f32;
                        out.push(cubic_point(current, ctrl1, ctrl2, to, t));
                    }
                    current = to;
                }
                PathCommand::Close => current = start,
            }
        }
        out
    }

    /// Bounds of the flattened outline. `None` for an empty path.
    pub fn bounds(&self) -> Option<Bounds> {
        bounding_box(&self.flatten(BOUNDS_SEGMENTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_path_closes() {
        let pts = [Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(4.0, 3.0)];
        let path = Path::from_polygon(&pts);
        assert_eq!(path.commands().len(), 4);
        assert_eq!(path.commands()[3], PathCommand::Close);
        assert_eq!(path.flatten(8), pts.to_vec());
    }

    #[test]
    fn empty_polygon_gives_empty_path() {
        let path = Path::from_polygon(&[]);
        assert!(path.is_empty());
        assert!(path.bounds().is_none());
    }

    #[test]
    fn cubic_flatten_ends_on_target() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO)
            .cubic_to(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0), Vec2::new(10.0, 0.0));
        let pts = path.flatten(10);
        assert_eq!(pts.len(), 11);
        assert!((pts[10] - Vec2::new(10.0, 0.0)).length() < 1e-5);
        let bb = path.bounds().unwrap();
        assert!(bb.max.y > 7.0 && bb.max.y <= 7.5 + 1e-3);
    }
}
