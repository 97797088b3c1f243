//! Drawing surface abstraction.
//!
//! Everything in this crate draws through [`Canvas`], passed explicitly into
//! each draw call. `()` is a no-op canvas; [`RecordingCanvas`] keeps every
//! command for inspection. Raster backends live outside the library.
use std::ops::{Deref, DerefMut};

use glam::Vec2;

use crate::color::Hsba;
use crate::geometry::Path;

/// Outline style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Hsba,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Hsba, width: f32) -> Self {
        Self { color, width }
    }
}

/// A 2D drawing surface with a save/restore transform and clip stack.
///
/// Transforms compose like a canvas context: each call post-multiplies the
/// current transform, so `translate` then `rotate` rotates about the new origin.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, offset: Vec2);
    /// Rotation in radians.
    fn rotate(&mut self, angle: f32);
    /// Uniform scale.
    fn scale(&mut self, factor: f32);

    /// Intersects the current clip with the interior of `path`.
    fn clip(&mut self, path: &Path);

    fn fill_path(&mut self, path: &Path, color: Hsba);
    fn stroke_path(&mut self, path: &Path, stroke: Stroke);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsba);
    /// `size` is the full width and height.
    fn fill_ellipse(&mut self, center: Vec2, size: Vec2, color: Hsba);
    fn fill_polygon(&mut self, points: &[Vec2], color: Hsba, stroke: Option<Stroke>);
}

/// A canvas that discards everything.
impl Canvas for () {
    #[inline]
    fn save(&mut self) {}
    #[inline]
    fn restore(&mut self) {}
    #[inline]
    fn translate(&mut self, _offset: Vec2) {}
    #[inline]
    fn rotate(&mut self, _angle: f32) {}
    #[inline]
    fn scale(&mut self, _factor: f32) {}
    #[inline]
    fn clip(&mut self, _path: &Path) {}
    #[inline]
    fn fill_path(&mut self, _path: &Path, _color: Hsba) {}
    #[inline]
    fn stroke_path(&mut self, _path: &Path, _stroke: Stroke) {}
    #[inline]
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Hsba) {}
    #[inline]
    fn fill_ellipse(&mut self, _center: Vec2, _size: Vec2, _color: Hsba) {}
    #[inline]
    fn fill_polygon(&mut self, _points: &[Vec2], _color: Hsba, _stroke: Option<Stroke>) {}
}

/// Guard returned by [`scoped`]; restores the canvas state when dropped,
/// including during unwinding.
pub struct Scoped<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
}

/// Saves the canvas state and returns a guard that restores it on drop.
pub fn scoped<C: Canvas + ?Sized>(canvas: &mut C) -> Scoped<'_, C> {
    canvas.save();
    Scoped { canvas }
}

impl<C: Canvas + ?Sized> Deref for Scoped<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for Scoped<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for Scoped<'_, C> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}

/// Runs `paint` with drawing clipped to `path`; the previous clip is restored afterwards.
pub fn with_clip<C, R>(canvas: &mut C, path: &Path, paint: impl FnOnce(&mut C) -> R) -> R
where
    C: Canvas + ?Sized,
{
    let mut scope = scoped(canvas);
    scope.clip(path);
    paint(&mut scope)
}

/// A single recorded canvas call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    Scale(f32),
    Clip(Path),
    FillPath {
        path: Path,
        color: Hsba,
    },
    StrokePath {
        path: Path,
        stroke: Stroke,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Hsba,
    },
    Ellipse {
        center: Vec2,
        size: Vec2,
        color: Hsba,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Hsba,
        stroke: Option<Stroke>,
    },
}

impl DrawCommand {
    /// Disks, ellipses and polygons: the shapes pattern algorithms emit.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            DrawCommand::Circle { .. } | DrawCommand::Ellipse { .. } | DrawCommand::Polygon { .. }
        )
    }
}

/// A canvas that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    depth: usize,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn primitives(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| c.is_primitive())
    }

    /// `(center, radius)` of every recorded disk, in draw order.
    pub fn disks(&self) -> Vec<(Vec2, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    /// Current save depth; zero when every `save` was matched by a `restore`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn scale(&mut self, factor: f32) {
        self.commands.push(DrawCommand::Scale(factor));
    }

    fn clip(&mut self, path: &Path) {
        self.commands.push(DrawCommand::Clip(path.clone()));
    }

    fn fill_path(&mut self, path: &Path, color: Hsba) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: Stroke) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, size: Vec2, color: Hsba) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            size,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Hsba, stroke: Option<Stroke>) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
            stroke,
        });
    }
}
