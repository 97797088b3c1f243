//! Body parts: a spec, its cached geometry and the pattern painted inside it.
//!
//! A [`Part`] starts out unbuilt. [`Part::build`] resolves the spec once and
//! caches the result; later calls return the cached geometry. Drawing fills
//! the outline, strokes it when configured, then paints the pattern clipped
//! to the outline.
use glam::Vec2;
use rand::Rng as RngCore;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::canvas::{scoped, with_clip, Canvas, Stroke};
use crate::color::Hsba;
use crate::geometry::base::{self, BaseGeometry, BaseSpec};
use crate::geometry::cap::{self, CapGeometry, CapSpec};
use crate::geometry::stem::{self, StemGeometry, StemSpec};
use crate::geometry::{Bounds, Path};
use crate::pattern::{Frame, PaintCtx, PaintResult, Pattern, RegionDeps};
use crate::random::Entropy;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartKind {
    Cap,
    Stem,
    Base,
}

impl PartKind {
    /// Back-to-front drawing order.
    pub const DRAW_ORDER: [PartKind; 3] = [PartKind::Base, PartKind::Stem, PartKind::Cap];
}

/// Unresolved description of one part.
#[derive(Clone, Debug, PartialEq)]
pub enum PartSpec {
    Cap(CapSpec),
    Stem(StemSpec),
    Base(BaseSpec),
}

impl PartSpec {
    pub fn kind(&self) -> PartKind {
        match self {
            PartSpec::Cap(_) => PartKind::Cap,
            PartSpec::Stem(_) => PartKind::Stem,
            PartSpec::Base(_) => PartKind::Base,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            PartSpec::Cap(s) => s.is_visible(),
            PartSpec::Stem(s) => s.is_visible(),
            PartSpec::Base(s) => s.is_visible(),
        }
    }

    pub fn pattern(&self) -> Pattern {
        match self {
            PartSpec::Cap(s) => s.pattern_or_default(),
            PartSpec::Stem(s) => s.pattern_or_default(),
            PartSpec::Base(s) => s.pattern_or_default(),
        }
    }
}

/// Resolved outline of one part, in the part's local frame.
#[derive(Clone, Debug)]
pub enum PartGeometry {
    Cap(CapGeometry),
    Stem(StemGeometry),
    Base(BaseGeometry),
}

impl PartGeometry {
    /// Only caps consume randomness.
    pub fn resolve(spec: &PartSpec, rng: &mut dyn RngCore) -> Self {
        match spec {
            PartSpec::Cap(s) => PartGeometry::Cap(cap::resolve(s, rng)),
            PartSpec::Stem(s) => PartGeometry::Stem(stem::resolve(s)),
            PartSpec::Base(s) => PartGeometry::Base(base::resolve(s)),
        }
    }

    pub fn kind(&self) -> PartKind {
        match self {
            PartGeometry::Cap(_) => PartKind::Cap,
            PartGeometry::Stem(_) => PartKind::Stem,
            PartGeometry::Base(_) => PartKind::Base,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            PartGeometry::Cap(g) => &g.path,
            PartGeometry::Stem(g) => &g.path,
            PartGeometry::Base(g) => &g.path,
        }
    }

    pub fn color(&self) -> Hsba {
        match self {
            PartGeometry::Cap(g) => g.color,
            PartGeometry::Stem(g) => g.color,
            PartGeometry::Base(g) => g.color,
        }
    }

    pub fn stroke(&self) -> Option<Stroke> {
        match self {
            PartGeometry::Stem(g) => g.stroke,
            _ => None,
        }
    }

    /// Vertical shift applied before the outline is drawn.
    pub fn local_offset(&self) -> Vec2 {
        match self {
            PartGeometry::Cap(_) => Vec2::ZERO,
            PartGeometry::Stem(g) => Vec2::new(0.0, g.offset_y),
            PartGeometry::Base(g) => Vec2::new(0.0, g.offset_y),
        }
    }

    /// Bounds of the outline, before [`PartGeometry::local_offset`].
    pub fn bounds(&self) -> Bounds {
        match self {
            PartGeometry::Cap(g) => g.bounds,
            PartGeometry::Stem(g) => g.path.bounds().unwrap_or(g.region),
            PartGeometry::Base(g) => g.path.bounds().unwrap_or(g.region),
        }
    }

    /// Dependency bundle handed to the part's pattern.
    pub fn region_deps(&self) -> RegionDeps {
        match self {
            PartGeometry::Cap(g) => RegionDeps::new(g.outline.clone())
                .with_top_curve(g.top_curve.clone())
                .with_radius_hint(g.radius_x)
                .with_accents(g.accent1, g.accent2),
            PartGeometry::Stem(g) => RegionDeps::rect(g.region).with_radius_hint(g.radius_hint()),
            PartGeometry::Base(g) => RegionDeps::rect(g.region)
                .with_radius_hint(g.radius_hint())
                .with_accents(g.accent1, g.accent2)
                .with_center(g.chin_center),
        }
    }
}

/// One body part of a mushroom.
#[derive(Clone, Debug)]
pub struct Part {
    spec: PartSpec,
    pattern: Pattern,
    geometry: Option<PartGeometry>,
}

impl Part {
    pub fn new(spec: PartSpec) -> Self {
        let pattern = spec.pattern();
        Self {
            spec,
            pattern,
            geometry: None,
        }
    }

    pub fn kind(&self) -> PartKind {
        self.spec.kind()
    }

    pub fn spec(&self) -> &PartSpec {
        &self.spec
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Replaces the pattern; cached geometry is kept.
    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.pattern = pattern;
    }

    pub fn is_visible(&self) -> bool {
        self.spec.is_visible()
    }

    pub fn is_built(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn geometry(&self) -> Option<&PartGeometry> {
        self.geometry.as_ref()
    }

    /// Resolves the geometry on first call; later calls return the cache and
    /// leave `rng` untouched.
    pub fn build(&mut self, rng: &mut dyn RngCore) -> &PartGeometry {
        let spec = &self.spec;
        self.geometry.get_or_insert_with(|| {
            debug!("Resolving {:?} geometry.", spec.kind());
            PartGeometry::resolve(spec, rng)
        })
    }

    /// Draws the part in its local frame. Hidden or unbuilt parts draw nothing.
    pub fn draw(&self, canvas: &mut dyn Canvas, entropy: &mut Entropy, frame: Frame) -> PaintResult {
        if !self.is_visible() {
            return PaintResult::new();
        }
        let Some(geometry) = &self.geometry else {
            debug!("Skipping draw of unbuilt {:?}.", self.kind());
            return PaintResult::new();
        };

        let mut canvas = scoped(canvas);
        let offset = geometry.local_offset();
        if offset != Vec2::ZERO {
            canvas.translate(offset);
        }

        let path = geometry.path();
        canvas.fill_path(path, geometry.color());
        if let Some(stroke) = geometry.stroke() {
            canvas.stroke_path(path, stroke);
        }

        let deps = geometry.region_deps();
        with_clip(&mut *canvas, path, |c| {
            let mut ctx = PaintCtx::new(c, entropy, frame);
            self.pattern.paint(&mut ctx, &deps)
        })
    }

    /// `true` if `local` (in the part's placement frame) lies inside the cached bounds.
    pub fn contains(&self, local: Vec2) -> bool {
        self.is_visible()
            && self
                .geometry
                .as_ref()
                .is_some_and(|g| g.bounds().contains(local - g.local_offset()))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::color::HsbaSpec;
    use crate::pattern::PatternKind;

    fn stem_part(pattern: Pattern) -> Part {
        Part::new(PartSpec::Stem(StemSpec {
            stroke_width: Some(2.0),
            pattern: Some(pattern),
            ..Default::default()
        }))
    }

    #[test]
    fn geometry_is_built_once() {
        let mut part = Part::new(PartSpec::Cap(CapSpec::default()));
        assert!(!part.is_built());
        let mut rng = StdRng::seed_from_u64(4);
        let first = part.build(&mut rng).bounds();
        let mut other = StdRng::seed_from_u64(99);
        let second = part.build(&mut other).bounds();
        assert_eq!(first, second);
        assert!(part.is_built());
    }

    #[test]
    fn unbuilt_part_draws_nothing() {
        let part = Part::new(PartSpec::Stem(StemSpec::default()));
        let mut canvas = RecordingCanvas::new();
        let mut entropy = Entropy::from_seed(1);
        let result = part.draw(&mut canvas, &mut entropy, Frame::still());
        assert!(canvas.is_empty());
        assert!(result.is_empty());
    }

    #[test]
    fn draw_order_is_fill_stroke_then_clipped_pattern() {
        let mut part = stem_part(Pattern::with_defaults(PatternKind::DotTracks));
        part.build(&mut StdRng::seed_from_u64(1));
        let mut canvas = RecordingCanvas::new();
        let mut entropy = Entropy::from_seed(1);
        let result = part.draw(&mut canvas, &mut entropy, Frame::still());
        assert_eq!(result.drawn, 81);

        let cmds = canvas.commands();
        assert_eq!(cmds[0], DrawCommand::Save);
        assert_eq!(cmds[1], DrawCommand::Translate(Vec2::new(0.0, 60.0)));
        assert!(matches!(cmds[2], DrawCommand::FillPath { .. }));
        assert!(matches!(cmds[3], DrawCommand::StrokePath { .. }));
        assert_eq!(cmds[4], DrawCommand::Save);
        assert!(matches!(cmds[5], DrawCommand::Clip(_)));
        assert_eq!(cmds[cmds.len() - 2], DrawCommand::Restore);
        assert_eq!(cmds[cmds.len() - 1], DrawCommand::Restore);
        assert_eq!(canvas.depth(), 0);
    }

    #[test]
    fn hidden_part_draws_nothing() {
        let mut part = Part::new(PartSpec::Base(BaseSpec::default()));
        part.build(&mut StdRng::seed_from_u64(1));
        assert!(!part.is_visible());
        let mut canvas = RecordingCanvas::new();
        part.draw(&mut canvas, &mut Entropy::from_seed(1), Frame::still());
        assert!(canvas.is_empty());
    }

    #[test]
    fn base_deps_carry_chin_and_accents() {
        let spec = BaseSpec {
            visible: Some(true),
            base_color: Some(HsbaSpec {
                h: Some(50.0),
                s: Some(85.0),
                b: Some(90.0),
                a: None,
            }),
            ..Default::default()
        };
        let geometry = PartGeometry::resolve(&PartSpec::Base(spec), &mut StdRng::seed_from_u64(0));
        let deps = geometry.region_deps();
        let PartGeometry::Base(base) = &geometry else {
            panic!("expected a base");
        };
        assert_eq!(deps.center, Some(base.chin_center));
        assert_eq!(deps.accent1, Some(Hsba::new(50.0, 100.0, 95.0)));
        assert_eq!(deps.accent2, Some(Hsba::new(90.0, 95.0, 100.0)));
        assert_eq!(deps.radius_hint, base.width * 0.5);
    }

    #[test]
    fn contains_accounts_for_the_local_offset() {
        let mut part = stem_part(Pattern::None);
        part.build(&mut StdRng::seed_from_u64(1));
        // Default stem: 160 tall, shifted down by 60.
        assert!(part.contains(Vec2::new(0.0, 100.0)));
        assert!(!part.contains(Vec2::new(0.0, 30.0)));
        assert!(!part.contains(Vec2::new(0.0, 240.0)));
    }

    #[test]
    fn set_pattern_keeps_geometry() {
        let mut part = stem_part(Pattern::None);
        part.build(&mut StdRng::seed_from_u64(1));
        let before = part.geometry().map(PartGeometry::bounds);
        part.set_pattern(Pattern::with_defaults(PatternKind::Voronoi));
        assert_eq!(part.geometry().map(PartGeometry::bounds), before);
        assert_eq!(part.pattern().kind(), PatternKind::Voronoi);
    }
}
