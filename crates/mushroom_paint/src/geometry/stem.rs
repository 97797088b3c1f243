//! Stem outline: elliptical top and bottom caps joined by bulging sides.
use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{clamp_or, Bounds, Path};
use crate::canvas::Stroke;
use crate::color::{Hsba, HsbaSpec};
use crate::pattern::Pattern;

/// Cubic handle length for a quarter ellipse.
pub const KAPPA: f32 = 0.552_284_8;

const DEFAULT_COLOR: Hsba = Hsba {
    h: 35.0,
    s: 30.0,
    b: 92.0,
    a: 100.0,
};

const DEFAULT_STROKE_COLOR: Hsba = Hsba {
    h: 0.0,
    s: 0.0,
    b: 20.0,
    a: 100.0,
};

/// Stem description. Every field is optional.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StemSpec {
    pub visible: Option<bool>,
    pub h: Option<f32>,
    /// Fallback for `top_w`.
    pub w: Option<f32>,
    pub top_w: Option<f32>,
    pub bottom_w: Option<f32>,
    pub ry_top: Option<f32>,
    pub ry_bottom: Option<f32>,
    pub bulge: Option<f32>,
    pub offset_y: Option<f32>,
    pub base_color: Option<HsbaSpec>,
    /// Zero or absent disables the outline stroke.
    pub stroke_width: Option<f32>,
    pub stroke_color: Option<HsbaSpec>,
    pub pattern: Option<Pattern>,
}

impl StemSpec {
    /// Fields set in `over` replace ours; the pattern is replaced whole.
    pub fn merged(&self, over: &StemSpec) -> StemSpec {
        StemSpec {
            visible: over.visible.or(self.visible),
            h: over.h.or(self.h),
            w: over.w.or(self.w),
            top_w: over.top_w.or(self.top_w),
            bottom_w: over.bottom_w.or(self.bottom_w),
            ry_top: over.ry_top.or(self.ry_top),
            ry_bottom: over.ry_bottom.or(self.ry_bottom),
            bulge: over.bulge.or(self.bulge),
            offset_y: over.offset_y.or(self.offset_y),
            base_color: over.base_color.or(self.base_color),
            stroke_width: over.stroke_width.or(self.stroke_width),
            stroke_color: over.stroke_color.or(self.stroke_color),
            pattern: over.pattern.or(self.pattern),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    pub fn pattern_or_default(&self) -> Pattern {
        self.pattern.unwrap_or(Pattern::None)
    }
}

/// Resolved stem geometry in the stem's local frame (top center at the origin).
#[derive(Clone, Debug)]
pub struct StemGeometry {
    pub height: f32,
    pub top_w: f32,
    pub bottom_w: f32,
    pub ry_top: f32,
    pub ry_bottom: f32,
    pub bulge: f32,
    pub offset_y: f32,
    pub color: Hsba,
    pub stroke: Option<Stroke>,
    pub path: Path,
    /// Rectangle patterns are laid out in; `(-bottom_w / 2, 0)` to `(bottom_w / 2, h)`.
    pub region: Bounds,
}

impl StemGeometry {
    /// Pattern radius hint.
    pub fn radius_hint(&self) -> f32 {
        self.bottom_w * 0.5
    }
}

/// Resolves a stem spec. Stems draw no randomness.
pub fn resolve(spec: &StemSpec) -> StemGeometry {
    let height = spec.h.unwrap_or(160.0).max(0.0);
    let top_w = spec.top_w.or(spec.w).unwrap_or(36.0).max(0.0);
    let bottom_w = spec.bottom_w.unwrap_or(top_w * 1.4).max(0.0);
    let ry_top = spec.ry_top.unwrap_or(height * 0.18).max(0.0);
    let ry_bottom = spec.ry_bottom.unwrap_or(height * 0.22).max(0.0);
    let bulge = spec.bulge.map_or(0.22, |b| clamp_or(b, 0.08, 0.40));
    let offset_y = spec.offset_y.unwrap_or(60.0);
    let color = spec.base_color.unwrap_or_default().or(DEFAULT_COLOR);

    let stroke = spec
        .stroke_width
        .filter(|w| *w > 0.0)
        .map(|width| {
            let color = spec
                .stroke_color
                .map_or(DEFAULT_STROKE_COLOR, |c| c.or(DEFAULT_STROKE_COLOR));
            Stroke::new(color, width)
        });

    let path = outline(height, top_w, bottom_w, ry_top, ry_bottom, bulge);
    let region = Bounds::from_rect(
        Vec2::new(-bottom_w / 2.0, 0.0),
        Vec2::new(bottom_w, height),
    );

    StemGeometry {
        height,
        top_w,
        bottom_w,
        ry_top,
        ry_bottom,
        bulge,
        offset_y,
        color,
        stroke,
        path,
        region,
    }
}

fn outline(h: f32, top_w: f32, bottom_w: f32, ry_top: f32, ry_bottom: f32, bulge: f32) -> Path {
    let half_t = top_w / 2.0;
    let half_b = bottom_w / 2.0;
    let top_c = ry_top;
    let bot_c = h - ry_bottom;

    let len = bot_c - top_c;
    let k1 = len * (0.44 + bulge * 0.18);
    let k2 = len * (0.46 + bulge * 0.25);

    let left_top = Vec2::new(-half_t, top_c);
    let right_top = Vec2::new(half_t, top_c);
    let left_bottom = Vec2::new(-half_b, bot_c);
    let right_bottom = Vec2::new(half_b, bot_c);

    let mut path = Path::new();
    path.move_to(left_top)
        .cubic_to(
            Vec2::new(-half_t, top_c - KAPPA * ry_top),
            Vec2::new(-KAPPA * half_t, top_c - ry_top),
            Vec2::new(0.0, top_c - ry_top),
        )
        .cubic_to(
            Vec2::new(KAPPA * half_t, top_c - ry_top),
            Vec2::new(half_t, top_c - KAPPA * ry_top),
            right_top,
        )
        .cubic_to(
            Vec2::new(half_t, top_c + k1),
            Vec2::new(half_b, bot_c - k2),
            right_bottom,
        )
        .cubic_to(
            Vec2::new(half_b, bot_c + KAPPA * ry_bottom),
            Vec2::new(KAPPA * half_b, bot_c + ry_bottom),
            Vec2::new(0.0, bot_c + ry_bottom),
        )
        .cubic_to(
            Vec2::new(-KAPPA * half_b, bot_c + ry_bottom),
            Vec2::new(-half_b, bot_c + KAPPA * ry_bottom),
            left_bottom,
        )
        .cubic_to(
            Vec2::new(-half_b, bot_c - k2),
            Vec2::new(-half_t, top_c + k1),
            left_top,
        )
        .close();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathCommand;

    #[test]
    fn defaults_follow_the_width_chain() {
        let stem = resolve(&StemSpec::default());
        assert_eq!(stem.height, 160.0);
        assert_eq!(stem.top_w, 36.0);
        assert!((stem.bottom_w - 50.4).abs() < 1e-4);
        assert!((stem.ry_top - 28.8).abs() < 1e-4);
        assert_eq!(stem.bulge, 0.22);
        assert_eq!(stem.offset_y, 60.0);
        assert!(stem.stroke.is_none());
        assert!((stem.radius_hint() - 25.2).abs() < 1e-4);
    }

    #[test]
    fn bulge_is_clamped() {
        let spec = StemSpec {
            bulge: Some(2.0),
            ..Default::default()
        };
        assert_eq!(resolve(&spec).bulge, 0.40);
    }

    #[test]
    fn outline_is_six_closed_cubics() {
        let stem = resolve(&StemSpec::default());
        let cmds = stem.path.commands();
        assert_eq!(cmds.len(), 8);
        assert!(matches!(cmds[0], PathCommand::MoveTo(_)));
        assert_eq!(
            cmds.iter()
                .filter(|c| matches!(c, PathCommand::CubicTo { .. }))
                .count(),
            6
        );
        assert_eq!(cmds[7], PathCommand::Close);
    }

    #[test]
    fn outline_fits_its_region_vertically() {
        let spec = StemSpec {
            h: Some(480.0),
            top_w: Some(80.0),
            bottom_w: Some(150.0),
            ry_top: Some(20.0),
            ry_bottom: Some(60.0),
            ..Default::default()
        };
        let stem = resolve(&spec);
        let bb = stem.path.bounds().unwrap();
        assert!(bb.min.y.abs() < 1e-3);
        assert!((bb.max.y - 480.0).abs() < 1e-3);
        assert_eq!(stem.region.width(), 150.0);
    }

    #[test]
    fn stroke_falls_back_to_dark_outline() {
        let spec = StemSpec {
            stroke_width: Some(5.0),
            ..Default::default()
        };
        let stroke = resolve(&spec).stroke.unwrap();
        assert_eq!(stroke.width, 5.0);
        assert_eq!(stroke.color, Hsba::new(0.0, 0.0, 20.0));
    }
}
