//! Base (volva) outline: a domed bulb with a sagging chin underneath.
use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{clamp_or, lerp, Bounds, Path};
use crate::color::{Hsba, HsbaSpec};
use crate::pattern::Pattern;

const DEFAULT_COLOR: Hsba = Hsba {
    h: 35.0,
    s: 20.0,
    b: 85.0,
    a: 100.0,
};

/// Base description. Every field is optional; bases are hidden unless `visible` is set.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BaseSpec {
    pub visible: Option<bool>,
    /// Nominal radius; `w` and `h` default to multiples of it.
    pub r: Option<f32>,
    pub w: Option<f32>,
    pub h: Option<f32>,
    pub offset_y: Option<f32>,
    pub base_color: Option<HsbaSpec>,
    pub bottom_radius: Option<f32>,
    pub bottom_sag: Option<f32>,
    /// Accepted for compatibility; has no effect on the outline.
    pub bottom_tight: Option<f32>,
    pub side_bulge: Option<f32>,
    pub top_round: Option<f32>,
    pub pattern: Option<Pattern>,
}

impl BaseSpec {
    /// Fields set in `over` replace ours; the pattern is replaced whole.
    pub fn merged(&self, over: &BaseSpec) -> BaseSpec {
        BaseSpec {
            visible: over.visible.or(self.visible),
            r: over.r.or(self.r),
            w: over.w.or(self.w),
            h: over.h.or(self.h),
            offset_y: over.offset_y.or(self.offset_y),
            base_color: over.base_color.or(self.base_color),
            bottom_radius: over.bottom_radius.or(self.bottom_radius),
            bottom_sag: over.bottom_sag.or(self.bottom_sag),
            bottom_tight: over.bottom_tight.or(self.bottom_tight),
            side_bulge: over.side_bulge.or(self.side_bulge),
            top_round: over.top_round.or(self.top_round),
            pattern: over.pattern.or(self.pattern),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(false)
    }

    pub fn pattern_or_default(&self) -> Pattern {
        self.pattern.unwrap_or(Pattern::None)
    }
}

/// Resolved base geometry in the base's local frame (bulb centered on the origin).
#[derive(Clone, Debug)]
pub struct BaseGeometry {
    pub width: f32,
    pub height: f32,
    pub offset_y: f32,
    pub color: Hsba,
    pub accent1: Hsba,
    pub accent2: Hsba,
    /// Lowest point of the chin; origin for track patterns.
    pub chin_center: Vec2,
    pub path: Path,
    /// `(-w/2, -h/2)` to `(w/2, h/2)`.
    pub region: Bounds,
}

impl BaseGeometry {
    pub fn radius_hint(&self) -> f32 {
        self.width * 0.5
    }
}

/// Resolves a base spec. Bases draw no randomness.
pub fn resolve(spec: &BaseSpec) -> BaseGeometry {
    let r = spec.r.unwrap_or(28.0).max(0.0);
    let width = spec.w.unwrap_or(r * 2.4).max(0.0);
    let height = spec.h.unwrap_or(r * 0.9).max(0.0);
    let offset_y = spec.offset_y.unwrap_or(140.0);

    let base = spec.base_color.unwrap_or_default();
    let color = base.or(DEFAULT_COLOR);
    // Accents derive from the configured channels, not the clamped body color.
    let (h, s, b, a) = (
        base.h.unwrap_or(DEFAULT_COLOR.h),
        base.s.unwrap_or(DEFAULT_COLOR.s),
        base.b.unwrap_or(DEFAULT_COLOR.b),
        base.a.unwrap_or(DEFAULT_COLOR.a),
    );
    let accent1 = Hsba::with_alpha(h, s + 15.0, (b + 5.0).min(100.0), a);
    let accent2 = Hsba::with_alpha(h + 40.0, s + 10.0, (b + 10.0).min(100.0), a);

    let shape = Shape {
        width,
        height,
        bottom_radius: clamp_or(spec.bottom_radius.unwrap_or(16.0), 0.0, 80.0),
        sag: clamp_or(spec.bottom_sag.unwrap_or(0.12), 0.0, 0.6),
        side_bulge: clamp_or(spec.side_bulge.unwrap_or(0.66), 0.35, 0.85),
        top_round: clamp_or(spec.top_round.unwrap_or(0.96), 0.70, 0.98),
    };
    let (path, chin_center) = shape.outline();

    BaseGeometry {
        width,
        height,
        offset_y,
        color,
        accent1,
        accent2,
        chin_center,
        path,
        region: Bounds::from_rect(
            Vec2::new(-width / 2.0, -height / 2.0),
            Vec2::new(width, height),
        ),
    }
}

struct Shape {
    width: f32,
    height: f32,
    bottom_radius: f32,
    sag: f32,
    side_bulge: f32,
    top_round: f32,
}

impl Shape {
    fn outline(&self) -> (Path, Vec2) {
        let (w, h) = (self.width, self.height);
        let r = self.bottom_radius;

        let top_y = -h / 2.0;
        let dome_y = lerp(top_y, 0.0, 1.0 - self.top_round);
        let wide_y = top_y + h * 0.56;
        let base_y = h / 2.0;

        let side_x = w / 2.0;
        let ctrl_x = side_x * self.side_bulge;
        let foot_x = w * 0.44;

        let chin_drop = h * self.sag;
        let chin_y = base_y + chin_drop;
        let mid_ctrl_y = base_y + chin_drop * 0.4;
        let chin = Vec2::new(0.0, chin_y);

        let mut path = Path::new();
        path.move_to(Vec2::new(-foot_x, base_y - r))
            .cubic_to(
                Vec2::new(-foot_x, mid_ctrl_y),
                Vec2::new(-foot_x * 0.3, chin_y),
                chin,
            )
            .cubic_to(
                Vec2::new(foot_x * 0.3, chin_y),
                Vec2::new(foot_x, mid_ctrl_y),
                Vec2::new(foot_x, base_y - r),
            )
            .cubic_to(
                Vec2::new(side_x, base_y - h * 0.02),
                Vec2::new(side_x, wide_y),
                Vec2::new(side_x * 0.96, wide_y - h * 0.08),
            )
            .cubic_to(
                Vec2::new(side_x * 0.86, dome_y),
                Vec2::new(ctrl_x, top_y),
                Vec2::new(0.0, top_y),
            )
            .cubic_to(
                Vec2::new(-ctrl_x, top_y),
                Vec2::new(-side_x * 0.86, dome_y),
                Vec2::new(-side_x * 0.96, wide_y - h * 0.08),
            )
            .cubic_to(
                Vec2::new(-side_x, wide_y),
                Vec2::new(-side_x, base_y - h * 0.02),
                Vec2::new(-foot_x, base_y - r),
            )
            .close();
        (path, chin)
    }
}
