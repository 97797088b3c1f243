//! Mushroom cap outline: two sampled cubic arches with windowed edge waves
//! and an optional notch on the underside.
use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng as RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{bounding_box, cubic_point, lerp, Bounds, Path};
use crate::color::{Hsba, HsbaSpec};
use crate::pattern::Pattern;
use crate::random::{chance, rand01, rand_range};

/// Samples per arch (the outline holds `2 * (STEPS + 1)` points).
pub const STEPS: usize = 220;

const NOTCH_PROBABILITY: f32 = 0.55;
const NOTCH_WINDOW_POWER: f32 = 1.2;

/// Edge wave parameters; missing values are drawn at random.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaveSpec {
    pub amp_top: Option<f32>,
    pub amp_bottom: Option<f32>,
    pub freq_top: Option<f32>,
    pub freq_bottom: Option<f32>,
    pub phase_top: Option<f32>,
    pub phase_bottom: Option<f32>,
}

/// Underside notch parameters; `s0` and `width` are fractions of the arch.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NotchSpec {
    pub enabled: Option<bool>,
    pub s0: Option<f32>,
    pub width: Option<f32>,
    pub depth: Option<f32>,
}

/// Cap description. Every field is optional.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapSpec {
    pub visible: Option<bool>,
    pub w: Option<f32>,
    pub arch_top: Option<f32>,
    pub arch_bottom: Option<f32>,
    pub wave: Option<WaveSpec>,
    pub notch: Option<NotchSpec>,
    pub base_color: Option<HsbaSpec>,
    pub pattern: Option<Pattern>,
}

impl CapSpec {
    /// Fields set in `over` replace ours; wave, notch and pattern are replaced whole.
    pub fn merged(&self, over: &CapSpec) -> CapSpec {
        CapSpec {
            visible: over.visible.or(self.visible),
            w: over.w.or(self.w),
            arch_top: over.arch_top.or(self.arch_top),
            arch_bottom: over.arch_bottom.or(self.arch_bottom),
            wave: over.wave.or(self.wave),
            notch: over.notch.or(self.notch),
            base_color: over.base_color.or(self.base_color),
            pattern: over.pattern.or(self.pattern),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    /// Noisy rings unless configured otherwise.
    pub fn pattern_or_default(&self) -> Pattern {
        self.pattern
            .unwrap_or_else(|| Pattern::NoisyRings(Default::default()))
    }
}

/// Fully resolved cap geometry, cached by its owner.
#[derive(Clone, Debug)]
pub struct CapGeometry {
    /// Top arch left to right followed by the bottom arch right to left.
    pub outline: Vec<Vec2>,
    /// The top arch alone; noisy rings center on its midpoint.
    pub top_curve: Vec<Vec2>,
    pub path: Path,
    /// Half of the cap width.
    pub radius_x: f32,
    pub color: Hsba,
    pub accent1: Hsba,
    pub accent2: Hsba,
    pub bounds: Bounds,
}

/// Resolves a cap spec, drawing every missing value from `rng`.
pub fn resolve(spec: &CapSpec, rng: &mut dyn RngCore) -> CapGeometry {
    let width = spec
        .w
        .unwrap_or_else(|| rand_range(rng, 280.0, 420.0))
        .max(0.0);
    let rx = width / 2.0;
    let arch_top = spec.arch_top.unwrap_or_else(|| rand_range(rng, 100.0, 160.0));
    let arch_bottom = spec
        .arch_bottom
        .unwrap_or_else(|| rand_range(rng, 30.0, 75.0));
    let handle = rand_range(rng, 0.30, 0.42);

    let left = Vec2::new(-rx, 0.0);
    let right = Vec2::new(rx, 0.0);
    let c1_bottom = Vec2::new(lerp(left.x, right.x, handle), arch_bottom);
    let c2_bottom = Vec2::new(lerp(left.x, right.x, 1.0 - handle), arch_bottom);
    let c1_top = Vec2::new(2.0 * left.x - c1_bottom.x, -arch_top);
    let c2_top = Vec2::new(2.0 * right.x - c2_bottom.x, -arch_top);

    let wave = spec.wave.unwrap_or_default();
    let amp_top = wave.amp_top.unwrap_or_else(|| rand_range(rng, 5.0, 10.0));
    let amp_bottom = wave.amp_bottom.unwrap_or_else(|| rand_range(rng, 2.0, 6.0));
    let freq_top = wave.freq_top.unwrap_or_else(|| rand_range(rng, 1.1, 2.0));
    let freq_bottom = wave.freq_bottom.unwrap_or_else(|| rand_range(rng, 0.8, 1.6));
    let phase_top = wave.phase_top.unwrap_or_else(|| rand01(rng) * TAU);
    let phase_bottom = wave.phase_bottom.unwrap_or_else(|| rand01(rng) * TAU);

    let notch = spec.notch.unwrap_or_default();
    let notch_enabled = notch
        .enabled
        .unwrap_or_else(|| chance(rng, NOTCH_PROBABILITY));
    let notch_s0 = notch.s0.unwrap_or_else(|| rand_range(rng, 0.28, 0.72));
    let notch_width = notch.width.unwrap_or_else(|| rand_range(rng, 0.04, 0.09));
    let notch_depth = notch.depth.unwrap_or_else(|| rand_range(rng, 8.0, 18.0));

    let mut top_curve = Vec::with_capacity(STEPS + 1);
    for i in 0..=STEPS {
        let s = i as f32 / STEPS as f32;
        let mut p = cubic_point(left, c1_top, c2_top, right, s);
        p.y += amp_top * (PI * s).sin() * (TAU * freq_top * s + phase_top).sin();
        top_curve.push(p);
    }

    let mut outline = Vec::with_capacity(2 * (STEPS + 1));
    outline.extend_from_slice(&top_curve);
    for i in 0..=STEPS {
        let s = i as f32 / STEPS as f32;
        let mut p = cubic_point(right, c2_bottom, c1_bottom, left, s);
        p.y -= amp_bottom * (PI * s).sin() * (TAU * freq_bottom * s + phase_bottom).sin();
        if notch_enabled && notch_width > 0.0 {
            let ds = (s - notch_s0).abs();
            if ds < notch_width {
                let window = 0.5 * (1.0 + (PI * ds / notch_width).cos());
                p.y -= notch_depth * window.powf(NOTCH_WINDOW_POWER);
            }
        }
        outline.push(p);
    }

    let base = spec.base_color.unwrap_or_default();
    let hue = base.h.unwrap_or_else(|| rand01(rng) * 360.0);
    let color = Hsba::with_alpha(
        hue,
        base.s.unwrap_or_else(|| rand_range(rng, 55.0, 80.0)),
        base.b.unwrap_or_else(|| rand_range(rng, 60.0, 85.0)),
        base.a.unwrap_or(100.0),
    );
    let accent1 = Hsba::new(
        hue + rand_range(rng, 20.0, 60.0),
        rand_range(rng, 55.0, 90.0),
        rand_range(rng, 60.0, 95.0),
    );
    let accent2 = Hsba::new(
        hue + rand_range(rng, 180.0, 240.0),
        rand_range(rng, 40.0, 75.0),
        rand_range(rng, 60.0, 95.0),
    );

    let bounds = bounding_box(&outline).unwrap_or(Bounds::new(Vec2::ZERO, Vec2::ZERO));
    let path = Path::from_polygon(&outline);

    CapGeometry {
        outline,
        top_curve,
        path,
        radius_x: rx,
        color,
        accent1,
        accent2,
        bounds,
    }
}
