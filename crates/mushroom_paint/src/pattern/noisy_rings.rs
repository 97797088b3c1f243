//! A central ellipse ringed by concentric bands of noise-sized disks.
//!
//! Each band is filled by walking around the circle: the angle advances by the
//! arc length the last disk occupied, so disks sit edge to edge rather than at
//! fixed angular spacing. The walk stops early when the next disk would collide
//! with the first one across the seam.
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng as RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{PaintCtx, PaintResult, RegionDeps};
use crate::color::Hsba;
use crate::geometry::lerp;
use crate::random::{rand01, rand_range};

pub const TIME_RATE: f32 = 0.02;

/// Smallest angular step, bounding the walk for huge rings or zero-size disks.
pub const MIN_STEP: f32 = 0.004;
const STEP_SLACK: f32 = 1.04;
/// Noise-space distance between consecutive rings.
const RING_NOISE_STRIDE: f64 = 7777.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoisyRingsOptions {
    /// Defaults to the midpoint of the region's top curve.
    pub center: Option<Vec2>,
    /// Defaults to a random color.
    pub ring_color: Option<Hsba>,
    /// Central ellipse width range, default (60, 160).
    pub ell_w_range: Option<(f32, f32)>,
    /// Height/width ratio range, default (0.3, 0.65).
    pub ell_aspect_range: Option<(f32, f32)>,
    /// Ring count range (floored), default (5, 9).
    pub ring_count_range: Option<(f32, f32)>,
    /// Default 22.
    pub ring_gap: Option<f32>,
    /// Arc length between neighbouring disks, default 6.
    pub gap_arc: Option<f32>,
    /// Innermost ring diameter bounds (scaled by 1.25 / 1.10), default 30 / 16.
    pub inner_max: Option<f32>,
    pub inner_min: Option<f32>,
    /// Outermost ring diameter bounds (scaled by 0.60 / 0.45), default 12 / 6.
    pub outer_max: Option<f32>,
    pub outer_min: Option<f32>,
    /// Defaults to a random value in [0.6, 1.2).
    pub noise_freq: Option<f32>,
    pub time: Option<f32>,
}

/// One disk on a ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingDisk {
    pub angle: f32,
    pub diameter: f32,
}

/// Walks a ring of `radius` from angle 0, sizing each disk by `sample(angle)`
/// (expected in [0, 1]) between `min_d` and `max_d`. Every returned angle is
/// below one full turn.
pub fn walk_ring(
    radius: f32,
    min_d: f32,
    max_d: f32,
    gap_arc: f32,
    mut sample: impl FnMut(f32) -> f32,
) -> Vec<RingDisk> {
    let mut disks = Vec::new();
    if !(radius.is_finite() && radius > 0.0) {
        return disks;
    }

    let mut theta = 0.0_f32;
    let mut first: Option<f32> = None;
    while theta < TAU {
        let d = lerp(min_d, max_d, sample(theta)).max(0.0);
        match first {
            None => first = Some(d),
            Some(first_d) => {
                let need = (d + first_d + gap_arc) / radius;
                if TAU - theta < need {
                    break;
                }
            }
        }
        disks.push(RingDisk {
            angle: theta,
            diameter: d,
        });
        theta += ((d + gap_arc) * STEP_SLACK / radius).max(MIN_STEP);
    }
    disks
}

pub fn paint(ctx: &mut PaintCtx<'_>, deps: &RegionDeps, opts: &NoisyRingsOptions) -> PaintResult {
    let mut result = PaintResult::new();
    if deps.paintable_bounds().is_none() {
        return result;
    }
    let mid_curve = deps
        .top_curve
        .as_ref()
        .and_then(|curve| curve.get(curve.len() / 2).copied());
    let Some(center) = opts.center.or(mid_curve) else {
        return result;
    };
    let time = ctx.frame.time(opts.time, TIME_RATE);

    let rng: &mut dyn RngCore = &mut ctx.entropy.rng;
    let ring_color = opts.ring_color.unwrap_or_else(|| {
        Hsba::new(
            rand01(rng) * 360.0,
            rand_range(rng, 40.0, 85.0),
            rand_range(rng, 40.0, 90.0),
        )
    });

    let (w0, w1) = opts.ell_w_range.unwrap_or((60.0, 160.0));
    let ell_w = rand_range(rng, w0, w1).max(0.0);
    let (a0, a1) = opts.ell_aspect_range.unwrap_or((0.3, 0.65));
    let ell_h = (ell_w * rand_range(rng, a0, a1)).max(0.0);

    let (c0, c1) = opts.ring_count_range.unwrap_or((5.0, 9.0));
    let ring_count = rand_range(rng, c0, c1).floor().max(0.0) as usize;
    let ring_gap = opts.ring_gap.unwrap_or(22.0).max(0.0);
    let gap_arc = opts.gap_arc.unwrap_or(6.0).max(0.0);

    let mut radii = Vec::with_capacity(ring_count);
    let mut radius = ell_w.max(ell_h) * 0.5;
    for i in 0..ring_count {
        let jitter = if i == 0 {
            rand_range(rng, 5.0, 10.0)
        } else {
            rand_range(rng, 8.0, 14.0)
        };
        radius += ring_gap + jitter;
        radii.push(radius);
    }

    let inner_max = opts.inner_max.unwrap_or(30.0) * 1.25;
    let inner_min = opts.inner_min.unwrap_or(16.0) * 1.10;
    let outer_max = opts.outer_max.unwrap_or(12.0) * 0.60;
    let outer_min = opts.outer_min.unwrap_or(6.0) * 0.45;
    let noise_freq = f64::from(
        opts.noise_freq
            .unwrap_or_else(|| rand_range(rng, 0.6, 1.2)),
    );
    let noise_base = (f64::from(rand01(rng)) * 1e6).floor();

    ctx.canvas
        .fill_ellipse(center, Vec2::new(ell_w, ell_h), ring_color);
    result.drawn += 1;

    let last = radii.len().saturating_sub(1).max(1) as f32;
    let noise = &ctx.entropy.noise;
    for (idx, &r0) in radii.iter().enumerate() {
        let t = idx as f32 / last;
        let max_d = lerp(inner_max, outer_max, t);
        let min_d = lerp(inner_min, outer_min, t);
        let offset = noise_base + idx as f64 * RING_NOISE_STRIDE;

        let disks = walk_ring(r0, min_d, max_d, gap_arc, |theta| {
            let theta = f64::from(theta);
            noise.sample_f64(
                offset + theta.cos() * noise_freq,
                offset + theta.sin() * noise_freq,
                time.map(f64::from),
            )
        });
        for disk in disks {
            let pos = center + Vec2::from_angle(disk.angle) * r0;
            ctx.canvas.fill_circle(pos, disk.diameter * 0.5, ring_color);
            result.drawn += 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCommand;
    use crate::pattern::test_support::{record, square};
    use crate::pattern::Frame;

    #[test]
    fn constant_disks_pack_edge_to_edge() {
        let disks = walk_ring(100.0, 10.0, 10.0, 6.0, |_| 0.5);
        assert_eq!(disks.len(), 37);
        assert!(disks.iter().all(|d| d.diameter == 10.0));
        assert_eq!(disks[0].angle, 0.0);
    }

    #[test]
    fn walk_never_completes_a_full_turn() {
        for (i, radius) in [5.0_f32, 37.5, 120.0, 400.0].into_iter().enumerate() {
            let mut k = i as f32;
            let disks = walk_ring(radius, 4.0, 20.0, 6.0, |theta| {
                k += 0.37;
                (theta.sin() * 0.5 + 0.5 + k).fract()
            });
            assert!(!disks.is_empty());
            let last = disks.last().unwrap();
            assert!(last.angle < TAU);
            // The seam keeps room for both neighbours.
            let seam = (TAU - last.angle) * radius;
            assert!(seam + 1e-3 >= (last.diameter + disks[0].diameter) * 0.5);
        }
    }

    #[test]
    fn minimum_step_bounds_the_walk() {
        let disks = walk_ring(1.0e6, 0.0, 0.0, 0.0, |_| 0.0);
        assert!(disks.len() <= (TAU / MIN_STEP).ceil() as usize + 1);
        assert!(walk_ring(0.0, 1.0, 2.0, 1.0, |_| 0.5).is_empty());
    }

    fn cap_like_region() -> RegionDeps {
        let curve: Vec<Vec2> = (0..=20)
            .map(|i| Vec2::new(-100.0 + i as f32 * 10.0, -40.0))
            .collect();
        square(200.0)
            .with_top_curve(curve)
            .with_radius_hint(100.0)
    }

    #[test]
    fn ellipse_sits_on_curve_midpoint() {
        let deps = cap_like_region();
        let opts = NoisyRingsOptions {
            ring_color: Some(Hsba::new(183.0, 99.0, 38.0)),
            ..Default::default()
        };
        let (canvas, result) = record(31008, Frame::still(), |ctx| paint(ctx, &deps, &opts));
        let first = canvas.primitives().next().cloned();
        match first {
            Some(DrawCommand::Ellipse { center, size, color }) => {
                assert_eq!(center, Vec2::new(0.0, -40.0));
                assert!((60.0..160.0).contains(&size.x));
                assert!(size.y <= size.x * 0.65 + 1e-3);
                assert_eq!(color, Hsba::new(183.0, 99.0, 38.0));
            }
            other => panic!("expected central ellipse, got {other:?}"),
        }
        assert_eq!(result.drawn, canvas.primitives().count());
        assert!(result.drawn > 50);
    }

    #[test]
    fn rings_grow_outward() {
        let deps = cap_like_region();
        let center = Vec2::new(0.0, -40.0);
        let opts = NoisyRingsOptions {
            ell_w_range: Some((100.0, 100.0)),
            ell_aspect_range: Some((0.5, 0.5)),
            ring_count_range: Some((3.0, 3.0)),
            ..Default::default()
        };
        let (canvas, _) = record(4, Frame::still(), |ctx| paint(ctx, &deps, &opts));
        let mut radii: Vec<f32> = Vec::new();
        for (p, _) in canvas.disks() {
            let d = p.distance(center);
            if radii.last().is_none_or(|last| (d - last).abs() > 0.5) {
                radii.push(d);
            }
        }
        assert_eq!(radii.len(), 3);
        // First ring: 50 + 22 + [5, 10); then + 22 + [8, 14) each.
        assert!((77.0..82.1).contains(&radii[0]));
        assert!(radii.windows(2).all(|w| w[1] - w[0] >= 30.0 - 0.1));
    }

    #[test]
    fn explicit_center_overrides_curve() {
        let deps = cap_like_region();
        let opts = NoisyRingsOptions {
            center: Some(Vec2::new(12.0, 7.0)),
            ..Default::default()
        };
        let (canvas, _) = record(2, Frame::still(), |ctx| paint(ctx, &deps, &opts));
        assert!(matches!(
            canvas.primitives().next(),
            Some(DrawCommand::Ellipse { center, .. }) if *center == Vec2::new(12.0, 7.0)
        ));
    }

    #[test]
    fn missing_center_or_degenerate_region_draws_nothing() {
        let (canvas, _) = record(2, Frame::still(), |ctx| {
            paint(ctx, &square(100.0), &NoisyRingsOptions::default())
        });
        assert!(canvas.is_empty());

        let flat = RegionDeps::new(vec![Vec2::ZERO, Vec2::X]).with_top_curve(vec![Vec2::ZERO]);
        let (canvas, result) = record(2, Frame::still(), |ctx| {
            paint(ctx, &flat, &NoisyRingsOptions::default())
        });
        assert!(canvas.is_empty());
        assert!(result.is_empty());
    }

    #[test]
    fn reproducible_for_a_seed() {
        let deps = cap_like_region();
        let opts = NoisyRingsOptions::default();
        let (a, _) = record(77, Frame::animated(12), |ctx| paint(ctx, &deps, &opts));
        let (b, _) = record(77, Frame::animated(12), |ctx| paint(ctx, &deps, &opts));
        assert_eq!(a.commands(), b.commands());
    }
}
