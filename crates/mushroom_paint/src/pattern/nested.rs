//! Packed disks with an optional concentric inner disk.
use glam::Vec2;
use rand::Rng as RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::packing::{noise_scale, radius_range, PlacedDisks};
use super::{PaintCtx, PaintResult, RegionDeps};
use crate::color::Hsba;
use crate::geometry::clamp_or;
use crate::random::{chance, rand_range};

pub const TIME_RATE: f32 = 0.1;

/// Inner disk radius as a fraction of its parent.
const INNER_RANGE: (f32, f32) = (0.4, 0.6);

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NestedOptions {
    /// Default `0.028 * rx`.
    pub min_r: Option<f32>,
    /// Default `0.11 * rx`.
    pub max_r: Option<f32>,
    pub tries: Option<usize>,
    /// Default 145.
    pub max_count: Option<usize>,
    /// Probability of an inner disk, default 0.45.
    pub nest_prob: Option<f32>,
    /// Default `0.01 * rx`.
    pub gap: Option<f32>,
    /// Outer disk color.
    pub accent1: Option<Hsba>,
    /// Inner disk color.
    pub accent2: Option<Hsba>,
    /// Default 0.6.
    pub noise_amp: Option<f32>,
    pub noise_freq: Option<f32>,
    pub time: Option<f32>,
}

pub fn paint(ctx: &mut PaintCtx<'_>, deps: &RegionDeps, opts: &NestedOptions) -> PaintResult {
    let mut result = PaintResult::new();
    let Some(bb) = deps.paintable_bounds() else {
        return result;
    };

    let rx = deps.radius_or(&bb);
    let (min_r, max_r) = radius_range(
        opts.min_r.unwrap_or(rx * 0.028),
        opts.max_r.unwrap_or(rx * 0.11),
    );
    let tries = opts.tries.unwrap_or(1200);
    let max_count = opts.max_count.unwrap_or(145);
    let nest_prob = clamp_or(opts.nest_prob.unwrap_or(0.45), 0.0, 1.0);
    let gap = opts.gap.unwrap_or(rx * 0.01).max(0.0);
    let outer = opts.accent1.or(deps.accent1).unwrap_or(Hsba::BLACK);
    let inner = opts.accent2.or(deps.accent2).unwrap_or(Hsba::WHITE);
    let amp = clamp_or(opts.noise_amp.unwrap_or(0.6), 0.0, 1.0);
    let freq = opts.noise_freq.unwrap_or(0.015);
    let time = ctx.frame.time(opts.time, TIME_RATE);

    let mut placed = PlacedDisks::for_budget(max_count, tries);
    while result.attempts < tries && placed.len() < max_count {
        result.attempts += 1;

        let rng: &mut dyn RngCore = &mut ctx.entropy.rng;
        let center = Vec2::new(
            rand_range(rng, bb.min.x, bb.max.x),
            rand_range(rng, bb.min.y, bb.max.y),
        );
        let r = rand_range(rng, min_r, max_r);
        if !placed.fits(center, r, gap) {
            result.rejected += 1;
            continue;
        }

        let scale = match time {
            Some(t) => noise_scale(
                ctx.entropy.noise.sample3(center.x * freq, center.y * freq, t),
                amp,
            ),
            None => 1.0,
        };
        ctx.canvas.fill_circle(center, r * scale, outer);
        result.drawn += 1;

        let rng: &mut dyn RngCore = &mut ctx.entropy.rng;
        if chance(rng, nest_prob) {
            let rr = r * rand_range(rng, INNER_RANGE.0, INNER_RANGE.1) * scale;
            ctx.canvas.fill_circle(center, rr, inner);
            result.drawn += 1;
        }

        placed.push(center, r);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCommand;
    use crate::pattern::packing::assert_no_overlap;
    use crate::pattern::test_support::{record, square};
    use crate::pattern::Frame;

    fn outer_disks(cmds: &[DrawCommand], outer: Hsba) -> Vec<(Vec2, f32)> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } if *color == outer => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn outer_disks_never_overlap() {
        let outer = Hsba::new(44.0, 8.0, 88.0);
        let inner = Hsba::new(139.0, 94.0, 52.0);
        let deps = square(240.0).with_accents(outer, inner);
        let opts = NestedOptions {
            gap: Some(1.5),
            ..Default::default()
        };
        let (canvas, result) = record(31007, Frame::still(), |ctx| paint(ctx, &deps, &opts));
        let disks = outer_disks(canvas.commands(), outer);
        assert!(disks.len() > 10);
        assert!(result.drawn >= disks.len());
        assert_no_overlap(&disks, 1.5);
    }

    #[test]
    fn huge_max_count_is_bounded_by_tries() {
        let opts = NestedOptions {
            min_r: Some(80.0),
            max_r: Some(80.0),
            tries: Some(150),
            max_count: Some(usize::MAX),
            gap: Some(0.0),
            ..Default::default()
        };
        let (_, result) = record(9, Frame::still(), |ctx| paint(ctx, &square(100.0), &opts));
        assert_eq!(result.attempts, 150);
        assert_eq!(result.rejected, 149);
    }

    #[test]
    fn inner_disks_are_concentric_and_smaller() {
        let outer = Hsba::new(10.0, 50.0, 50.0);
        let inner = Hsba::new(200.0, 50.0, 50.0);
        let deps = square(200.0).with_accents(outer, inner);
        let opts = NestedOptions {
            nest_prob: Some(1.0),
            ..Default::default()
        };
        let (canvas, _) = record(5, Frame::still(), |ctx| paint(ctx, &deps, &opts));
        let cmds = canvas.commands();
        assert_eq!(cmds.len() % 2, 0);
        for pair in cmds.chunks(2) {
            match (&pair[0], &pair[1]) {
                (
                    DrawCommand::Circle {
                        center: c0,
                        radius: r0,
                        color: k0,
                    },
                    DrawCommand::Circle {
                        center: c1,
                        radius: r1,
                        color: k1,
                    },
                ) => {
                    assert_eq!(c0, c1);
                    assert_eq!(*k0, outer);
                    assert_eq!(*k1, inner);
                    let ratio = r1 / r0;
                    assert!((0.4..=0.6 + 1e-4).contains(&ratio), "ratio {ratio}");
                }
                other => panic!("unexpected commands {other:?}"),
            }
        }
    }

    #[test]
    fn zero_probability_never_nests() {
        let opts = NestedOptions {
            nest_prob: Some(0.0),
            ..Default::default()
        };
        let (canvas, result) = record(8, Frame::still(), |ctx| {
            paint(ctx, &square(150.0), &opts)
        });
        assert_eq!(canvas.disks().len(), result.drawn);
        assert_eq!(
            result.drawn,
            result.attempts - result.rejected,
            "one disk per accepted candidate"
        );
    }

    #[test]
    fn degenerate_region_draws_nothing() {
        let deps = RegionDeps::new(vec![Vec2::new(5.0, 5.0); 4]);
        let (canvas, result) = record(8, Frame::animated(3), |ctx| {
            paint(ctx, &deps, &NestedOptions::default())
        });
        assert!(canvas.is_empty());
        assert_eq!(result, PaintResult::new());
    }

    #[test]
    fn same_seed_same_output() {
        let deps = square(180.0);
        let opts = NestedOptions::default();
        let (a, _) = record(99, Frame::still(), |ctx| paint(ctx, &deps, &opts));
        let (b, _) = record(99, Frame::still(), |ctx| paint(ctx, &deps, &opts));
        assert_eq!(a.commands(), b.commands());
    }
}
