//! Packed dots whose size grows from the top of the region to the bottom.
use glam::Vec2;
use rand::Rng as RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::packing::{noise_scale, radius_range, PlacedDisks};
use super::{PaintCtx, PaintResult, RegionDeps};
use crate::color::Hsba;
use crate::geometry::{clamp_or, lerp, map_range};
use crate::random::rand_range;

pub const TIME_RATE: f32 = 0.1;

const DEFAULT_DOT: Hsba = Hsba {
    h: 40.0,
    s: 80.0,
    b: 30.0,
    a: 100.0,
};

/// Smallest radius ever placed.
const MIN_RADIUS: f32 = 1.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DotGradientOptions {
    /// Default 200.
    pub max_count: Option<usize>,
    /// Default 1200.
    pub tries: Option<usize>,
    /// Radius at the top edge, default `0.02 * w`.
    pub min_r: Option<f32>,
    /// Radius at the bottom edge, default `0.06 * w`.
    pub max_r: Option<f32>,
    /// Relative radius jitter, default 0.15.
    pub jitter_scale: Option<f32>,
    /// Default `0.2 * min_r`.
    pub gap: Option<f32>,
    pub dot_color: Option<Hsba>,
    /// Default 0.5.
    pub noise_amp: Option<f32>,
    /// Default 0.1.
    pub noise_freq: Option<f32>,
    pub time: Option<f32>,
}

pub fn paint(
    ctx: &mut PaintCtx<'_>,
    deps: &RegionDeps,
    opts: &DotGradientOptions,
) -> PaintResult {
    let mut result = PaintResult::new();
    let Some(bb) = deps.paintable_bounds() else {
        return result;
    };
    let w = bb.width();

    let max_count = opts.max_count.unwrap_or(200);
    let tries = opts.tries.unwrap_or(1200);
    let (min_r, max_r) = radius_range(
        opts.min_r.unwrap_or(w * 0.02),
        opts.max_r.unwrap_or(w * 0.06),
    );
    let jitter = clamp_or(opts.jitter_scale.unwrap_or(0.15), 0.0, 1.0);
    let gap = opts.gap.unwrap_or(min_r * 0.2).max(0.0);
    let color = opts.dot_color.or(deps.accent1).unwrap_or(DEFAULT_DOT);
    let amp = clamp_or(opts.noise_amp.unwrap_or(0.5), 0.0, 1.0);
    let freq = opts.noise_freq.unwrap_or(0.1);
    let time = ctx.frame.time(opts.time, TIME_RATE);

    let mut placed = PlacedDisks::for_budget(max_count, tries);
    while result.attempts < tries && placed.len() < max_count {
        result.attempts += 1;

        let rng: &mut dyn RngCore = &mut ctx.entropy.rng;
        let center = Vec2::new(
            rand_range(rng, bb.min.x, bb.max.x),
            rand_range(rng, bb.min.y, bb.max.y),
        );
        let t = map_range(center.y, bb.min.y, bb.max.y, 0.0, 1.0);
        let r = (lerp(min_r, max_r, t) * (1.0 + rand_range(rng, -jitter, jitter))).max(MIN_RADIUS);
        if !placed.fits(center, r, gap) {
            result.rejected += 1;
            continue;
        }

        let drawn_r = match time {
            Some(time) => {
                let n = ctx
                    .entropy
                    .noise
                    .sample3(center.x * freq, center.y * freq, time);
                r * noise_scale(n, amp)
            }
            None => r,
        };
        ctx.canvas.fill_circle(center, drawn_r, color);
        placed.push(center, r);
        result.drawn += 1;
    }

    result
}
