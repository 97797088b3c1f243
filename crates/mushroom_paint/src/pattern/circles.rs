//! Non-overlapping disks in one or two accent colors.
use glam::Vec2;
use rand::Rng as RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::packing::{noise_scale, radius_range, PlacedDisks};
use super::{PaintCtx, PaintResult, RegionDeps};
use crate::color::Hsba;
use crate::geometry::clamp_or;
use crate::random::{chance, rand_range};

/// Time advance per animation frame.
pub const TIME_RATE: f32 = 0.1;

/// Options for the circle fills. `rx` below is the region radius hint.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CirclesOptions {
    /// Default `0.03 * rx`.
    pub min_r: Option<f32>,
    /// Default `0.08 * rx`.
    pub max_r: Option<f32>,
    /// Candidate budget, default 1200.
    pub tries: Option<usize>,
    /// Default 100.
    pub max_count: Option<usize>,
    /// Default `0.03 * rx`.
    pub gap: Option<f32>,
    pub accent1: Option<Hsba>,
    pub accent2: Option<Hsba>,
    /// Relative radius swing when animated, default 0.3.
    pub noise_amp: Option<f32>,
    /// Default 0.015.
    pub noise_freq: Option<f32>,
    pub time: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    /// Every disk uses accent 1.
    Mono,
    /// Each disk picks accent 1 or 2 uniformly.
    Multi,
}

pub fn paint(
    ctx: &mut PaintCtx<'_>,
    deps: &RegionDeps,
    opts: &CirclesOptions,
    mode: ColorMode,
) -> PaintResult {
    let mut result = PaintResult::new();
    let Some(bb) = deps.paintable_bounds() else {
        return result;
    };

    let rx = deps.radius_or(&bb);
    let (min_r, max_r) = radius_range(
        opts.min_r.unwrap_or(rx * 0.03),
        opts.max_r.unwrap_or(rx * 0.08),
    );
    let tries = opts.tries.unwrap_or(1200);
    let max_count = opts.max_count.unwrap_or(100);
    let gap = opts.gap.unwrap_or(rx * 0.03).max(0.0);
    let accent1 = opts.accent1.or(deps.accent1).unwrap_or(Hsba::BLACK);
    let accent2 = opts.accent2.or(deps.accent2).unwrap_or(Hsba::WHITE);
    let amp = clamp_or(opts.noise_amp.unwrap_or(0.3), 0.0, 1.0);
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

        let color = match mode {
            ColorMode::Mono => accent1,
            ColorMode::Multi => {
                if chance(rng, 0.5) {
                    accent1
                } else {
                    accent2
                }
            }
        };
        let drawn_r = match time {
            Some(t) => {
                let n = ctx.entropy.noise.sample3(center.x * freq, center.y * freq, t);
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
