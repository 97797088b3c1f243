//! Vertical tracks of dots that shrink towards the region's sides.
use glam::Vec2;
use rand::Rng as RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{PaintCtx, PaintResult, RegionDeps};
use crate::color::Hsba;
use crate::geometry::{clamp_or, lerp, map_range};
use crate::random::rand_range;

pub const TIME_RATE: f32 = 0.02;

const DEFAULT_DOT: Hsba = Hsba {
    h: 116.0,
    s: 35.0,
    b: 75.0,
    a: 100.0,
};

/// Per-dot radius jitter.
const RADIUS_JITTER: f32 = 0.05;

/// Noise coordinate spacing between neighbouring tracks and rows.
const NOISE_STRIDE: f32 = 0.15;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DotTracksOptions {
    /// Default 9.
    pub track_count: Option<usize>,
    /// Dots per track, default 9.
    pub rows: Option<usize>,
    /// Horizontal inset, default `0.05 * w`.
    pub margin_x: Option<f32>,
    /// Static vertical jitter, default `0.01 * h`.
    pub jitter_y: Option<f32>,
    /// Size factor at the outermost tracks, default 0.5.
    pub edge_scale: Option<f32>,
    /// Default `w / track_count * 0.3`.
    pub base_radius: Option<f32>,
    pub dot_color: Option<Hsba>,
    /// Downward flow in rows per time unit, default 0.8.
    pub flow_speed: Option<f32>,
    /// Animated vertical jitter, default `0.03 * h`.
    pub noise_shake: Option<f32>,
    pub time: Option<f32>,
}

pub fn paint(ctx: &mut PaintCtx<'_>, deps: &RegionDeps, opts: &DotTracksOptions) -> PaintResult {
    let mut result = PaintResult::new();
    let Some(bb) = deps.paintable_bounds() else {
        return result;
    };
    let (w, h) = (bb.width(), bb.height());

    let tracks = opts.track_count.unwrap_or(9);
    let rows = opts.rows.unwrap_or(9);
    if tracks == 0 || rows == 0 {
        return result;
    }
    let margin = clamp_or(opts.margin_x.unwrap_or(w * 0.05), 0.0, w * 0.5);
    let jitter = opts.jitter_y.unwrap_or(h * 0.01).abs();
    let edge_scale = opts.edge_scale.unwrap_or(0.5).max(0.0);
    let base_r = opts.base_radius.unwrap_or(w / tracks as f32 * 0.3).max(0.0);
    let color = opts.dot_color.or(deps.accent1).unwrap_or(DEFAULT_DOT);
    let flow = opts.flow_speed.unwrap_or(0.8);
    let shake = opts.noise_shake.unwrap_or(h * 0.03).abs();
    let time = ctx.frame.time(opts.time, TIME_RATE);

    let step_y = h / (rows + 1) as f32;
    let offset = time.map(|t| (t * flow * step_y).rem_euclid(h));

    for k in 0..tracks {
        let u = (k as f32 + 0.5) / tracks as f32;
        let x = lerp(bb.min.x + margin, bb.max.x - margin, u);
        let scale = lerp(1.0, edge_scale, (u - 0.5).abs() / 0.5);

        for i in 0..rows {
            let (nx, ny) = (k as f32 * NOISE_STRIDE, i as f32 * NOISE_STRIDE);
            let row_y = step_y * (i + 1) as f32;
            let y = match (time, offset) {
                (Some(t), Some(offset)) => {
                    let n = ctx.entropy.noise.sample3(nx, ny, t);
                    bb.min.y
                        + (row_y + offset).rem_euclid(h)
                        + map_range(n, 0.0, 1.0, -shake, shake)
                }
                _ => {
                    let n = ctx.entropy.noise.sample3(nx, ny, 0.0);
                    bb.min.y + row_y + map_range(n, 0.0, 1.0, -jitter, jitter)
                }
            };
            let rng: &mut dyn RngCore = &mut ctx.entropy.rng;
            let r = base_r * scale * (1.0 + rand_range(rng, -RADIUS_JITTER, RADIUS_JITTER));
            ctx.canvas.fill_circle(Vec2::new(x, y), r, color);
            result.drawn += 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::pattern::test_support::{record, square};
    use crate::pattern::Frame;

    #[test]
    fn fills_every_track_and_row() {
        let (canvas, result) = record(31006, Frame::still(), |ctx| {
            paint(ctx, &square(180.0), &DotTracksOptions::default())
        });
        assert_eq!(result.drawn, 81);
        assert_eq!(canvas.disks().len(), 81);
    }

    #[test]
    fn single_dot_sits_mid_region() {
        let deps = RegionDeps::rect(Bounds::from_rect(Vec2::new(-40.0, 0.0), Vec2::new(80.0, 200.0)));
        let opts = DotTracksOptions {
            track_count: Some(1),
            rows: Some(1),
            ..Default::default()
        };
        let (canvas, _) = record(2, Frame::still(), |ctx| paint(ctx, &deps, &opts));
        let disks = canvas.disks();
        assert_eq!(disks.len(), 1);
        let (p, r) = disks[0];
        assert!(p.x.abs() < 1e-4);
        // h / (rows + 1), jittered by 1% of the height.
        assert!((p.y - 100.0).abs() <= 2.0 + 1e-4, "y {}", p.y);
        let expected = 80.0 * 0.3;
        assert!((r - expected).abs() <= expected * RADIUS_JITTER + 1e-4);
    }

    #[test]
    fn outer_tracks_are_smaller() {
        let opts = DotTracksOptions {
            track_count: Some(5),
            rows: Some(4),
            ..Default::default()
        };
        let (canvas, _) = record(9, Frame::still(), |ctx| paint(ctx, &square(100.0), &opts));
        let disks = canvas.disks();
        let base = 100.0 / 5.0 * 0.3;
        let (center_track, edge_track) = (&disks[8..12], &disks[0..4]);
        assert!(center_track
            .iter()
            .all(|(_, r)| (r - base).abs() <= base * RADIUS_JITTER + 1e-4));
        assert!(edge_track
            .iter()
            .all(|(_, r)| (r - base * 0.6).abs() <= base * 0.6 * RADIUS_JITTER + 1e-4));
    }

    #[test]
    fn tracks_are_evenly_spaced_within_margins() {
        let opts = DotTracksOptions {
            track_count: Some(4),
            rows: Some(3),
            margin_x: Some(10.0),
            ..Default::default()
        };
        let (canvas, _) = record(9, Frame::still(), |ctx| paint(ctx, &square(100.0), &opts));
        let xs: Vec<f32> = canvas.disks().iter().step_by(3).map(|(p, _)| p.x).collect();
        let expected = [20.0, 40.0, 60.0, 80.0];
        for (x, e) in xs.iter().zip(expected) {
            assert!((x - e).abs() < 1e-3);
        }
    }

    #[test]
    fn animated_dots_stay_near_the_region() {
        let deps = square(120.0);
        for frame in [0, 17, 250, 4000] {
            let (canvas, _) = record(4, Frame::animated(frame), |ctx| {
                paint(ctx, &deps, &DotTracksOptions::default())
            });
            let shake = 120.0 * 0.03;
            assert!(canvas
                .disks()
                .iter()
                .all(|(p, _)| p.y >= -shake - 1e-3 && p.y <= 120.0 + shake + 1e-3));
        }
    }

    #[test]
    fn zero_tracks_draw_nothing() {
        let opts = DotTracksOptions {
            track_count: Some(0),
            ..Default::default()
        };
        let (canvas, result) = record(1, Frame::still(), |ctx| paint(ctx, &square(50.0), &opts));
        assert!(canvas.is_empty());
        assert!(result.is_empty());
    }
}
