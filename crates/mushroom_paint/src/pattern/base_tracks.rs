//! Radial tracks of evenly spaced dots fanning over the upper half-turn.
use std::f32::consts::PI;

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{PaintCtx, PaintResult, RegionDeps};
use crate::color::Hsba;
use crate::geometry::clamp_or;

pub const TIME_RATE: f32 = 0.02;

const DEFAULT_PRIMARY: Hsba = Hsba {
    h: 50.0,
    s: 63.0,
    b: 46.0,
    a: 100.0,
};

const DEFAULT_SECONDARY: Hsba = Hsba {
    h: 126.0,
    s: 22.0,
    b: 89.0,
    a: 100.0,
};

/// Dot diameter relative to the track length.
const DOT_DIAMETER: f32 = 0.03;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BaseTracksOptions {
    /// Default 12.
    pub circles_per_track: Option<usize>,
    /// Angle between tracks in degrees, default 10 (19 tracks from π to 2π).
    pub angle_step: Option<f32>,
    pub accent1: Option<Hsba>,
    /// Used on odd tracks in alternating mode.
    pub accent2: Option<Hsba>,
    /// Inward flow in radial steps per time unit, default 0.8.
    pub flow_speed: Option<f32>,
    pub time: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackColors {
    Mono,
    Alternating,
}

/// Number of tracks for an angular step in degrees; both ends of the half-turn are included.
pub fn track_count(step_degrees: f32) -> usize {
    let step = clamp_or(step_degrees, 1.0, 180.0);
    (180.0 / step + 1e-4).floor() as usize + 1
}

pub fn paint(
    ctx: &mut PaintCtx<'_>,
    deps: &RegionDeps,
    opts: &BaseTracksOptions,
    colors: TrackColors,
) -> PaintResult {
    let mut result = PaintResult::new();
    let Some(bb) = deps.paintable_bounds() else {
        return result;
    };

    let origin = deps
        .center
        .unwrap_or_else(|| Vec2::new(bb.center().x, bb.max.y));
    let max_r = deps
        .polygon
        .iter()
        .map(|p| p.distance(origin))
        .fold(0.0_f32, f32::max);
    if max_r <= 0.0 {
        return result;
    }

    let per_track = opts.circles_per_track.unwrap_or(12);
    let step_degrees = clamp_or(opts.angle_step.unwrap_or(10.0), 1.0, 180.0);
    let tracks = track_count(step_degrees);
    let angle_step = step_degrees.to_radians();
    let radial_step = max_r / (per_track + 1) as f32;
    let dot_radius = max_r * DOT_DIAMETER * 0.5;

    let primary = opts.accent1.or(deps.accent1).unwrap_or(DEFAULT_PRIMARY);
    let secondary = opts.accent2.or(deps.accent2).unwrap_or(DEFAULT_SECONDARY);
    let flow = ctx
        .frame
        .time(opts.time, TIME_RATE)
        .map(|t| t * opts.flow_speed.unwrap_or(0.8) * radial_step);

    for track in 0..tracks {
        let angle = PI + track as f32 * angle_step;
        let color = match colors {
            TrackColors::Alternating if track % 2 == 1 => secondary,
            _ => primary,
        };
        let dir = Vec2::from_angle(angle);
        for i in 1..=per_track {
            let base = radial_step * i as f32;
            let r = match flow {
                Some(offset) => (base - offset).rem_euclid(max_r),
                None => base,
            };
            ctx.canvas.fill_circle(origin + dir * r, dot_radius, color);
            result.drawn += 1;
        }
    }

    result
}
