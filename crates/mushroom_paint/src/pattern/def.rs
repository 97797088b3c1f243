//! Serialized form of [`Pattern`]: a type name plus a sparse option map.
//!
//! ```ron
//! (type: "circles_multi", options: (min_r: Some(4.0), accent2: Some((h: 200.0, s: 40.0, b: 90.0))))
//! ```
//!
//! Options that the named pattern does not read are ignored. An unknown type
//! name logs a warning and deserializes to [`Pattern::None`].
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::*;
use crate::color::Hsba;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternDef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub options: OptionBag,
}

/// Union of every pattern option. Absent keys are `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionBag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_r: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_r: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tries: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent1: Option<Hsba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent2: Option<Hsba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise_amp: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise_freq: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nest_prob: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring_color: Option<Hsba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ell_w_range: Option<(f32, f32)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ell_aspect_range: Option<(f32, f32)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring_count_range: Option<(f32, f32)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_arc: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_max: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_min: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_max: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_min: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circles_per_track: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle_step: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat_range: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri_range: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_color: Option<Hsba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_color: Option<Hsba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jitter_y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_scale: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_color: Option<Hsba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise_shake: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jitter_scale: Option<f32>,
}

impl OptionBag {
    fn circles(&self) -> CirclesOptions {
        CirclesOptions {
            min_r: self.min_r,
            max_r: self.max_r,
            tries: self.tries,
            max_count: self.max_count,
            gap: self.gap,
            accent1: self.accent1,
            accent2: self.accent2,
            noise_amp: self.noise_amp,
            noise_freq: self.noise_freq,
            time: self.time,
        }
    }

    fn nested(&self) -> NestedOptions {
        NestedOptions {
            min_r: self.min_r,
            max_r: self.max_r,
            tries: self.tries,
            max_count: self.max_count,
            nest_prob: self.nest_prob,
            gap: self.gap,
            accent1: self.accent1,
            accent2: self.accent2,
            noise_amp: self.noise_amp,
            noise_freq: self.noise_freq,
            time: self.time,
        }
    }

    fn noisy_rings(&self) -> NoisyRingsOptions {
        NoisyRingsOptions {
            center: self.center,
            ring_color: self.ring_color,
            ell_w_range: self.ell_w_range,
            ell_aspect_range: self.ell_aspect_range,
            ring_count_range: self.ring_count_range,
            ring_gap: self.ring_gap,
            gap_arc: self.gap_arc,
            inner_max: self.inner_max,
            inner_min: self.inner_min,
            outer_max: self.outer_max,
            outer_min: self.outer_min,
            noise_freq: self.noise_freq,
            time: self.time,
        }
    }

    fn base_tracks(&self) -> BaseTracksOptions {
        BaseTracksOptions {
            circles_per_track: self.circles_per_track,
            angle_step: self.angle_step,
            accent1: self.accent1,
            accent2: self.accent2,
            flow_speed: self.flow_speed,
            time: self.time,
        }
    }

    fn voronoi(&self) -> VoronoiOptions {
        VoronoiOptions {
            site_count: self.site_count,
            noise_freq: self.noise_freq,
            sat_range: self.sat_range,
            bri_range: self.bri_range,
            base_color: self.base_color,
            edge_color: self.edge_color,
            edge_weight: self.edge_weight,
            time: self.time,
        }
    }

    fn dot_tracks(&self) -> DotTracksOptions {
        DotTracksOptions {
            track_count: self.track_count,
            rows: self.rows,
            margin_x: self.margin_x,
            jitter_y: self.jitter_y,
            edge_scale: self.edge_scale,
            base_radius: self.base_radius,
            dot_color: self.dot_color,
            flow_speed: self.flow_speed,
            noise_shake: self.noise_shake,
            time: self.time,
        }
    }

    fn dot_gradient(&self) -> DotGradientOptions {
        DotGradientOptions {
            max_count: self.max_count,
            tries: self.tries,
            min_r: self.min_r,
            max_r: self.max_r,
            jitter_scale: self.jitter_scale,
            gap: self.gap,
            dot_color: self.dot_color,
            noise_amp: self.noise_amp,
            noise_freq: self.noise_freq,
            time: self.time,
        }
    }
}

impl From<CirclesOptions> for OptionBag {
    fn from(o: CirclesOptions) -> Self {
        Self {
            min_r: o.min_r,
            max_r: o.max_r,
            tries: o.tries,
            max_count: o.max_count,
            gap: o.gap,
            accent1: o.accent1,
            accent2: o.accent2,
            noise_amp: o.noise_amp,
            noise_freq: o.noise_freq,
            time: o.time,
            ..Default::default()
        }
    }
}

impl From<NestedOptions> for OptionBag {
    fn from(o: NestedOptions) -> Self {
        Self {
            min_r: o.min_r,
            max_r: o.max_r,
            tries: o.tries,
            max_count: o.max_count,
            nest_prob: o.nest_prob,
            gap: o.gap,
            accent1: o.accent1,
            accent2: o.accent2,
            noise_amp: o.noise_amp,
            noise_freq: o.noise_freq,
            time: o.time,
            ..Default::default()
        }
    }
}

impl From<NoisyRingsOptions> for OptionBag {
    fn from(o: NoisyRingsOptions) -> Self {
        Self {
            center: o.center,
            ring_color: o.ring_color,
            ell_w_range: o.ell_w_range,
            ell_aspect_range: o.ell_aspect_range,
            ring_count_range: o.ring_count_range,
            ring_gap: o.ring_gap,
            gap_arc: o.gap_arc,
            inner_max: o.inner_max,
            inner_min: o.inner_min,
            outer_max: o.outer_max,
            outer_min: o.outer_min,
            noise_freq: o.noise_freq,
            time: o.time,
            ..Default::default()
        }
    }
}

impl From<BaseTracksOptions> for OptionBag {
    fn from(o: BaseTracksOptions) -> Self {
        Self {
            circles_per_track: o.circles_per_track,
            angle_step: o.angle_step,
            accent1: o.accent1,
            accent2: o.accent2,
            flow_speed: o.flow_speed,
            time: o.time,
            ..Default::default()
        }
    }
}

impl From<VoronoiOptions> for OptionBag {
    fn from(o: VoronoiOptions) -> Self {
        Self {
            site_count: o.site_count,
            noise_freq: o.noise_freq,
            sat_range: o.sat_range,
            bri_range: o.bri_range,
            base_color: o.base_color,
            edge_color: o.edge_color,
            edge_weight: o.edge_weight,
            time: o.time,
            ..Default::default()
        }
    }
}

impl From<DotTracksOptions> for OptionBag {
    fn from(o: DotTracksOptions) -> Self {
        Self {
            track_count: o.track_count,
            rows: o.rows,
            margin_x: o.margin_x,
            jitter_y: o.jitter_y,
            edge_scale: o.edge_scale,
            base_radius: o.base_radius,
            dot_color: o.dot_color,
            flow_speed: o.flow_speed,
            noise_shake: o.noise_shake,
            time: o.time,
            ..Default::default()
        }
    }
}

impl From<DotGradientOptions> for OptionBag {
    fn from(o: DotGradientOptions) -> Self {
        Self {
            max_count: o.max_count,
            tries: o.tries,
            min_r: o.min_r,
            max_r: o.max_r,
            jitter_scale: o.jitter_scale,
            gap: o.gap,
            dot_color: o.dot_color,
            noise_amp: o.noise_amp,
            noise_freq: o.noise_freq,
            time: o.time,
            ..Default::default()
        }
    }
}

impl From<PatternDef> for Pattern {
    fn from(def: PatternDef) -> Self {
        let Some(kind) = PatternKind::from_name(&def.kind) else {
            warn!("Unknown pattern type '{}'; painting nothing.", def.kind);
            return Pattern::None;
        };
        let o = &def.options;
        match kind {
            PatternKind::None => Pattern::None,
            PatternKind::CirclesMono => Pattern::CirclesMono(o.circles()),
            PatternKind::CirclesMulti => Pattern::CirclesMulti(o.circles()),
            PatternKind::Nested => Pattern::Nested(o.nested()),
            PatternKind::NoisyRings => Pattern::NoisyRings(o.noisy_rings()),
            PatternKind::TracksMono => Pattern::TracksMono(o.base_tracks()),
            PatternKind::TracksAlt => Pattern::TracksAlt(o.base_tracks()),
            PatternKind::Voronoi => Pattern::Voronoi(o.voronoi()),
            PatternKind::DotTracks => Pattern::DotTracks(o.dot_tracks()),
            PatternKind::DotGradient => Pattern::DotGradient(o.dot_gradient()),
        }
    }
}

impl From<Pattern> for PatternDef {
    fn from(pattern: Pattern) -> Self {
        let options = match pattern {
            Pattern::None => OptionBag::default(),
            Pattern::CirclesMono(o) | Pattern::CirclesMulti(o) => o.into(),
            Pattern::Nested(o) => o.into(),
            Pattern::NoisyRings(o) => o.into(),
            Pattern::TracksMono(o) | Pattern::TracksAlt(o) => o.into(),
            Pattern::Voronoi(o) => o.into(),
            Pattern::DotTracks(o) => o.into(),
            Pattern::DotGradient(o) => o.into(),
        };
        Self {
            kind: pattern.kind().name().to_owned(),
            options,
        }
    }
}
