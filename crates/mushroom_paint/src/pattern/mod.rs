//! Pattern algorithms that fill a clipped region with decorative motifs.
//!
//! Every algorithm reads a [`RegionDeps`] bundle and its own options struct,
//! draws primitives into the [`PaintCtx`] canvas and reports a [`PaintResult`].
//! Missing options always fall back to defaults; degenerate regions draw nothing.
use std::fmt;

use tracing::trace;

use crate::error::{Error, Result};

pub mod base_tracks;
pub mod circles;
pub mod context;
#[cfg(feature = "serde")]
pub mod def;
pub mod dot_gradient;
pub mod dot_tracks;
pub mod nested;
pub mod noisy_rings;
pub mod packing;
pub mod voronoi;

pub use base_tracks::{BaseTracksOptions, TrackColors};
pub use circles::{CirclesOptions, ColorMode};
pub use context::{Frame, PaintCtx, PaintResult, RegionDeps};
pub use dot_gradient::DotGradientOptions;
pub use dot_tracks::DotTracksOptions;
pub use nested::NestedOptions;
pub use noisy_rings::NoisyRingsOptions;
pub use voronoi::VoronoiOptions;

/// Body part a pattern was designed for. Any pattern can paint any region.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Cap,
    Stem,
    Base,
}

/// Pattern identifiers without their options.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    None,
    CirclesMono,
    CirclesMulti,
    Nested,
    NoisyRings,
    TracksMono,
    TracksAlt,
    Voronoi,
    DotTracks,
    DotGradient,
}

impl PatternKind {
    pub const ALL: [PatternKind; 10] = [
        PatternKind::None,
        PatternKind::CirclesMono,
        PatternKind::CirclesMulti,
        PatternKind::Nested,
        PatternKind::NoisyRings,
        PatternKind::TracksMono,
        PatternKind::TracksAlt,
        PatternKind::Voronoi,
        PatternKind::DotTracks,
        PatternKind::DotGradient,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::None => "none",
            PatternKind::CirclesMono => "circles_mono",
            PatternKind::CirclesMulti => "circles_multi",
            PatternKind::Nested => "nested",
            PatternKind::NoisyRings => "noisy_rings",
            PatternKind::TracksMono => "tracks_mono",
            PatternKind::TracksAlt => "tracks_alt",
            PatternKind::Voronoi => "voronoi_cells",
            PatternKind::DotTracks => "dot_tracks",
            PatternKind::DotGradient => "dot_gradient",
        }
    }

    /// Parses a pattern name. Hyphens are accepted in place of underscores
    /// and `voronoi` is accepted for `voronoi_cells`.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        if normalized == "voronoi" {
            return Some(PatternKind::Voronoi);
        }
        Self::ALL.into_iter().find(|k| k.name() == normalized)
    }

    /// `None` for the shared "none" sentinel.
    pub fn family(self) -> Option<Family> {
        match self {
            PatternKind::None => None,
            PatternKind::CirclesMono
            | PatternKind::CirclesMulti
            | PatternKind::Nested
            | PatternKind::NoisyRings => Some(Family::Cap),
            PatternKind::TracksMono | PatternKind::TracksAlt => Some(Family::Base),
            PatternKind::Voronoi | PatternKind::DotTracks | PatternKind::DotGradient => {
                Some(Family::Stem)
            }
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pattern together with its options.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "def::PatternDef", into = "def::PatternDef")
)]
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Pattern {
    #[default]
    None,
    CirclesMono(CirclesOptions),
    CirclesMulti(CirclesOptions),
    Nested(NestedOptions),
    NoisyRings(NoisyRingsOptions),
    TracksMono(BaseTracksOptions),
    TracksAlt(BaseTracksOptions),
    Voronoi(VoronoiOptions),
    DotTracks(DotTracksOptions),
    DotGradient(DotGradientOptions),
}

impl Pattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            Pattern::None => PatternKind::None,
            Pattern::CirclesMono(_) => PatternKind::CirclesMono,
            Pattern::CirclesMulti(_) => PatternKind::CirclesMulti,
            Pattern::Nested(_) => PatternKind::Nested,
            Pattern::NoisyRings(_) => PatternKind::NoisyRings,
            Pattern::TracksMono(_) => PatternKind::TracksMono,
            Pattern::TracksAlt(_) => PatternKind::TracksAlt,
            Pattern::Voronoi(_) => PatternKind::Voronoi,
            Pattern::DotTracks(_) => PatternKind::DotTracks,
            Pattern::DotGradient(_) => PatternKind::DotGradient,
        }
    }

    /// The pattern with every option left at its default.
    pub fn with_defaults(kind: PatternKind) -> Self {
        match kind {
            PatternKind::None => Pattern::None,
            PatternKind::CirclesMono => Pattern::CirclesMono(Default::default()),
            PatternKind::CirclesMulti => Pattern::CirclesMulti(Default::default()),
            PatternKind::Nested => Pattern::Nested(Default::default()),
            PatternKind::NoisyRings => Pattern::NoisyRings(Default::default()),
            PatternKind::TracksMono => Pattern::TracksMono(Default::default()),
            PatternKind::TracksAlt => Pattern::TracksAlt(Default::default()),
            PatternKind::Voronoi => Pattern::Voronoi(Default::default()),
            PatternKind::DotTracks => Pattern::DotTracks(Default::default()),
            PatternKind::DotGradient => Pattern::DotGradient(Default::default()),
        }
    }

    /// Default-configured pattern for `name`.
    pub fn from_name(name: &str) -> Result<Self> {
        PatternKind::from_name(name)
            .map(Self::with_defaults)
            .ok_or_else(|| Error::UnknownPattern {
                name: name.to_owned(),
            })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Pattern::None)
    }

    /// Paints into the currently active clip. `Pattern::None` draws nothing.
    pub fn paint(&self, ctx: &mut PaintCtx<'_>, deps: &RegionDeps) -> PaintResult {
        let result = match self {
            Pattern::None => PaintResult::new(),
            Pattern::CirclesMono(o) => circles::paint(ctx, deps, o, ColorMode::Mono),
            Pattern::CirclesMulti(o) => circles::paint(ctx, deps, o, ColorMode::Multi),
            Pattern::Nested(o) => nested::paint(ctx, deps, o),
            Pattern::NoisyRings(o) => noisy_rings::paint(ctx, deps, o),
            Pattern::TracksMono(o) => base_tracks::paint(ctx, deps, o, TrackColors::Mono),
            Pattern::TracksAlt(o) => base_tracks::paint(ctx, deps, o, TrackColors::Alternating),
            Pattern::Voronoi(o) => voronoi::paint(ctx, deps, o),
            Pattern::DotTracks(o) => dot_tracks::paint(ctx, deps, o),
            Pattern::DotGradient(o) => dot_gradient::paint(ctx, deps, o),
        };
        trace!(
            "Pattern '{}' drew {} primitives ({} attempts, {} rejected).",
            self.kind(),
            result.drawn,
            result.attempts,
            result.rejected
        );
        result
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use glam::Vec2;

    use super::{Frame, PaintCtx, PaintResult, RegionDeps};
    use crate::canvas::RecordingCanvas;
    use crate::geometry::Bounds;
    use crate::random::Entropy;

    /// Square region with its top-left corner at the origin.
    pub fn square(size: f32) -> RegionDeps {
        RegionDeps::rect(Bounds::from_rect(Vec2::ZERO, Vec2::splat(size)))
    }

    /// Runs `f` against a fresh recording canvas and entropy seeded with `seed`.
    pub fn record(
        seed: u64,
        frame: Frame,
        f: impl FnOnce(&mut PaintCtx<'_>) -> PaintResult,
    ) -> (RecordingCanvas, PaintResult) {
        let mut canvas = RecordingCanvas::new();
        let mut entropy = Entropy::from_seed(seed);
        let result = {
            let mut ctx = PaintCtx::new(&mut canvas, &mut entropy, frame);
            f(&mut ctx)
        };
        (canvas, result)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{record, square};
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in PatternKind::ALL {
            assert_eq!(PatternKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn hyphenated_and_short_names_parse() {
        assert_eq!(
            PatternKind::from_name("circles-multi"),
            Some(PatternKind::CirclesMulti)
        );
        assert_eq!(PatternKind::from_name("voronoi"), Some(PatternKind::Voronoi));
        assert_eq!(PatternKind::from_name("Dot-Gradient"), Some(PatternKind::DotGradient));
        assert_eq!(PatternKind::from_name("stripes"), None);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = Pattern::from_name("stripes").unwrap_err();
        assert!(matches!(err, Error::UnknownPattern { name } if name == "stripes"));
    }

    #[test]
    fn families_cover_every_kind() {
        assert_eq!(PatternKind::None.family(), None);
        assert_eq!(PatternKind::NoisyRings.family(), Some(Family::Cap));
        assert_eq!(PatternKind::TracksAlt.family(), Some(Family::Base));
        assert_eq!(PatternKind::DotTracks.family(), Some(Family::Stem));
        let painting = PatternKind::ALL.iter().filter(|k| k.family().is_some());
        assert_eq!(painting.count(), 9);
    }

    #[test]
    fn none_draws_nothing() {
        let (canvas, result) = record(1, Frame::animated(5), |ctx| {
            Pattern::None.paint(ctx, &square(100.0))
        });
        assert!(canvas.is_empty());
        assert!(result.is_empty());
    }

    #[test]
    fn every_pattern_draws_on_a_square() {
        let deps = square(200.0).with_radius_hint(100.0).with_top_curve(vec![
            glam::Vec2::new(0.0, 100.0),
            glam::Vec2::new(100.0, 100.0),
            glam::Vec2::new(200.0, 100.0),
        ]);
        for kind in PatternKind::ALL.into_iter().filter(|k| *k != PatternKind::None) {
            let pattern = Pattern::with_defaults(kind);
            let (canvas, result) = record(7, Frame::still(), |ctx| pattern.paint(ctx, &deps));
            assert!(result.drawn > 0, "{kind} drew nothing");
            assert_eq!(canvas.primitives().count(), result.drawn, "{kind}");
        }
    }

    #[test]
    fn every_pattern_skips_degenerate_regions() {
        let flat = RegionDeps::new(vec![
            glam::Vec2::ZERO,
            glam::Vec2::new(10.0, 0.0),
            glam::Vec2::new(20.0, 0.0),
        ]);
        for kind in PatternKind::ALL {
            let pattern = Pattern::with_defaults(kind);
            let (canvas, result) = record(7, Frame::animated(9), |ctx| pattern.paint(ctx, &flat));
            assert!(canvas.is_empty(), "{kind}");
            assert!(result.is_empty(), "{kind}");
        }
    }

    #[test]
    fn same_seed_same_commands() {
        let deps = square(160.0);
        for kind in PatternKind::ALL {
            let pattern = Pattern::with_defaults(kind);
            let (a, _) = record(31003, Frame::animated(12), |ctx| pattern.paint(ctx, &deps));
            let (b, _) = record(31003, Frame::animated(12), |ctx| pattern.paint(ctx, &deps));
            assert_eq!(a.commands(), b.commands(), "{kind}");
        }
    }
}
