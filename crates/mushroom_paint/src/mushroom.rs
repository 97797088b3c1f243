//! A mushroom: cap, stem and base sharing a seed, an anchor and a pose.
//!
//! Geometry is resolved once from a geometry stream derived from the seed.
//! Every draw recreates the pattern stream from the same seed, so repeated
//! still frames are identical.
use glam::Vec2;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::canvas::{scoped, Canvas};
use crate::geometry::base::BaseSpec;
use crate::geometry::cap::CapSpec;
use crate::geometry::stem::StemSpec;
use crate::part::{Part, PartKind, PartSpec};
use crate::pattern::{Frame, PaintResult};
use crate::random::Entropy;

/// Relative pulse amplitude.
pub const PULSE_AMPLITUDE: f32 = 0.3;
/// Pulse phase advance per frame.
pub const PULSE_SPEED: f64 = 0.05;
const PULSE_SEED_PHASE: f64 = 0.001;

/// Offsets of each part from the mushroom anchor.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub cap_offset: Vec2,
    pub stem_offset: Vec2,
    pub base_offset: Vec2,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cap_offset: Vec2::ZERO,
            stem_offset: Vec2::new(0.0, 80.0),
            base_offset: Vec2::new(0.0, 150.0),
        }
    }
}

impl Layout {
    pub fn offset(&self, kind: PartKind) -> Vec2 {
        match kind {
            PartKind::Cap => self.cap_offset,
            PartKind::Stem => self.stem_offset,
            PartKind::Base => self.base_offset,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Mushroom {
    id: String,
    seed: u64,
    anchor: Vec2,
    layout: Layout,
    positions: [Option<Vec2>; 3],
    base_scale: f32,
    scale: f32,
    rotation: f32,
    pulsing: bool,
    cap: Part,
    stem: Part,
    base: Part,
}

impl Mushroom {
    pub fn new(seed: u64, cap: CapSpec, stem: StemSpec, base: BaseSpec) -> Self {
        Self {
            id: String::from("m"),
            seed,
            anchor: Vec2::ZERO,
            layout: Layout::default(),
            positions: [None; 3],
            base_scale: 1.0,
            scale: 1.0,
            rotation: 0.0,
            pulsing: false,
            cap: Part::new(PartSpec::Cap(cap)),
            stem: Part::new(PartSpec::Stem(stem)),
            base: Part::new(PartSpec::Base(base)),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<mint::Vector2<f32>>) -> Self {
        self.anchor = Vec2::from(anchor.into());
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Places `kind` at an absolute position, ignoring the anchor and layout.
    pub fn with_part_position(mut self, kind: PartKind, position: Vec2) -> Self {
        self.positions[slot(kind)] = Some(position);
        self
    }

    /// Uniform scale applied to every part; also the rest scale of the pulse.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.base_scale = scale;
        self.scale = scale;
        self
    }

    /// Rotation in radians applied to every part.
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Scale used by the most recent draw.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn part(&self, kind: PartKind) -> &Part {
        match kind {
            PartKind::Cap => &self.cap,
            PartKind::Stem => &self.stem,
            PartKind::Base => &self.base,
        }
    }

    pub fn part_mut(&mut self, kind: PartKind) -> &mut Part {
        match kind {
            PartKind::Cap => &mut self.cap,
            PartKind::Stem => &mut self.stem,
            PartKind::Base => &mut self.base,
        }
    }

    /// Where `kind` is placed in scene space.
    pub fn position(&self, kind: PartKind) -> Vec2 {
        self.positions[slot(kind)].unwrap_or_else(|| self.anchor + self.layout.offset(kind))
    }

    pub fn is_built(&self) -> bool {
        self.cap.is_built() && self.stem.is_built() && self.base.is_built()
    }

    /// Resolves every part's geometry. Does nothing once built.
    pub fn build(&mut self) {
        if self.is_built() {
            return;
        }
        let mut entropy = Entropy::for_geometry(self.seed);
        for kind in [PartKind::Cap, PartKind::Stem, PartKind::Base] {
            self.part_mut(kind).build(&mut entropy.rng);
        }
        debug!("Built mushroom '{}' (seed {}).", self.id, self.seed);
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulsing
    }

    /// Starts or stops pulsing. A stopped pulse keeps its last scale.
    pub fn toggle_pulse(&mut self) -> bool {
        self.pulsing = !self.pulsing;
        self.pulsing
    }

    pub fn set_pulsing(&mut self, pulsing: bool) {
        self.pulsing = pulsing;
    }

    /// Scale of a pulsing mushroom at `frame`.
    pub fn pulse_scale(&self, frame: Frame) -> f32 {
        let phase = frame.index as f64 * PULSE_SPEED + self.seed as f64 * PULSE_SEED_PHASE;
        self.base_scale * (1.0 + PULSE_AMPLITUDE * phase.sin() as f32)
    }

    /// Draws base, stem and cap back to front, each inside its own transform scope.
    /// Only animated frames advance the pulse.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, frame: Frame) -> PaintResult {
        self.build();
        if self.pulsing && frame.animated {
            self.scale = self.pulse_scale(frame);
        }

        let mut entropy = Entropy::from_seed(self.seed);
        let mut total = PaintResult::new();
        for kind in PartKind::DRAW_ORDER {
            let part = self.part(kind);
            if !part.is_visible() {
                continue;
            }
            let mut scope = scoped(&mut *canvas);
            scope.translate(self.position(kind));
            scope.rotate(self.rotation);
            scope.scale(self.scale);
            total += part.draw(&mut *scope, &mut entropy, frame);
        }
        trace!(
            "Mushroom '{}' frame {}: {} primitives.",
            self.id,
            frame.index,
            total.drawn
        );
        total
    }

    /// Front-most part under `point` (scene space), if any.
    pub fn hit_test(&self, point: impl Into<mint::Vector2<f32>>) -> Option<PartKind> {
        if self.scale == 0.0 {
            return None;
        }
        let point = Vec2::from(point.into());
        let unrotate = Vec2::from_angle(-self.rotation);
        [PartKind::Cap, PartKind::Stem, PartKind::Base]
            .into_iter()
            .find(|&kind| {
                let local = unrotate.rotate(point - self.position(kind)) / self.scale;
                self.part(kind).contains(local)
            })
    }
}

#[inline]
fn slot(kind: PartKind) -> usize {
    match kind {
        PartKind::Cap => 0,
        PartKind::Stem => 1,
        PartKind::Base => 2,
    }
}
