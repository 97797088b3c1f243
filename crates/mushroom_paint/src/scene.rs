//! Scenes: mushroom instances built from named templates plus per-instance overrides.
//!
//! Merging is shallow. An override replaces individual part fields, replaces a
//! part's pattern wholesale and replaces layout offsets key by key. Instances
//! naming an unknown template are logged and skipped.
use std::collections::HashMap;
use std::f32::consts::PI;

use glam::Vec2;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::color::{Hsba, HsbaSpec};
use crate::error::{Error, Result};
use crate::geometry::base::BaseSpec;
use crate::geometry::cap::CapSpec;
use crate::geometry::stem::StemSpec;
use crate::mushroom::{Layout, Mushroom};
use crate::part::PartKind;
use crate::pattern::{
    BaseTracksOptions, CirclesOptions, DotGradientOptions, DotTracksOptions, Frame, NestedOptions,
    NoisyRingsOptions, PaintResult, Pattern, VoronoiOptions,
};

/// Sparse layout; missing offsets keep the value underneath.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutSpec {
    pub cap_offset: Option<Vec2>,
    pub stem_offset: Option<Vec2>,
    pub base_offset: Option<Vec2>,
}

impl LayoutSpec {
    pub fn merged(&self, over: &LayoutSpec) -> LayoutSpec {
        LayoutSpec {
            cap_offset: over.cap_offset.or(self.cap_offset),
            stem_offset: over.stem_offset.or(self.stem_offset),
            base_offset: over.base_offset.or(self.base_offset),
        }
    }

    pub fn resolve(&self) -> Layout {
        let defaults = Layout::default();
        Layout {
            cap_offset: self.cap_offset.unwrap_or(defaults.cap_offset),
            stem_offset: self.stem_offset.unwrap_or(defaults.stem_offset),
            base_offset: self.base_offset.unwrap_or(defaults.base_offset),
        }
    }
}

/// Part specs and layout shared by every instance of a mushroom type.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MushroomTemplate {
    pub cap: CapSpec,
    pub stem: StemSpec,
    pub base: BaseSpec,
    pub layout: LayoutSpec,
}

/// Named templates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Debug, Default)]
pub struct TemplateLibrary {
    templates: HashMap<String, MushroomTemplate>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// `red_amanita`, `default` and `without_base_part`.
    pub fn builtin() -> Self {
        let mut lib = Self::new();
        lib.insert("red_amanita", red_amanita());
        lib.insert("default", default_template());
        lib.insert("without_base_part", without_base_part());
        lib
    }

    pub fn insert(&mut self, id: impl Into<String>, template: MushroomTemplate) -> &mut Self {
        self.templates.insert(id.into(), template);
        self
    }

    pub fn get(&self, id: &str) -> Option<&MushroomTemplate> {
        self.templates.get(id)
    }

    /// Adds every template of `other`, replacing ones with the same id.
    pub fn extend(&mut self, other: &TemplateLibrary) {
        self.templates
            .extend(other.templates.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Parses a RON map of template id to template.
    #[cfg(feature = "ron")]
    pub fn from_ron_str(text: &str) -> Result<Self> {
        Ok(ron_options().from_str(text)?)
    }
}

/// One mushroom in a scene description.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceDef {
    pub id: String,
    pub template: String,
    /// Derived from `id` when absent.
    pub seed: Option<u64>,
    pub anchor: Vec2,
    pub scale: Option<f32>,
    /// Radians.
    pub rotation: Option<f32>,
    pub cap: CapSpec,
    pub stem: StemSpec,
    pub base: BaseSpec,
    pub layout: LayoutSpec,
    pub cap_pos: Option<Vec2>,
    pub stem_pos: Option<Vec2>,
    pub base_pos: Option<Vec2>,
    pub pulsing: bool,
}

impl InstanceDef {
    pub fn new(id: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            template: template.into(),
            ..Default::default()
        }
    }

    pub fn seed_or_derived(&self) -> u64 {
        self.seed.unwrap_or_else(|| fnv1a(self.id.as_bytes()))
    }

    /// Merges this instance over its template.
    pub fn instantiate(&self, library: &TemplateLibrary) -> Result<Mushroom> {
        let template = library
            .get(&self.template)
            .ok_or_else(|| Error::UnknownTemplate {
                id: self.template.clone(),
            })?;

        let mut mushroom = Mushroom::new(
            self.seed_or_derived(),
            template.cap.merged(&self.cap),
            template.stem.merged(&self.stem),
            template.base.merged(&self.base),
        )
        .with_id(self.id.clone())
        .with_anchor(self.anchor)
        .with_layout(template.layout.merged(&self.layout).resolve())
        .with_scale(self.scale.unwrap_or(1.0))
        .with_rotation(self.rotation.unwrap_or(0.0));

        let positions = [
            (PartKind::Cap, self.cap_pos),
            (PartKind::Stem, self.stem_pos),
            (PartKind::Base, self.base_pos),
        ];
        for (kind, position) in positions {
            if let Some(position) = position {
                mushroom = mushroom.with_part_position(kind, position);
            }
        }
        mushroom.set_pulsing(self.pulsing);
        Ok(mushroom)
    }
}

/// Scene-local templates plus a list of instance descriptions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, Default)]
pub struct SceneConfig {
    /// Take precedence over the library passed to [`SceneConfig::instantiate`].
    pub templates: TemplateLibrary,
    pub instances: Vec<InstanceDef>,
}

impl SceneConfig {
    /// Builds every instance it can; unknown templates are skipped with a warning.
    pub fn instantiate(&self, library: &TemplateLibrary) -> Scene {
        let mut merged;
        let library = if self.templates.is_empty() {
            library
        } else {
            merged = library.clone();
            merged.extend(&self.templates);
            &merged
        };

        let mut scene = Scene::new();
        for def in &self.instances {
            match def.instantiate(library) {
                Ok(mushroom) => scene.push(mushroom),
                Err(err) => warn!("Skipping mushroom '{}': {}.", def.id, err),
            }
        }
        info!(
            "Instantiated {} of {} mushrooms.",
            scene.len(),
            self.instances.len()
        );
        scene
    }

    #[cfg(feature = "ron")]
    pub fn from_ron_str(text: &str) -> Result<Self> {
        Ok(ron_options().from_str(text)?)
    }

    /// A single red amanita at (600, 200).
    pub fn red_amanita() -> Self {
        let mut m = InstanceDef::new("m1", "red_amanita");
        m.seed = Some(1234);
        m.anchor = Vec2::new(600.0, 200.0);
        Self {
            instances: vec![m],
            ..Default::default()
        }
    }

    /// Five small, partly rotated mushrooms in the lower half of a 1200x1000 frame.
    pub fn small_mushrooms() -> Self {
        Self {
            instances: vec![
                green_left(),
                small_bottom_left(),
                middle_yellow(),
                cluster_three(),
                cluster_four(),
            ],
            ..Default::default()
        }
    }
}

#[cfg(feature = "ron")]
fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Mushrooms in back-to-front order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    mushrooms: Vec<Mushroom>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mushroom: Mushroom) {
        self.mushrooms.push(mushroom);
    }

    pub fn mushrooms(&self) -> &[Mushroom] {
        &self.mushrooms
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Mushroom> {
        self.mushrooms.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.mushrooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mushrooms.is_empty()
    }

    /// Draws every mushroom with its own entropy.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, frame: Frame) -> PaintResult {
        let mut total = PaintResult::new();
        for mushroom in &mut self.mushrooms {
            total += mushroom.draw(canvas, frame);
        }
        debug!(
            "Scene frame {}: {} mushrooms, {} primitives.",
            frame.index,
            self.mushrooms.len(),
            total.drawn
        );
        total
    }

    /// Index of the first mushroom hit by `point`.
    pub fn hit_test(&self, point: impl Into<mint::Vector2<f32>>) -> Option<usize> {
        let point = Vec2::from(point.into());
        self.mushrooms
            .iter()
            .position(|m| m.hit_test(point).is_some())
    }

    /// Toggles pulsing on the first mushroom hit by `point`.
    pub fn toggle_pulse_at(&mut self, point: impl Into<mint::Vector2<f32>>) -> Option<usize> {
        let index = self.hit_test(point)?;
        let pulsing = self.mushrooms[index].toggle_pulse();
        debug!(
            "Mushroom '{}' pulsing: {}.",
            self.mushrooms[index].id(),
            pulsing
        );
        Some(index)
    }
}

/// 64-bit FNV-1a.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
    })
}

fn hsb(h: f32, s: f32, b: f32) -> Hsba {
    Hsba::new(h, s, b)
}

fn spec(h: f32, s: f32, b: f32) -> Option<HsbaSpec> {
    Some(hsb(h, s, b).into())
}

fn dot_gradient_stem() -> Pattern {
    Pattern::DotGradient(DotGradientOptions {
        max_count: Some(220),
        tries: Some(1500),
        min_r: Some(3.0),
        max_r: Some(10.0),
        jitter_scale: Some(0.15),
        gap: Some(1.5),
        dot_color: Some(hsb(110.0, 60.0, 90.0)),
        ..Default::default()
    })
}

fn banded_stem(h: f32, offset_y: f32) -> StemSpec {
    StemSpec {
        visible: Some(true),
        h: Some(h),
        w: Some(40.0),
        top_w: Some(80.0),
        bottom_w: Some(150.0),
        ry_top: Some(20.0),
        ry_bottom: Some(60.0),
        bulge: Some(0.24),
        offset_y: Some(offset_y),
        base_color: spec(116.0, 35.0, 75.0),
        stroke_width: Some(5.0),
        stroke_color: spec(116.0, 35.0, 75.0),
        pattern: Some(dot_gradient_stem()),
    }
}

fn purple_cap() -> CapSpec {
    CapSpec {
        visible: Some(true),
        w: Some(360.0),
        base_color: spec(258.0, 52.0, 71.0),
        pattern: Some(Pattern::Nested(NestedOptions::default())),
        ..Default::default()
    }
}

fn wide_base(offset_y: f32) -> BaseSpec {
    BaseSpec {
        visible: Some(true),
        r: Some(36.0),
        w: Some(320.0),
        h: Some(80.0),
        offset_y: Some(offset_y),
        bottom_radius: Some(16.0),
        bottom_sag: Some(0.9),
        bottom_tight: Some(0.18),
        side_bulge: Some(0.66),
        top_round: Some(0.96),
        base_color: spec(50.0, 85.0, 90.0),
        pattern: Some(Pattern::TracksMono(BaseTracksOptions::default())),
    }
}

fn red_amanita() -> MushroomTemplate {
    MushroomTemplate {
        cap: purple_cap(),
        stem: banded_stem(480.0, -60.0),
        base: wide_base(-175.0),
        layout: LayoutSpec {
            cap_offset: Some(Vec2::new(0.0, -15.0)),
            stem_offset: Some(Vec2::new(0.0, 80.0)),
            base_offset: Some(Vec2::new(0.0, 150.0)),
        },
    }
}

fn flush_layout() -> LayoutSpec {
    LayoutSpec {
        cap_offset: Some(Vec2::ZERO),
        stem_offset: Some(Vec2::ZERO),
        base_offset: Some(Vec2::ZERO),
    }
}

fn default_template() -> MushroomTemplate {
    MushroomTemplate {
        cap: purple_cap(),
        stem: banded_stem(480.0, 70.0),
        base: wide_base(-20.0),
        layout: flush_layout(),
    }
}

fn without_base_part() -> MushroomTemplate {
    MushroomTemplate {
        cap: purple_cap(),
        stem: banded_stem(250.0, 70.0),
        base: BaseSpec {
            visible: Some(false),
            ..Default::default()
        },
        layout: flush_layout(),
    }
}

fn placed(id: &str, template: &str, seed: u64, anchor: Vec2, scale: f32, rotation: f32) -> InstanceDef {
    InstanceDef {
        seed: Some(seed),
        anchor,
        scale: Some(scale),
        rotation: Some(rotation),
        ..InstanceDef::new(id, template)
    }
}

fn shaped_cap(w: f32, arch_top: f32, arch_bottom: f32, color: Option<HsbaSpec>, pattern: Pattern) -> CapSpec {
    CapSpec {
        w: Some(w),
        arch_top: Some(arch_top),
        arch_bottom: Some(arch_bottom),
        base_color: color,
        pattern: Some(pattern),
        ..Default::default()
    }
}

fn green_left() -> InstanceDef {
    let mut m = placed("m_green_left", "default", 31007, Vec2::new(184.0, 597.0), 0.5, 0.0);
    m.cap = shaped_cap(
        360.0,
        150.0,
        52.0,
        spec(354.0, 100.0, 77.0),
        Pattern::Nested(NestedOptions {
            accent1: Some(hsb(44.0, 8.0, 88.0)),
            accent2: Some(hsb(139.0, 94.0, 52.0)),
            ..Default::default()
        }),
    );
    m.stem = StemSpec {
        h: Some(220.0),
        offset_y: Some(110.0),
        base_color: spec(120.0, 80.0, 80.0),
        stroke_color: spec(132.0, 91.0, 44.0),
        pattern: Some(Pattern::Voronoi(VoronoiOptions {
            site_count: Some(80),
            base_color: Some(hsb(120.0, 80.0, 80.0)),
            edge_color: Some(hsb(132.0, 91.0, 44.0)),
            edge_weight: Some(1.2),
            ..Default::default()
        })),
        ..Default::default()
    };
    m
}

fn small_bottom_left() -> InstanceDef {
    let mut m = placed(
        "m_small_bottom_left",
        "without_base_part",
        31008,
        Vec2::new(244.0, 820.0),
        0.4,
        0.0,
    );
    m.cap = shaped_cap(
        320.0,
        200.0,
        100.0,
        spec(54.0, 92.0, 89.0),
        Pattern::NoisyRings(NoisyRingsOptions {
            ring_color: Some(hsb(183.0, 99.0, 38.0)),
            ..Default::default()
        }),
    );
    m.stem = StemSpec {
        h: Some(380.0),
        top_w: Some(100.0),
        bottom_w: Some(200.0),
        ry_top: Some(24.0),
        ry_bottom: Some(60.0),
        bulge: Some(0.3),
        base_color: spec(0.0, 100.0, 85.0),
        stroke_color: spec(0.0, 100.0, 85.0),
        pattern: Some(Pattern::DotTracks(DotTracksOptions {
            track_count: Some(11),
            rows: Some(15),
            dot_color: Some(Hsba::WHITE),
            edge_scale: Some(0.4),
            jitter_y: Some(2.0),
            base_radius: Some(10.0),
            ..Default::default()
        })),
        ..Default::default()
    };
    m
}

fn middle_yellow() -> InstanceDef {
    let mut m = placed("m_mid_yellow", "default", 31002, Vec2::new(631.0, 654.0), 0.6, 0.0);
    m.cap = shaped_cap(
        360.0,
        160.0,
        50.0,
        spec(315.0, 45.0, 52.0),
        Pattern::Nested(NestedOptions {
            accent1: Some(hsb(53.0, 93.0, 92.0)),
            accent2: Some(hsb(78.0, 79.0, 74.0)),
            ..Default::default()
        }),
    );
    m.stem = StemSpec {
        h: Some(500.0),
        top_w: Some(90.0),
        bottom_w: Some(180.0),
        ry_top: Some(26.0),
        ry_bottom: Some(80.0),
        bulge: Some(0.3),
        base_color: spec(70.0, 99.0, 76.0),
        pattern: Some(Pattern::Voronoi(VoronoiOptions {
            site_count: Some(80),
            base_color: Some(hsb(95.0, 85.0, 75.0)),
            edge_color: Some(hsb(61.0, 85.0, 84.0)),
            edge_weight: Some(1.2),
            ..Default::default()
        })),
        ..Default::default()
    };
    m.base.pattern = Some(Pattern::TracksAlt(BaseTracksOptions::default()));
    m
}

fn cluster_three() -> InstanceDef {
    let mut m = placed(
        "m_cluster3",
        "without_base_part",
        31006,
        Vec2::new(890.0, 746.0),
        0.35,
        -PI / 36.0,
    );
    m.cap = shaped_cap(
        400.0,
        280.0,
        60.0,
        spec(38.0, 12.0, 90.0),
        Pattern::Nested(NestedOptions {
            accent1: Some(hsb(356.0, 99.0, 79.0)),
            accent2: Some(hsb(52.0, 99.0, 92.0)),
            max_count: Some(100),
            max_r: Some(40.0),
            min_r: Some(10.0),
            ..Default::default()
        }),
    );
    m.stem = StemSpec {
        h: Some(530.0),
        top_w: Some(100.0),
        bottom_w: Some(200.0),
        ry_top: Some(22.0),
        ry_bottom: Some(100.0),
        bulge: Some(0.3),
        base_color: spec(53.0, 97.0, 91.0),
        stroke_color: spec(53.0, 97.0, 91.0),
        pattern: Some(Pattern::DotTracks(DotTracksOptions {
            track_count: Some(11),
            rows: Some(15),
            margin_x: Some(5.0),
            jitter_y: Some(2.0),
            edge_scale: Some(0.4),
            base_radius: Some(10.0),
            dot_color: Some(hsb(348.0, 54.0, 57.0)),
            ..Default::default()
        })),
        ..Default::default()
    };
    m
}

fn cluster_four() -> InstanceDef {
    let mut m = placed(
        "m_cluster4",
        "without_base_part",
        31006,
        Vec2::new(988.0, 786.0),
        0.35,
        PI / 18.0,
    );
    m.cap = shaped_cap(
        320.0,
        220.0,
        80.0,
        spec(38.0, 12.0, 90.0),
        Pattern::NoisyRings(NoisyRingsOptions {
            ring_count_range: Some((10.0, 15.0)),
            ring_color: Some(hsb(337.0, 71.0, 43.0)),
            ..Default::default()
        }),
    );
    m.stem = StemSpec {
        h: Some(400.0),
        top_w: Some(100.0),
        bottom_w: Some(200.0),
        ry_top: Some(22.0),
        ry_bottom: Some(70.0),
        bulge: Some(0.3),
        base_color: spec(0.0, 100.0, 85.0),
        stroke_color: spec(0.0, 100.0, 85.0),
        pattern: Some(Pattern::CirclesMulti(CirclesOptions {
            min_r: Some(6.0),
            max_r: Some(14.0),
            accent1: Some(Hsba::WHITE),
            accent2: Some(hsb(337.0, 68.0, 85.0)),
            ..Default::default()
        })),
        ..Default::default()
    };
    m
}
