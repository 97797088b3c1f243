#![forbid(unsafe_code)]
//! mushroom_paint: Procedural mushroom illustrations filled with seeded pattern algorithms.
//!
//! Modules:
//! - geometry: parametric cap, stem and base outlines plus path and bounds helpers
//! - pattern: circle packing, nested circles, noisy rings, base tracks, Voronoi cells, dot tracks and dot gradients
//! - part / mushroom: lazily built parts, per-mushroom pose, draw order, pulse and hit testing
//! - scene: templates, instance overrides and scene-wide draw / click handling
//! - canvas: the drawing surface abstraction and a recording canvas for tests
//!
//! Rendering backends implement [`canvas::Canvas`]; see the examples crate for a raster one.
pub mod canvas;
pub mod color;
pub mod error;
pub mod geometry;
pub mod mushroom;
pub mod noise_field;
pub mod part;
pub mod pattern;
pub mod random;
pub mod scene;

/// Convenient re-exports for common types. Import with `use mushroom_paint::prelude::*;`.
pub mod prelude {
    pub use crate::canvas::{scoped, with_clip, Canvas, DrawCommand, RecordingCanvas, Stroke};
    pub use crate::color::{Hsba, HsbaSpec};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::base::BaseSpec;
    pub use crate::geometry::cap::{CapSpec, NotchSpec, WaveSpec};
    pub use crate::geometry::stem::StemSpec;
    pub use crate::geometry::{Bounds, Path, PathCommand};
    pub use crate::mushroom::{Layout, Mushroom};
    pub use crate::part::{Part, PartGeometry, PartKind, PartSpec};
    pub use crate::pattern::{
        BaseTracksOptions, CirclesOptions, DotGradientOptions, DotTracksOptions, Family, Frame,
        NestedOptions, NoisyRingsOptions, PaintCtx, PaintResult, Pattern, PatternKind,
        RegionDeps, VoronoiOptions,
    };
    pub use crate::random::Entropy;
    pub use crate::scene::{
        InstanceDef, LayoutSpec, MushroomTemplate, Scene, SceneConfig, TemplateLibrary,
    };
}
