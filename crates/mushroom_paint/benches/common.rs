use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec2;
use mushroom_paint::geometry::Bounds;
use mushroom_paint::pattern::RegionDeps;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

/// Side lengths of the square regions every pattern bench paints.
pub const REGION_SIZES: [f32; 3] = [128.0, 256.0, 512.0];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

/// Throughput in drawn primitives.
pub fn primitives_throughput(drawn: usize) -> Throughput {
    Throughput::Elements(drawn.max(1) as u64)
}

pub fn square_region(size: f32) -> RegionDeps {
    RegionDeps::rect(Bounds::from_rect(Vec2::ZERO, Vec2::splat(size)))
}
