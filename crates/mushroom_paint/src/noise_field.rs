//! Seeded coherent noise remapped to the unit interval.
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

const OCTAVES: usize = 4;
const PERSISTENCE: f64 = 0.5;
const LACUNARITY: f64 = 2.0;

/// Four-octave Perlin fBm sampled in 2 or 3 dimensions, returning values in `[0, 1]`.
pub struct NoiseField {
    seed: u32,
    fbm: Fbm<Perlin>,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(OCTAVES)
            .set_persistence(PERSISTENCE)
            .set_lacunarity(LACUNARITY);
        Self { seed, fbm }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn sample2(&self, x: f32, y: f32) -> f32 {
        to_unit(self.fbm.get([x as f64, y as f64]))
    }

    pub fn sample3(&self, x: f32, y: f32, z: f32) -> f32 {
        to_unit(self.fbm.get([x as f64, y as f64, z as f64]))
    }

    /// Samples in 3D when a time coordinate is present, 2D otherwise.
    pub fn sample(&self, x: f32, y: f32, time: Option<f32>) -> f32 {
        match time {
            Some(t) => self.sample3(x, y, t),
            None => self.sample2(x, y),
        }
    }

    /// Like [`NoiseField::sample`] for coordinates too large to keep f32 precision.
    pub fn sample_f64(&self, x: f64, y: f64, time: Option<f64>) -> f32 {
        match time {
            Some(t) => to_unit(self.fbm.get([x, y, t])),
            None => to_unit(self.fbm.get([x, y])),
        }
    }
}

#[inline]
fn to_unit(v: f64) -> f32 {
    let v = (v * 0.5 + 0.5) as f32;
    if v.is_nan() {
        0.5
    } else {
        v.clamp(0.0, 1.0)
    }
}
