//! Hue/saturation/brightness colors.
//!
//! Hue is measured in degrees and wraps modulo 360; saturation, brightness and
//! alpha live on a 0..=100 scale and are clamped on construction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A color in HSB space with alpha.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsba {
    pub h: f32,
    pub s: f32,
    pub b: f32,
    #[cfg_attr(feature = "serde", serde(default = "opaque"))]
    pub a: f32,
}

#[cfg(feature = "serde")]
fn opaque() -> f32 {
    100.0
}

impl Hsba {
    pub const BLACK: Hsba = Hsba {
        h: 0.0,
        s: 0.0,
        b: 0.0,
        a: 100.0,
    };

    pub const WHITE: Hsba = Hsba {
        h: 0.0,
        s: 0.0,
        b: 100.0,
        a: 100.0,
    };

    /// Opaque color; hue wraps and the other channels are clamped.
    pub fn new(h: f32, s: f32, b: f32) -> Self {
        Self::with_alpha(h, s, b, 100.0)
    }

    pub fn with_alpha(h: f32, s: f32, b: f32, a: f32) -> Self {
        Self {
            h: wrap_hue(h),
            s: clamp_channel(s),
            b: clamp_channel(b),
            a: clamp_channel(a),
        }
    }

    /// Re-applies the wrap/clamp rules, for values that were deserialized or
    /// assembled field by field.
    pub fn normalized(self) -> Self {
        Self::with_alpha(self.h, self.s, self.b, self.a)
    }

    /// Converts to straight (non-premultiplied) 8-bit RGBA.
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.normalized();
        let s = c.s / 100.0;
        let v = c.b / 100.0;
        let sector = c.h / 60.0;
        let i = sector.floor();
        let f = sector - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match (i as i32).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        [
            to_u8(r),
            to_u8(g),
            to_u8(b),
            to_u8(c.a / 100.0),
        ]
    }
}

impl Default for Hsba {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Partially specified color; missing channels fall back to a default color.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HsbaSpec {
    pub h: Option<f32>,
    pub s: Option<f32>,
    pub b: Option<f32>,
    pub a: Option<f32>,
}

impl HsbaSpec {
    pub fn or(self, fallback: Hsba) -> Hsba {
        Hsba::with_alpha(
            self.h.unwrap_or(fallback.h),
            self.s.unwrap_or(fallback.s),
            self.b.unwrap_or(fallback.b),
            self.a.unwrap_or(fallback.a),
        )
    }
}

impl From<Hsba> for HsbaSpec {
    fn from(value: Hsba) -> Self {
        Self {
            h: Some(value.h),
            s: Some(value.s),
            b: Some(value.b),
            a: Some(value.a),
        }
    }
}

#[inline]
fn wrap_hue(h: f32) -> f32 {
    if h.is_finite() {
        h.rem_euclid(360.0)
    } else {
        0.0
    }
}

#[inline]
fn clamp_channel(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_wraps_and_channels_clamp() {
        let c = Hsba::with_alpha(400.0, 120.0, -5.0, 250.0);
        assert!((c.h - 40.0).abs() < 1e-4);
        assert_eq!(c.s, 100.0);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 100.0);

        let neg = Hsba::new(-30.0, 50.0, 50.0);
        assert!((neg.h - 330.0).abs() < 1e-4);
    }

    #[test]
    fn primaries_convert_to_rgb() {
        assert_eq!(Hsba::new(0.0, 100.0, 100.0).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Hsba::new(120.0, 100.0, 100.0).to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Hsba::new(240.0, 100.0, 100.0).to_rgba8(), [0, 0, 255, 255]);
        assert_eq!(Hsba::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Hsba::BLACK.to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn spec_fills_missing_channels() {
        let spec = HsbaSpec {
            h: Some(200.0),
            ..Default::default()
        };
        let c = spec.or(Hsba::new(35.0, 30.0, 92.0));
        assert_eq!(c.h, 200.0);
        assert_eq!(c.s, 30.0);
        assert_eq!(c.b, 92.0);
        assert_eq!(c.a, 100.0);
    }
}
