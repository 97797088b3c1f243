//! Rejection-sampled disk packing shared by the circle, nested and gradient fills.
use glam::Vec2;

/// An accepted disk. Packing tests use this radius, whatever is rendered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedDisk {
    pub center: Vec2,
    pub radius: f32,
}

/// Upper bound on preallocated slots; larger budgets grow on demand.
const PREALLOC_LIMIT: usize = 1024;

/// Disks accepted so far in one packing run.
#[derive(Debug, Default)]
pub struct PlacedDisks {
    disks: Vec<PlacedDisk>,
}

impl PlacedDisks {
    /// Empty list for a run accepting at most `max_count` of `tries` candidates.
    pub fn for_budget(max_count: usize, tries: usize) -> Self {
        Self {
            disks: Vec::with_capacity(max_count.min(tries).min(PREALLOC_LIMIT)),
        }
    }

    /// `true` if a disk at `center` keeps at least `gap` clear of every placed disk.
    pub fn fits(&self, center: Vec2, radius: f32, gap: f32) -> bool {
        self.disks
            .iter()
            .all(|d| center.distance(d.center) >= radius + d.radius + gap)
    }

    pub fn push(&mut self, center: Vec2, radius: f32) {
        self.disks.push(PlacedDisk { center, radius });
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }
}

/// Orders a `(min, max)` pair and clamps both ends to be non-negative.
#[inline]
pub(crate) fn radius_range(a: f32, b: f32) -> (f32, f32) {
    let (a, b) = (a.max(0.0), b.max(0.0));
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Noise-driven size factor `1 + amp * (2n - 1)`, never negative.
#[inline]
pub(crate) fn noise_scale(n: f32, amp: f32) -> f32 {
    (1.0 + amp * (n * 2.0 - 1.0)).max(0.0)
}

#[cfg(test)]
pub(crate) fn assert_no_overlap(disks: &[(Vec2, f32)], gap: f32) {
    for (i, a) in disks.iter().enumerate() {
        for b in &disks[i + 1..] {
            let d = a.0.distance(b.0);
            assert!(
                d + 1e-3 >= a.1 + b.1 + gap,
                "disks at {:?} and {:?} overlap: {} < {}",
                a.0,
                b.0,
                d,
                a.1 + b.1 + gap
            );
        }
    }
}
