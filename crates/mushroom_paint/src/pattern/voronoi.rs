//! Voronoi cells over the region's bounding rectangle, shaded by noise.
use glam::Vec2;
use rand::Rng as RngCore;
use spade::{DelaunayTriangulation, Point2, Triangulation};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{PaintCtx, PaintResult, RegionDeps};
use crate::canvas::Stroke;
use crate::color::Hsba;
use crate::geometry::{map_range, Bounds};
use crate::random::rand_range;

pub const TIME_RATE: f32 = 0.05;

const DEFAULT_BASE: Hsba = Hsba {
    h: 110.0,
    s: 60.0,
    b: 70.0,
    a: 100.0,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VoronoiOptions {
    /// Default 80.
    pub site_count: Option<usize>,
    /// Default 0.02.
    pub noise_freq: Option<f32>,
    /// Saturation swing either side of the base, default 10.
    pub sat_range: Option<f32>,
    /// Brightness swing either side of the base, default 10.
    pub bri_range: Option<f32>,
    pub base_color: Option<Hsba>,
    /// Defaults to a pale version of the base color.
    pub edge_color: Option<Hsba>,
    /// Default 1.5; zero disables edges.
    pub edge_weight: Option<f32>,
    pub time: Option<f32>,
}

/// A cell of the partition.
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiCell {
    pub site: Vec2,
    /// Convex boundary, counter to the rectangle's corner order.
    pub polygon: Vec<Vec2>,
}

/// Partitions `bounds` into one convex cell per distinct site.
///
/// Neighbours come from a Delaunay triangulation; each cell is the rectangle
/// clipped by the bisectors towards its neighbours. Sites that cannot be
/// triangulated or whose cell vanishes are skipped.
pub fn cells(bounds: Bounds, sites: &[Vec2]) -> Vec<VoronoiCell> {
    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    for site in sites {
        if let Err(err) = triangulation.insert(Point2::new(f64::from(site.x), f64::from(site.y))) {
            debug!("Skipping Voronoi site {:?}: {:?}", site, err);
        }
    }

    let mut out = Vec::with_capacity(triangulation.num_vertices());
    for vertex in triangulation.vertices() {
        let site = to_vec2(vertex.position());
        let mut polygon = bounds.corners().to_vec();
        for edge in vertex.out_edges() {
            let neighbour = to_vec2(edge.to().position());
            polygon = clip_to_bisector(&polygon, site, neighbour);
            if polygon.len() < 3 {
                break;
            }
        }
        if polygon.len() >= 3 {
            out.push(VoronoiCell { site, polygon });
        }
    }
    out
}

#[inline]
fn to_vec2(p: Point2<f64>) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}

/// Keeps the part of `polygon` closer to `site` than to `other`.
fn clip_to_bisector(polygon: &[Vec2], site: Vec2, other: Vec2) -> Vec<Vec2> {
    let normal = other - site;
    let mid = (site + other) * 0.5;
    let side = |p: Vec2| (p - mid).dot(normal);

    let mut out = Vec::with_capacity(polygon.len() + 1);
    for (i, &a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        let (da, db) = (side(a), side(b));
        if da <= 0.0 {
            out.push(a);
        }
        if (da <= 0.0) != (db <= 0.0) {
            let t = da / (da - db);
            out.push(a + (b - a) * t);
        }
    }
    out
}

pub fn paint(ctx: &mut PaintCtx<'_>, deps: &RegionDeps, opts: &VoronoiOptions) -> PaintResult {
    let mut result = PaintResult::new();
    let Some(bb) = deps.paintable_bounds() else {
        return result;
    };
    let size = bb.size();

    let site_count = opts.site_count.unwrap_or(80);
    let noise_freq = opts.noise_freq.unwrap_or(0.02);
    let sat_range = opts.sat_range.unwrap_or(10.0).abs();
    let bri_range = opts.bri_range.unwrap_or(10.0).abs();
    let base = opts
        .base_color
        .or(deps.accent1)
        .unwrap_or(DEFAULT_BASE)
        .normalized();
    let edge = opts
        .edge_color
        .unwrap_or_else(|| Hsba::new(base.h, base.s * 0.3, (base.b + 20.0).min(100.0)));
    let weight = opts.edge_weight.unwrap_or(1.5);
    let stroke = (weight > 0.0).then(|| Stroke::new(edge, weight));
    let time = ctx.frame.time(opts.time, TIME_RATE);

    // Sites live in region-local coordinates so shading is independent of placement.
    let rng: &mut dyn RngCore = &mut ctx.entropy.rng;
    let sites: Vec<Vec2> = (0..site_count)
        .map(|_| Vec2::new(rand_range(rng, 0.0, size.x), rand_range(rng, 0.0, size.y)))
        .collect();
    result.attempts = sites.len();

    let local = Bounds::from_rect(Vec2::ZERO, size);
    let mut points = Vec::new();
    for cell in cells(local, &sites) {
        let n = ctx.entropy.noise.sample(
            cell.site.x * noise_freq,
            cell.site.y * noise_freq,
            time,
        );
        let color = Hsba::new(
            base.h,
            base.s + map_range(n, 0.0, 1.0, -sat_range, sat_range),
            base.b + map_range(n, 0.0, 1.0, -bri_range, bri_range),
        );
        points.clear();
        points.extend(cell.polygon.iter().map(|p| *p + bb.min));
        ctx.canvas.fill_polygon(&points, color, stroke);
        result.drawn += 1;
    }
    result.rejected = result.attempts.saturating_sub(result.drawn);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCommand;
    use crate::pattern::test_support::{record, square};
    use crate::pattern::Frame;

    fn area(poly: &[Vec2]) -> f32 {
        let mut acc = 0.0;
        for (i, a) in poly.iter().enumerate() {
            let b = poly[(i + 1) % poly.len()];
            acc += a.perp_dot(b);
        }
        acc.abs() * 0.5
    }

    fn contains_convex(poly: &[Vec2], p: Vec2) -> bool {
        let mut sign = 0.0_f32;
        for (i, a) in poly.iter().enumerate() {
            let b = poly[(i + 1) % poly.len()];
            let c = (b - *a).perp_dot(p - *a);
            if c.abs() < 1e-3 {
                continue;
            }
            if sign == 0.0 {
                sign = c.signum();
            } else if c.signum() != sign {
                return false;
            }
        }
        true
    }

    #[test]
    fn single_site_owns_the_whole_rectangle() {
        let bounds = Bounds::from_rect(Vec2::ZERO, Vec2::new(40.0, 20.0));
        let cells = cells(bounds, &[Vec2::new(10.0, 10.0)]);
        assert_eq!(cells.len(), 1);
        assert!((area(&cells[0].polygon) - 800.0).abs() < 1e-3);
    }

    #[test]
    fn two_sites_split_at_the_bisector() {
        let bounds = Bounds::from_rect(Vec2::ZERO, Vec2::new(100.0, 50.0));
        let cells = cells(bounds, &[Vec2::new(20.0, 25.0), Vec2::new(60.0, 25.0)]);
        assert_eq!(cells.len(), 2);
        assert!((area(&cells[0].polygon) - 40.0 * 50.0).abs() < 1e-2);
        assert!((area(&cells[1].polygon) - 60.0 * 50.0).abs() < 1e-2);
    }

    #[test]
    fn cells_tile_the_rectangle() {
        let bounds = Bounds::from_rect(Vec2::ZERO, Vec2::new(120.0, 300.0));
        let sites: Vec<Vec2> = (0..60)
            .map(|i| {
                let f = i as f32;
                Vec2::new((f * 37.3) % 120.0, (f * 71.9) % 300.0)
            })
            .collect();
        let cells = cells(bounds, &sites);
        assert_eq!(cells.len(), 60);
        let total: f32 = cells.iter().map(|c| area(&c.polygon)).sum();
        assert!((total - 120.0 * 300.0).abs() < 1.0, "total area {total}");
        for cell in &cells {
            assert!(contains_convex(&cell.polygon, cell.site));
        }
    }

    #[test]
    fn duplicate_sites_collapse() {
        let bounds = Bounds::from_rect(Vec2::ZERO, Vec2::splat(10.0));
        let p = Vec2::new(3.0, 3.0);
        assert_eq!(cells(bounds, &[p, p, Vec2::new(7.0, 7.0)]).len(), 2);
    }

    #[test]
    fn shading_stays_within_range() {
        let base = Hsba::new(120.0, 80.0, 80.0);
        let opts = VoronoiOptions {
            base_color: Some(base),
            sat_range: Some(12.0),
            bri_range: Some(12.0),
            ..Default::default()
        };
        let deps = square(150.0);
        let (canvas, result) = record(31002, Frame::still(), |ctx| paint(ctx, &deps, &opts));
        assert_eq!(result.drawn, 80);
        for cmd in canvas.primitives() {
            match cmd {
                DrawCommand::Polygon { points, color, stroke } => {
                    assert!(points.len() >= 3);
                    assert_eq!(color.h, 120.0);
                    assert!((68.0 - 1e-3..=92.0 + 1e-3).contains(&color.s));
                    assert!((68.0 - 1e-3..=92.0 + 1e-3).contains(&color.b));
                    let stroke = stroke.expect("edges are stroked by default");
                    assert_eq!(stroke.width, 1.5);
                    assert_eq!(stroke.color, Hsba::new(120.0, 24.0, 100.0));
                }
                other => panic!("unexpected primitive {other:?}"),
            }
        }
    }

    #[test]
    fn polygons_are_placed_in_region_space() {
        let deps = RegionDeps::rect(Bounds::from_rect(Vec2::new(-75.0, 0.0), Vec2::new(150.0, 220.0)));
        let (canvas, _) = record(6, Frame::still(), |ctx| {
            paint(ctx, &deps, &VoronoiOptions::default())
        });
        for cmd in canvas.primitives() {
            if let DrawCommand::Polygon { points, .. } = cmd {
                assert!(points
                    .iter()
                    .all(|p| (-75.0 - 1e-3..=75.0 + 1e-3).contains(&p.x)
                        && (-1e-3..=220.0 + 1e-3).contains(&p.y)));
            }
        }
    }

    #[test]
    fn degenerate_region_draws_nothing() {
        let deps = RegionDeps::new(vec![Vec2::ZERO, Vec2::new(0.0, 9.0)]);
        let (canvas, result) = record(6, Frame::still(), |ctx| {
            paint(ctx, &deps, &VoronoiOptions::default())
        });
        assert!(canvas.is_empty());
        assert!(result.is_empty());
    }
}
