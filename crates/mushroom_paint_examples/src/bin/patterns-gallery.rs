use glam::Vec2;
use mushroom_paint::prelude::*;
use mushroom_paint_examples::{init_tracing, save_png, SkiaCanvas};

const TILE: f32 = 240.0;
const PADDING: f32 = 20.0;
const COLUMNS: usize = 5;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let kinds: Vec<PatternKind> = PatternKind::ALL
        .into_iter()
        .filter(|k| *k != PatternKind::None)
        .collect();
    let rows = kinds.len().div_ceil(COLUMNS);
    let cell = TILE + PADDING;
    let width = (COLUMNS as f32 * cell + PADDING) as u32;
    let height = (rows as f32 * cell + PADDING) as u32;

    let mut canvas = SkiaCanvas::new(width, height, Hsba::new(0.0, 0.0, 12.0))?;
    let backdrop = Hsba::new(30.0, 20.0, 85.0);
    let local = Bounds::from_rect(Vec2::ZERO, Vec2::splat(TILE));
    let outline = Path::from_polygon(&local.corners());

    for (i, kind) in kinds.into_iter().enumerate() {
        let origin = Vec2::new(
            PADDING + (i % COLUMNS) as f32 * cell,
            PADDING + (i / COLUMNS) as f32 * cell,
        );
        let deps = RegionDeps::rect(local)
            .with_top_curve(vec![
                Vec2::ZERO,
                Vec2::new(TILE / 2.0, 0.0),
                Vec2::new(TILE, 0.0),
            ])
            .with_accents(Hsba::new(12.0, 80.0, 90.0), Hsba::new(190.0, 60.0, 70.0));

        let mut scope = scoped(&mut canvas);
        scope.translate(origin);
        scope.fill_path(&outline, backdrop);
        let mut entropy = Entropy::from_seed(2025 + i as u64);
        let result = with_clip(&mut *scope, &outline, |c| {
            let mut ctx = PaintCtx::new(c, &mut entropy, Frame::still());
            Pattern::with_defaults(kind).paint(&mut ctx, &deps)
        });
        tracing::info!("{kind}: {} primitives.", result.drawn);
    }

    save_png(&canvas, "patterns-gallery.png")
}
