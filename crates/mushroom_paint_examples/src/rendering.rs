use std::path::Path as FsPath;

use anyhow::{anyhow, Context};
use glam::Vec2;
use mushroom_paint::prelude::*;
use tiny_skia::{FillRule, Mask, Paint, PathBuilder, Pixmap, Rect, Transform};
use tracing::info;

/// Initializes a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[derive(Clone)]
struct State {
    transform: Transform,
    mask: Option<Mask>,
}

/// Raster [`Canvas`] backed by a tiny-skia pixmap.
pub struct SkiaCanvas {
    pixmap: Pixmap,
    state: State,
    stack: Vec<State>,
}

impl SkiaCanvas {
    pub fn new(width: u32, height: u32, background: Hsba) -> anyhow::Result<Self> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or_else(|| anyhow!("invalid pixmap size {width}x{height}"))?;
        let [r, g, b, a] = background.to_rgba8();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        Ok(Self {
            pixmap,
            state: State {
                transform: Transform::identity(),
                mask: None,
            },
            stack: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn paint(color: Hsba) -> Paint<'static> {
        let [r, g, b, a] = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }

    fn fill(&mut self, path: Option<tiny_skia::Path>, color: Hsba) {
        let Some(path) = path else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::paint(color),
            FillRule::Winding,
            self.state.transform,
            self.state.mask.as_ref(),
        );
    }
}

fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo(p) => pb.move_to(p.x, p.y),
            PathCommand::LineTo(p) => pb.line_to(p.x, p.y),
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y)
            }
            PathCommand::Close => pb.close(),
        }
    }
    pb.finish()
}

fn polygon_path(points: &[Vec2]) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.close();
    pb.finish()
}

impl Canvas for SkiaCanvas {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.transform = self.state.transform.pre_translate(offset.x, offset.y);
    }

    fn rotate(&mut self, angle: f32) {
        self.state.transform = self
            .state
            .transform
            .pre_concat(Transform::from_rotate(angle.to_degrees()));
    }

    fn scale(&mut self, factor: f32) {
        self.state.transform = self.state.transform.pre_scale(factor, factor);
    }

    fn clip(&mut self, path: &Path) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let transform = self.state.transform;
        match self.state.mask.as_mut() {
            Some(mask) => mask.intersect_path(&path, FillRule::Winding, true, transform),
            None => {
                if let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) {
                    mask.fill_path(&path, FillRule::Winding, true, transform);
                    self.state.mask = Some(mask);
                }
            }
        }
    }

    fn fill_path(&mut self, path: &Path, color: Hsba) {
        self.fill(to_skia_path(path), color);
    }

    fn stroke_path(&mut self, path: &Path, stroke: Stroke) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let style = tiny_skia::Stroke {
            width: stroke.width,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &Self::paint(stroke.color),
            &style,
            self.state.transform,
            self.state.mask.as_ref(),
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsba) {
        self.fill(PathBuilder::from_circle(center.x, center.y, radius), color);
    }

    fn fill_ellipse(&mut self, center: Vec2, size: Vec2, color: Hsba) {
        let rect = Rect::from_xywh(
            center.x - size.x / 2.0,
            center.y - size.y / 2.0,
            size.x,
            size.y,
        );
        self.fill(rect.and_then(PathBuilder::from_oval), color);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Hsba, stroke: Option<Stroke>) {
        let Some(path) = polygon_path(points) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::paint(color),
            FillRule::Winding,
            self.state.transform,
            self.state.mask.as_ref(),
        );
        if let Some(stroke) = stroke {
            let style = tiny_skia::Stroke {
                width: stroke.width,
                ..Default::default()
            };
            self.pixmap.stroke_path(
                &path,
                &Self::paint(stroke.color),
                &style,
                self.state.transform,
                self.state.mask.as_ref(),
            );
        }
    }
}

/// Writes the canvas as an 8-bit RGBA PNG.
pub fn save_png(canvas: &SkiaCanvas, out: impl AsRef<FsPath>) -> anyhow::Result<()> {
    let out = out.as_ref();
    let data: Vec<u8> = canvas
        .pixmap()
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    let img = image::RgbaImage::from_raw(canvas.width(), canvas.height(), data)
        .ok_or_else(|| anyhow!("pixel buffer does not match image size"))?;
    img.save(out)
        .with_context(|| format!("writing {}", out.display()))?;
    info!("Wrote {}.", out.display());
    Ok(())
}

/// Draws one frame of `scene` on a fresh canvas and saves it.
pub fn render_scene_to_png(
    scene: &mut Scene,
    size: (u32, u32),
    background: Hsba,
    frame: Frame,
    out: impl AsRef<FsPath>,
) -> anyhow::Result<PaintResult> {
    let mut canvas = SkiaCanvas::new(size.0, size.1, background)?;
    let result = scene.draw(&mut canvas, frame);
    save_png(&canvas, out)?;
    Ok(result)
}
