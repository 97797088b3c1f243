#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_scene_to_png, save_png, SkiaCanvas};
