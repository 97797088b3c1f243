use mushroom_paint::prelude::*;
use mushroom_paint_examples::{init_tracing, render_scene_to_png};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let library = TemplateLibrary::builtin();
    let mut scene = SceneConfig::red_amanita().instantiate(&library);

    let result = render_scene_to_png(
        &mut scene,
        (1200, 1000),
        Hsba::new(40.0, 8.0, 96.0),
        Frame::still(),
        "scene-red-amanita.png",
    )?;
    tracing::info!("Drew {} primitives.", result.drawn);

    Ok(())
}
