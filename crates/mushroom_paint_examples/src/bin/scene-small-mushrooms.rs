//! Renders the built-in small mushroom cluster, or a RON scene passed as the first argument.
use mushroom_paint::prelude::*;
use mushroom_paint_examples::{init_tracing, render_scene_to_png};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::from_ron_str(&std::fs::read_to_string(&path)?)?,
        None => SceneConfig::small_mushrooms(),
    };

    let library = TemplateLibrary::builtin();
    let mut scene = config.instantiate(&library);
    render_scene_to_png(
        &mut scene,
        (1200, 1000),
        Hsba::new(200.0, 10.0, 15.0),
        Frame::still(),
        "scene-small-mushrooms.png",
    )?;

    Ok(())
}
