use mushroom_paint::prelude::*;
use mushroom_paint_examples::{init_tracing, render_scene_to_png};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let frame_count = 8u64;
    let frame_step = 8u64;

    let library = TemplateLibrary::builtin();
    let mut scene = SceneConfig::small_mushrooms().instantiate(&library);

    // Start every mushroom pulsing by clicking on its cap.
    let caps: Vec<_> = scene
        .mushrooms()
        .iter()
        .map(|m| m.position(PartKind::Cap))
        .collect();
    for cap in caps {
        scene.toggle_pulse_at(cap);
    }

    for i in 0..frame_count {
        let frame = Frame::animated(i * frame_step);
        let out = format!("scene-animated-frame-{i:02}.png");
        render_scene_to_png(
            &mut scene,
            (1200, 1000),
            Hsba::new(200.0, 10.0, 15.0),
            frame,
            out,
        )?;
    }

    Ok(())
}
