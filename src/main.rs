//! Step 14: every scene behind one menu.

use learn_opengl::{
    config,
    gl_api::{misc, Context},
    harness::{ClearColor, TestHarness, TestMenu, Texture2D},
    imgui_support::ImguiLayer,
    AppWindow, Renderer, RunOptions, WindowConfig,
};
use structopt::StructOpt;

fn build_menu(options: &RunOptions) -> TestMenu<Context> {
    let shader = options.shader_path("mvp.shader");
    let texture = options.texture_path("logo.png");

    let mut menu = TestMenu::new();
    menu.register("Clear Color", |_| Ok(ClearColor::default()))
        .register("Texture 2D", move |ctx| Texture2D::new(ctx, &shader, &texture));
    menu
}

fn main() -> anyhow::Result<()> {
    config::init_logging();
    let options = RunOptions::from_args();

    let mut window =
        AppWindow::open(&options.window_config(WindowConfig::new("Learn OpenGL", 960, 540)))?;
    let ctx = window.context().clone();
    misc::enable_alpha_blending();

    let renderer = Renderer::new(&ctx);
    let mut imgui = ImguiLayer::new(&window)?;
    let mut harness = TestHarness::new(build_menu(&options), ctx);

    if let Some(name) = &options.test {
        harness.select(name)?;
    }

    let mut last_frame = window.time();
    while !window.should_close() {
        for event in window.poll_events() {
            imgui.handle_event(&event);
        }

        let now = window.time();
        let delta_time = (now - last_frame) as f32;
        last_frame = now;

        renderer.set_clear_color([0.0, 0.0, 0.0, 1.0]);
        renderer.clear();

        harness.on_update(delta_time);
        if let Err(err) = harness.on_render(&renderer) {
            log::error!("test `{}` failed: {:#}", harness.current().unwrap_or("?"), err);
            harness.back();
        }

        imgui.frame(&window, |ui| harness.on_imgui_render(ui))?;
        window.swap_buffers();
    }

    Ok(())
}
