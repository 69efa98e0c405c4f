//! Steps 1 and 2: a window, an OpenGL context, and a cleared screen.

use learn_opengl::{config, gl_api::misc, AppWindow, RunOptions, WindowConfig};
use structopt::StructOpt;

fn main() -> anyhow::Result<()> {
    config::init_logging();
    let options = RunOptions::from_args();

    // GLFW creates the window and its context with a single call. If the driver
    // can't provide the requested version, creation fails.
    let mut window = AppWindow::open(&options.window_config(WindowConfig::new("Window", 640, 480)))?;
    let driver = window.context().info();
    log::info!("GLSL {} from {}", driver.shading_language, driver.vendor);

    misc::clear_color(0.1, 0.1, 0.15, 1.0);

    while !window.should_close() {
        // clears the buffers currently enabled for color writing
        misc::clear();

        // we draw to the back buffer while the front buffer is on screen
        window.swap_buffers();

        // GLFW has to talk to the window system regularly, both to receive
        // events and to show that we haven't locked up. Escape is handled in
        // here too.
        window.poll_events();
    }

    Ok(())
}
