//! Step 13: one set of buffers drawn twice per frame with a different MVP
//! each time, the two quads bouncing off the edges of the view.

use cgmath::{Vector2, Vector3};
use learn_opengl::{
    animation::Bouncer,
    config,
    gl_api::{
        misc, IndexBuffer, Shader, Texture, UsageType, VertexArray, VertexBuffer,
        VertexBufferLayout,
    },
    imgui_support::ImguiLayer,
    transform, AppWindow, Renderer, RunOptions, WindowConfig,
};
use structopt::StructOpt;

const WIDTH: u32 = 960;
const HEIGHT: u32 = 540;

#[rustfmt::skip]
const POSITIONS: [f32; 16] = [
    // position       uv
    -50.0, -50.0,     0.0, 0.0,
     50.0, -50.0,     1.0, 0.0,
     50.0,  50.0,     1.0, 1.0,
    -50.0,  50.0,     0.0, 1.0,
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

fn main() -> anyhow::Result<()> {
    config::init_logging();
    let options = RunOptions::from_args();
    let mut window =
        AppWindow::open(&options.window_config(WindowConfig::new("Learn OpenGL", WIDTH, HEIGHT)))?;
    let ctx = window.context().clone();

    misc::enable_alpha_blending();

    // the quad is centered on the origin, so the model matrix alone decides
    // where each copy ends up
    let mut vertex_array = VertexArray::new(&ctx);
    let vertex_buffer = VertexBuffer::new(&ctx, &POSITIONS, UsageType::StaticDraw);
    let mut layout = VertexBufferLayout::new();
    layout.push::<f32>(2).push::<f32>(2);
    vertex_array.add_buffer(&vertex_buffer, &layout)?;
    let index_buffer = IndexBuffer::new(&ctx, &INDICES);

    let proj = transform::window_projection(WIDTH as f32, HEIGHT as f32);
    let view = transform::identity();

    let texture = Texture::from_file(&ctx, options.texture_path("logo.png"))?;
    texture.bind(0)?;

    let mut shader = Shader::from_file(&ctx, options.shader_path("mvp.shader"))?;
    shader.bind();
    shader.set_sampler("u_Texture", 0);
    shader.unbind();

    let renderer = Renderer::new(&ctx);
    renderer.set_clear_color([0.0, 0.0, 0.0, 1.0]);
    let mut imgui = ImguiLayer::new(&window)?;

    let (width, height) = (WIDTH as f32, HEIGHT as f32);
    let mut quad_a = Bouncer::new(Vector3::new(50.0, 50.0, 0.0), Vector2::new(1, 1), width, height);
    let mut quad_b = Bouncer::new(Vector3::new(600.0, 50.0, 0.0), Vector2::new(1, 1), width, height);

    while !window.should_close() {
        for event in window.poll_events() {
            imgui.handle_event(&event);
        }

        renderer.clear();

        // uniforms go to whichever program is bound, so bind once for both
        // objects
        shader.bind();
        for quad in [&mut quad_a, &mut quad_b] {
            let mvp = transform::mvp(&proj, &view, quad.step());
            shader.set_uniform_mat4f("u_MVP", &mvp);
            renderer.draw(&vertex_array, &index_buffer, &shader)?;
        }

        imgui.frame(&window, |ui| {
            ui.window("Model translation").build(|| {
                let translation: &mut [f32; 3] = quad_a.translation.as_mut();
                ui.slider_config("TranslationA", 0.0, width).build_array(translation);
                let translation: &mut [f32; 3] = quad_b.translation.as_mut();
                ui.slider_config("TranslationB", 0.0, width).build_array(translation);

                let speed: &mut [i32; 2] = quad_a.speed.as_mut();
                ui.slider_config("SpeedA", -20, 20).build_array(speed);
                let speed: &mut [i32; 2] = quad_b.speed.as_mut();
                ui.slider_config("SpeedB", -20, 20).build_array(speed);

                let framerate = ui.io().framerate;
                ui.text(format!(
                    "Application average {:.3} ms/frame ({:.1} FPS)",
                    1000.0 / framerate,
                    framerate
                ));
            });
        })?;

        window.swap_buffers();
    }

    Ok(())
}
