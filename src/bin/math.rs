//! Step 11: positions in pixels, mapped to the screen by a model, view and
//! projection matrix.

use cgmath::Vector3;
use learn_opengl::{
    config,
    gl_api::{
        misc, IndexBuffer, Shader, Texture, UsageType, VertexArray, VertexBuffer,
        VertexBufferLayout,
    },
    transform, AppWindow, Renderer, RunOptions, WindowConfig,
};
use structopt::StructOpt;

const WIDTH: u32 = 960;
const HEIGHT: u32 = 540;

#[rustfmt::skip]
const POSITIONS: [f32; 16] = [
    // position       uv
    100.0, 100.0,     0.0, 0.0,
    200.0, 100.0,     1.0, 0.0,
    200.0, 200.0,     1.0, 1.0,
    100.0, 200.0,     0.0, 1.0,
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

fn main() -> anyhow::Result<()> {
    config::init_logging();
    let options = RunOptions::from_args();
    let mut window =
        AppWindow::open(&options.window_config(WindowConfig::new("Math", WIDTH, HEIGHT)))?;
    let ctx = window.context().clone();

    misc::enable_alpha_blending();

    let mut vertex_array = VertexArray::new(&ctx);
    let vertex_buffer = VertexBuffer::new(&ctx, &POSITIONS, UsageType::StaticDraw);
    let mut layout = VertexBufferLayout::new();
    layout.push::<f32>(2).push::<f32>(2);
    vertex_array.add_buffer(&vertex_buffer, &layout)?;
    let index_buffer = IndexBuffer::new(&ctx, &INDICES);

    // one unit per pixel of the view, origin in the bottom left
    let proj = transform::window_projection(WIDTH as f32, HEIGHT as f32);
    // moving the camera right is moving the world left
    let view = transform::camera_view(Vector3::new(100.0, 0.0, 0.0));
    let model = Vector3::new(200.0, 200.0, 0.0);
    let mvp = transform::mvp(&proj, &view, model);

    let mut shader = Shader::from_file(&ctx, options.shader_path("mvp.shader"))?;
    shader.bind();
    shader.set_uniform_mat4f("u_MVP", &mvp);

    let texture = Texture::from_file(&ctx, options.texture_path("logo.png"))?;
    texture.bind(0)?;
    shader.set_sampler("u_Texture", 0);

    let renderer = Renderer::new(&ctx);
    renderer.set_clear_color([0.0, 0.0, 0.0, 1.0]);

    while !window.should_close() {
        renderer.clear();
        renderer.draw(&vertex_array, &index_buffer, &shader)?;

        window.swap_buffers();
        window.poll_events();
    }

    Ok(())
}
