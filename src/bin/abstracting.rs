//! Step 9: the pulsing quad again, this time through the buffer, vertex array,
//! shader and renderer wrappers.

use learn_opengl::{
    animation::ColorPulse,
    config,
    gl_api::{IndexBuffer, Shader, UsageType, VertexArray, VertexBuffer, VertexBufferLayout},
    AppWindow, Renderer, RunOptions, WindowConfig,
};
use structopt::StructOpt;

#[rustfmt::skip]
const POSITIONS: [f32; 8] = [
    -0.5, -0.5,
     0.5, -0.5,
     0.5,  0.5,
    -0.5,  0.5,
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

fn main() -> anyhow::Result<()> {
    config::init_logging();
    let options = RunOptions::from_args();
    let mut window =
        AppWindow::open(&options.window_config(WindowConfig::new("Abstracting", 640, 480)))?;
    let ctx = window.context().clone();

    let mut vertex_array = VertexArray::new(&ctx);
    let vertex_buffer = VertexBuffer::new(&ctx, &POSITIONS, UsageType::StaticDraw);
    let mut layout = VertexBufferLayout::new();
    layout.push::<f32>(2);
    vertex_array.add_buffer(&vertex_buffer, &layout)?;
    let index_buffer = IndexBuffer::new(&ctx, &INDICES);

    let mut shader = Shader::from_file(&ctx, options.shader_path("basic.shader"))?;
    shader.bind();
    shader.set_uniform_4f("u_Color", 0.8, 0.3, 0.8, 1.0);

    vertex_array.unbind();
    vertex_buffer.unbind();
    index_buffer.unbind();
    shader.unbind();

    let renderer = Renderer::new(&ctx);
    let mut red = ColorPulse::default();

    while !window.should_close() {
        renderer.clear();

        shader.bind();
        shader.set_uniform_4f("u_Color", red.value(), 0.3, 0.8, 1.0);
        renderer.draw(&vertex_array, &index_buffer, &shader)?;

        red.step();

        window.swap_buffers();
        window.poll_events();
    }

    Ok(())
}
