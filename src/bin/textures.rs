//! Step 10: a textured quad, blended over the background by the texture's
//! alpha channel.

use learn_opengl::{
    config,
    gl_api::{
        misc, IndexBuffer, Shader, Texture, UsageType, VertexArray, VertexBuffer,
        VertexBufferLayout,
    },
    AppWindow, Renderer, RunOptions, WindowConfig,
};
use structopt::StructOpt;

#[rustfmt::skip]
const POSITIONS: [f32; 16] = [
    // position   uv
    -0.5, -0.5,   0.0, 0.0,
     0.5, -0.5,   1.0, 0.0,
     0.5,  0.5,   1.0, 1.0,
    -0.5,  0.5,   0.0, 1.0,
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

fn main() -> anyhow::Result<()> {
    config::init_logging();
    let options = RunOptions::from_args();
    let mut window =
        AppWindow::open(&options.window_config(WindowConfig::new("Textures", 640, 480)))?;
    let ctx = window.context().clone();

    misc::enable_alpha_blending();

    let mut vertex_array = VertexArray::new(&ctx);
    let vertex_buffer = VertexBuffer::new(&ctx, &POSITIONS, UsageType::StaticDraw);
    let mut layout = VertexBufferLayout::new();
    layout.push::<f32>(2).push::<f32>(2);
    vertex_array.add_buffer(&vertex_buffer, &layout)?;
    let index_buffer = IndexBuffer::new(&ctx, &INDICES);

    let mut shader = Shader::from_file(&ctx, options.shader_path("texture.shader"))?;
    shader.bind();

    let texture = Texture::from_file(&ctx, options.texture_path("logo.png"))?;
    log::info!("loaded {}x{} texture", texture.width(), texture.height());
    texture.bind(0)?;
    // samplers are set to the slot number, not the texture id
    shader.set_uniform_1i("u_Texture", 0);

    let renderer = Renderer::new(&ctx);
    renderer.set_clear_color([0.1, 0.1, 0.15, 1.0]);

    while !window.should_close() {
        renderer.clear();
        renderer.draw(&vertex_array, &index_buffer, &shader)?;

        window.swap_buffers();
        window.poll_events();
    }

    Ok(())
}
