//! Step 12: the same texture drawn twice, with both positions editable from
//! an ImGui window.

use cgmath::Vector3;
use learn_opengl::{
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
        AppWindow::open(&options.window_config(WindowConfig::new("ImGui", WIDTH, HEIGHT)))?;
    let ctx = window.context().clone();

    misc::enable_alpha_blending();

    let mut vertex_array = VertexArray::new(&ctx);
    let vertex_buffer = VertexBuffer::new(&ctx, &POSITIONS, UsageType::StaticDraw);
    let mut layout = VertexBufferLayout::new();
    layout.push::<f32>(2).push::<f32>(2);
    vertex_array.add_buffer(&vertex_buffer, &layout)?;
    let index_buffer = IndexBuffer::new(&ctx, &INDICES);

    let mut shader = Shader::from_file(&ctx, options.shader_path("mvp.shader"))?;
    shader.bind();
    let texture = Texture::from_file(&ctx, options.texture_path("logo.png"))?;
    shader.set_sampler("u_Texture", 0);

    let renderer = Renderer::new(&ctx);
    renderer.set_clear_color([0.0, 0.0, 0.0, 1.0]);
    let mut imgui = ImguiLayer::new(&window)?;

    let proj = transform::window_projection(WIDTH as f32, HEIGHT as f32);
    let view = transform::identity();
    let mut translation_a = [200.0f32, 200.0, 0.0];
    let mut translation_b = [400.0f32, 200.0, 0.0];

    while !window.should_close() {
        for event in window.poll_events() {
            imgui.handle_event(&event);
        }

        renderer.clear();
        texture.bind(0)?;

        for translation in [translation_a, translation_b] {
            let mvp = transform::mvp(&proj, &view, Vector3::from(translation));
            shader.set_uniform_mat4f("u_MVP", &mvp);
            renderer.draw(&vertex_array, &index_buffer, &shader)?;
        }

        imgui.frame(&window, |ui| {
            ui.window("Debug").build(|| {
                ui.slider_config("Translation A", 0.0, WIDTH as f32)
                    .build_array(&mut translation_a);
                ui.slider_config("Translation B", 0.0, WIDTH as f32)
                    .build_array(&mut translation_b);

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
