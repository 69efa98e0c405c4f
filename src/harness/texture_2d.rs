use crate::{
    animation::Bouncer,
    gl_api::{
        misc, Context, IndexBuffer, Shader, Texture, UsageType, VertexArray, VertexBuffer,
        VertexBufferLayout,
    },
    harness::Test,
    renderer::Renderer,
    transform,
};
use anyhow::Context as _;
use cgmath::{Matrix4, Vector2, Vector3};
use std::path::Path;

pub const VIEW_WIDTH: f32 = 960.0;
pub const VIEW_HEIGHT: f32 = 540.0;

#[rustfmt::skip]
const POSITIONS: [f32; 16] = [
    // position       uv
    -50.0, -50.0,     0.0, 0.0, // bottom left
     50.0, -50.0,     1.0, 0.0, // bottom right
     50.0,  50.0,     1.0, 1.0, // top right
    -50.0,  50.0,     0.0, 1.0, // top left
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Two copies of a textured quad bouncing around the view.
pub struct Texture2D {
    vertex_array: VertexArray,
    _vertex_buffer: VertexBuffer<f32>,
    index_buffer: IndexBuffer<u32>,
    shader: Shader,
    texture: Texture,

    proj: Matrix4<f32>,
    view: Matrix4<f32>,
    quads: [Bouncer; 2],
}

impl Texture2D {
    pub fn new(ctx: &Context, shader: &Path, texture: &Path) -> anyhow::Result<Self> {
        misc::enable_alpha_blending();

        let mut vertex_array = VertexArray::new(ctx);
        let vertex_buffer = VertexBuffer::new(ctx, &POSITIONS, UsageType::StaticDraw);
        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(2).push::<f32>(2);
        vertex_array.add_buffer(&vertex_buffer, &layout)?;
        let index_buffer = IndexBuffer::new(ctx, &INDICES);

        let mut shader = Shader::from_file(ctx, shader)
            .with_context(|| format!("loading shader `{}`", shader.display()))?;
        shader.bind();
        let texture = Texture::from_file(ctx, texture)?;
        shader.set_uniform_1i("u_Texture", 0);

        let speed = Vector2::new(2, 2);
        Ok(Texture2D {
            vertex_array,
            _vertex_buffer: vertex_buffer,
            index_buffer,
            shader,
            texture,

            proj: transform::window_projection(VIEW_WIDTH, VIEW_HEIGHT),
            view: transform::identity(),
            quads: [
                Bouncer::new(Vector3::new(50.0, 50.0, 0.0), speed, VIEW_WIDTH, VIEW_HEIGHT),
                Bouncer::new(Vector3::new(600.0, 50.0, 0.0), speed, VIEW_WIDTH, VIEW_HEIGHT),
            ],
        })
    }
}

impl Test for Texture2D {
    fn on_render(&mut self, renderer: &Renderer) -> anyhow::Result<()> {
        renderer.set_clear_color([0.0, 0.0, 0.0, 1.0]);
        renderer.clear();
        self.texture.bind(0)?;

        for quad in &mut self.quads {
            let translation = quad.step();
            let mvp = transform::mvp(&self.proj, &self.view, translation);
            self.shader.set_uniform_mat4f("u_MVP", &mvp);
            renderer.draw(&self.vertex_array, &self.index_buffer, &self.shader)?;
        }

        Ok(())
    }

    fn on_imgui_render(&mut self, ui: &imgui::Ui) {
        let [a, b] = &mut self.quads;

        let translation: &mut [f32; 3] = a.translation.as_mut();
        ui.slider_config("Translation A", 0.0, VIEW_WIDTH)
            .build_array(translation);
        let translation: &mut [f32; 3] = b.translation.as_mut();
        ui.slider_config("Translation B", 0.0, VIEW_WIDTH)
            .build_array(translation);

        let speed: &mut [i32; 2] = a.speed.as_mut();
        ui.slider_config("Speed A", -20, 20).build_array(speed);
        let speed: &mut [i32; 2] = b.speed.as_mut();
        ui.slider_config("Speed B", -20, 20).build_array(speed);

        let framerate = ui.io().framerate;
        ui.text(format!(
            "Application average {:.3} ms/frame ({:.1} FPS)",
            1000.0 / framerate,
            framerate
        ));
    }
}
