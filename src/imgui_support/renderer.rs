use crate::gl_api::{
    buffer::UsageType,
    context::Context,
    error::GlResult,
    layout::VertexBufferLayout,
    shader::{Shader, ShaderError},
    texture::{Texture, TextureError},
    vertex_array::{VertexArray, VertexArrayError},
    IndexBuffer, VertexBuffer,
};
use cgmath::{ortho, Matrix4};
use gl::types::*;
use imgui::{DrawCmd, DrawCmdParams, DrawData, DrawIdx, DrawVert, TextureId};
use std::mem;
use thiserror::Error;

const SHADER_SOURCE: &str = include_str!("../../resources/shaders/imgui.shader");

#[derive(Debug, Error)]
pub enum ImguiRendererError {
    #[error("failed to build the imgui shader: {0}")]
    Shader(#[from] ShaderError),

    #[error("failed to upload the font atlas: {0}")]
    FontAtlas(#[from] TextureError),

    #[error(transparent)]
    VertexArray(#[from] VertexArrayError),
}

/// Turns an ImGui clip rectangle into a GL scissor box `[x, y, width, height]`.
/// ImGui's origin is the top left, GL's is the bottom left. Returns `None` if
/// nothing would be visible.
pub fn scissor_rect(
    clip_rect: [f32; 4],
    display_pos: [f32; 2],
    scale: [f32; 2],
    fb_height: f32,
) -> Option<[i32; 4]> {
    let min_x = (clip_rect[0] - display_pos[0]) * scale[0];
    let min_y = (clip_rect[1] - display_pos[1]) * scale[1];
    let max_x = (clip_rect[2] - display_pos[0]) * scale[0];
    let max_y = (clip_rect[3] - display_pos[1]) * scale[1];

    if max_x <= min_x || max_y <= min_y {
        return None;
    }

    Some([
        min_x as i32,
        (fb_height - max_y) as i32,
        (max_x - min_x) as i32,
        (max_y - min_y) as i32,
    ])
}

/// Maps the display rectangle onto clip space, flipping y so that ImGui's
/// top-left origin ends up at the top of the screen.
pub fn display_projection(display_pos: [f32; 2], display_size: [f32; 2]) -> Matrix4<f32> {
    let left = display_pos[0];
    let right = display_pos[0] + display_size[0];
    let top = display_pos[1];
    let bottom = display_pos[1] + display_size[1];
    ortho(left, right, bottom, top, -1.0, 1.0)
}

fn is_enabled(cap: GLenum) -> bool {
    gl_call!(assert IsEnabled(cap)) == gl::TRUE
}

fn set_enabled(cap: GLenum, enabled: bool) {
    if enabled {
        gl_call!(assert Enable(cap));
    } else {
        gl_call!(assert Disable(cap));
    }
}

fn get_integer(name: GLenum) -> GLint {
    let mut value = 0;
    gl_call!(assert GetIntegerv(name, &mut value));
    value
}

/// The pieces of GL state the ImGui pass changes.
struct StateBackup {
    program: GLint,
    texture: GLint,
    active_texture: GLint,
    vertex_array: GLint,
    array_buffer: GLint,
    blend_src_rgb: GLint,
    blend_dst_rgb: GLint,
    blend_src_alpha: GLint,
    blend_dst_alpha: GLint,
    blend: bool,
    cull_face: bool,
    depth_test: bool,
    scissor_test: bool,
}

impl StateBackup {
    fn capture() -> Self {
        StateBackup {
            program: get_integer(gl::CURRENT_PROGRAM),
            texture: get_integer(gl::TEXTURE_BINDING_2D),
            active_texture: get_integer(gl::ACTIVE_TEXTURE),
            vertex_array: get_integer(gl::VERTEX_ARRAY_BINDING),
            array_buffer: get_integer(gl::ARRAY_BUFFER_BINDING),
            blend_src_rgb: get_integer(gl::BLEND_SRC_RGB),
            blend_dst_rgb: get_integer(gl::BLEND_DST_RGB),
            blend_src_alpha: get_integer(gl::BLEND_SRC_ALPHA),
            blend_dst_alpha: get_integer(gl::BLEND_DST_ALPHA),
            blend: is_enabled(gl::BLEND),
            cull_face: is_enabled(gl::CULL_FACE),
            depth_test: is_enabled(gl::DEPTH_TEST),
            scissor_test: is_enabled(gl::SCISSOR_TEST),
        }
    }

    fn restore(&self, ctx: &Context) {
        gl_call!(assert UseProgram(self.program as GLuint));
        gl_call!(assert ActiveTexture(self.active_texture as GLenum));
        gl_call!(assert BindTexture(gl::TEXTURE_2D, self.texture as GLuint));
        gl_call!(assert BindVertexArray(self.vertex_array as GLuint));
        gl_call!(assert BindBuffer(gl::ARRAY_BUFFER, self.array_buffer as GLuint));
        gl_call!(assert BlendFuncSeparate(
            self.blend_src_rgb as GLenum,
            self.blend_dst_rgb as GLenum,
            self.blend_src_alpha as GLenum,
            self.blend_dst_alpha as GLenum
        ));
        set_enabled(gl::BLEND, self.blend);
        set_enabled(gl::CULL_FACE, self.cull_face);
        set_enabled(gl::DEPTH_TEST, self.depth_test);
        set_enabled(gl::SCISSOR_TEST, self.scissor_test);
        ctx.set_viewport(ctx.viewport());
    }
}

/// Draws ImGui's output through the same wrappers the tutorial steps use.
pub struct ImguiRenderer {
    ctx: Context,
    shader: Shader,
    vertex_array: VertexArray,
    vertices: VertexBuffer<DrawVert>,
    indices: IndexBuffer<DrawIdx>,
    font_texture: Texture,
}

impl ImguiRenderer {
    pub fn new(ctx: &Context, imgui: &mut imgui::Context) -> Result<Self, ImguiRendererError> {
        imgui.set_renderer_name(Some(format!("learn-opengl-gl {}", env!("CARGO_PKG_VERSION"))));
        imgui
            .io_mut()
            .backend_flags
            .insert(imgui::BackendFlags::RENDERER_HAS_VTX_OFFSET);

        let shader = Shader::from_source(ctx, SHADER_SOURCE)?;

        let fonts = imgui.fonts();
        let atlas = fonts.build_rgba32_texture();
        // the atlas has its first row at v = 0, so it goes up as-is
        let font_texture = Texture::from_rgba(ctx, atlas.width, atlas.height, atlas.data)?;
        fonts.tex_id = TextureId::new(font_texture.id() as usize);

        let mut vertex_array = VertexArray::new(ctx);
        let vertices = VertexBuffer::new(ctx, &[], UsageType::StreamDraw);
        let mut layout = VertexBufferLayout::new();
        layout
            .push::<f32>(2) // position
            .push::<f32>(2) // uv
            .push::<u8>(4); // color
        debug_assert_eq!(layout.stride(), mem::size_of::<DrawVert>());
        vertex_array.add_buffer(&vertices, &layout)?;

        // the element buffer binding is part of the vertex array's state
        let indices = IndexBuffer::with_usage(ctx, &[], UsageType::StreamDraw);
        vertex_array.unbind();

        Ok(ImguiRenderer {
            ctx: ctx.clone(),
            shader,
            vertex_array,
            vertices,
            indices,
            font_texture,
        })
    }

    pub fn font_texture(&self) -> &Texture {
        &self.font_texture
    }

    fn setup_render_state(&mut self, draw_data: &DrawData, fb_width: f32, fb_height: f32) {
        gl_call!(assert Enable(gl::BLEND));
        gl_call!(assert BlendEquation(gl::FUNC_ADD));
        gl_call!(assert BlendFuncSeparate(
            gl::SRC_ALPHA,
            gl::ONE_MINUS_SRC_ALPHA,
            gl::ONE,
            gl::ONE_MINUS_SRC_ALPHA
        ));
        gl_call!(assert Disable(gl::CULL_FACE));
        gl_call!(assert Disable(gl::DEPTH_TEST));
        gl_call!(assert Enable(gl::SCISSOR_TEST));
        gl_call!(assert Viewport(0, 0, fb_width as GLsizei, fb_height as GLsizei));

        let projection = display_projection(draw_data.display_pos, draw_data.display_size);
        self.shader.set_uniform("u_Projection", &projection);
        self.shader.set_sampler("u_Texture", 0);
        gl_call!(assert ActiveTexture(gl::TEXTURE0));

        self.vertex_array.bind();
    }

    pub fn render(&mut self, draw_data: &DrawData) -> GlResult<()> {
        let fb_width = draw_data.display_size[0] * draw_data.framebuffer_scale[0];
        let fb_height = draw_data.display_size[1] * draw_data.framebuffer_scale[1];
        // minimized
        if !(fb_width > 0.0 && fb_height > 0.0) {
            return Ok(());
        }

        let backup = StateBackup::capture();
        self.setup_render_state(draw_data, fb_width, fb_height);

        let mut result = Ok(());
        for draw_list in draw_data.draw_lists() {
            self.vertices.update(draw_list.vtx_buffer());
            self.indices.update(draw_list.idx_buffer(), UsageType::StreamDraw);

            for command in draw_list.commands() {
                match command {
                    DrawCmd::Elements { count, cmd_params } => {
                        if let Err(err) = self.draw_elements(draw_data, fb_height, count, &cmd_params) {
                            result = Err(err);
                        }
                    }
                    DrawCmd::ResetRenderState => self.setup_render_state(draw_data, fb_width, fb_height),
                    // nothing here registers draw callbacks
                    DrawCmd::RawCallback { .. } => {}
                }
            }
        }

        backup.restore(&self.ctx);
        result
    }

    fn draw_elements(
        &self,
        draw_data: &DrawData,
        fb_height: f32,
        count: usize,
        params: &DrawCmdParams,
    ) -> GlResult<()> {
        let rect = match scissor_rect(
            params.clip_rect,
            draw_data.display_pos,
            draw_data.framebuffer_scale,
            fb_height,
        ) {
            Some(rect) => rect,
            None => return Ok(()),
        };

        gl_call!(assert Scissor(rect[0], rect[1], rect[2], rect[3]));
        gl_call!(BindTexture(gl::TEXTURE_2D, params.texture_id.id() as GLuint))?;

        let offset = params.idx_offset * mem::size_of::<DrawIdx>();
        gl_call!(DrawElementsBaseVertex(
            gl::TRIANGLES,
            count as GLsizei,
            self.indices.index_type(),
            offset as *const _,
            params.vtx_offset as GLint
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Vector4;

    #[test]
    fn scissor_flips_y() {
        let rect = scissor_rect([10.0, 20.0, 110.0, 70.0], [0.0, 0.0], [1.0, 1.0], 540.0);
        assert_eq!(rect, Some([10, 470, 100, 50]));
    }

    #[test]
    fn scissor_scales_to_framebuffer_pixels() {
        let rect = scissor_rect([10.0, 20.0, 110.0, 70.0], [0.0, 0.0], [2.0, 2.0], 1080.0);
        assert_eq!(rect, Some([20, 940, 200, 100]));
    }

    #[test]
    fn scissor_is_relative_to_display_pos() {
        let rect = scissor_rect([110.0, 120.0, 210.0, 170.0], [100.0, 100.0], [1.0, 1.0], 540.0);
        assert_eq!(rect, Some([10, 470, 100, 50]));
    }

    #[test]
    fn empty_clip_rects_are_skipped() {
        assert_eq!(scissor_rect([50.0, 50.0, 50.0, 80.0], [0.0, 0.0], [1.0, 1.0], 540.0), None);
        assert_eq!(scissor_rect([50.0, 80.0, 90.0, 20.0], [0.0, 0.0], [1.0, 1.0], 540.0), None);
    }

    #[test]
    fn projection_puts_origin_top_left() {
        let proj = display_projection([0.0, 0.0], [960.0, 540.0]);

        let top_left = proj * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(top_left, Vector4::new(-1.0, 1.0, 0.0, 1.0));

        let bottom_right = proj * Vector4::new(960.0, 540.0, 0.0, 1.0);
        assert_relative_eq!(bottom_right, Vector4::new(1.0, -1.0, 0.0, 1.0));
    }

    #[test]
    fn draw_vert_matches_the_layout() {
        assert_eq!(mem::size_of::<DrawVert>(), 20);
        assert_eq!(mem::size_of::<DrawIdx>(), 2);
    }
}
