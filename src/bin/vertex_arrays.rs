//! Steps 7 and 8: an indexed quad whose attribute and index bindings are kept
//! in a vertex array object, tinted by a uniform that pulses every frame.

use anyhow::Context as _;
use gl::types::*;
use learn_opengl::{
    animation::ColorPulse,
    config,
    gl_api::{shader::ShaderProgramSource, Shader},
    gl_call, AppWindow, RunOptions, WindowConfig,
};
use std::{ffi::CString, fs, mem, ptr};
use structopt::StructOpt;

fn main() -> anyhow::Result<()> {
    config::init_logging();
    let options = RunOptions::from_args();
    let mut window =
        AppWindow::open(&options.window_config(WindowConfig::new("Vertex Arrays", 640, 480)))?;

    #[rustfmt::skip]
    let positions: [f32; 8] = [
        -0.5, -0.5,
         0.5, -0.5,
         0.5,  0.5,
        -0.5,  0.5,
    ];
    let indices: [u32; 6] = [0, 1, 2, 2, 3, 0];

    let mut vao = 0;
    gl_call!(GenVertexArrays(1, &mut vao))?;
    gl_call!(BindVertexArray(vao))?;

    let mut vbo = 0;
    gl_call!(GenBuffers(1, &mut vbo))?;
    gl_call!(BindBuffer(gl::ARRAY_BUFFER, vbo))?;
    gl_call!(BufferData(
        gl::ARRAY_BUFFER,
        mem::size_of_val(&positions) as GLsizeiptr,
        positions.as_ptr() as *const _,
        gl::STATIC_DRAW
    ))?;

    // this is what ties the buffer bound above to attribute 0 of the bound
    // vertex array
    gl_call!(EnableVertexAttribArray(0))?;
    gl_call!(VertexAttribPointer(
        0,
        2,
        gl::FLOAT,
        gl::FALSE,
        (2 * mem::size_of::<f32>()) as GLsizei,
        ptr::null()
    ))?;

    // the element buffer binding is part of vertex array state too
    let mut ibo = 0;
    gl_call!(GenBuffers(1, &mut ibo))?;
    gl_call!(BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo))?;
    gl_call!(BufferData(
        gl::ELEMENT_ARRAY_BUFFER,
        mem::size_of_val(&indices) as GLsizeiptr,
        indices.as_ptr() as *const _,
        gl::STATIC_DRAW
    ))?;

    let path = options.shader_path("basic.shader");
    let text = fs::read_to_string(&path).with_context(|| format!("reading `{}`", path.display()))?;
    let source = ShaderProgramSource::parse(&text)?;
    log::debug!("vertex stage:\n{}", source.vertex);
    log::debug!("fragment stage:\n{}", source.fragment);
    let shader = Shader::from_stages(window.context(), &source.vertex, &source.fragment)?;
    shader.bind();

    let name = CString::new("u_Color")?;
    let location = gl_call!(GetUniformLocation(shader.id(), name.as_ptr()))?;
    if location == -1 {
        log::warn!("`u_Color` is not an active uniform");
    }

    // unbind everything, so the draw below has to rebind what it uses
    gl_call!(BindVertexArray(0))?;
    gl_call!(UseProgram(0))?;
    gl_call!(BindBuffer(gl::ARRAY_BUFFER, 0))?;
    gl_call!(BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0))?;

    let mut red = ColorPulse::default();

    while !window.should_close() {
        gl_call!(Clear(gl::COLOR_BUFFER_BIT))?;

        shader.bind();
        gl_call!(Uniform4f(location, red.value(), 0.3, 0.8, 1.0))?;

        // binding the vertex array brings back both the attribute layout and
        // the index buffer
        gl_call!(BindVertexArray(vao))?;
        gl_call!(DrawElements(
            gl::TRIANGLES,
            indices.len() as GLsizei,
            gl::UNSIGNED_INT,
            ptr::null()
        ))?;

        red.step();

        window.swap_buffers();
        window.poll_events();
    }

    gl_call!(DeleteBuffers(1, &ibo))?;
    gl_call!(DeleteBuffers(1, &vbo))?;
    gl_call!(DeleteVertexArrays(1, &vao))?;
    Ok(())
}
