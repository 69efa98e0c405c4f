//! Steps 3 to 6: a triangle straight from raw GL calls, every one of them
//! checked for errors.

use anyhow::bail;
use gl::types::*;
use learn_opengl::{config, gl_api::GlResult, gl_call, AppWindow, RunOptions, WindowConfig};
use std::{mem, ptr};
use structopt::StructOpt;

const VERTEX_SHADER: &str = r#"
#version 330 core

layout(location = 0) in vec4 position;

void main() {
    gl_Position = position;
}
"#;

const FRAGMENT_SHADER: &str = r#"
#version 330 core

layout(location = 0) out vec4 color;

void main() {
    color = vec4(1.0, 0.5, 0.2, 1.0);
}
"#;

fn compile_shader(ty: GLenum, source: &str) -> anyhow::Result<GLuint> {
    let id = gl_call!(CreateShader(ty))?;

    // one string, with its length given so it needn't be nul-terminated
    let src = source.as_ptr() as *const GLchar;
    let len = source.len() as GLint;
    gl_call!(ShaderSource(id, 1, &src, &len))?;
    gl_call!(CompileShader(id))?;

    let mut status = 0;
    gl_call!(GetShaderiv(id, gl::COMPILE_STATUS, &mut status))?;
    if status == gl::FALSE as GLint {
        let mut length = 0;
        gl_call!(GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut length))?;
        let mut message = vec![0u8; length.max(1) as usize];
        gl_call!(GetShaderInfoLog(id, length, &mut length, message.as_mut_ptr() as *mut GLchar))?;
        message.truncate(length.max(0) as usize);
        gl_call!(DeleteShader(id))?;

        let stage = if ty == gl::VERTEX_SHADER { "vertex" } else { "fragment" };
        bail!("{} shader compilation failed: {}", stage, String::from_utf8_lossy(&message));
    }

    Ok(id)
}

fn create_program(vertex: &str, fragment: &str) -> anyhow::Result<GLuint> {
    let vs = compile_shader(gl::VERTEX_SHADER, vertex)?;
    let fs = compile_shader(gl::FRAGMENT_SHADER, fragment)?;

    let program = gl_call!(CreateProgram())?;
    gl_call!(AttachShader(program, vs))?;
    gl_call!(AttachShader(program, fs))?;
    gl_call!(LinkProgram(program))?;
    // the result only shows up in the program's state
    gl_call!(ValidateProgram(program))?;

    // the linked program keeps its own copy of the compiled code
    gl_call!(DeleteShader(vs))?;
    gl_call!(DeleteShader(fs))?;

    Ok(program)
}

fn draw(vertex_count: GLsizei) -> GlResult<()> {
    gl_call!(Clear(gl::COLOR_BUFFER_BIT))?;
    gl_call!(DrawArrays(gl::TRIANGLES, 0, vertex_count))
}

fn main() -> anyhow::Result<()> {
    config::init_logging();
    let options = RunOptions::from_args();
    let mut window =
        AppWindow::open(&options.window_config(WindowConfig::new("Raw Triangle", 640, 480)))?;

    #[rustfmt::skip]
    let positions: [f32; 6] = [
        -0.5, -0.5,
         0.0,  0.5,
         0.5, -0.5,
    ];

    // core profiles have no default vertex array, so attribute state needs
    // somewhere to live
    let mut vao = 0;
    gl_call!(GenVertexArrays(1, &mut vao))?;
    gl_call!(BindVertexArray(vao))?;

    let mut buffer = 0;
    gl_call!(GenBuffers(1, &mut buffer))?;
    gl_call!(BindBuffer(gl::ARRAY_BUFFER, buffer))?;
    gl_call!(BufferData(
        gl::ARRAY_BUFFER,
        mem::size_of_val(&positions) as GLsizeiptr,
        positions.as_ptr() as *const _,
        gl::STATIC_DRAW
    ))?;

    // attribute 0 is two floats per vertex, tightly packed, starting at the
    // beginning of the bound buffer
    gl_call!(EnableVertexAttribArray(0))?;
    gl_call!(VertexAttribPointer(
        0,
        2,
        gl::FLOAT,
        gl::FALSE,
        (2 * mem::size_of::<f32>()) as GLsizei,
        ptr::null()
    ))?;

    let program = create_program(VERTEX_SHADER, FRAGMENT_SHADER)?;
    gl_call!(UseProgram(program))?;

    while !window.should_close() {
        draw(3)?;
        window.swap_buffers();
        window.poll_events();
    }

    gl_call!(DeleteProgram(program))?;
    gl_call!(DeleteBuffers(1, &buffer))?;
    gl_call!(DeleteVertexArrays(1, &vao))?;
    Ok(())
}
