// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

//! Native OpenGL backend built on the `gl` function loader.

use gl::types::*;
use std::{
    ffi::{c_void, CString},
    marker::PhantomData,
};

use crate::{
    geometry::{Point, Size},
    renderer::array_data::ArrayData,
};

use super::*;

/// [`GraphicsContext`] over the OpenGL context current on this thread.
///
/// The `gl` crate dispatches through process-wide function pointers, so
/// this type carries no state of its own. It is deliberately `!Send`:
/// GL contexts are bound to the thread that made them current.
#[derive(Debug)]
pub struct GlContext {
    _not_send: PhantomData<*const ()>,
}

impl GlContext {
    /// Loads GL entry points through `loader` (typically the windowing
    /// library's `get_proc_address`).
    ///
    /// The caller must make a GL context current on this thread before
    /// any resource is created through the returned value.
    pub fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        #[cfg(debug_assertions)]
        super::gl_debug::setup_opengl_debugging();

        Self {
            _not_send: PhantomData,
        }
    }
}

fn info_log(length: GLint, read: impl FnOnce(GLsizei, &mut GLsizei, *mut GLchar)) -> String {
    let mut log = vec![0u8; length.max(1) as usize];
    let mut written = 0;
    read(log.len() as GLsizei, &mut written, log.as_mut_ptr() as *mut GLchar);
    log.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&log).into_owned()
}

fn active_variable(
    program: GLuint,
    index: u32,
    max_length_pname: GLenum,
    query: unsafe fn(GLuint, GLuint, GLsizei, *mut GLsizei, *mut GLint, *mut GLenum, *mut GLchar),
) -> Option<ActiveVariable> {
    let mut max_length = 0;
    unsafe { gl::GetProgramiv(program, max_length_pname, &mut max_length) };

    let mut name = vec![0u8; max_length.max(1) as usize];
    let mut length = 0;
    let mut size = 0;
    let mut type_ = 0;
    unsafe {
        query(
            program,
            index,
            name.len() as GLsizei,
            &mut length,
            &mut size,
            &mut type_,
            name.as_mut_ptr() as *mut GLchar,
        )
    };
    if length <= 0 {
        return None;
    }
    name.truncate(length as usize);

    Some(ActiveVariable {
        name: String::from_utf8(name).ok()?,
        size: size.max(0) as u32,
    })
}

impl GraphicsContext for GlContext {
    type Buffer = GLuint;
    type Texture = GLuint;
    type Program = GLuint;
    type Shader = GLuint;
    type UniformLocation = GLint;

    fn create_buffer(&self) -> Result<GLuint, ContextError> {
        let mut id = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        if id == 0 {
            return Err(ContextError::Create(ResourceKind::Buffer));
        }
        Ok(id)
    }

    fn delete_buffer(&self, buffer: &GLuint) {
        unsafe { gl::DeleteBuffers(1, buffer) };
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<&GLuint>) {
        unsafe { gl::BindBuffer(target.to_gl(), buffer.copied().unwrap_or(0)) };
    }

    fn buffer_data(&self, target: BufferTarget, size: usize, usage: BufferUsage) {
        unsafe {
            gl::BufferData(
                target.to_gl(),
                size as GLsizeiptr,
                std::ptr::null(),
                usage.to_gl(),
            )
        };
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: ArrayData<'_>) {
        unsafe {
            gl::BufferSubData(
                target.to_gl(),
                offset as GLintptr,
                data.byte_len() as GLsizeiptr,
                data.as_ptr(),
            )
        };
    }

    fn create_texture(&self) -> Result<GLuint, ContextError> {
        let mut id = 0;
        unsafe { gl::GenTextures(1, &mut id) };
        if id == 0 {
            return Err(ContextError::Create(ResourceKind::Texture));
        }
        Ok(id)
    }

    fn delete_texture(&self, texture: &GLuint) {
        unsafe { gl::DeleteTextures(1, texture) };
    }

    fn active_texture(&self, unit: u32) {
        unsafe { gl::ActiveTexture(gl::TEXTURE0 + unit) };
    }

    fn bind_texture(&self, target: TextureTarget, texture: Option<&GLuint>) {
        unsafe { gl::BindTexture(target.to_gl(), texture.copied().unwrap_or(0)) };
    }

    fn tex_parameter(&self, target: TextureTarget, parameter: TextureParameter) {
        let (pname, param) = parameter.to_gl();
        unsafe { gl::TexParameteri(target.to_gl(), pname, param as GLint) };
    }

    fn tex_image_2d(&self, target: TextureTarget, size: Size, format: PixelFormat) {
        unsafe {
            gl::TexImage2D(
                target.to_gl(),
                0,
                format.to_gl() as GLint,
                size.width() as GLsizei,
                size.height() as GLsizei,
                0,
                format.to_gl(),
                gl::UNSIGNED_BYTE,
                std::ptr::null(),
            )
        };
    }

    fn tex_sub_image_2d(
        &self,
        target: TextureTarget,
        offset: Point,
        size: Size,
        format: PixelFormat,
        data_type: DataType,
        data: ArrayData<'_>,
    ) {
        unsafe {
            gl::TexSubImage2D(
                target.to_gl(),
                0,
                offset.x(),
                offset.y(),
                size.width() as GLsizei,
                size.height() as GLsizei,
                format.to_gl(),
                data_type.to_gl(),
                data.as_ptr(),
            )
        };
    }

    fn pixel_store_unpack_alignment(&self, alignment: u32) {
        unsafe { gl::PixelStorei(gl::UNPACK_ALIGNMENT, alignment as GLint) };
    }

    fn create_program(&self) -> Result<GLuint, ContextError> {
        match unsafe { gl::CreateProgram() } {
            0 => Err(ContextError::Create(ResourceKind::Program)),
            id => Ok(id),
        }
    }

    fn delete_program(&self, program: &GLuint) {
        unsafe { gl::DeleteProgram(*program) };
    }

    fn use_program(&self, program: Option<&GLuint>) {
        unsafe { gl::UseProgram(program.copied().unwrap_or(0)) };
    }

    fn link_program(&self, program: &GLuint) {
        unsafe { gl::LinkProgram(*program) };
    }

    fn program_link_status(&self, program: &GLuint) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(*program, gl::LINK_STATUS, &mut success) };
        success != 0
    }

    fn validate_program(&self, program: &GLuint) {
        unsafe { gl::ValidateProgram(*program) };
    }

    fn program_validate_status(&self, program: &GLuint) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(*program, gl::VALIDATE_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: &GLuint) -> String {
        let mut log_len = 0;
        unsafe { gl::GetProgramiv(*program, gl::INFO_LOG_LENGTH, &mut log_len) };
        info_log(log_len, |len, written, buf| unsafe {
            gl::GetProgramInfoLog(*program, len, written, buf)
        })
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<GLuint, ContextError> {
        match unsafe { gl::CreateShader(stage.to_gl()) } {
            0 => Err(ContextError::Create(ResourceKind::Shader)),
            id => Ok(id),
        }
    }

    fn delete_shader(&self, shader: &GLuint) {
        unsafe { gl::DeleteShader(*shader) };
    }

    fn shader_source(&self, shader: &GLuint, source: &str) {
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe { gl::ShaderSource(*shader, 1, &ptr, &len) };
    }

    fn compile_shader(&self, shader: &GLuint) {
        unsafe { gl::CompileShader(*shader) };
    }

    fn shader_compile_status(&self, shader: &GLuint) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(*shader, gl::COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: &GLuint) -> String {
        let mut log_len = 0;
        unsafe { gl::GetShaderiv(*shader, gl::INFO_LOG_LENGTH, &mut log_len) };
        info_log(log_len, |len, written, buf| unsafe {
            gl::GetShaderInfoLog(*shader, len, written, buf)
        })
    }

    fn attach_shader(&self, program: &GLuint, shader: &GLuint) {
        unsafe { gl::AttachShader(*program, *shader) };
    }

    fn detach_shader(&self, program: &GLuint, shader: &GLuint) {
        unsafe { gl::DetachShader(*program, *shader) };
    }

    fn active_attribute_count(&self, program: &GLuint) -> u32 {
        let mut count = 0;
        unsafe { gl::GetProgramiv(*program, gl::ACTIVE_ATTRIBUTES, &mut count) };
        count.max(0) as u32
    }

    fn active_attribute(&self, program: &GLuint, index: u32) -> Option<ActiveVariable> {
        active_variable(
            *program,
            index,
            gl::ACTIVE_ATTRIBUTE_MAX_LENGTH,
            gl::GetActiveAttrib,
        )
    }

    fn active_uniform_count(&self, program: &GLuint) -> u32 {
        let mut count = 0;
        unsafe { gl::GetProgramiv(*program, gl::ACTIVE_UNIFORMS, &mut count) };
        count.max(0) as u32
    }

    fn active_uniform(&self, program: &GLuint, index: u32) -> Option<ActiveVariable> {
        active_variable(
            *program,
            index,
            gl::ACTIVE_UNIFORM_MAX_LENGTH,
            gl::GetActiveUniform,
        )
    }

    fn attrib_location(&self, program: &GLuint, name: &str) -> Option<u32> {
        // A name with an interior NUL cannot name a GLSL variable.
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetAttribLocation(*program, name.as_ptr()) };
        u32::try_from(location).ok()
    }

    fn uniform_location(&self, program: &GLuint, name: &str) -> Option<GLint> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetUniformLocation(*program, name.as_ptr()) };
        (location >= 0).then_some(location)
    }

    fn uniform_float(&self, location: &GLint, components: usize, values: &[f32]) {
        let count = (values.len() / components.max(1)) as GLsizei;
        let ptr = values.as_ptr();
        unsafe {
            match components {
                1 => gl::Uniform1fv(*location, count, ptr),
                2 => gl::Uniform2fv(*location, count, ptr),
                3 => gl::Uniform3fv(*location, count, ptr),
                _ => gl::Uniform4fv(*location, count, ptr),
            }
        }
    }

    fn uniform_int(&self, location: &GLint, components: usize, values: &[i32]) {
        let count = (values.len() / components.max(1)) as GLsizei;
        let ptr = values.as_ptr();
        unsafe {
            match components {
                1 => gl::Uniform1iv(*location, count, ptr),
                2 => gl::Uniform2iv(*location, count, ptr),
                3 => gl::Uniform3iv(*location, count, ptr),
                _ => gl::Uniform4iv(*location, count, ptr),
            }
        }
    }

    fn uniform_matrix(&self, location: &GLint, dimension: usize, transpose: bool, values: &[f32]) {
        let count = (values.len() / (dimension * dimension).max(1)) as GLsizei;
        let transpose = if transpose { gl::TRUE } else { gl::FALSE };
        let ptr = values.as_ptr();
        unsafe {
            match dimension {
                2 => gl::UniformMatrix2fv(*location, count, transpose, ptr),
                3 => gl::UniformMatrix3fv(*location, count, transpose, ptr),
                _ => gl::UniformMatrix4fv(*location, count, transpose, ptr),
            }
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) };
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::DisableVertexAttribArray(index) };
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: usize,
        data_type: DataType,
        normalized: bool,
        stride: usize,
        offset: usize,
    ) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                size as GLint,
                data_type.to_gl(),
                if normalized { gl::TRUE } else { gl::FALSE },
                stride as GLsizei,
                offset as *const c_void,
            )
        };
    }

    fn vertex_attrib(&self, index: u32, values: &[f32]) {
        unsafe {
            match *values {
                [x] => gl::VertexAttrib1f(index, x),
                [x, y] => gl::VertexAttrib2f(index, x, y),
                [x, y, z] => gl::VertexAttrib3f(index, x, y, z),
                [x, y, z, w, ..] => gl::VertexAttrib4f(index, x, y, z, w),
                [] => {}
            }
        }
    }

    fn draw_arrays(&self, mode: DrawMode, first: usize, count: usize) {
        unsafe { gl::DrawArrays(mode.to_gl(), first as GLint, count as GLsizei) };
    }

    fn draw_elements(&self, mode: DrawMode, count: usize, index_type: DataType, offset: usize) {
        unsafe {
            gl::DrawElements(
                mode.to_gl(),
                count as GLsizei,
                index_type.to_gl(),
                offset as *const c_void,
            )
        };
    }
}
