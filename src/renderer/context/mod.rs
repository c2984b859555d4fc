// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

//! The host rendering context and the GL vocabulary shared by every
//! backend.
//!
//! [`GraphicsContext`] is the explicit stand-in for "whatever is bound
//! in the GL context right now". Resources never reach for an ambient
//! global; they hold an `Rc` to the context they were created on and
//! issue every call through it.

pub mod gl_context;
pub mod trace_context;

#[cfg(debug_assertions)]
mod gl_debug;

use gl::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::geometry::{Point, Size};

use super::array_data::ArrayData;

/// GL object families a context can allocate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Buffer,
    Texture,
    Program,
    Shader,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buffer => "buffer",
            Self::Texture => "texture",
            Self::Program => "program",
            Self::Shader => "shader",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContextError {
    #[error("Failed to create {0}")]
    Create(ResourceKind),
}

/// Metadata the driver reports for an active attribute or uniform.
///
/// Array variables are reported once, named after their first element
/// (e.g. `offsets[0]`) with `size` holding the declared array length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveVariable {
    pub name: String,
    pub size: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn to_gl(self) -> GLenum {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Per-vertex attribute data.
    Array,
    /// Element indices for indexed draws.
    ElementArray,
}

impl BufferTarget {
    pub fn to_gl(self) -> GLenum {
        match self {
            Self::Array => gl::ARRAY_BUFFER,
            Self::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

impl fmt::Display for BufferTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Array => "ARRAY_BUFFER",
            Self::ElementArray => "ELEMENT_ARRAY_BUFFER",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    StaticDraw,
    DynamicDraw,
    StreamDraw,
}

impl BufferUsage {
    pub fn to_gl(self) -> GLenum {
        match self {
            Self::StaticDraw => gl::STATIC_DRAW,
            Self::DynamicDraw => gl::DYNAMIC_DRAW,
            Self::StreamDraw => gl::STREAM_DRAW,
        }
    }
}

impl fmt::Display for BufferUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StaticDraw => "STATIC_DRAW",
            Self::DynamicDraw => "DYNAMIC_DRAW",
            Self::StreamDraw => "STREAM_DRAW",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    Texture2D,
}

impl TextureTarget {
    pub fn to_gl(self) -> GLenum {
        match self {
            Self::Texture2D => gl::TEXTURE_2D,
        }
    }
}

impl fmt::Display for TextureTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Texture2D => "TEXTURE_2D",
        })
    }
}

/// Component type of vertex attributes, indices and pixel data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Float,
}

impl DataType {
    pub fn to_gl(self) -> GLenum {
        match self {
            Self::Byte => gl::BYTE,
            Self::UnsignedByte => gl::UNSIGNED_BYTE,
            Self::Short => gl::SHORT,
            Self::UnsignedShort => gl::UNSIGNED_SHORT,
            Self::Int => gl::INT,
            Self::UnsignedInt => gl::UNSIGNED_INT,
            Self::Float => gl::FLOAT,
        }
    }

    pub fn byte_size(self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort => 2,
            Self::Int | Self::UnsignedInt | Self::Float => 4,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Byte => "BYTE",
            Self::UnsignedByte => "UNSIGNED_BYTE",
            Self::Short => "SHORT",
            Self::UnsignedShort => "UNSIGNED_SHORT",
            Self::Int => "INT",
            Self::UnsignedInt => "UNSIGNED_INT",
            Self::Float => "FLOAT",
        })
    }
}

// Legacy unsized formats are part of WebGL and GL compatibility
// profiles but not of the core-profile bindings.
const GL_ALPHA: GLenum = 0x1906;
const GL_LUMINANCE: GLenum = 0x1909;
const GL_LUMINANCE_ALPHA: GLenum = 0x190A;

/// Pixel format used both as internal format and as upload format.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    Alpha,
    Luminance,
    LuminanceAlpha,
    Rgb,
    #[default]
    Rgba,
}

impl PixelFormat {
    /// Number of components stored per pixel.
    pub fn components(self) -> usize {
        match self {
            Self::Alpha | Self::Luminance => 1,
            Self::LuminanceAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub fn to_gl(self) -> GLenum {
        match self {
            Self::Alpha => GL_ALPHA,
            Self::Luminance => GL_LUMINANCE,
            Self::LuminanceAlpha => GL_LUMINANCE_ALPHA,
            Self::Rgb => gl::RGB,
            Self::Rgba => gl::RGBA,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Alpha => "ALPHA",
            Self::Luminance => "LUMINANCE",
            Self::LuminanceAlpha => "LUMINANCE_ALPHA",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        })
    }
}

#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    Repeat,
    #[default]
    ClampToEdge,
    MirroredRepeat,
}

impl WrapMode {
    pub fn to_gl(self) -> GLenum {
        match self {
            Self::Repeat => gl::REPEAT,
            Self::ClampToEdge => gl::CLAMP_TO_EDGE,
            Self::MirroredRepeat => gl::MIRRORED_REPEAT,
        }
    }
}

impl fmt::Display for WrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Repeat => "REPEAT",
            Self::ClampToEdge => "CLAMP_TO_EDGE",
            Self::MirroredRepeat => "MIRRORED_REPEAT",
        })
    }
}

/// Texture filter. Magnification only accepts `Nearest` and `Linear`.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    Nearest,
    #[default]
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl FilterMode {
    pub fn to_gl(self) -> GLenum {
        match self {
            Self::Nearest => gl::NEAREST,
            Self::Linear => gl::LINEAR,
            Self::NearestMipmapNearest => gl::NEAREST_MIPMAP_NEAREST,
            Self::LinearMipmapNearest => gl::LINEAR_MIPMAP_NEAREST,
            Self::NearestMipmapLinear => gl::NEAREST_MIPMAP_LINEAR,
            Self::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nearest => "NEAREST",
            Self::Linear => "LINEAR",
            Self::NearestMipmapNearest => "NEAREST_MIPMAP_NEAREST",
            Self::LinearMipmapNearest => "LINEAR_MIPMAP_NEAREST",
            Self::NearestMipmapLinear => "NEAREST_MIPMAP_LINEAR",
            Self::LinearMipmapLinear => "LINEAR_MIPMAP_LINEAR",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextureParameter {
    WrapS(WrapMode),
    WrapT(WrapMode),
    MinFilter(FilterMode),
    MagFilter(FilterMode),
}

impl TextureParameter {
    /// The `(pname, param)` pair passed to `glTexParameteri`.
    pub fn to_gl(self) -> (GLenum, GLenum) {
        match self {
            Self::WrapS(mode) => (gl::TEXTURE_WRAP_S, mode.to_gl()),
            Self::WrapT(mode) => (gl::TEXTURE_WRAP_T, mode.to_gl()),
            Self::MinFilter(filter) => (gl::TEXTURE_MIN_FILTER, filter.to_gl()),
            Self::MagFilter(filter) => (gl::TEXTURE_MAG_FILTER, filter.to_gl()),
        }
    }
}

impl fmt::Display for TextureParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrapS(mode) => write!(f, "TEXTURE_WRAP_S, {mode}"),
            Self::WrapT(mode) => write!(f, "TEXTURE_WRAP_T, {mode}"),
            Self::MinFilter(filter) => write!(f, "TEXTURE_MIN_FILTER, {filter}"),
            Self::MagFilter(filter) => write!(f, "TEXTURE_MAG_FILTER, {filter}"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    #[default]
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl DrawMode {
    pub fn to_gl(self) -> GLenum {
        match self {
            Self::Points => gl::POINTS,
            Self::Lines => gl::LINES,
            Self::LineLoop => gl::LINE_LOOP,
            Self::LineStrip => gl::LINE_STRIP,
            Self::Triangles => gl::TRIANGLES,
            Self::TriangleStrip => gl::TRIANGLE_STRIP,
            Self::TriangleFan => gl::TRIANGLE_FAN,
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Points => "POINTS",
            Self::Lines => "LINES",
            Self::LineLoop => "LINE_LOOP",
            Self::LineStrip => "LINE_STRIP",
            Self::Triangles => "TRIANGLES",
            Self::TriangleStrip => "TRIANGLE_STRIP",
            Self::TriangleFan => "TRIANGLE_FAN",
        })
    }
}

/// Capability set the GL object model consumes from the host.
///
/// Handles are opaque and scoped to the context that created them.
/// Implementations are single-threaded: methods take `&self` and any
/// bookkeeping lives behind interior mutability, mirroring how a GL
/// context is a process-wide mutable singleton.
pub trait GraphicsContext {
    type Buffer: Clone + fmt::Debug;
    type Texture: Clone + fmt::Debug;
    type Program: Clone + fmt::Debug;
    type Shader: Clone + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    fn create_buffer(&self) -> Result<Self::Buffer, ContextError>;
    fn delete_buffer(&self, buffer: &Self::Buffer);
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<&Self::Buffer>);
    /// Allocates `size` bytes of uninitialized storage.
    fn buffer_data(&self, target: BufferTarget, size: usize, usage: BufferUsage);
    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: ArrayData<'_>);

    fn create_texture(&self) -> Result<Self::Texture, ContextError>;
    fn delete_texture(&self, texture: &Self::Texture);
    /// Selects texture unit `TEXTURE0 + unit`.
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, target: TextureTarget, texture: Option<&Self::Texture>);
    fn tex_parameter(&self, target: TextureTarget, parameter: TextureParameter);
    /// Allocates level 0 storage with unsigned-byte components and no data.
    fn tex_image_2d(&self, target: TextureTarget, size: Size, format: PixelFormat);
    fn tex_sub_image_2d(
        &self,
        target: TextureTarget,
        offset: Point,
        size: Size,
        format: PixelFormat,
        data_type: DataType,
        data: ArrayData<'_>,
    );
    fn pixel_store_unpack_alignment(&self, alignment: u32);

    fn create_program(&self) -> Result<Self::Program, ContextError>;
    fn delete_program(&self, program: &Self::Program);
    fn use_program(&self, program: Option<&Self::Program>);
    fn link_program(&self, program: &Self::Program);
    fn program_link_status(&self, program: &Self::Program) -> bool;
    fn validate_program(&self, program: &Self::Program);
    fn program_validate_status(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> String;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, ContextError>;
    fn delete_shader(&self, shader: &Self::Shader);
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn shader_compile_status(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> String;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn detach_shader(&self, program: &Self::Program, shader: &Self::Shader);

    fn active_attribute_count(&self, program: &Self::Program) -> u32;
    fn active_attribute(&self, program: &Self::Program, index: u32) -> Option<ActiveVariable>;
    fn active_uniform_count(&self, program: &Self::Program) -> u32;
    fn active_uniform(&self, program: &Self::Program, index: u32) -> Option<ActiveVariable>;
    fn attrib_location(&self, program: &Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    /// `glUniform{components}fv`; `values` holds one or more elements.
    fn uniform_float(&self, location: &Self::UniformLocation, components: usize, values: &[f32]);
    /// `glUniform{components}iv`; `values` holds one or more elements.
    fn uniform_int(&self, location: &Self::UniformLocation, components: usize, values: &[i32]);
    /// `glUniformMatrix{dimension}fv`.
    fn uniform_matrix(
        &self,
        location: &Self::UniformLocation,
        dimension: usize,
        transpose: bool,
        values: &[f32],
    );

    fn enable_vertex_attrib_array(&self, index: u32);
    fn disable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: usize,
        data_type: DataType,
        normalized: bool,
        stride: usize,
        offset: usize,
    );
    /// `glVertexAttrib{n}f` with `n = values.len()` (1 to 4).
    fn vertex_attrib(&self, index: u32, values: &[f32]);

    fn draw_arrays(&self, mode: DrawMode, first: usize, count: usize);
    fn draw_elements(&self, mode: DrawMode, count: usize, index_type: DataType, offset: usize);
}
