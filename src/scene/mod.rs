// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

//! Declarative draw scenes.
//!
//! A [`Scene`] names a shader pair, the buffers and textures it reads
//! and every uniform, sampler and attribute binding, then one draw call.
//! Scenes are loaded from TOML or JSON and replayed with a
//! [`ScenePlayer`].

#[cfg(test)]
mod tests {
    mod player;
    mod scene;
}

mod player;

pub use player::{replay, ScenePlayer};

use num_traits::NumCast;
use serde::*;
use std::{fs, io, path::Path};
use thiserror::Error;

use crate::{
    geometry::{Point, Size},
    renderer::{
        array_data::{ArrayData, ElementKind},
        context::*,
        glsl_type::{AttributeType, GlslType},
        program::ProgramError,
        texture::TextureError,
    },
};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("TOML parse error")]
    TomlParse(#[from] toml::de::Error),
    #[error("JSON parse error")]
    JsonParse(#[from] serde_json::Error),
    #[error("Unsupported scene format: {0}")]
    UnsupportedFormat(String),
    #[error("Unknown buffer '{0}'")]
    UnknownBuffer(String),
    #[error("Unknown texture '{0}'")]
    UnknownTexture(String),
    #[error("Data of '{name}' does not fit element type {kind}")]
    InvalidData { name: String, kind: ElementKind },
    #[error("Attribute '{0}' needs either a buffer or a value")]
    MissingAttributeSource(String),
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Context(#[from] ContextError),
}

#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferKindSpec {
    #[default]
    Vertex,
    Index,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ProgramSpec {
    pub vertex: String,
    pub fragment: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BufferSpec {
    pub name: String,
    #[serde(default)]
    pub kind: BufferKindSpec,
    #[serde(default)]
    pub element: ElementKind,
    #[serde(default)]
    pub data: Vec<f64>,
    /// Allocation in bytes; defaults to the size of `data`.
    #[serde(default)]
    pub size: Option<usize>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TextureSpec {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub format: PixelFormat,
    #[serde(default = "defaults::texture_element")]
    pub element: ElementKind,
    #[serde(default)]
    pub data: Vec<f64>,
    #[serde(default)]
    pub offset: Point,
    /// Extent of `data`; defaults to the whole texture.
    #[serde(default)]
    pub shape: Option<Size>,
    #[serde(default)]
    pub wrap: [WrapMode; 2],
    #[serde(default)]
    pub filter: [FilterMode; 2],
}

impl TextureSpec {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UniformSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: GlslType,
    pub values: Vec<f32>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SamplerSpec {
    pub name: String,
    pub texture: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AttributeSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: AttributeType,
    #[serde(default)]
    pub buffer: Option<String>,
    #[serde(default)]
    pub stride: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub value: Option<Vec<f32>>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct DrawSpec {
    #[serde(default)]
    pub mode: DrawMode,
    /// Index buffer name; when absent `first` and `count` select vertices.
    #[serde(default)]
    pub indices: Option<String>,
    #[serde(default)]
    pub first: usize,
    #[serde(default)]
    pub count: usize,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Scene {
    pub program: ProgramSpec,
    #[serde(default)]
    pub buffers: Vec<BufferSpec>,
    #[serde(default)]
    pub textures: Vec<TextureSpec>,
    #[serde(default)]
    pub uniforms: Vec<UniformSpec>,
    #[serde(default)]
    pub samplers: Vec<SamplerSpec>,
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,
    #[serde(default)]
    pub draw: Option<DrawSpec>,
}

impl Scene {
    pub fn from_toml_str(content: &str) -> Result<Self, SceneError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, SceneError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SceneError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Loads a scene, picking the parser from the file extension.
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            other => Err(SceneError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

mod defaults {
    use super::*;

    pub fn texture_element() -> ElementKind {
        ElementKind::U8
    }
}

/// Owned typed array decoded from the plain numbers of a scene file.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayValues {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

fn cast_all<T: NumCast>(numbers: &[f64]) -> Option<Vec<T>> {
    numbers.iter().map(|&n| <T as NumCast>::from(n)).collect()
}

impl ArrayValues {
    /// Converts `numbers` to `kind`, or `None` if any of them is out of
    /// range for it. Fractional parts are truncated for integer kinds.
    pub fn from_numbers(kind: ElementKind, numbers: &[f64]) -> Option<Self> {
        Some(match kind {
            ElementKind::I8 => Self::I8(cast_all(numbers)?),
            ElementKind::U8 => Self::U8(cast_all(numbers)?),
            ElementKind::I16 => Self::I16(cast_all(numbers)?),
            ElementKind::U16 => Self::U16(cast_all(numbers)?),
            ElementKind::I32 => Self::I32(cast_all(numbers)?),
            ElementKind::U32 => Self::U32(cast_all(numbers)?),
            ElementKind::F32 => Self::F32(cast_all(numbers)?),
            ElementKind::F64 => Self::F64(numbers.to_vec()),
        })
    }

    pub fn as_array_data(&self) -> ArrayData<'_> {
        match self {
            Self::I8(values) => ArrayData::I8(values),
            Self::U8(values) => ArrayData::U8(values),
            Self::I16(values) => ArrayData::I16(values),
            Self::U16(values) => ArrayData::U16(values),
            Self::I32(values) => ArrayData::I32(values),
            Self::U32(values) => ArrayData::U32(values),
            Self::F32(values) => ArrayData::F32(values),
            Self::F64(values) => ArrayData::F64(values),
        }
    }
}
