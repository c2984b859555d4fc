// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

//! GLSL type tags accepted by [`Program`](super::program::Program).

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use super::context::DataType;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("Unknown GLSL type '{0}'")]
pub struct UnknownTypeError(pub String);

/// How a uniform of a given type reaches the driver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UniformKind {
    /// `glUniform{n}fv`.
    Float(usize),
    /// `glUniform{n}iv`. Booleans are uploaded as integers.
    Int(usize),
    /// `glUniformMatrix{n}fv`, never transposed.
    Matrix(usize),
    /// `glUniform1i` with the texture unit index.
    Sampler,
}

/// Type of a uniform variable.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum GlslType {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Int,
    IVec2,
    IVec3,
    IVec4,
    Bool,
    BVec2,
    BVec3,
    BVec4,
    Mat2,
    Mat3,
    Mat4,
    Sampler1D,
    Sampler2D,
    Sampler3D,
}

impl GlslType {
    pub fn kind(self) -> UniformKind {
        match self {
            Self::Float => UniformKind::Float(1),
            Self::Vec2 => UniformKind::Float(2),
            Self::Vec3 => UniformKind::Float(3),
            Self::Vec4 => UniformKind::Float(4),
            Self::Int | Self::Bool => UniformKind::Int(1),
            Self::IVec2 | Self::BVec2 => UniformKind::Int(2),
            Self::IVec3 | Self::BVec3 => UniformKind::Int(3),
            Self::IVec4 | Self::BVec4 => UniformKind::Int(4),
            Self::Mat2 => UniformKind::Matrix(2),
            Self::Mat3 => UniformKind::Matrix(3),
            Self::Mat4 => UniformKind::Matrix(4),
            Self::Sampler1D | Self::Sampler2D | Self::Sampler3D => UniformKind::Sampler,
        }
    }

    /// Scalars per element; matrices count all of their cells.
    pub fn components(self) -> usize {
        match self.kind() {
            UniformKind::Float(n) | UniformKind::Int(n) => n,
            UniformKind::Matrix(n) => n * n,
            UniformKind::Sampler => 1,
        }
    }

    pub fn is_matrix(self) -> bool {
        matches!(self.kind(), UniformKind::Matrix(_))
    }

    /// Number of array elements `len` scalars encode. A matrix value is
    /// always a single element.
    pub fn element_count(self, len: usize) -> usize {
        if self.is_matrix() {
            1
        } else {
            len / self.components()
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Int => "int",
            Self::IVec2 => "ivec2",
            Self::IVec3 => "ivec3",
            Self::IVec4 => "ivec4",
            Self::Bool => "bool",
            Self::BVec2 => "bvec2",
            Self::BVec3 => "bvec3",
            Self::BVec4 => "bvec4",
            Self::Mat2 => "mat2",
            Self::Mat3 => "mat3",
            Self::Mat4 => "mat4",
            Self::Sampler1D => "sampler1D",
            Self::Sampler2D => "sampler2D",
            Self::Sampler3D => "sampler3D",
        }
    }
}

impl FromStr for GlslType {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "float" => Self::Float,
            "vec2" => Self::Vec2,
            "vec3" => Self::Vec3,
            "vec4" => Self::Vec4,
            "int" => Self::Int,
            "ivec2" => Self::IVec2,
            "ivec3" => Self::IVec3,
            "ivec4" => Self::IVec4,
            "bool" => Self::Bool,
            "bvec2" => Self::BVec2,
            "bvec3" => Self::BVec3,
            "bvec4" => Self::BVec4,
            "mat2" => Self::Mat2,
            "mat3" => Self::Mat3,
            "mat4" => Self::Mat4,
            "sampler1D" => Self::Sampler1D,
            "sampler2D" => Self::Sampler2D,
            "sampler3D" => Self::Sampler3D,
            _ => return Err(UnknownTypeError(s.to_string())),
        })
    }
}

impl TryFrom<String> for GlslType {
    type Error = UnknownTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GlslType> for String {
    fn from(value: GlslType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for GlslType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of a vertex attribute. Attribute components are always floats.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl AttributeType {
    pub fn components(self) -> usize {
        match self {
            Self::Float => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
        }
    }

    pub fn data_type(self) -> DataType {
        DataType::Float
    }
}

impl FromStr for AttributeType {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float" => Ok(Self::Float),
            "vec2" => Ok(Self::Vec2),
            "vec3" => Ok(Self::Vec3),
            "vec4" => Ok(Self::Vec4),
            _ => Err(UnknownTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
        })
    }
}
