// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

//! Allocation-aware GL object model used by glyph renderers.
//!
//! The [`renderer`] module wraps raw GL state in three families of
//! objects: [`Program`], the [`Buffer`] family ([`VertexBuffer`],
//! [`IndexBuffer`]) and [`Texture2D`]. Every object issues its calls
//! against a [`GraphicsContext`], which is either a native OpenGL
//! context ([`GlContext`]) or an in-memory recorder ([`TraceContext`]).
//!
//! [`scene`] describes a draw (program, buffers, textures and bindings)
//! as TOML or JSON and replays it through the object model.

pub mod geometry;
pub mod renderer;
pub mod scene;

pub use renderer::{
    buffer::{Buffer, IndexBuffer, VertexBuffer},
    context::{gl_context::GlContext, trace_context::TraceContext, GraphicsContext},
    program::{AttributeSource, DrawSelection, Program, ProgramError},
    texture::{Texture2D, TextureError},
};

pub const APP_NAME: &str = "glyphgl";
pub const APP_ABOUT: &str = "Replays glyph draw scenes through the GL object model";
pub const APP_AUTHOR: &str = "Harlen Batagelo, hbatagelo@gmail.com";
pub const APP_SEMVER: &str = "0.1.0";
