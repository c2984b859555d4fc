// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

//! Thin object layer over a GL-style rendering context.
//!
//! Wraps the raw handle-based API in three resource types:
//!
//! - [`Buffer`](buffer::Buffer): vertex and index storage that only
//!   reallocates when its size actually changes.
//! - [`Texture2D`](texture::Texture2D): 2D texture with alignment-aware
//!   uploads.
//! - [`Program`](program::Program): linked shader pair with name-based
//!   binding of uniforms, samplers and vertex attributes.
//!
//! Every resource talks to the GPU through a
//! [`GraphicsContext`](context::GraphicsContext) and releases its handle
//! when dropped.

#[cfg(test)]
mod tests {
    mod buffer;
    mod glsl_type;
    mod program;
    mod texture;
    mod trace_context;
}

pub mod array_data;
pub mod buffer;
pub mod context;
pub mod glsl_type;
pub mod program;
pub mod texture;

mod shader;
