// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{collections::HashMap, rc::Rc};

use crate::renderer::{
    buffer::{IndexBuffer, VertexBuffer},
    context::GraphicsContext,
    program::{AttributeSource, DrawSelection, Program},
    texture::Texture2D,
};

use super::*;

/// GPU resources of a [`Scene`], kept alive across frames.
///
/// Every frame re-uploads buffer and texture contents and rebinds all
/// variables, the way a glyph renderer does when its data may have
/// changed. Allocations only happen on the first frame.
pub struct ScenePlayer<C: GraphicsContext> {
    program: Program<C>,
    vertex_buffers: HashMap<String, VertexBuffer<C>>,
    index_buffers: HashMap<String, IndexBuffer<C>>,
    textures: HashMap<String, Texture2D<C>>,
}

fn decode(name: &str, kind: ElementKind, numbers: &[f64]) -> Result<ArrayValues, SceneError> {
    ArrayValues::from_numbers(kind, numbers).ok_or_else(|| SceneError::InvalidData {
        name: name.to_string(),
        kind,
    })
}

impl<C: GraphicsContext> ScenePlayer<C> {
    /// Links the scene's program and creates its buffers and textures.
    pub fn new(context: &Rc<C>, scene: &Scene) -> Result<Self, SceneError> {
        let mut program = Program::new(context)?;
        program.set_shaders(&scene.program.vertex, &scene.program.fragment)?;

        let mut vertex_buffers = HashMap::new();
        let mut index_buffers = HashMap::new();
        for spec in &scene.buffers {
            match spec.kind {
                BufferKindSpec::Vertex => {
                    vertex_buffers.insert(spec.name.clone(), VertexBuffer::new(context)?);
                }
                BufferKindSpec::Index => {
                    index_buffers.insert(spec.name.clone(), IndexBuffer::new(context)?);
                }
            }
        }

        let mut textures = HashMap::new();
        for spec in &scene.textures {
            textures.insert(spec.name.clone(), Texture2D::new(context)?);
        }

        Ok(Self {
            program,
            vertex_buffers,
            index_buffers,
            textures,
        })
    }

    pub fn program(&self) -> &Program<C> {
        &self.program
    }

    /// Uploads, binds and draws one frame of `scene`.
    pub fn play_frame(&mut self, scene: &Scene) -> Result<(), SceneError> {
        self.upload(scene)?;
        self.bind(scene)?;
        self.draw(scene)
    }

    fn upload(&mut self, scene: &Scene) -> Result<(), SceneError> {
        for spec in &scene.buffers {
            let values = decode(&spec.name, spec.element, &spec.data)?;
            let data = values.as_array_data();
            let size = spec.size.unwrap_or(data.byte_len());
            match spec.kind {
                BufferKindSpec::Vertex => {
                    let buffer = self
                        .vertex_buffers
                        .get_mut(&spec.name)
                        .ok_or_else(|| SceneError::UnknownBuffer(spec.name.clone()))?;
                    buffer.set_size(size);
                    buffer.set_data(0, data);
                }
                BufferKindSpec::Index => {
                    let buffer = self
                        .index_buffers
                        .get_mut(&spec.name)
                        .ok_or_else(|| SceneError::UnknownBuffer(spec.name.clone()))?;
                    buffer.set_size(size);
                    buffer.set_data(0, data);
                }
            }
        }

        for spec in &scene.textures {
            let texture = self
                .textures
                .get_mut(&spec.name)
                .ok_or_else(|| SceneError::UnknownTexture(spec.name.clone()))?;
            let values = decode(&spec.name, spec.element, &spec.data)?;
            let [wrap_s, wrap_t] = spec.wrap;
            let [min_filter, mag_filter] = spec.filter;

            texture.set_size(spec.size(), spec.format);
            texture.set_wrapping(wrap_s, wrap_t);
            texture.set_interpolation(min_filter, mag_filter);
            if !values.as_array_data().is_empty() {
                let shape = spec.shape.unwrap_or_else(|| spec.size());
                texture.set_data(spec.offset, shape, values.as_array_data())?;
            }
        }
        Ok(())
    }

    fn bind(&mut self, scene: &Scene) -> Result<(), SceneError> {
        for spec in &scene.uniforms {
            self.program
                .set_uniform(&spec.name, spec.type_, &spec.values)?;
        }

        for spec in &scene.samplers {
            let texture = self
                .textures
                .get(&spec.texture)
                .ok_or_else(|| SceneError::UnknownTexture(spec.texture.clone()))?;
            self.program.set_texture(&spec.name, texture)?;
        }

        for spec in &scene.attributes {
            let source = match (&spec.buffer, &spec.value) {
                (Some(name), _) => AttributeSource::Buffer(
                    self.vertex_buffers
                        .get(name)
                        .ok_or_else(|| SceneError::UnknownBuffer(name.clone()))?,
                ),
                (None, Some(values)) => AttributeSource::Constant(values),
                (None, None) => return Err(SceneError::MissingAttributeSource(spec.name.clone())),
            };
            self.program
                .set_attribute(&spec.name, spec.type_, source, spec.stride, spec.offset)?;
        }
        Ok(())
    }

    fn draw(&mut self, scene: &Scene) -> Result<(), SceneError> {
        let Some(spec) = &scene.draw else {
            return Ok(());
        };

        let selection = match &spec.indices {
            Some(name) => DrawSelection::Indexed(
                self.index_buffers
                    .get(name)
                    .ok_or_else(|| SceneError::UnknownBuffer(name.clone()))?,
            ),
            None => DrawSelection::Arrays {
                first: spec.first,
                count: spec.count,
            },
        };
        self.program.draw(spec.mode, selection)?;
        Ok(())
    }
}

/// Plays `frames` frames of `scene` on `context`, releasing every
/// resource afterwards.
pub fn replay<C: GraphicsContext>(
    context: &Rc<C>,
    scene: &Scene,
    frames: usize,
) -> Result<(), SceneError> {
    let mut player = ScenePlayer::new(context, scene)?;
    for frame in 0..frames {
        log::debug!("Frame {frame}");
        player.play_frame(scene)?;
    }
    Ok(())
}
