// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shader program with name-based variable binding.
//!
//! A [`Program`] is linked from a vertex and a fragment shader, then
//! fed uniforms, samplers and attributes by name. Bindings are recorded
//! and only pushed to the context by [`Program::draw`], which activates
//! everything in a fixed order: program, sampler textures, attribute
//! buffers and finally the index buffer.
//!
//! Binding a name the linked program does not declare is tolerated.
//! Glyph renderers bind the union of the variables of all their shader
//! variants, so an unknown name only produces one warning per name.

use regex::Regex;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt,
    rc::Rc,
    sync::LazyLock,
};
use thiserror::Error;

use super::{
    buffer::{IndexBuffer, VertexBuffer},
    context::*,
    glsl_type::{AttributeType, GlslType, UniformKind},
    shader::Shader,
    texture::Texture2D,
};

/// Operations that need a linked program.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    SetTexture,
    SetUniform,
    SetAttribute,
    Draw,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SetTexture => "set texture",
            Self::SetUniform => "set uniform",
            Self::SetAttribute => "set attribute",
            Self::Draw => "draw",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProgramError {
    #[error("Errors in {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("Program link error:\n{0}")]
    Link(String),
    #[error("Program validation error:\n{0}")]
    Validation(String),
    #[error("Cannot {0} when program has no code")]
    Unlinked(Operation),
    #[error("Attribute {name} needs {expected} constant values, got {found}")]
    ConstantArity {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Where a vertex attribute takes its values from.
pub enum AttributeSource<'a, C: GraphicsContext> {
    /// Per-vertex values read from a buffer.
    Buffer(&'a VertexBuffer<C>),
    /// One value shared by every vertex.
    Constant(&'a [f32]),
}

/// Which vertices a draw call consumes.
pub enum DrawSelection<'a, C: GraphicsContext> {
    /// 16-bit unsigned indices covering the whole buffer.
    Indexed(&'a IndexBuffer<C>),
    /// `count` consecutive vertices starting at `first`.
    Arrays { first: usize, count: usize },
}

enum Location<L> {
    Attribute(u32),
    Uniform(L),
}

struct SamplerBinding<C: GraphicsContext> {
    target: TextureTarget,
    texture: C::Texture,
    unit: u32,
}

enum AttributeBinding<C: GraphicsContext> {
    Buffer {
        buffer: C::Buffer,
        location: u32,
        size: usize,
        data_type: DataType,
        stride: usize,
        offset: usize,
    },
    Constant {
        location: u32,
        values: Vec<f32>,
    },
}

static ARRAY_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s*\[(\d+)\]\s*$").unwrap());

/// Splits an active variable into the names it declares.
///
/// Drivers report arrays once, as `name[0]` with the array length as
/// size. Each element becomes its own declared name; the bare base name
/// is returned separately since it resolves to a location without being
/// a declared variable.
fn expand_active_variable(variable: &ActiveVariable) -> (Option<String>, Vec<String>) {
    match ARRAY_NAME_RE.captures(&variable.name) {
        Some(caps) => {
            let base = &caps[1];
            let elements = (0..variable.size).map(|j| format!("{base}[{j}]")).collect();
            (Some(base.to_string()), elements)
        }
        None => (None, vec![variable.name.clone()]),
    }
}

/// GPU program linked from a vertex and a fragment shader.
///
/// Goes from unlinked to linked through [`Program::set_shaders`] and
/// from linked to validated on the first draw. Relinking starts over.
pub struct Program<C: GraphicsContext> {
    context: Rc<C>,
    handle: C::Program,
    linked: bool,
    validated: bool,
    declared_variables: BTreeSet<String>,
    unset_variables: BTreeSet<String>,
    known_invalid: BTreeSet<String>,
    locations: HashMap<String, Location<C::UniformLocation>>,
    samplers: BTreeMap<String, SamplerBinding<C>>,
    attributes: BTreeMap<String, AttributeBinding<C>>,
}

impl<C: GraphicsContext> Program<C> {
    pub fn new(context: &Rc<C>) -> Result<Self, ProgramError> {
        let handle = context.create_program()?;
        Ok(Self {
            context: Rc::clone(context),
            handle,
            linked: false,
            validated: false,
            declared_variables: BTreeSet::new(),
            unset_variables: BTreeSet::new(),
            known_invalid: BTreeSet::new(),
            locations: HashMap::new(),
            samplers: BTreeMap::new(),
            attributes: BTreeMap::new(),
        })
    }

    pub fn handle(&self) -> &C::Program {
        &self.handle
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Active attributes and uniforms of the linked program, with arrays
    /// expanded to one entry per element.
    pub fn declared_variables(&self) -> &BTreeSet<String> {
        &self.declared_variables
    }

    /// Declared variables not assigned since the last link.
    pub fn unset_variables(&self) -> &BTreeSet<String> {
        &self.unset_variables
    }

    /// Names bound since the last link that the program does not declare.
    pub fn known_invalid_names(&self) -> &BTreeSet<String> {
        &self.known_invalid
    }

    /// Texture unit assigned to sampler `name`, if it was bound.
    pub fn texture_unit(&self, name: &str) -> Option<u32> {
        self.samplers.get(name).map(|sampler| sampler.unit)
    }

    pub fn activate(&self) {
        self.context.use_program(Some(&self.handle));
    }

    pub fn deactivate(&self) {
        self.context.use_program(None);
    }

    /// Compiles and links a shader pair, replacing any previous code.
    ///
    /// On success every declared variable starts out unset and all
    /// previous bindings are discarded. On failure the program stays
    /// unlinked until valid code is supplied.
    pub fn set_shaders(&mut self, vertex: &str, fragment: &str) -> Result<(), ProgramError> {
        self.linked = false;

        let vertex_shader = Shader::new(&self.context, vertex, ShaderStage::Vertex)?;
        let fragment_shader = Shader::new(&self.context, fragment, ShaderStage::Fragment)?;
        let shaders = [&vertex_shader, &fragment_shader];

        for shader in shaders {
            self.context.attach_shader(&self.handle, &shader.handle);
        }
        self.context.link_program(&self.handle);

        let result = if self.context.program_link_status(&self.handle) {
            Ok(self.active_variables())
        } else {
            Err(ProgramError::Link(self.context.program_info_log(&self.handle)))
        };

        for shader in shaders {
            self.context.detach_shader(&self.handle, &shader.handle);
        }

        let (declared, locations) = result?;
        log::debug!(
            "Linked program {:?} with {} declared variables",
            self.handle,
            declared.len()
        );

        self.unset_variables = declared.clone();
        self.declared_variables = declared;
        self.locations = locations;
        self.samplers.clear();
        self.attributes.clear();
        self.known_invalid.clear();
        self.validated = false;
        self.linked = true;
        Ok(())
    }

    /// Introspects the linked program for its active attributes and
    /// uniforms.
    fn active_variables(
        &self,
    ) -> (
        BTreeSet<String>,
        HashMap<String, Location<C::UniformLocation>>,
    ) {
        let context = &self.context;
        let program = &self.handle;
        let mut declared = BTreeSet::new();
        let mut locations = HashMap::new();

        let attributes = (0..context.active_attribute_count(program))
            .filter_map(|index| context.active_attribute(program, index));
        for variable in attributes {
            let (base, elements) = expand_active_variable(&variable);
            for name in base.iter().chain(&elements) {
                if let Some(location) = context.attrib_location(program, name) {
                    locations.insert(name.clone(), Location::Attribute(location));
                }
            }
            declared.extend(elements);
        }

        let uniforms = (0..context.active_uniform_count(program))
            .filter_map(|index| context.active_uniform(program, index));
        for variable in uniforms {
            let (base, elements) = expand_active_variable(&variable);
            for name in base.iter().chain(&elements) {
                if let Some(location) = context.uniform_location(program, name) {
                    locations.insert(name.clone(), Location::Uniform(location));
                }
            }
            declared.extend(elements);
        }

        (declared, locations)
    }

    fn ensure_linked(&self, operation: Operation) -> Result<(), ProgramError> {
        if self.linked {
            Ok(())
        } else {
            Err(ProgramError::Unlinked(operation))
        }
    }

    /// Records `name` as invalid, returning whether it was new.
    fn mark_invalid(&mut self, name: &str) -> bool {
        self.known_invalid.insert(name.to_string())
    }

    fn uniform_location(&mut self, name: &str, what: &str) -> Option<C::UniformLocation> {
        match self.locations.get(name) {
            Some(Location::Uniform(location)) => Some(location.clone()),
            _ => {
                if self.mark_invalid(name) {
                    log::warn!("Variable {name} is not an active {what}");
                }
                None
            }
        }
    }

    /// Binds `texture` to the sampler uniform `name`.
    ///
    /// Each sampler name keeps the texture unit it was first given.
    pub fn set_texture(&mut self, name: &str, texture: &Texture2D<C>) -> Result<(), ProgramError> {
        self.ensure_linked(Operation::SetTexture)?;
        let Some(location) = self.uniform_location(name, "texture") else {
            return Ok(());
        };
        self.unset_variables.remove(name);

        let unit = self
            .samplers
            .get(name)
            .map_or(self.samplers.len() as u32, |sampler| sampler.unit);
        self.samplers.insert(
            name.to_string(),
            SamplerBinding {
                target: texture.target(),
                texture: texture.handle().clone(),
                unit,
            },
        );

        self.activate();
        self.context.uniform_int(&location, 1, &[unit as i32]);
        Ok(())
    }

    /// Uploads `values` to the uniform `name`.
    ///
    /// `values` may hold several elements of `type_` for array uniforms.
    /// Integer and boolean types are converted from the given floats.
    pub fn set_uniform(
        &mut self,
        name: &str,
        type_: GlslType,
        values: &[f32],
    ) -> Result<(), ProgramError> {
        self.ensure_linked(Operation::SetUniform)?;
        let Some(location) = self.uniform_location(name, "uniform") else {
            return Ok(());
        };
        self.unset_variables.remove(name);

        let count = type_.element_count(values.len());
        if count > 1 {
            for j in 0..count {
                self.unset_variables.remove(&format!("{name}[{j}]"));
            }
        }

        self.activate();
        match type_.kind() {
            UniformKind::Float(components) => {
                self.context.uniform_float(&location, components, values)
            }
            UniformKind::Int(components) => {
                let values: Vec<i32> = values.iter().map(|&v| v as i32).collect();
                self.context.uniform_int(&location, components, &values)
            }
            UniformKind::Matrix(dimension) => {
                self.context
                    .uniform_matrix(&location, dimension, false, values)
            }
            UniformKind::Sampler => {
                let unit = values.first().copied().unwrap_or_default() as i32;
                self.context.uniform_int(&location, 1, &[unit])
            }
        }
        Ok(())
    }

    /// Binds the vertex attribute `name` to a buffer or a constant.
    ///
    /// For buffers, `stride` and `offset` (in bytes) describe how to walk
    /// the data; zero means tightly packed from the start.
    pub fn set_attribute(
        &mut self,
        name: &str,
        type_: AttributeType,
        source: AttributeSource<'_, C>,
        stride: usize,
        offset: usize,
    ) -> Result<(), ProgramError> {
        self.ensure_linked(Operation::SetAttribute)?;
        let location = match self.locations.get(name) {
            Some(Location::Attribute(location)) => *location,
            _ => {
                // Packed buffers with an offset routinely carry optional
                // fields that some shader variants leave out.
                let quiet = matches!(source, AttributeSource::Buffer(_)) && offset > 0;
                if self.mark_invalid(name) && !quiet {
                    log::warn!("Variable {name} is not an active attribute");
                }
                return Ok(());
            }
        };

        let binding = match source {
            AttributeSource::Buffer(buffer) => AttributeBinding::Buffer {
                buffer: buffer.handle().clone(),
                location,
                size: type_.components(),
                data_type: type_.data_type(),
                stride,
                offset,
            },
            AttributeSource::Constant(values) => {
                let expected = type_.components();
                if values.len() < expected {
                    return Err(ProgramError::ConstantArity {
                        name: name.to_string(),
                        expected,
                        found: values.len(),
                    });
                }
                AttributeBinding::Constant {
                    location,
                    values: values[..expected].to_vec(),
                }
            }
        };

        self.unset_variables.remove(name);
        self.activate();
        self.attributes.insert(name.to_string(), binding);
        Ok(())
    }

    /// [`Program::set_attribute`] with a tightly packed buffer.
    pub fn set_attribute_buffer(
        &mut self,
        name: &str,
        type_: AttributeType,
        buffer: &VertexBuffer<C>,
    ) -> Result<(), ProgramError> {
        self.set_attribute(name, type_, AttributeSource::Buffer(buffer), 0, 0)
    }

    /// [`Program::set_attribute`] with one value for every vertex.
    pub fn set_attribute_constant(
        &mut self,
        name: &str,
        type_: AttributeType,
        values: &[f32],
    ) -> Result<(), ProgramError> {
        self.set_attribute(name, type_, AttributeSource::Constant(values), 0, 0)
    }

    fn pre_draw(&mut self) -> Result<(), ProgramError> {
        self.activate();

        for sampler in self.samplers.values() {
            self.context.active_texture(sampler.unit);
            self.context
                .bind_texture(sampler.target, Some(&sampler.texture));
        }

        for attribute in self.attributes.values() {
            match attribute {
                AttributeBinding::Buffer {
                    buffer,
                    location,
                    size,
                    data_type,
                    stride,
                    offset,
                } => {
                    self.context.bind_buffer(BufferTarget::Array, Some(buffer));
                    self.context.enable_vertex_attrib_array(*location);
                    self.context.vertex_attrib_pointer(
                        *location, *size, *data_type, false, *stride, *offset,
                    );
                }
                AttributeBinding::Constant { location, values } => {
                    self.context.bind_buffer(BufferTarget::Array, None);
                    self.context.disable_vertex_attrib_array(*location);
                    self.context.vertex_attrib(*location, values);
                }
            }
        }

        if !self.validated {
            self.validated = true;
            self.validate()?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ProgramError> {
        if !self.unset_variables.is_empty() {
            let names: Vec<&str> = self.unset_variables.iter().map(String::as_str).collect();
            log::warn!("Program has unset variables: {}", names.join(", "));
        }

        self.context.validate_program(&self.handle);
        if !self.context.program_validate_status(&self.handle) {
            let log = self.context.program_info_log(&self.handle);
            log::error!("{log}");
            return Err(ProgramError::Validation(log));
        }
        Ok(())
    }

    /// Draws the current bindings as `mode` primitives.
    ///
    /// An array selection with a zero count touches no GL state at all.
    pub fn draw(&mut self, mode: DrawMode, selection: DrawSelection<'_, C>) -> Result<(), ProgramError> {
        self.ensure_linked(Operation::Draw)?;

        match selection {
            DrawSelection::Indexed(indices) => {
                self.pre_draw()?;
                indices.activate();
                let count = indices.buffer_size() / DataType::UnsignedShort.byte_size();
                self.context
                    .draw_elements(mode, count, DataType::UnsignedShort, 0);
                indices.deactivate();
            }
            DrawSelection::Arrays { first, count } => {
                if count != 0 {
                    self.pre_draw()?;
                    self.context.draw_arrays(mode, first, count);
                }
            }
        }
        Ok(())
    }

    /// Releases the GPU program.
    pub fn delete(self) {
        drop(self);
    }
}

impl<C: GraphicsContext> Drop for Program<C> {
    fn drop(&mut self) {
        log::trace!("Deleting program {:?}", self.handle);
        self.context.delete_program(&self.handle);
    }
}
