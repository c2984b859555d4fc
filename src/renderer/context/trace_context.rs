// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory recording backend.
//!
//! [`TraceContext`] keeps just enough GL bookkeeping to stand in for a
//! real driver: handle allocation, shader compile and link status,
//! active variable introspection (from GLSL declarations), uniform and
//! attribute locations, validation and the unpack alignment. Every call
//! is appended to a command log that tests inspect and the command-line
//! tool prints.

use regex::Regex;
use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    fmt,
    sync::LazyLock,
};

use crate::{
    geometry::{Point, Size},
    renderer::array_data::{ArrayData, ElementKind},
};

use super::*;

/// One recorded call against the context.
#[derive(Clone, Debug, PartialEq)]
pub enum GlCommand {
    CreateBuffer(u32),
    DeleteBuffer(u32),
    BindBuffer {
        target: BufferTarget,
        buffer: Option<u32>,
    },
    BufferData {
        target: BufferTarget,
        size: usize,
        usage: BufferUsage,
    },
    BufferSubData {
        target: BufferTarget,
        offset: usize,
        kind: ElementKind,
        len: usize,
    },
    CreateTexture(u32),
    DeleteTexture(u32),
    ActiveTexture(u32),
    BindTexture {
        target: TextureTarget,
        texture: Option<u32>,
    },
    TexParameter {
        target: TextureTarget,
        parameter: TextureParameter,
    },
    TexImage2D {
        target: TextureTarget,
        size: Size,
        format: PixelFormat,
    },
    TexSubImage2D {
        target: TextureTarget,
        offset: Point,
        size: Size,
        format: PixelFormat,
        data_type: DataType,
        len: usize,
    },
    PixelStoreUnpackAlignment(u32),
    CreateProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    LinkProgram(u32),
    ValidateProgram(u32),
    CreateShader {
        shader: u32,
        stage: ShaderStage,
    },
    DeleteShader(u32),
    ShaderSource {
        shader: u32,
        length: usize,
    },
    CompileShader(u32),
    AttachShader {
        program: u32,
        shader: u32,
    },
    DetachShader {
        program: u32,
        shader: u32,
    },
    UniformFloat {
        location: u32,
        components: usize,
        values: Vec<f32>,
    },
    UniformInt {
        location: u32,
        components: usize,
        values: Vec<i32>,
    },
    UniformMatrix {
        location: u32,
        dimension: usize,
        transpose: bool,
        values: Vec<f32>,
    },
    EnableVertexAttribArray(u32),
    DisableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        size: usize,
        data_type: DataType,
        normalized: bool,
        stride: usize,
        offset: usize,
    },
    VertexAttrib {
        index: u32,
        values: Vec<f32>,
    },
    DrawArrays {
        mode: DrawMode,
        first: usize,
        count: usize,
    },
    DrawElements {
        mode: DrawMode,
        count: usize,
        index_type: DataType,
        offset: usize,
    },
}

fn handle(id: &Option<u32>) -> String {
    id.map_or_else(|| "null".to_string(), |id| id.to_string())
}

fn list<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for GlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateBuffer(id) => write!(f, "glCreateBuffer() -> {id}"),
            Self::DeleteBuffer(id) => write!(f, "glDeleteBuffer({id})"),
            Self::BindBuffer { target, buffer } => {
                write!(f, "glBindBuffer({target}, {})", handle(buffer))
            }
            Self::BufferData {
                target,
                size,
                usage,
            } => write!(f, "glBufferData({target}, {size}, {usage})"),
            Self::BufferSubData {
                target,
                offset,
                kind,
                len,
            } => write!(f, "glBufferSubData({target}, {offset}, [{kind}; {len}])"),
            Self::CreateTexture(id) => write!(f, "glCreateTexture() -> {id}"),
            Self::DeleteTexture(id) => write!(f, "glDeleteTexture({id})"),
            Self::ActiveTexture(unit) => write!(f, "glActiveTexture(TEXTURE{unit})"),
            Self::BindTexture { target, texture } => {
                write!(f, "glBindTexture({target}, {})", handle(texture))
            }
            Self::TexParameter { target, parameter } => {
                write!(f, "glTexParameteri({target}, {parameter})")
            }
            Self::TexImage2D {
                target,
                size,
                format,
            } => write!(
                f,
                "glTexImage2D({target}, 0, {format}, {}, {}, 0, {format}, UNSIGNED_BYTE, null)",
                size.width(),
                size.height()
            ),
            Self::TexSubImage2D {
                target,
                offset,
                size,
                format,
                data_type,
                len,
            } => write!(
                f,
                "glTexSubImage2D({target}, 0, {}, {}, {}, {}, {format}, {data_type}, [{len}])",
                offset.x(),
                offset.y(),
                size.width(),
                size.height()
            ),
            Self::PixelStoreUnpackAlignment(alignment) => {
                write!(f, "glPixelStorei(UNPACK_ALIGNMENT, {alignment})")
            }
            Self::CreateProgram(id) => write!(f, "glCreateProgram() -> {id}"),
            Self::DeleteProgram(id) => write!(f, "glDeleteProgram({id})"),
            Self::UseProgram(program) => write!(f, "glUseProgram({})", handle(program)),
            Self::LinkProgram(id) => write!(f, "glLinkProgram({id})"),
            Self::ValidateProgram(id) => write!(f, "glValidateProgram({id})"),
            Self::CreateShader { shader, stage } => {
                let stage = match stage {
                    ShaderStage::Vertex => "VERTEX_SHADER",
                    ShaderStage::Fragment => "FRAGMENT_SHADER",
                };
                write!(f, "glCreateShader({stage}) -> {shader}")
            }
            Self::DeleteShader(id) => write!(f, "glDeleteShader({id})"),
            Self::ShaderSource { shader, length } => {
                write!(f, "glShaderSource({shader}, <{length} bytes>)")
            }
            Self::CompileShader(id) => write!(f, "glCompileShader({id})"),
            Self::AttachShader { program, shader } => {
                write!(f, "glAttachShader({program}, {shader})")
            }
            Self::DetachShader { program, shader } => {
                write!(f, "glDetachShader({program}, {shader})")
            }
            Self::UniformFloat {
                location,
                components,
                values,
            } => write!(f, "glUniform{components}fv({location}, [{}])", list(values)),
            Self::UniformInt {
                location,
                components,
                values,
            } => write!(f, "glUniform{components}iv({location}, [{}])", list(values)),
            Self::UniformMatrix {
                location,
                dimension,
                transpose,
                values,
            } => write!(
                f,
                "glUniformMatrix{dimension}fv({location}, {transpose}, [{}])",
                list(values)
            ),
            Self::EnableVertexAttribArray(index) => {
                write!(f, "glEnableVertexAttribArray({index})")
            }
            Self::DisableVertexAttribArray(index) => {
                write!(f, "glDisableVertexAttribArray({index})")
            }
            Self::VertexAttribPointer {
                index,
                size,
                data_type,
                normalized,
                stride,
                offset,
            } => write!(
                f,
                "glVertexAttribPointer({index}, {size}, {data_type}, {normalized}, {stride}, {offset})"
            ),
            Self::VertexAttrib { index, values } => {
                write!(f, "glVertexAttrib{}f({index}, {})", values.len(), list(values))
            }
            Self::DrawArrays { mode, first, count } => {
                write!(f, "glDrawArrays({mode}, {first}, {count})")
            }
            Self::DrawElements {
                mode,
                count,
                index_type,
                offset,
            } => write!(f, "glDrawElements({mode}, {count}, {index_type}, {offset})"),
        }
    }
}

struct ShaderObject {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    info_log: String,
}

#[derive(Default)]
struct ProgramObject {
    attached: Vec<u32>,
    linked: bool,
    validated: bool,
    info_log: String,
    attributes: Vec<ActiveVariable>,
    uniforms: Vec<ActiveVariable>,
    attrib_locations: HashMap<String, u32>,
    uniform_locations: HashMap<String, u32>,
}

struct TraceState {
    commands: Vec<GlCommand>,
    next_id: u32,
    live: BTreeMap<u32, ResourceKind>,
    shaders: HashMap<u32, ShaderObject>,
    programs: HashMap<u32, ProgramObject>,
    unpack_alignment: u32,
    validation_failure: Option<String>,
}

impl TraceState {
    fn allocate(&mut self, kind: ResourceKind) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, kind);
        id
    }

    fn release(&mut self, id: u32, kind: ResourceKind) {
        if self.live.get(&id) == Some(&kind) {
            self.live.remove(&id);
        } else {
            log::warn!("Deleting {kind} {id} which is not alive");
        }
    }
}

/// Recording [`GraphicsContext`] with emulated driver bookkeeping.
///
/// Shader "compilation" fails for empty sources and for sources with an
/// `#error` directive. Linking fails when a stage is missing, did not
/// compile, or does not define `main`. Every declared attribute and
/// uniform is reported active; attributes are `attribute` declarations
/// (or `in` declarations of the vertex stage).
pub struct TraceContext {
    state: RefCell<TraceState>,
}

impl Default for TraceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceContext {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(TraceState {
                commands: Vec::new(),
                next_id: 1,
                live: BTreeMap::new(),
                shaders: HashMap::new(),
                programs: HashMap::new(),
                unpack_alignment: 4,
                validation_failure: None,
            }),
        }
    }

    /// Snapshot of every recorded command, oldest first.
    pub fn commands(&self) -> Vec<GlCommand> {
        self.state.borrow().commands.clone()
    }

    /// Returns and clears the recorded commands.
    pub fn take_commands(&self) -> Vec<GlCommand> {
        std::mem::take(&mut self.state.borrow_mut().commands)
    }

    /// Number of recorded commands matching `predicate`.
    pub fn count_commands(&self, predicate: impl Fn(&GlCommand) -> bool) -> usize {
        self.state
            .borrow()
            .commands
            .iter()
            .filter(|command| predicate(command))
            .count()
    }

    /// Number of buffers, textures, programs and shaders not yet deleted.
    pub fn live_resources(&self) -> usize {
        self.state.borrow().live.len()
    }

    /// Current `UNPACK_ALIGNMENT` pixel-store value.
    pub fn unpack_alignment(&self) -> u32 {
        self.state.borrow().unpack_alignment
    }

    /// Makes every subsequent `glValidateProgram` fail with `message`,
    /// or succeed again when `None`.
    pub fn set_validation_failure(&self, message: Option<&str>) {
        self.state.borrow_mut().validation_failure = message.map(str::to_string);
    }

    fn record(&self, command: GlCommand) {
        self.state.borrow_mut().commands.push(command);
    }
}

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)//[^\n]*|/\*.*?\*/").unwrap());

static ERROR_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*#\s*error\b[ \t]*(.*)$").unwrap());

static MAIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bvoid\s+main\s*\(").unwrap());

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*(?:layout\s*\([^)]*\)\s*)?(attribute|in|uniform)\s+(?:(?:lowp|mediump|highp)\s+)?\w+\s+(\w+)\s*(?:\[\s*(\d+)\s*\])?\s*;",
    )
    .unwrap()
});

fn compile(source: &str) -> Result<(), String> {
    if source.trim().is_empty() {
        return Err("ERROR: 0:0: '' : empty shader source".to_string());
    }
    let code = COMMENT_RE.replace_all(source, " ");
    if let Some(caps) = ERROR_DIRECTIVE_RE.captures(&code) {
        let line = code[..caps.get(0).map_or(0, |m| m.start())]
            .matches('\n')
            .count()
            + 1;
        return Err(format!("ERROR: 0:{line}: '#error' : {}", caps[1].trim()));
    }
    Ok(())
}

/// Declared `(qualifier, name, array length)` triples of a shader stage.
/// The length is `None` for non-array declarations.
fn declarations(source: &str) -> Vec<(String, String, Option<u32>)> {
    let code = COMMENT_RE.replace_all(source, " ");
    DECLARATION_RE
        .captures_iter(&code)
        .map(|caps| {
            let length = caps.get(3).and_then(|m| m.as_str().parse().ok());
            (caps[1].to_string(), caps[2].to_string(), length)
        })
        .collect()
}

/// Registers `name` (and for arrays every `name[j]`) starting at
/// `next_location`, returning the active variable as a driver reports it.
fn register(
    name: &str,
    length: Option<u32>,
    locations: &mut HashMap<String, u32>,
    next_location: &mut u32,
) -> ActiveVariable {
    let base = *next_location;
    locations.insert(name.to_string(), base);

    let Some(size) = length else {
        *next_location += 1;
        return ActiveVariable {
            name: name.to_string(),
            size: 1,
        };
    };

    for j in 0..size {
        locations.insert(format!("{name}[{j}]"), base + j);
    }
    *next_location += size.max(1);

    ActiveVariable {
        name: format!("{name}[0]"),
        size,
    }
}

fn link(program: &mut ProgramObject, shaders: &HashMap<u32, ShaderObject>) -> Result<(), String> {
    let attached: Vec<&ShaderObject> = program
        .attached
        .iter()
        .filter_map(|id| shaders.get(id))
        .collect();

    for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
        let Some(shader) = attached.iter().find(|s| s.stage == stage) else {
            return Err(format!("ERROR: missing {stage} shader"));
        };
        if !shader.compiled {
            return Err(format!("ERROR: {stage} shader not successfully compiled"));
        }
        let code = COMMENT_RE.replace_all(&shader.source, " ");
        if !MAIN_RE.is_match(&code) {
            return Err(format!("ERROR: {stage} shader does not define main()"));
        }
    }

    let mut attributes = Vec::new();
    let mut uniforms = Vec::new();
    let mut attrib_locations = HashMap::new();
    let mut uniform_locations = HashMap::new();
    let (mut next_attrib, mut next_uniform) = (0, 0);

    for shader in &attached {
        for (qualifier, name, length) in declarations(&shader.source) {
            match qualifier.as_str() {
                "uniform" if !uniform_locations.contains_key(&name) => {
                    uniforms.push(register(
                        &name,
                        length,
                        &mut uniform_locations,
                        &mut next_uniform,
                    ));
                }
                "attribute" | "in"
                    if shader.stage == ShaderStage::Vertex
                        && !attrib_locations.contains_key(&name) =>
                {
                    attributes.push(register(
                        &name,
                        length,
                        &mut attrib_locations,
                        &mut next_attrib,
                    ));
                }
                _ => {}
            }
        }
    }

    program.attributes = attributes;
    program.uniforms = uniforms;
    program.attrib_locations = attrib_locations;
    program.uniform_locations = uniform_locations;
    Ok(())
}

impl GraphicsContext for TraceContext {
    type Buffer = u32;
    type Texture = u32;
    type Program = u32;
    type Shader = u32;
    type UniformLocation = u32;

    fn create_buffer(&self) -> Result<u32, ContextError> {
        let id = self.state.borrow_mut().allocate(ResourceKind::Buffer);
        self.record(GlCommand::CreateBuffer(id));
        Ok(id)
    }

    fn delete_buffer(&self, buffer: &u32) {
        self.state
            .borrow_mut()
            .release(*buffer, ResourceKind::Buffer);
        self.record(GlCommand::DeleteBuffer(*buffer));
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<&u32>) {
        self.record(GlCommand::BindBuffer {
            target,
            buffer: buffer.copied(),
        });
    }

    fn buffer_data(&self, target: BufferTarget, size: usize, usage: BufferUsage) {
        self.record(GlCommand::BufferData {
            target,
            size,
            usage,
        });
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: ArrayData<'_>) {
        self.record(GlCommand::BufferSubData {
            target,
            offset,
            kind: data.element_kind(),
            len: data.len(),
        });
    }

    fn create_texture(&self) -> Result<u32, ContextError> {
        let id = self.state.borrow_mut().allocate(ResourceKind::Texture);
        self.record(GlCommand::CreateTexture(id));
        Ok(id)
    }

    fn delete_texture(&self, texture: &u32) {
        self.state
            .borrow_mut()
            .release(*texture, ResourceKind::Texture);
        self.record(GlCommand::DeleteTexture(*texture));
    }

    fn active_texture(&self, unit: u32) {
        self.record(GlCommand::ActiveTexture(unit));
    }

    fn bind_texture(&self, target: TextureTarget, texture: Option<&u32>) {
        self.record(GlCommand::BindTexture {
            target,
            texture: texture.copied(),
        });
    }

    fn tex_parameter(&self, target: TextureTarget, parameter: TextureParameter) {
        self.record(GlCommand::TexParameter { target, parameter });
    }

    fn tex_image_2d(&self, target: TextureTarget, size: Size, format: PixelFormat) {
        self.record(GlCommand::TexImage2D {
            target,
            size,
            format,
        });
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
        self.record(GlCommand::TexSubImage2D {
            target,
            offset,
            size,
            format,
            data_type,
            len: data.len(),
        });
    }

    fn pixel_store_unpack_alignment(&self, alignment: u32) {
        self.state.borrow_mut().unpack_alignment = alignment;
        self.record(GlCommand::PixelStoreUnpackAlignment(alignment));
    }

    fn create_program(&self) -> Result<u32, ContextError> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate(ResourceKind::Program);
        state.programs.insert(id, ProgramObject::default());
        drop(state);
        self.record(GlCommand::CreateProgram(id));
        Ok(id)
    }

    fn delete_program(&self, program: &u32) {
        let mut state = self.state.borrow_mut();
        state.release(*program, ResourceKind::Program);
        state.programs.remove(program);
        drop(state);
        self.record(GlCommand::DeleteProgram(*program));
    }

    fn use_program(&self, program: Option<&u32>) {
        self.record(GlCommand::UseProgram(program.copied()));
    }

    fn link_program(&self, program: &u32) {
        let mut state = self.state.borrow_mut();
        let TraceState {
            programs, shaders, ..
        } = &mut *state;
        if let Some(object) = programs.get_mut(program) {
            match link(object, shaders) {
                Ok(()) => {
                    object.linked = true;
                    object.info_log.clear();
                }
                Err(log) => {
                    object.linked = false;
                    object.info_log = log;
                }
            }
            object.validated = false;
        }
        drop(state);
        self.record(GlCommand::LinkProgram(*program));
    }

    fn program_link_status(&self, program: &u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(program)
            .is_some_and(|p| p.linked)
    }

    fn validate_program(&self, program: &u32) {
        let mut state = self.state.borrow_mut();
        let failure = state.validation_failure.clone();
        if let Some(object) = state.programs.get_mut(program) {
            match (object.linked, failure) {
                (false, _) => {
                    object.validated = false;
                    object.info_log = "ERROR: program is not linked".to_string();
                }
                (true, Some(message)) => {
                    object.validated = false;
                    object.info_log = message;
                }
                (true, None) => object.validated = true,
            }
        }
        drop(state);
        self.record(GlCommand::ValidateProgram(*program));
    }

    fn program_validate_status(&self, program: &u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(program)
            .is_some_and(|p| p.validated)
    }

    fn program_info_log(&self, program: &u32) -> String {
        self.state
            .borrow()
            .programs
            .get(program)
            .map(|p| p.info_log.clone())
            .unwrap_or_default()
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, ContextError> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate(ResourceKind::Shader);
        state.shaders.insert(
            id,
            ShaderObject {
                stage,
                source: String::new(),
                compiled: false,
                info_log: String::new(),
            },
        );
        drop(state);
        self.record(GlCommand::CreateShader { shader: id, stage });
        Ok(id)
    }

    fn delete_shader(&self, shader: &u32) {
        let mut state = self.state.borrow_mut();
        state.release(*shader, ResourceKind::Shader);
        state.shaders.remove(shader);
        drop(state);
        self.record(GlCommand::DeleteShader(*shader));
    }

    fn shader_source(&self, shader: &u32, source: &str) {
        if let Some(object) = self.state.borrow_mut().shaders.get_mut(shader) {
            object.source = source.to_string();
        }
        self.record(GlCommand::ShaderSource {
            shader: *shader,
            length: source.len(),
        });
    }

    fn compile_shader(&self, shader: &u32) {
        if let Some(object) = self.state.borrow_mut().shaders.get_mut(shader) {
            match compile(&object.source) {
                Ok(()) => {
                    object.compiled = true;
                    object.info_log.clear();
                }
                Err(log) => {
                    object.compiled = false;
                    object.info_log = log;
                }
            }
        }
        self.record(GlCommand::CompileShader(*shader));
    }

    fn shader_compile_status(&self, shader: &u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(shader)
            .is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: &u32) -> String {
        self.state
            .borrow()
            .shaders
            .get(shader)
            .map(|s| s.info_log.clone())
            .unwrap_or_default()
    }

    fn attach_shader(&self, program: &u32, shader: &u32) {
        if let Some(object) = self.state.borrow_mut().programs.get_mut(program) {
            if !object.attached.contains(shader) {
                object.attached.push(*shader);
            }
        }
        self.record(GlCommand::AttachShader {
            program: *program,
            shader: *shader,
        });
    }

    fn detach_shader(&self, program: &u32, shader: &u32) {
        if let Some(object) = self.state.borrow_mut().programs.get_mut(program) {
            object.attached.retain(|id| id != shader);
        }
        self.record(GlCommand::DetachShader {
            program: *program,
            shader: *shader,
        });
    }

    fn active_attribute_count(&self, program: &u32) -> u32 {
        self.state
            .borrow()
            .programs
            .get(program)
            .map_or(0, |p| p.attributes.len() as u32)
    }

    fn active_attribute(&self, program: &u32, index: u32) -> Option<ActiveVariable> {
        self.state
            .borrow()
            .programs
            .get(program)?
            .attributes
            .get(index as usize)
            .cloned()
    }

    fn active_uniform_count(&self, program: &u32) -> u32 {
        self.state
            .borrow()
            .programs
            .get(program)
            .map_or(0, |p| p.uniforms.len() as u32)
    }

    fn active_uniform(&self, program: &u32, index: u32) -> Option<ActiveVariable> {
        self.state
            .borrow()
            .programs
            .get(program)?
            .uniforms
            .get(index as usize)
            .cloned()
    }

    fn attrib_location(&self, program: &u32, name: &str) -> Option<u32> {
        self.state
            .borrow()
            .programs
            .get(program)?
            .attrib_locations
            .get(name)
            .copied()
    }

    fn uniform_location(&self, program: &u32, name: &str) -> Option<u32> {
        self.state
            .borrow()
            .programs
            .get(program)?
            .uniform_locations
            .get(name)
            .copied()
    }

    fn uniform_float(&self, location: &u32, components: usize, values: &[f32]) {
        self.record(GlCommand::UniformFloat {
            location: *location,
            components,
            values: values.to_vec(),
        });
    }

    fn uniform_int(&self, location: &u32, components: usize, values: &[i32]) {
        self.record(GlCommand::UniformInt {
            location: *location,
            components,
            values: values.to_vec(),
        });
    }

    fn uniform_matrix(&self, location: &u32, dimension: usize, transpose: bool, values: &[f32]) {
        self.record(GlCommand::UniformMatrix {
            location: *location,
            dimension,
            transpose,
            values: values.to_vec(),
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCommand::EnableVertexAttribArray(index));
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCommand::DisableVertexAttribArray(index));
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
        self.record(GlCommand::VertexAttribPointer {
            index,
            size,
            data_type,
            normalized,
            stride,
            offset,
        });
    }

    fn vertex_attrib(&self, index: u32, values: &[f32]) {
        self.record(GlCommand::VertexAttrib {
            index,
            values: values.to_vec(),
        });
    }

    fn draw_arrays(&self, mode: DrawMode, first: usize, count: usize) {
        self.record(GlCommand::DrawArrays { mode, first, count });
    }

    fn draw_elements(&self, mode: DrawMode, count: usize, index_type: DataType, offset: usize) {
        self.record(GlCommand::DrawElements {
            mode,
            count,
            index_type,
            offset,
        });
    }
}
