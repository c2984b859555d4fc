// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

use std::rc::Rc;

use super::{
    context::{GraphicsContext, ShaderStage},
    program::ProgramError,
};

/// Compiled shader object, deleted when dropped.
///
/// Only lives for the duration of a link; the program keeps the
/// compiled code after the shader is detached.
pub(super) struct Shader<C: GraphicsContext> {
    context: Rc<C>,
    pub handle: C::Shader,
}

impl<C: GraphicsContext> Shader<C> {
    pub fn new(context: &Rc<C>, source: &str, stage: ShaderStage) -> Result<Self, ProgramError> {
        let shader = Self {
            context: Rc::clone(context),
            handle: context.create_shader(stage)?,
        };

        context.shader_source(&shader.handle, source);
        context.compile_shader(&shader.handle);

        if context.shader_compile_status(&shader.handle) {
            Ok(shader)
        } else {
            Err(ProgramError::Compile {
                stage,
                log: context.shader_info_log(&shader.handle),
            })
        }
    }
}

impl<C: GraphicsContext> Drop for Shader<C> {
    fn drop(&mut self) {
        self.context.delete_shader(&self.handle);
    }
}
