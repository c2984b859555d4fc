// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{marker::PhantomData, rc::Rc};

use super::{
    array_data::ArrayData,
    context::{BufferTarget, BufferUsage, ContextError, GraphicsContext},
};

/// Selects the binding target of a [`Buffer`].
pub trait BufferKind {
    const TARGET: BufferTarget;
}

/// Marker for per-vertex attribute arrays.
#[derive(Debug)]
pub enum Vertices {}

/// Marker for element index arrays.
#[derive(Debug)]
pub enum Indices {}

impl BufferKind for Vertices {
    const TARGET: BufferTarget = BufferTarget::Array;
}

impl BufferKind for Indices {
    const TARGET: BufferTarget = BufferTarget::ElementArray;
}

pub type VertexBuffer<C> = Buffer<C, Vertices>;
pub type IndexBuffer<C> = Buffer<C, Indices>;

/// Buffers are reallocated whenever glyph data changes shape.
const USAGE: BufferUsage = BufferUsage::DynamicDraw;

/// GPU buffer that remembers its allocated size.
///
/// Callers are expected to call [`Buffer::set_size`] every time the
/// data shape might have changed; the buffer absorbs the cost of
/// detecting that nothing did.
///
/// The handle is released by [`Buffer::delete`] or, failing that, when
/// the value is dropped.
pub struct Buffer<C: GraphicsContext, K: BufferKind> {
    context: Rc<C>,
    handle: C::Buffer,
    buffer_size: usize,
    _kind: PhantomData<K>,
}

impl<C: GraphicsContext, K: BufferKind> Buffer<C, K> {
    pub fn new(context: &Rc<C>) -> Result<Self, ContextError> {
        let handle = context.create_buffer()?;
        Ok(Self {
            context: Rc::clone(context),
            handle,
            buffer_size: 0,
            _kind: PhantomData,
        })
    }

    pub fn handle(&self) -> &C::Buffer {
        &self.handle
    }

    /// Size in bytes of the last allocation, 0 before the first one.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn target(&self) -> BufferTarget {
        K::TARGET
    }

    pub fn activate(&self) {
        self.context.bind_buffer(K::TARGET, Some(&self.handle));
    }

    pub fn deactivate(&self) {
        self.context.bind_buffer(K::TARGET, None);
    }

    /// Allocates `nbytes` of storage unless the buffer already has
    /// exactly that size.
    pub fn set_size(&mut self, nbytes: usize) {
        if nbytes != self.buffer_size {
            self.activate();
            self.context.buffer_data(K::TARGET, nbytes, USAGE);
            log::debug!(
                "Reallocated {} {:?} from {} to {nbytes} bytes",
                K::TARGET,
                self.handle,
                self.buffer_size
            );
            self.buffer_size = nbytes;
        }
    }

    /// Uploads `data` starting at byte `offset`.
    ///
    /// The upload must fit in the current allocation. This is not
    /// enforced here; the driver rejects out-of-range uploads.
    pub fn set_data<'a>(&self, offset: usize, data: impl Into<ArrayData<'a>>) {
        let data = data.into();
        if offset.saturating_add(data.byte_len()) > self.buffer_size {
            log::debug!(
                "Upload of {} bytes at offset {offset} overflows {} {:?} of {} bytes",
                data.byte_len(),
                K::TARGET,
                self.handle,
                self.buffer_size
            );
        }
        self.activate();
        self.context.buffer_sub_data(K::TARGET, offset, data);
    }

    /// Releases the GPU buffer.
    pub fn delete(self) {
        drop(self);
    }
}

impl<C: GraphicsContext, K: BufferKind> Drop for Buffer<C, K> {
    fn drop(&mut self) {
        log::trace!("Deleting {} {:?}", K::TARGET, self.handle);
        self.context.delete_buffer(&self.handle);
    }
}
