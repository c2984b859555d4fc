use pretty_assertions::assert_eq;
use std::rc::Rc;

use super::super::{
    array_data::ElementKind,
    buffer::*,
    context::{trace_context::*, *},
};

fn is_buffer_data(command: &GlCommand) -> bool {
    matches!(command, GlCommand::BufferData { .. })
}

#[test]
fn test_new_buffer_is_empty() {
    let context = Rc::new(TraceContext::new());
    let buffer = VertexBuffer::new(&context).unwrap();
    assert_eq!(buffer.buffer_size(), 0);
    assert_eq!(buffer.target(), BufferTarget::Array);
    assert_eq!(context.commands(), vec![GlCommand::CreateBuffer(1)]);
}

#[test]
fn test_set_size_allocates_once() {
    let context = Rc::new(TraceContext::new());
    let mut buffer = VertexBuffer::new(&context).unwrap();
    context.take_commands();

    buffer.set_size(64);
    buffer.set_size(64);

    assert_eq!(buffer.buffer_size(), 64);
    assert_eq!(
        context.take_commands(),
        vec![
            GlCommand::BindBuffer {
                target: BufferTarget::Array,
                buffer: Some(1),
            },
            GlCommand::BufferData {
                target: BufferTarget::Array,
                size: 64,
                usage: BufferUsage::DynamicDraw,
            },
        ]
    );
}

#[test]
fn test_set_size_reallocates_on_change() {
    let context = Rc::new(TraceContext::new());
    let mut buffer = IndexBuffer::new(&context).unwrap();

    buffer.set_size(16);
    buffer.set_size(32);
    buffer.set_size(16);

    assert_eq!(buffer.buffer_size(), 16);
    assert_eq!(context.count_commands(is_buffer_data), 3);
}

#[test]
fn test_set_size_zero_on_fresh_buffer_is_noop() {
    let context = Rc::new(TraceContext::new());
    let mut buffer = VertexBuffer::new(&context).unwrap();
    buffer.set_size(0);
    assert_eq!(context.count_commands(is_buffer_data), 0);
}

#[test]
fn test_set_data_uploads_at_offset() {
    let context = Rc::new(TraceContext::new());
    let mut buffer = IndexBuffer::new(&context).unwrap();
    buffer.set_size(8);
    context.take_commands();

    let indices: [u16; 3] = [0, 1, 2];
    buffer.set_data(2, &indices);

    assert_eq!(
        context.take_commands(),
        vec![
            GlCommand::BindBuffer {
                target: BufferTarget::ElementArray,
                buffer: Some(1),
            },
            GlCommand::BufferSubData {
                target: BufferTarget::ElementArray,
                offset: 2,
                kind: ElementKind::U16,
                len: 3,
            },
        ]
    );
}

#[test]
fn test_overflowing_upload_is_forwarded() {
    let context = Rc::new(TraceContext::new());
    let mut buffer = VertexBuffer::new(&context).unwrap();
    buffer.set_size(4);

    let values = vec![1.0f32, 2.0, 3.0];
    buffer.set_data(0, &values);

    assert_eq!(
        context.count_commands(|c| matches!(c, GlCommand::BufferSubData { len: 3, .. })),
        1
    );
}

#[test]
fn test_activate_and_deactivate() {
    let context = Rc::new(TraceContext::new());
    let buffer = VertexBuffer::new(&context).unwrap();
    context.take_commands();

    buffer.activate();
    buffer.deactivate();

    assert_eq!(
        context.take_commands(),
        vec![
            GlCommand::BindBuffer {
                target: BufferTarget::Array,
                buffer: Some(1),
            },
            GlCommand::BindBuffer {
                target: BufferTarget::Array,
                buffer: None,
            },
        ]
    );
}

#[test]
fn test_delete_releases_handle() {
    let context = Rc::new(TraceContext::new());
    let buffer = VertexBuffer::new(&context).unwrap();
    assert_eq!(context.live_resources(), 1);

    buffer.delete();

    assert_eq!(context.live_resources(), 0);
    assert_eq!(context.count_commands(|c| *c == GlCommand::DeleteBuffer(1)), 1);
}

#[test]
fn test_drop_releases_handle() {
    let context = Rc::new(TraceContext::new());
    {
        let _vertices = VertexBuffer::new(&context).unwrap();
        let _indices = IndexBuffer::new(&context).unwrap();
        assert_eq!(context.live_resources(), 2);
    }
    assert_eq!(context.live_resources(), 0);
}

#[test]
fn test_set_data_at_huge_offset() {
    let context = Rc::new(TraceContext::new());
    let mut buffer = VertexBuffer::new(&context).unwrap();
    buffer.set_size(16);
    context.take_commands();

    buffer.set_data(usize::MAX, &[1u8, 2]);

    assert_eq!(
        context.count_commands(|c| {
            *c == GlCommand::BufferSubData {
                target: BufferTarget::Array,
                offset: usize::MAX,
                kind: ElementKind::U8,
                len: 2,
            }
        }),
        1
    );
}
