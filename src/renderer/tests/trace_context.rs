use pretty_assertions::assert_eq;

use super::super::context::{trace_context::*, *};

const VERTEX_SHADER: &str = r#"
// attribute vec4 a_commented_out;
in vec2 a_position;
layout(location = 3) in highp vec4 a_color;
uniform vec4 u_weights[2];
/* uniform float u_hidden; */
void main() {}
"#;

const FRAGMENT_SHADER: &str = r#"
in vec4 v_color;
uniform sampler2D u_atlas;
uniform vec4 u_weights[2];
void main() {}
"#;

fn linked(context: &TraceContext) -> u32 {
    let program = context.create_program().unwrap();
    for (stage, source) in [
        (ShaderStage::Vertex, VERTEX_SHADER),
        (ShaderStage::Fragment, FRAGMENT_SHADER),
    ] {
        let shader = context.create_shader(stage).unwrap();
        context.shader_source(&shader, source);
        context.compile_shader(&shader);
        context.attach_shader(&program, &shader);
    }
    context.link_program(&program);
    program
}

#[test]
fn test_handles_are_unique() {
    let context = TraceContext::new();
    let buffer = context.create_buffer().unwrap();
    let texture = context.create_texture().unwrap();
    let program = context.create_program().unwrap();
    assert_eq!((buffer, texture, program), (1, 2, 3));
    assert_eq!(context.live_resources(), 3);
}

#[test]
fn test_compile_status() {
    let context = TraceContext::new();
    let good = context.create_shader(ShaderStage::Vertex).unwrap();
    let empty = context.create_shader(ShaderStage::Vertex).unwrap();
    let failing = context.create_shader(ShaderStage::Fragment).unwrap();

    context.shader_source(&good, "void main() {}");
    context.shader_source(&empty, "  \n");
    context.shader_source(&failing, "void main() {}\n  #error no glyphs\n");
    for shader in [good, empty, failing] {
        context.compile_shader(&shader);
    }

    assert!(context.shader_compile_status(&good));
    assert!(!context.shader_compile_status(&empty));
    assert!(!context.shader_compile_status(&failing));
    assert_eq!(
        context.shader_info_log(&failing),
        "ERROR: 0:2: '#error' : no glyphs"
    );
}

#[test]
fn test_link_requires_both_stages() {
    let context = TraceContext::new();
    let program = context.create_program().unwrap();
    let shader = context.create_shader(ShaderStage::Vertex).unwrap();
    context.shader_source(&shader, "void main() {}");
    context.compile_shader(&shader);
    context.attach_shader(&program, &shader);
    context.link_program(&program);

    assert!(!context.program_link_status(&program));
    assert_eq!(
        context.program_info_log(&program),
        "ERROR: missing fragment shader"
    );
}

#[test]
fn test_introspection_reports_arrays_once() {
    let context = TraceContext::new();
    let program = linked(&context);

    assert!(context.program_link_status(&program));
    assert_eq!(context.active_attribute_count(&program), 2);
    assert_eq!(
        context.active_attribute(&program, 1),
        Some(ActiveVariable {
            name: "a_color".to_string(),
            size: 1,
        })
    );
    assert_eq!(context.active_uniform_count(&program), 2);
    assert_eq!(
        context.active_uniform(&program, 0),
        Some(ActiveVariable {
            name: "u_weights[0]".to_string(),
            size: 2,
        })
    );
    assert_eq!(context.active_uniform(&program, 2), None);
}

#[test]
fn test_array_locations() {
    let context = TraceContext::new();
    let program = linked(&context);

    assert_eq!(context.uniform_location(&program, "u_weights"), Some(0));
    assert_eq!(context.uniform_location(&program, "u_weights[0]"), Some(0));
    assert_eq!(context.uniform_location(&program, "u_weights[1]"), Some(1));
    assert_eq!(context.uniform_location(&program, "u_atlas"), Some(2));
    assert_eq!(context.uniform_location(&program, "u_hidden"), None);
    assert_eq!(context.attrib_location(&program, "a_commented_out"), None);
    assert_eq!(context.attrib_location(&program, "v_color"), None);
}

#[test]
fn test_validation() {
    let context = TraceContext::new();
    let program = linked(&context);

    context.validate_program(&program);
    assert!(context.program_validate_status(&program));

    context.set_validation_failure(Some("texture unit clash"));
    context.validate_program(&program);
    assert!(!context.program_validate_status(&program));
    assert_eq!(context.program_info_log(&program), "texture unit clash");
}

#[test]
fn test_unpack_alignment_state() {
    let context = TraceContext::new();
    assert_eq!(context.unpack_alignment(), 4);
    context.pixel_store_unpack_alignment(1);
    assert_eq!(context.unpack_alignment(), 1);
}

#[test]
fn test_command_display() {
    let commands = [
        GlCommand::BindBuffer {
            target: BufferTarget::Array,
            buffer: Some(3),
        },
        GlCommand::BindTexture {
            target: TextureTarget::Texture2D,
            texture: None,
        },
        GlCommand::UniformFloat {
            location: 2,
            components: 2,
            values: vec![0.5, 1.0],
        },
        GlCommand::DrawElements {
            mode: DrawMode::Triangles,
            count: 10,
            index_type: DataType::UnsignedShort,
            offset: 0,
        },
    ];
    let lines: Vec<String> = commands.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "glBindBuffer(ARRAY_BUFFER, 3)",
            "glBindTexture(TEXTURE_2D, null)",
            "glUniform2fv(2, [0.5, 1])",
            "glDrawElements(TRIANGLES, 10, UNSIGNED_SHORT, 0)",
        ]
    );
}

#[test]
fn test_take_commands_clears_log() {
    let context = TraceContext::new();
    context.use_program(None);
    assert_eq!(context.take_commands(), vec![GlCommand::UseProgram(None)]);
    assert!(context.commands().is_empty());
}
