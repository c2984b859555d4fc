use pretty_assertions::assert_eq;
use std::rc::Rc;

use super::super::*;
use crate::renderer::{context::trace_context::*, program::ProgramError};

const GLYPH_SCENE: &str = r#"
[program]
vertex = """
attribute vec2 a_position;
attribute float a_size;
uniform float u_scale;
void main() {
    gl_Position = vec4(a_position * u_scale, 0.0, 1.0);
    gl_PointSize = a_size;
}
"""
fragment = """
precision mediump float;
uniform sampler2D u_atlas;
uniform vec4 u_colors[2];
void main() {
    gl_FragColor = u_colors[0] * texture2D(u_atlas, gl_PointCoord).a;
}
"""

[[buffers]]
name = "positions"
data = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0]

[[buffers]]
name = "indices"
kind = "index"
element = "u16"
data = [0.0, 1.0, 2.0, 2.0, 1.0, 0.0, 0.0, 1.0, 2.0, 2.0]

[[textures]]
name = "atlas"
width = 3
height = 2
format = "luminance"
data = [0.0, 64.0, 128.0, 192.0, 255.0, 32.0]
filter = ["nearest", "nearest"]

[[uniforms]]
name = "u_scale"
type = "float"
values = [2.0]

[[uniforms]]
name = "u_colors"
type = "vec4"
values = [1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]

[[samplers]]
name = "u_atlas"
texture = "atlas"

[[attributes]]
name = "a_position"
type = "vec2"
buffer = "positions"

[[attributes]]
name = "a_size"
type = "float"
value = [4.0]

[draw]
mode = "triangles"
indices = "indices"
"#;

fn glyph_scene() -> Scene {
    Scene::from_toml_str(GLYPH_SCENE).unwrap()
}

#[test]
fn test_new_creates_resources() {
    let context = Rc::new(TraceContext::new());
    let player = ScenePlayer::new(&context, &glyph_scene()).unwrap();

    assert!(player.program().is_linked());
    // Program, two buffers and one texture.
    assert_eq!(context.live_resources(), 4);
}

#[test]
fn test_play_frame_sets_every_variable() {
    let context = Rc::new(TraceContext::new());
    let mut player = ScenePlayer::new(&context, &glyph_scene()).unwrap();

    player.play_frame(&glyph_scene()).unwrap();

    assert!(player.program().unset_variables().is_empty());
    assert!(player.program().known_invalid_names().is_empty());
    assert!(player.program().is_validated());
    assert_eq!(player.program().texture_unit("u_atlas"), Some(0));
}

#[test]
fn test_indexed_draw_covers_index_buffer() {
    let context = Rc::new(TraceContext::new());
    let scene = glyph_scene();
    let mut player = ScenePlayer::new(&context, &scene).unwrap();

    player.play_frame(&scene).unwrap();

    assert_eq!(
        context.count_commands(|c| {
            *c == GlCommand::DrawElements {
                mode: DrawMode::Triangles,
                count: 10,
                index_type: DataType::UnsignedShort,
                offset: 0,
            }
        }),
        1
    );
}

#[test]
fn test_frames_allocate_once() {
    let context = Rc::new(TraceContext::new());
    let scene = glyph_scene();
    let mut player = ScenePlayer::new(&context, &scene).unwrap();

    for _ in 0..3 {
        player.play_frame(&scene).unwrap();
    }

    assert_eq!(
        context.count_commands(|c| matches!(c, GlCommand::BufferData { .. })),
        2
    );
    assert_eq!(
        context.count_commands(|c| matches!(c, GlCommand::TexImage2D { .. })),
        1
    );
    assert_eq!(
        context.count_commands(|c| matches!(c, GlCommand::BufferSubData { .. })),
        6
    );
    assert_eq!(
        context.count_commands(|c| matches!(c, GlCommand::ValidateProgram(_))),
        1
    );
    assert_eq!(
        context.count_commands(|c| matches!(c, GlCommand::DrawElements { .. })),
        3
    );
}

#[test]
fn test_odd_width_texture_upload() {
    let context = Rc::new(TraceContext::new());
    let scene = glyph_scene();
    let mut player = ScenePlayer::new(&context, &scene).unwrap();

    player.play_frame(&scene).unwrap();

    let alignments: Vec<GlCommand> = context
        .commands()
        .into_iter()
        .filter(|c| matches!(c, GlCommand::PixelStoreUnpackAlignment(_)))
        .collect();
    assert_eq!(
        alignments,
        vec![
            GlCommand::PixelStoreUnpackAlignment(1),
            GlCommand::PixelStoreUnpackAlignment(4),
        ]
    );
    assert_eq!(context.unpack_alignment(), 4);
}

#[test]
fn test_arrays_draw() {
    let context = Rc::new(TraceContext::new());
    let mut scene = glyph_scene();
    scene.draw = Some(DrawSpec {
        mode: DrawMode::Points,
        indices: None,
        first: 0,
        count: 3,
    });
    let mut player = ScenePlayer::new(&context, &scene).unwrap();

    player.play_frame(&scene).unwrap();

    assert_eq!(
        context.count_commands(|c| {
            *c == GlCommand::DrawArrays {
                mode: DrawMode::Points,
                first: 0,
                count: 3,
            }
        }),
        1
    );
}

#[test]
fn test_scene_without_draw_only_binds() {
    let context = Rc::new(TraceContext::new());
    let mut scene = glyph_scene();
    scene.draw = None;
    let mut player = ScenePlayer::new(&context, &scene).unwrap();

    player.play_frame(&scene).unwrap();

    assert!(!player.program().is_validated());
    assert_eq!(
        context.count_commands(|c| matches!(
            c,
            GlCommand::DrawArrays { .. } | GlCommand::DrawElements { .. }
        )),
        0
    );
}

#[test]
fn test_unknown_sampler_texture() {
    let context = Rc::new(TraceContext::new());
    let mut scene = glyph_scene();
    scene.samplers[0].texture = "missing".to_string();
    let mut player = ScenePlayer::new(&context, &scene).unwrap();

    let result = player.play_frame(&scene);

    assert!(matches!(result, Err(SceneError::UnknownTexture(name)) if name == "missing"));
}

#[test]
fn test_attribute_buffer_must_hold_vertices() {
    let context = Rc::new(TraceContext::new());
    let mut scene = glyph_scene();
    scene.attributes[0].buffer = Some("indices".to_string());
    let mut player = ScenePlayer::new(&context, &scene).unwrap();

    let result = player.play_frame(&scene);

    assert!(matches!(result, Err(SceneError::UnknownBuffer(name)) if name == "indices"));
}

#[test]
fn test_attribute_without_source() {
    let context = Rc::new(TraceContext::new());
    let mut scene = glyph_scene();
    scene.attributes[1].value = None;
    let mut player = ScenePlayer::new(&context, &scene).unwrap();

    let result = player.play_frame(&scene);

    assert!(matches!(result, Err(SceneError::MissingAttributeSource(name)) if name == "a_size"));
}

#[test]
fn test_out_of_range_data() {
    let context = Rc::new(TraceContext::new());
    let mut scene = glyph_scene();
    scene.textures[0].data[0] = 300.0;
    let mut player = ScenePlayer::new(&context, &scene).unwrap();

    let result = player.play_frame(&scene);

    assert!(matches!(
        result,
        Err(SceneError::InvalidData {
            kind: ElementKind::U8,
            ..
        })
    ));
}

#[test]
fn test_compile_error_surfaces() {
    let context = Rc::new(TraceContext::new());
    let mut scene = glyph_scene();
    scene.program.fragment = "#error no atlas".to_string();

    let result = ScenePlayer::new(&context, &scene);

    assert!(matches!(
        result,
        Err(SceneError::Program(ProgramError::Compile {
            stage: ShaderStage::Fragment,
            ..
        }))
    ));
}

#[test]
fn test_drop_releases_everything() {
    let context = Rc::new(TraceContext::new());
    {
        let scene = glyph_scene();
        let mut player = ScenePlayer::new(&context, &scene).unwrap();
        player.play_frame(&scene).unwrap();
    }
    assert_eq!(context.live_resources(), 0);
}

#[test]
fn test_replay_releases_resources() {
    let context = Rc::new(TraceContext::new());

    replay(&context, &glyph_scene(), 2).unwrap();

    assert_eq!(context.live_resources(), 0);
    assert_eq!(
        context.count_commands(|c| matches!(c, GlCommand::DrawElements { .. })),
        2
    );
}

#[test]
fn test_replay_zero_frames_only_links() {
    let context = Rc::new(TraceContext::new());

    replay(&context, &glyph_scene(), 0).unwrap();

    assert_eq!(
        context.count_commands(|c| matches!(c, GlCommand::LinkProgram(_))),
        1
    );
    assert_eq!(
        context.count_commands(|c| matches!(c, GlCommand::BufferData { .. })),
        0
    );
}
