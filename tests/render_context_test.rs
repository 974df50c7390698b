use cabin_scene::{
    data_structures::{mesh::MeshKind, transform::model_matrix},
    render::RenderContext,
    resources::{material::MaterialRegistry, texture::TextureRegistry},
    shader,
};
use cgmath::{Vector2, Vector3, Vector4};

use crate::common::test_utils::{Call, FakeTextures, RecordingTarget, write_image};

mod common;

fn registry_with(tags: &[&str]) -> TextureRegistry<FakeTextures> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_image(dir.path(), "rgb.png", 3, 1, 1);
    let mut registry = TextureRegistry::new(FakeTextures::new());
    for tag in tags {
        registry.load(&path, *tag).unwrap();
    }
    registry
}

fn plastic() -> MaterialRegistry {
    let mut materials = MaterialRegistry::new();
    materials.define(
        "plastic",
        Vector3::new(0.15, 0.15, 0.15),
        Vector3::new(0.3, 0.3, 0.3),
        16.0,
    );
    materials
}

#[test]
fn should_write_model_matrix() {
    let textures = registry_with(&[]);
    let materials = MaterialRegistry::new();
    let mut target = RecordingTarget::new();
    let scale = Vector3::new(2.8, 0.12, 0.6);
    let position = Vector3::new(0.0, 0.8, -1.5);

    RenderContext::new(Some(&mut target), &textures, &materials)
        .set_transform(scale, 20.0, 0.0, 0.0, position);

    assert_eq!(
        target.calls,
        vec![Call::Mat4(
            shader::MODEL.to_string(),
            model_matrix(scale, 20.0, 0.0, 0.0, position)
        )]
    );
}

#[test]
fn should_disable_texturing_before_flat_colour() {
    let textures = registry_with(&[]);
    let materials = MaterialRegistry::new();
    let mut target = RecordingTarget::new();

    RenderContext::new(Some(&mut target), &textures, &materials).set_flat_color(0.1, 0.2, 0.3, 1.0);

    assert_eq!(
        target.calls,
        vec![
            Call::Bool("bUseTexture".to_string(), false),
            Call::Vec4("objectColor".to_string(), Vector4::new(0.1, 0.2, 0.3, 1.0)),
        ]
    );
}

#[test]
fn should_select_texture_unit_of_tag() {
    let textures = registry_with(&["dash", "screen", "wheel"]);
    let materials = MaterialRegistry::new();
    let mut target = RecordingTarget::new();

    RenderContext::new(Some(&mut target), &textures, &materials).set_texture("screen");

    assert_eq!(
        target.calls,
        vec![
            Call::Bool("bUseTexture".to_string(), true),
            Call::Sampler("objectTexture".to_string(), 1),
        ]
    );
}

#[test]
fn should_select_sentinel_unit_for_unknown_texture() {
    let textures = registry_with(&["dash"]);
    let materials = MaterialRegistry::new();
    let mut target = RecordingTarget::new();

    RenderContext::new(Some(&mut target), &textures, &materials).set_texture("missing");

    assert_eq!(
        target.calls,
        vec![
            Call::Bool("bUseTexture".to_string(), true),
            Call::Sampler("objectTexture".to_string(), shader::NO_TEXTURE_SLOT),
        ]
    );
}

#[test]
fn should_write_uv_scale() {
    let textures = registry_with(&[]);
    let materials = MaterialRegistry::new();
    let mut target = RecordingTarget::new();

    RenderContext::new(Some(&mut target), &textures, &materials).set_uv_scale(3.0, 1.0);

    assert_eq!(
        target.calls,
        vec![Call::Vec2("UVscale".to_string(), Vector2::new(3.0, 1.0))]
    );
}

#[test]
fn should_write_all_material_fields() {
    let textures = registry_with(&[]);
    let materials = plastic();
    let mut target = RecordingTarget::new();

    RenderContext::new(Some(&mut target), &textures, &materials).set_material("plastic");

    assert_eq!(
        target.calls,
        vec![
            Call::Vec3(
                "material.diffuseColor".to_string(),
                Vector3::new(0.15, 0.15, 0.15)
            ),
            Call::Vec3(
                "material.specularColor".to_string(),
                Vector3::new(0.3, 0.3, 0.3)
            ),
            Call::Float("material.shininess".to_string(), 16.0),
        ]
    );
}

#[test]
fn should_skip_unknown_material() {
    let textures = registry_with(&[]);
    let materials = plastic();
    let mut target = RecordingTarget::new();

    RenderContext::new(Some(&mut target), &textures, &materials).set_material("metal");

    assert!(target.calls.is_empty());
}

#[test]
fn should_skip_material_when_none_defined() {
    let textures = registry_with(&[]);
    let materials = MaterialRegistry::new();
    let mut target = RecordingTarget::new();

    RenderContext::new(Some(&mut target), &textures, &materials).set_material("plastic");

    assert!(target.calls.is_empty());
}

#[test]
fn should_draw_with_current_state() {
    let textures = registry_with(&["wheel"]);
    let materials = plastic();
    let mut target = RecordingTarget::new();

    {
        let mut ctx = RenderContext::new(Some(&mut target), &textures, &materials);
        ctx.set_material("plastic");
        ctx.set_texture("wheel");
        ctx.draw(MeshKind::Torus);
        ctx.draw(MeshKind::Cylinder);
    }

    assert_eq!(target.draws(), vec![MeshKind::Torus, MeshKind::Cylinder]);
    assert_eq!(
        target.last("objectTexture"),
        Some(&Call::Sampler("objectTexture".to_string(), 0))
    );
    // the second draw reuses everything written for the first
    let segments = target.draw_segments();
    assert_eq!(segments[1], &[Call::Draw(MeshKind::Cylinder)]);
}

#[test]
fn should_ignore_every_call_without_target() {
    let textures = registry_with(&["dash"]);
    let materials = plastic();
    let mut ctx = RenderContext::<RecordingTarget, FakeTextures>::new(None, &textures, &materials);

    ctx.set_transform(Vector3::new(1.0, 1.0, 1.0), 0.0, 0.0, 0.0, Vector3::new(0.0, 0.0, 0.0));
    ctx.set_flat_color(1.0, 1.0, 1.0, 1.0);
    ctx.set_texture("dash");
    ctx.set_uv_scale(2.0, 2.0);
    ctx.set_material("plastic");
    ctx.draw(MeshKind::Box);
}
