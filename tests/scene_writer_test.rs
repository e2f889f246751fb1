use std::io::Cursor;

use cgmath::Vector3;
use conrad_scene::{
    Error, LightEntity, LightKind, MaterialEntity, MeshEntity, RecordTag, Scene, SceneObject,
    SceneWriter, export_to_path, write_scene,
};

mod common;
use common::test_utils::read_records;

fn red() -> MaterialEntity {
    MaterialEntity::new("Red")
        .with_diffuse([1.0, 0.0, 0.0])
        .with_texture("tex/red.png")
}

fn tri(name: &str, material: &str) -> MeshEntity {
    MeshEntity::new(
        name,
        material,
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
        vec![[0.0, 0.0, 1.0]; 3],
    )
    .unwrap()
}

fn export_to_bytes(scene: &Scene) -> (conrad_scene::Result<u64>, Vec<u8>) {
    let mut writer = SceneWriter::new(Cursor::new(Vec::new()));
    let result = writer.write_scene(scene);
    (result, writer.get_ref().get_ref().clone())
}

#[test]
fn should_write_material_then_mesh() {
    let mut scene = Scene::new();
    // objects are registered first on purpose, materials must still lead
    scene.add_object(tri("Tri", "Red"));
    scene.add_material(red());

    let (result, bytes) = export_to_bytes(&scene);
    let total = result.unwrap();

    let records = read_records(&bytes);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].tag, RecordTag::Material.code());
    assert_eq!(records[1].tag, RecordTag::Mesh.code());
    assert_eq!(records[0].reader().text(), "Red");

    let body_sum: u64 = records.iter().map(|r| r.size as u64).sum();
    assert_eq!(total, body_sum + 2 * 5);
    assert_eq!(total, bytes.len() as u64);
}

#[test]
fn should_succeed_on_empty_scene() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.scene");

    let total = export_to_path(&Scene::new(), &path).unwrap();
    assert_eq!(total, 0);
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn should_export_to_file() {
    let mut scene = Scene::new();
    scene.add_material(red());
    scene.add_object(tri("Tri", "Red"));

    let file = tempfile::NamedTempFile::new().unwrap();
    let total = export_to_path(&scene, file.path()).unwrap();

    let bytes = std::fs::read(file.path()).unwrap();
    assert_eq!(total, bytes.len() as u64);
    let tags: Vec<u8> = read_records(&bytes).iter().map(|r| r.tag).collect();
    assert_eq!(tags, vec![RecordTag::Material.code(), RecordTag::Mesh.code()]);
}

#[test]
fn should_abort_on_material_without_texture() {
    let mut scene = Scene::new();
    scene.add_material(red());
    scene.add_material(MaterialEntity::new("Bare"));
    scene.add_material(MaterialEntity::new("Blue").with_texture("tex/blue.png"));
    scene.add_object(tri("Tri", "Red"));

    let (result, bytes) = export_to_bytes(&scene);
    assert!(matches!(result, Err(Error::MissingTexture { ref material }) if material == "Bare"));

    let records = read_records(&bytes);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].reader().text(), "Red");
}

#[test]
fn should_abort_on_first_failing_object() {
    let mut scene = Scene::new();
    scene.add_material(red());
    scene.add_object(tri("First", "Red"));
    scene.add_object(tri("bad\0name", "Red"));
    scene.add_object(tri("Never", "Red"));

    let (result, bytes) = export_to_bytes(&scene);
    assert!(matches!(result, Err(Error::Encoding { .. })));

    // the failing record is left partial, nothing follows it
    let tail = b"Never";
    assert!(!bytes.windows(tail.len()).any(|w| w == tail));
}

#[test]
fn should_keep_source_order_for_meshes_and_lights() {
    let mut scene = Scene::new();
    scene.add_material(red());
    scene.add_object(LightEntity::new(
        "Sun",
        LightKind::Sun,
        Vector3::new(0.0, 0.0, 10.0),
    ));
    scene.add_object(tri("A", "Red"));
    scene.add_object(SceneObject::Camera {
        name: "Cam".to_string(),
    });
    scene.add_object(LightEntity::new(
        "Bulb",
        LightKind::Point,
        Vector3::new(1.0, 1.0, 1.0),
    ));
    scene.add_object(tri("B", "Red"));

    let (result, bytes) = export_to_bytes(&scene);
    result.unwrap();

    let tags: Vec<u8> = read_records(&bytes).iter().map(|r| r.tag).collect();
    assert_eq!(
        tags,
        vec![
            RecordTag::Material.code(),
            RecordTag::Light.code(),
            RecordTag::Mesh.code(),
            RecordTag::Light.code(),
            RecordTag::Mesh.code(),
        ]
    );
}

#[test]
fn should_skip_orphans() {
    let mut scene = Scene::new();
    scene.add_material(red());
    scene.add_material_with_users(MaterialEntity::new("Untextured orphan"), 0);
    scene.add_object_with_users(tri("Deleted", "Red"), 0);
    scene.add_object(tri("Kept", "Red"));

    let (result, bytes) = export_to_bytes(&scene);
    result.unwrap();

    let records = read_records(&bytes);
    assert_eq!(records.len(), 2);
    let mut mesh = records[1].reader();
    mesh.byte();
    assert_eq!(mesh.text(), "Kept");
}

#[test]
fn should_reject_materials_after_objects() {
    let mut writer = SceneWriter::new(Cursor::new(Vec::new()));
    writer.write_material(&red()).unwrap();
    writer
        .write_object(&SceneObject::Mesh(tri("Tri", "Red")))
        .unwrap();

    let err = writer
        .write_material(&MaterialEntity::new("Late").with_texture("late.png"))
        .unwrap_err();
    assert!(matches!(err, Error::OutOfOrder { ref material } if material == "Late"));
}

#[test]
fn should_accept_materials_after_cameras() {
    let mut writer = SceneWriter::new(Cursor::new(Vec::new()));
    writer
        .write_object(&SceneObject::Camera {
            name: "Cam".to_string(),
        })
        .unwrap();
    writer.write_material(&red()).unwrap();
    writer
        .write_object(&SceneObject::Mesh(tri("Tri", "Red")))
        .unwrap();

    let bytes = writer.finish().unwrap().into_inner();
    let tags: Vec<u8> = read_records(&bytes).iter().map(|r| r.tag).collect();
    assert_eq!(tags, vec![RecordTag::Material.code(), RecordTag::Mesh.code()]);
}

#[test]
fn should_accumulate_bytes_across_calls() {
    let mut writer = SceneWriter::new(Cursor::new(Vec::new()));
    let a = writer.write_material(&red()).unwrap();
    let b = writer
        .write_object(&SceneObject::Mesh(tri("Tri", "Red")))
        .unwrap();
    let camera = writer
        .write_object(&SceneObject::Camera {
            name: "Cam".to_string(),
        })
        .unwrap();
    assert_eq!(camera, 0);
    assert_eq!(writer.bytes_written(), a + b);

    let bytes = writer.finish().unwrap().into_inner();
    assert_eq!(bytes.len() as u64, a + b);
}

#[test]
fn should_export_unresolved_material_references() {
    let mut scene = Scene::new();
    scene.add_object(tri("Lonely", "Missing"));

    let mut sink = Cursor::new(Vec::new());
    let total = write_scene(&scene, &mut sink).unwrap();

    let records = read_records(sink.get_ref());
    assert_eq!(records.len(), 1);
    assert_eq!(total, records[0].framed_size());
}
