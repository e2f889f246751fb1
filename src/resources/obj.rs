use std::path::Path;

use anyhow::{Context, bail};
use cgmath::{InnerSpace, Vector3};

use crate::{
    data_structures::{
        model::{MaterialEntity, MeshEntity},
        scene::Scene,
    },
    resources::ExportOptions,
};

/// Loads an OBJ file and its MTL libraries.
///
/// Every OBJ object becomes one mesh. Faces are triangulated by the loader and
/// the indexed vertices are expanded into a flat triangle soup. OBJ carries no
/// lights, so the resulting scene only holds materials and meshes.
pub fn load_scene_obj(path: &Path, options: &ExportOptions) -> anyhow::Result<Scene> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .with_context(|| format!("failed to load {}", path.display()))?;
    let materials =
        materials.with_context(|| format!("failed to load materials of {}", path.display()))?;

    let mut users = vec![0u32; materials.len()];
    let mut meshes = Vec::with_capacity(models.len());
    for model in &models {
        let material_id = model
            .mesh
            .material_id
            .with_context(|| format!("mesh '{}' has no material assigned", model.name))?;
        let material = materials.get(material_id).with_context(|| {
            format!(
                "mesh '{}' references unknown material #{material_id}",
                model.name
            )
        })?;
        users[material_id] += 1;
        let mesh = to_mesh_entity(model, &material.name)?.with_kind(options.mesh_kind);
        meshes.push(mesh);
    }

    let mut scene = Scene::new();
    for (material, users) in materials.iter().zip(users) {
        scene.add_material_with_users(to_material_entity(material), users);
    }
    for mesh in meshes {
        scene.add_object(mesh);
    }
    Ok(scene)
}

fn to_mesh_entity(model: &tobj::Model, material: &str) -> anyhow::Result<MeshEntity> {
    let mesh = &model.mesh;
    if mesh.texcoords.is_empty() {
        bail!("mesh '{}' has no UV coordinates", model.name);
    }
    let has_normals = !mesh.normals.is_empty();

    let mut positions = Vec::with_capacity(mesh.indices.len());
    let mut uvs = Vec::with_capacity(mesh.indices.len());
    let mut normals = Vec::with_capacity(mesh.indices.len());
    for &index in &mesh.indices {
        let i = index as usize;
        let out_of_range = || format!("mesh '{}' has a dangling index {i}", model.name);
        positions.push(vec3(&mesh.positions, i).with_context(out_of_range)?);
        uvs.push(vec2(&mesh.texcoords, i).with_context(out_of_range)?);
        if has_normals {
            normals.push(vec3(&mesh.normals, i).with_context(out_of_range)?);
        }
    }
    if !has_normals {
        log::debug!("Mesh '{}' has no normals, using face normals", model.name);
        normals = face_normals(&positions);
    }

    Ok(MeshEntity::new(
        model.name.clone(),
        material,
        positions,
        uvs,
        normals,
    )?)
}

fn to_material_entity(material: &tobj::Material) -> MaterialEntity {
    let texture = material.diffuse_texture.clone();
    if texture.is_none() {
        log::warn!("Material '{}' references no texture", material.name);
    }
    MaterialEntity {
        name: material.name.clone(),
        ambient: material.ambient.unwrap_or([1.0, 1.0, 1.0]),
        diffuse: material.diffuse.unwrap_or([0.8, 0.8, 0.8]),
        specular_intensity: if material.specular.is_some() { 1.0 } else { 0.5 },
        specular: material.specular.unwrap_or([1.0, 1.0, 1.0]),
        emissive: emissive(material.unknown_param.get("Ke"), &material.name),
        roughness: material.shininess.map_or(0.5, roughness_from_shininess),
        texture,
    }
}

/// Inverse of the encoder's `2^(8 * roughness)` exponent mapping.
pub fn roughness_from_shininess(shininess: f32) -> f32 {
    if shininess <= 1.0 {
        return 0.0;
    }
    (shininess.log2() / 8.0).clamp(0.0, 1.0)
}

// `Ke` is not a field of tobj's material, it lands in the unknown parameters.
fn emissive(value: Option<&String>, material: &str) -> [f32; 3] {
    let Some(value) = value else {
        return [0.0, 0.0, 0.0];
    };
    let parsed: Result<Vec<f32>, _> = value.split_whitespace().map(str::parse).collect();
    match parsed.as_deref() {
        Ok([r, g, b]) => [*r, *g, *b],
        _ => {
            log::warn!("Material '{material}' has an unreadable Ke value {value:?}");
            [0.0, 0.0, 0.0]
        }
    }
}

fn face_normals(positions: &[[f32; 3]]) -> Vec<[f32; 3]> {
    positions
        .chunks(3)
        .flat_map(|triangle| {
            let p0 = Vector3::from(triangle[0]);
            let p1 = Vector3::from(triangle[1]);
            let p2 = Vector3::from(triangle[2]);
            let normal = (p1 - p0).cross(p2 - p0);
            let normal: [f32; 3] = if normal.magnitude2() > 0.0 {
                normal.normalize().into()
            } else {
                [0.0, 0.0, 0.0]
            };
            [normal; 3]
        })
        .collect()
}

fn vec3(data: &[f32], i: usize) -> Option<[f32; 3]> {
    data.get(i * 3..i * 3 + 3).map(|v| [v[0], v[1], v[2]])
}

fn vec2(data: &[f32], i: usize) -> Option<[f32; 2]> {
    data.get(i * 2..i * 2 + 2).map(|v| [v[0], v[1]])
}
