use std::path::Path;

use anyhow::{Context, bail};
use cgmath::{InnerSpace, Matrix, Matrix3, Matrix4, SquareMatrix, Vector3, Vector4};
use gltf::{buffer, khr_lights_punctual::Kind};

use crate::{
    data_structures::{
        light::LightEntity,
        model::{MaterialEntity, MeshEntity},
        scene::{Scene, SceneObject},
    },
    format::LightKind,
    resources::ExportOptions,
};

/// Loads a `.gltf` or `.glb` file.
///
/// The node tree of the default scene is flattened: every triangle primitive
/// becomes one mesh in world space, every `KHR_lights_punctual` light one light
/// and every camera a camera object. Images are never decoded, materials keep
/// the URI of their base color texture.
pub fn load_scene_gltf(path: &Path, options: &ExportOptions) -> anyhow::Result<Scene> {
    let gltf::Gltf { document, blob } =
        gltf::Gltf::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let buffers = gltf::import_buffers(&document, path.parent(), blob)
        .with_context(|| format!("failed to load buffers of {}", path.display()))?;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .with_context(|| format!("{} contains no scene", path.display()))?;

    let mut walker = NodeWalker {
        buffers: &buffers,
        options,
        users: vec![0; document.materials().count()],
        objects: Vec::new(),
    };
    for node in scene.nodes() {
        walker.visit(&node, &Matrix4::identity())?;
    }

    let mut out = Scene::new();
    for (material, users) in document.materials().zip(walker.users) {
        out.add_material_with_users(to_material_entity(&material), users);
    }
    for object in walker.objects {
        out.add_object(object);
    }
    Ok(out)
}

struct NodeWalker<'a> {
    buffers: &'a [buffer::Data],
    options: &'a ExportOptions,
    users: Vec<u32>,
    objects: Vec<SceneObject>,
}

impl NodeWalker<'_> {
    fn visit(&mut self, node: &gltf::Node, parent: &Matrix4<f32>) -> anyhow::Result<()> {
        let world = *parent * Matrix4::from(node.transform().matrix());

        if let Some(mesh) = node.mesh() {
            self.add_mesh(node, &mesh, &world)?;
        }
        if let Some(light) = node.light() {
            self.objects.push(to_light_entity(node, &light, &world).into());
        }
        if node.camera().is_some() {
            self.objects.push(SceneObject::Camera {
                name: node_name(node, "camera"),
            });
        }

        for child in node.children() {
            self.visit(&child, &world)?;
        }
        Ok(())
    }

    fn add_mesh(
        &mut self,
        node: &gltf::Node,
        mesh: &gltf::Mesh,
        world: &Matrix4<f32>,
    ) -> anyhow::Result<()> {
        // Nodes are the objects of a glTF scene, one mesh may be instanced by
        // several of them.
        let base_name = match (node.name(), mesh.name()) {
            (Some(name), _) | (None, Some(name)) => name.to_string(),
            (None, None) => node_name(node, "mesh"),
        };
        let split = mesh.primitives().count() > 1;
        let buffers = self.buffers;
        let normal_matrix = normal_matrix(world);

        for primitive in mesh.primitives() {
            let name = if split {
                format!("{base_name}.{}", primitive.index())
            } else {
                base_name.clone()
            };
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                bail!(
                    "mesh '{name}' uses {:?} primitives, only triangles are supported",
                    primitive.mode()
                );
            }
            let material = primitive.material();
            let Some(material_index) = material.index() else {
                bail!("mesh '{name}' has no material assigned");
            };

            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .with_context(|| format!("mesh '{name}' has no positions"))?
                .collect();
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .with_context(|| format!("mesh '{name}' has no normals"))?
                .collect();
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .with_context(|| format!("mesh '{name}' has no UV coordinates"))?
                .into_f32()
                .collect();
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            let mut soup_positions = Vec::with_capacity(indices.len());
            let mut soup_uvs = Vec::with_capacity(indices.len());
            let mut soup_normals = Vec::with_capacity(indices.len());
            for index in indices {
                let i = index as usize;
                let (Some(position), Some(normal), Some(uv)) =
                    (positions.get(i), normals.get(i), uvs.get(i))
                else {
                    bail!("mesh '{name}' has a dangling index {i}");
                };
                let p = *world * Vector4::new(position[0], position[1], position[2], 1.0);
                soup_positions.push([p.x, p.y, p.z]);
                let n = normal_matrix * Vector3::from(*normal);
                soup_normals.push(if n.magnitude2() > 0.0 {
                    n.normalize().into()
                } else {
                    [0.0, 0.0, 0.0]
                });
                soup_uvs.push(*uv);
            }

            self.users[material_index] += 1;
            let entity = MeshEntity::new(
                name,
                material_name(&material),
                soup_positions,
                soup_uvs,
                soup_normals,
            )?
            .with_kind(self.options.mesh_kind);
            self.objects.push(entity.into());
        }
        Ok(())
    }
}

fn to_material_entity(material: &gltf::Material) -> MaterialEntity {
    let name = material_name(material);
    let pbr = material.pbr_metallic_roughness();
    let [r, g, b, _] = pbr.base_color_factor();

    let texture = match pbr.base_color_texture() {
        Some(info) => match info.texture().source().source() {
            gltf::image::Source::Uri { uri, .. } if !uri.starts_with("data:") => {
                Some(texture_path(uri, &name))
            }
            _ => {
                log::warn!("Material '{name}' uses an embedded image, only file textures are exported");
                None
            }
        },
        None => {
            log::warn!("Material '{name}' references no texture");
            None
        }
    };

    let (specular_intensity, specular) = material
        .specular()
        .map_or((1.0, [1.0, 1.0, 1.0]), |specular| {
            (specular.specular_factor(), specular.specular_color_factor())
        });

    MaterialEntity {
        name,
        ambient: [1.0, 1.0, 1.0],
        diffuse: [r, g, b],
        specular_intensity,
        specular,
        emissive: material.emissive_factor(),
        roughness: pbr.roughness_factor(),
        texture,
    }
}

fn to_light_entity(
    node: &gltf::Node,
    light: &gltf::khr_lights_punctual::Light,
    world: &Matrix4<f32>,
) -> LightEntity {
    let kind = match light.kind() {
        Kind::Directional => LightKind::Sun,
        Kind::Point => LightKind::Point,
        Kind::Spot { .. } => LightKind::Spot,
    };
    let name = match (node.name(), light.name()) {
        (Some(name), _) | (None, Some(name)) => name.to_string(),
        (None, None) => node_name(node, "light"),
    };

    // Punctual lights shine down their local -Z axis.
    let direction = (*world * Vector4::new(0.0, 0.0, -1.0, 0.0)).truncate();
    let direction = if direction.magnitude2() > 0.0 {
        direction.normalize()
    } else {
        Vector3::new(0.0, 0.0, -1.0)
    };

    let mut entity = LightEntity::new(name, kind, world.w.truncate());
    entity.color = light.color();
    entity.direction = direction;
    entity.intensity = light.intensity();
    entity
}

fn material_name(material: &gltf::Material) -> String {
    match (material.name(), material.index()) {
        (Some(name), _) => name.to_string(),
        (None, Some(index)) => format!("material.{index}"),
        (None, None) => "material.default".to_string(),
    }
}

// Image URIs are percent-encoded, the engine expects a plain file path.
fn texture_path(uri: &str, material: &str) -> String {
    match urlencoding::decode(uri) {
        Ok(path) => path.into_owned(),
        Err(e) => {
            log::warn!("Material '{material}' has a malformed texture URI {uri:?}: {e}");
            uri.to_string()
        }
    }
}

fn node_name(node: &gltf::Node, fallback: &str) -> String {
    node.name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{fallback}.{}", node.index()))
}

/// Inverse transpose of the upper 3x3 block, falling back to the block itself
/// for singular transforms.
fn normal_matrix(world: &Matrix4<f32>) -> Matrix3<f32> {
    let linear = Matrix3::from_cols(world.x.truncate(), world.y.truncate(), world.z.truncate());
    linear
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or(linear)
}
