use std::io::BufRead;
use std::path::Path;

use math::vec::{Vec2, Vec3};
use scene::{RawMesh, VertexRef};

use crate::AssetError;

// Keep the per-attribute index triples from the file; the packer does its
// own expansion.
fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Loads the first object of a Wavefront OBJ file, preserving the separate
/// position/normal/uv index triples. Meshes without normals or texture
/// coordinates cannot be normal mapped and are refused.
pub fn load_obj(path: &Path) -> Result<RawMesh, AssetError> {
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    raw_mesh_from_models(models)
}

/// Same as [`load_obj`], reading OBJ text from memory. Material libraries
/// are ignored.
pub fn load_obj_from_reader<R: BufRead>(reader: &mut R)
    -> Result<RawMesh, AssetError> {

    let (models, _materials) = tobj::load_obj_buf(reader, &load_options(),
        |_| Err(tobj::LoadError::GenericFailure))?;
    raw_mesh_from_models(models)
}

fn raw_mesh_from_models(models: Vec<tobj::Model>)
    -> Result<RawMesh, AssetError> {

    let model = models.into_iter().next()
        .ok_or(AssetError::NoGeometry("file contains no objects"))?;
    let m = model.mesh;

    if m.positions.is_empty() || m.indices.is_empty() {
        return Err(AssetError::NoGeometry("object has no faces"));
    }
    if m.normals.is_empty() || m.normal_indices.len() != m.indices.len() {
        return Err(AssetError::NoGeometry("object has no vertex normals"));
    }
    if m.texcoords.is_empty() || m.texcoord_indices.len() != m.indices.len() {
        return Err(AssetError::NoGeometry(
            "object has no texture coordinates"));
    }

    let positions = m.positions.chunks_exact(3)
        .map(|p| Vec3::new(p[0], p[1], p[2]))
        .collect();
    let normals = m.normals.chunks_exact(3)
        .map(|n| Vec3::new(n[0], n[1], n[2]))
        .collect();
    let texcoords = m.texcoords.chunks_exact(2)
        .map(|t| Vec2::new(t[0], t[1]))
        .collect();

    let faces = m.indices.iter()
        .zip(&m.normal_indices)
        .zip(&m.texcoord_indices)
        .map(|((&position, &normal), &uv)| VertexRef { position, normal, uv })
        .collect();

    let mesh = RawMesh { positions, normals, texcoords, faces };
    mesh.validate()?;

    Ok(mesh)
}
