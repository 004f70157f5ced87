use math::mat::Mat4;

use bytemuck::{cast_slice, pod_read_unaligned, Pod};

pub mod error;
pub mod mesh;
pub mod camera;
pub mod transform;

pub use error::*;
pub use mesh::*;
pub use camera::*;
pub use transform::*;

/// A processed scene ready for upload: expanded vertex streams, decoded
/// images and an optional skybox.
#[derive(Debug)]
pub struct Scene {
    pub meshes: Vec<PackedMesh>,
    pub images: Vec<Image>,
    pub skybox: Option<Skybox>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            meshes: Vec::new(),
            images: Vec::new(),
            skybox: None,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// One drawable object: a non-indexed vertex stream with its model
/// transform and material bindings.
#[derive(Debug)]
pub struct PackedMesh {
    pub vertices: Vec<PackedVertex>,
    pub transform: Mat4,
    pub material: Material,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Format {
    Rgba8,
    Srgba8,
}

impl From<Format> for u32 {
    fn from(f: Format) -> u32 {
        match f {
            Format::Rgba8 => 0,
            Format::Srgba8 => 1,
        }
    }
}

impl TryFrom<u32> for Format {
    type Error = SceneFormatError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Format::Rgba8),
            1 => Ok(Format::Srgba8),
            _ => Err(SceneFormatError::Corrupt("unknown image format")),
        }
    }
}

/// Decoded image data, tightly packed rows, 4 bytes per pixel.
#[derive(Debug)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub format: Format,
    pub data: Vec<u8>,
}

/// Texture bindings for a mesh; indices into `Scene::images`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    pub albedo_texture: Option<u32>,
    pub normal_texture: Option<u32>,
}

/// Cubemap face image indices in +X -X +Y -Y +Z -Z order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skybox {
    pub faces: [u32; 6],
}

pub trait Serialize {
    fn serialize_buf(&self, buf: &mut Vec<u8>);

    fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_buf(&mut buf);
        buf
    }
}

pub trait Deserialize: Sized {
    fn deserialize(buf: &mut &[u8]) -> Result<Self, SceneFormatError>;
}

fn write_pod<T: Pod>(buf: &mut Vec<u8>, v: &T) {
    buf.extend_from_slice(bytemuck::bytes_of(v));
}

fn read_pod<T: Pod>(buf: &mut &[u8]) -> Result<T, SceneFormatError> {
    let n = core::mem::size_of::<T>();
    if buf.len() < n {
        return Err(SceneFormatError::Truncated {
            needed: n,
            available: buf.len(),
        });
    }
    let v = pod_read_unaligned(&buf[..n]);
    *buf = &buf[n..];
    Ok(v)
}

impl<T: Pod> Serialize for Vec<T> {
    fn serialize_buf(&self, buf: &mut Vec<u8>) {
        let size = (self.len() * core::mem::size_of::<T>()) as u64;
        write_pod(buf, &size);
        buf.extend_from_slice(cast_slice(self));
    }
}

impl<T: Pod> Deserialize for Vec<T> {
    fn deserialize(buf: &mut &[u8]) -> Result<Self, SceneFormatError> {
        let size = read_pod::<u64>(buf)? as usize;
        if buf.len() < size {
            return Err(SceneFormatError::Truncated {
                needed: size,
                available: buf.len(),
            });
        }
        if size % core::mem::size_of::<T>() != 0 {
            return Err(SceneFormatError::Corrupt(
                "array byte length is not a multiple of the element size"));
        }
        let v = bytemuck::pod_collect_to_vec(&buf[..size]);
        *buf = &buf[size..];
        Ok(v)
    }
}

impl Serialize for Format {
    fn serialize_buf(&self, buf: &mut Vec<u8>) {
        write_pod(buf, &u32::from(*self));
    }
}

impl Deserialize for Format {
    fn deserialize(buf: &mut &[u8]) -> Result<Self, SceneFormatError> {
        read_pod::<u32>(buf)?.try_into()
    }
}

impl Serialize for Material {
    fn serialize_buf(&self, buf: &mut Vec<u8>) {
        serialize_texture_slot(buf, self.albedo_texture);
        serialize_texture_slot(buf, self.normal_texture);
    }
}

impl Deserialize for Material {
    fn deserialize(buf: &mut &[u8]) -> Result<Self, SceneFormatError> {
        Ok(Material {
            albedo_texture: deserialize_texture_slot(buf)?,
            normal_texture: deserialize_texture_slot(buf)?,
        })
    }
}

fn serialize_texture_slot(buf: &mut Vec<u8>, slot: Option<u32>) {
    match slot {
        None => write_pod(buf, &0u32),
        Some(index) => {
            write_pod(buf, &1u32);
            write_pod(buf, &index);
        }
    }
}

fn deserialize_texture_slot(buf: &mut &[u8])
    -> Result<Option<u32>, SceneFormatError> {

    match read_pod::<u32>(buf)? {
        0 => Ok(None),
        1 => Ok(Some(read_pod::<u32>(buf)?)),
        _ => Err(SceneFormatError::Corrupt("unknown texture slot tag")),
    }
}

impl Serialize for PackedMesh {
    fn serialize_buf(&self, buf: &mut Vec<u8>) {
        self.vertices.serialize_buf(buf);
        write_pod(buf, &self.transform);
        self.material.serialize_buf(buf);
    }
}

impl Deserialize for PackedMesh {
    fn deserialize(buf: &mut &[u8]) -> Result<Self, SceneFormatError> {
        Ok(PackedMesh {
            vertices: Vec::<PackedVertex>::deserialize(buf)?,
            transform: read_pod::<Mat4>(buf)?,
            material: Material::deserialize(buf)?,
        })
    }
}

impl Serialize for Image {
    fn serialize_buf(&self, buf: &mut Vec<u8>) {
        write_pod(buf, &self.width);
        write_pod(buf, &self.height);
        self.format.serialize_buf(buf);
        self.data.serialize_buf(buf);
    }
}

impl Deserialize for Image {
    fn deserialize(buf: &mut &[u8]) -> Result<Self, SceneFormatError> {
        Ok(Image {
            width: read_pod(buf)?,
            height: read_pod(buf)?,
            format: Format::deserialize(buf)?,
            data: Vec::<u8>::deserialize(buf)?,
        })
    }
}

impl Serialize for Scene {
    fn serialize_buf(&self, buf: &mut Vec<u8>) {
        write_pod(buf, &(self.meshes.len() as u64));
        for m in &self.meshes {
            m.serialize_buf(buf);
        }

        write_pod(buf, &(self.images.len() as u64));
        for img in &self.images {
            img.serialize_buf(buf);
        }

        match &self.skybox {
            None => write_pod(buf, &0u32),
            Some(skybox) => {
                write_pod(buf, &1u32);
                write_pod(buf, &skybox.faces);
            }
        }
    }
}

impl Deserialize for Scene {
    fn deserialize(buf: &mut &[u8]) -> Result<Self, SceneFormatError> {
        let mesh_count = read_pod::<u64>(buf)? as usize;
        let mut meshes = Vec::with_capacity(mesh_count.min(1024));
        for _ in 0..mesh_count {
            meshes.push(PackedMesh::deserialize(buf)?);
        }

        let image_count = read_pod::<u64>(buf)? as usize;
        let mut images = Vec::with_capacity(image_count.min(1024));
        for _ in 0..image_count {
            images.push(Image::deserialize(buf)?);
        }

        let skybox = match read_pod::<u32>(buf)? {
            0 => None,
            1 => Some(Skybox { faces: read_pod(buf)? }),
            _ => return Err(SceneFormatError::Corrupt("unknown skybox tag")),
        };

        let scene = Scene { meshes, images, skybox };
        for m in &scene.meshes {
            m.material.validate(scene.images.len())?;
        }
        if let Some(skybox) = &scene.skybox {
            for &face in &skybox.faces {
                if face as usize >= scene.images.len() {
                    return Err(SceneFormatError::Corrupt(
                        "skybox face index out of range"));
                }
            }
        }

        Ok(scene)
    }
}

impl Material {
    pub fn none() -> Material {
        Material { albedo_texture: None, normal_texture: None }
    }

    fn validate(&self, image_count: usize) -> Result<(), SceneFormatError> {
        for slot in [self.albedo_texture, self.normal_texture] {
            if let Some(index) = slot {
                if index as usize >= image_count {
                    return Err(SceneFormatError::Corrupt(
                        "material texture index out of range"));
                }
            }
        }
        Ok(())
    }
}
