use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use scene::{Deserialize, Format, Image, Scene, SceneFormatError, Serialize};

pub mod obj;

pub use obj::{load_obj, load_obj_from_reader};

/// Everything that can go wrong between a file on disk and a usable scene.
/// All of these are fatal to the load; there is no partial scene.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse mesh: {0}")]
    MeshParse(#[from] tobj::LoadError),

    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("unusable mesh: {0}")]
    NoGeometry(&'static str),

    #[error(transparent)]
    Mesh(#[from] scene::MeshError),

    #[error(transparent)]
    SceneFormat(#[from] SceneFormatError),

    #[error("cubemap faces must be square and equally sized")]
    MismatchedCubemap,

    #[error("failed to compress scene data: {0}")]
    Compress(std::io::Error),

    #[error("failed to decompress scene data: {0}")]
    Decompress(std::io::Error),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> AssetError + '_ {
    move |source| AssetError::Io { path: path.to_path_buf(), source }
}

/// Decodes an image file to tightly packed RGBA8.
pub fn load_image(path: &Path, format: Format) -> Result<Image, AssetError> {
    let reader = image::io::Reader::open(path).map_err(io_err(path))?;
    let img = reader.decode()?.into_rgba8();

    Ok(Image {
        width: img.width(),
        height: img.height(),
        format,
        data: img.into_raw(),
    })
}

/// Loads six cubemap faces, given in +X -X +Y -Y +Z -Z order. All faces
/// must be square and share one size.
pub fn load_cubemap(paths: &[PathBuf; 6], format: Format)
    -> Result<Vec<Image>, AssetError> {

    let mut faces = Vec::with_capacity(6);
    for path in paths {
        faces.push(load_image(path, format)?);
    }

    let side = faces[0].width;
    for face in &faces {
        if face.width != side || face.height != side {
            return Err(AssetError::MismatchedCubemap);
        }
    }

    Ok(faces)
}

/// Writes a serialized scene, lz4 block compressed, with a little-endian
/// u32 compressed-size prefix.
pub fn write_scene_file(scene: &Scene, path: &Path)
    -> Result<(), AssetError> {

    let raw = scene.serialize();
    let compressed = lz4::block::compress(&raw, None, true)
        .map_err(AssetError::Compress)?;

    let mut file = File::create(path).map_err(io_err(path))?;
    file.write_all(&(compressed.len() as u32).to_le_bytes())
        .map_err(io_err(path))?;
    file.write_all(&compressed).map_err(io_err(path))?;

    Ok(())
}

/// Reads a scene written by [`write_scene_file`].
pub fn load_scene_file(path: &Path) -> Result<Scene, AssetError> {
    let mut data = Vec::new();
    File::open(path)
        .and_then(|mut f| f.read_to_end(&mut data))
        .map_err(io_err(path))?;

    if data.len() < 4 {
        return Err(SceneFormatError::Truncated {
            needed: 4,
            available: data.len(),
        }.into());
    }
    let c_size = u32::from_le_bytes([data[0], data[1], data[2], data[3]])
        as usize;
    if data.len() < 4 + c_size {
        return Err(SceneFormatError::Truncated {
            needed: 4 + c_size,
            available: data.len(),
        }.into());
    }

    let raw = lz4::block::decompress(&data[4..4 + c_size], None)
        .map_err(AssetError::Decompress)?;

    let mut view = &raw[..];
    let scene = Scene::deserialize(&mut view)?;
    if !view.is_empty() {
        return Err(SceneFormatError::Corrupt(
            "trailing bytes after scene data").into());
    }

    Ok(scene)
}
