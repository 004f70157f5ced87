use thiserror::Error;

/// Errors raised while validating or expanding mesh geometry. Out-of-range
/// indices are treated as data corruption and abort the operation; they are
/// never deferred to upload time.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("mesh has no geometry")]
    EmptyMesh,

    #[error("face list length {0} is not a multiple of 3")]
    PartialTriangle(usize),

    #[error("{kind} index {index} out of range (array length {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: u32,
        len: usize,
    },

    #[error("{frames} tangent frames for {triangles} triangles")]
    FrameCountMismatch { frames: usize, triangles: usize },
}

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("view direction is parallel to the world up axis")]
    DegenerateCamera,
}

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("rotation axis is the zero vector")]
    InvalidAxis,
}

/// Errors raised while decoding a serialized scene.
#[derive(Error, Debug)]
pub enum SceneFormatError {
    #[error("scene data truncated: needed {needed} bytes, {available} left")]
    Truncated { needed: usize, available: usize },

    #[error("scene data corrupt: {0}")]
    Corrupt(&'static str),
}
