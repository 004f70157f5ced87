use math::vec::{Vec2, Vec3};

use crate::error::MeshError;

/// One corner of a triangle: separate indices into the position, normal and
/// texture coordinate arrays, as stored in the source mesh file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexRef {
    pub position: u32,
    pub normal: u32,
    pub uv: u32,
}

/// Mesh attributes exactly as loaded, before tangent generation and vertex
/// expansion. `faces` holds three entries per triangle in stored order.
#[derive(Debug, Clone)]
pub struct RawMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub faces: Vec<VertexRef>,
}

impl RawMesh {
    pub fn triangle_count(&self) -> usize {
        self.faces.len() / 3
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.positions.is_empty() || self.faces.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        if self.faces.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle(self.faces.len()));
        }
        for v in &self.faces {
            check_index("position", v.position, self.positions.len())?;
            check_index("normal", v.normal, self.normals.len())?;
            check_index("uv", v.uv, self.texcoords.len())?;
        }
        Ok(())
    }
}

fn check_index(kind: &'static str, index: u32, len: usize)
    -> Result<(), MeshError> {

    if (index as usize) < len {
        Ok(())
    } else {
        Err(MeshError::IndexOutOfRange { kind, index, len })
    }
}

/// Per-triangle tangent-space basis. Deliberately flat: every corner of a
/// triangle shares the triangle's frame, and the vectors are neither
/// normalized nor orthogonalized against the vertex normal.
#[derive(Debug, Copy, Clone)]
pub struct TangentFrame {
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

/// Tangent frames for a whole mesh, one per triangle, plus the number of
/// triangles whose UV mapping was degenerate and got the fallback frame.
#[derive(Debug)]
pub struct TangentFrames {
    pub frames: Vec<TangentFrame>,
    pub degenerate: usize,
}

/// Derives one tangent/bitangent pair per triangle from its UV deltas:
///
/// ```text
/// r         = 1 / (duv1.x * duv2.y - duv1.y * duv2.x)
/// tangent   = r * (dp1 * duv2.y - dp2 * duv1.y)
/// bitangent = r * (dp2 * duv1.x - dp1 * duv2.x)
/// ```
///
/// A zero UV determinant (collinear or duplicate UVs) would divide by zero;
/// such triangles get an arbitrary unit tangent orthogonal to the face
/// normal instead, and are counted in `TangentFrames::degenerate` so callers
/// can report them. NaN/Inf never reaches the output.
pub fn build_tangent_frames(mesh: &RawMesh)
    -> Result<TangentFrames, MeshError> {

    mesh.validate()?;

    let mut frames = Vec::with_capacity(mesh.triangle_count());
    let mut degenerate = 0;

    for tri in mesh.faces.chunks_exact(3) {
        let p0 = mesh.positions[tri[0].position as usize];
        let p1 = mesh.positions[tri[1].position as usize];
        let p2 = mesh.positions[tri[2].position as usize];

        let uv0 = mesh.texcoords[tri[0].uv as usize];
        let uv1 = mesh.texcoords[tri[1].uv as usize];
        let uv2 = mesh.texcoords[tri[2].uv as usize];

        let dp1 = p1 - p0;
        let dp2 = p2 - p0;
        let duv1 = uv1 - uv0;
        let duv2 = uv2 - uv0;

        let det = duv1.x * duv2.y - duv1.y * duv2.x;
        if det == 0.0 || !det.is_finite() {
            frames.push(fallback_frame(dp1, dp2));
            degenerate += 1;
            continue;
        }

        let r = 1.0 / det;
        let tangent = (dp1 * duv2.y - dp2 * duv1.y) * r;
        let bitangent = (dp2 * duv1.x - dp1 * duv2.x) * r;

        // A tiny determinant can still overflow to infinity.
        if !tangent.is_finite() || !bitangent.is_finite() {
            frames.push(fallback_frame(dp1, dp2));
            degenerate += 1;
            continue;
        }

        frames.push(TangentFrame { tangent, bitangent });
    }

    Ok(TangentFrames { frames, degenerate })
}

// Arbitrary orthonormal frame around the face normal, for triangles whose
// UV mapping carries no usable direction.
fn fallback_frame(dp1: Vec3, dp2: Vec3) -> TangentFrame {
    let n = dp1.cross(dp2);
    let n = if n.length2() > 1e-12 {
        n.normalized()
    } else {
        Vec3::new(0.0, 0.0, 1.0)
    };

    let up = if n.z.abs() < 0.999 {
        Vec3::new(0.0, 0.0, 1.0)
    } else {
        Vec3::new(1.0, 0.0, 0.0)
    };

    let tangent = n.cross(up).normalized();
    let bitangent = n.cross(tangent);

    TangentFrame { tangent, bitangent }
}

/// The vertex record uploaded to the GPU: 14 floats, fixed attribute order.
#[derive(Debug, Default, Copy, Clone,
         bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct PackedVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

pub const VERTEX_FLOATS: usize = 14;

/// Expands a mesh into a non-indexed vertex stream: faces in stored order,
/// three vertices per triangle, each carrying its triangle's tangent frame.
/// Every index is validated here, before the data can reach a GPU upload.
pub fn pack_vertices(mesh: &RawMesh, frames: &[TangentFrame])
    -> Result<Vec<PackedVertex>, MeshError> {

    mesh.validate()?;
    if frames.len() != mesh.triangle_count() {
        return Err(MeshError::FrameCountMismatch {
            frames: frames.len(),
            triangles: mesh.triangle_count(),
        });
    }

    let mut vertices = Vec::with_capacity(mesh.faces.len());

    for (t, tri) in mesh.faces.chunks_exact(3).enumerate() {
        let frame = frames[t];
        for v in tri {
            vertices.push(PackedVertex {
                position: mesh.positions[v.position as usize],
                normal: mesh.normals[v.normal as usize],
                uv: mesh.texcoords[v.uv as usize],
                tangent: frame.tangent,
                bitangent: frame.bitangent,
            });
        }
    }

    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two triangles forming a unit square on the XZ plane, UVs forming a
    // unit square split along the same diagonal, U aligned with world X.
    fn square_on_xz() -> RawMesh {
        RawMesh {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, -1.0),
                Vec3::new(0.0, 0.0, -1.0),
            ],
            normals: vec![Vec3::new(0.0, 1.0, 0.0)],
            texcoords: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            faces: vec![
                VertexRef { position: 0, normal: 0, uv: 0 },
                VertexRef { position: 1, normal: 0, uv: 1 },
                VertexRef { position: 2, normal: 0, uv: 2 },
                VertexRef { position: 0, normal: 0, uv: 0 },
                VertexRef { position: 2, normal: 0, uv: 2 },
                VertexRef { position: 3, normal: 0, uv: 3 },
            ],
        }
    }

    #[test]
    fn square_tangents_follow_the_u_axis() {
        let mesh = square_on_xz();
        let tf = build_tangent_frames(&mesh).unwrap();

        assert_eq!(tf.frames.len(), 2);
        assert_eq!(tf.degenerate, 0);

        for frame in &tf.frames {
            let t = frame.tangent;
            assert!((t.x - 1.0).abs() < 1e-4, "tangent {t}");
            assert!(t.y.abs() < 1e-4, "tangent {t}");
            assert!(t.z.abs() < 1e-4, "tangent {t}");
        }
    }

    #[test]
    fn tangent_and_bitangent_span_a_plane() {
        let mesh = square_on_xz();
        let tf = build_tangent_frames(&mesh).unwrap();

        for frame in &tf.frames {
            assert!(frame.tangent.length2() > 1e-6);
            assert!(frame.bitangent.length2() > 1e-6);
            // Not parallel: the cross product has real magnitude.
            let c = frame.tangent.cross(frame.bitangent);
            assert!(c.length() > 1e-4);
        }
    }

    #[test]
    fn degenerate_uvs_fall_back_without_nans() {
        let mut mesh = square_on_xz();
        // Collapse all UVs of the first triangle onto one point.
        mesh.faces[1].uv = 0;
        mesh.faces[2].uv = 0;

        let tf = build_tangent_frames(&mesh).unwrap();
        assert_eq!(tf.degenerate, 1);

        for frame in &tf.frames {
            assert!(frame.tangent.is_finite());
            assert!(frame.bitangent.is_finite());
            assert!(frame.tangent.length2() > 1e-6);
        }

        // The fallback is orthogonal to the face normal (+Y here).
        let n = Vec3::new(0.0, 1.0, 0.0);
        assert!(tf.frames[0].tangent.dot(n).abs() < 1e-5);
    }

    #[test]
    fn packing_expands_three_vertices_per_face_in_order() {
        let mesh = square_on_xz();
        let tf = build_tangent_frames(&mesh).unwrap();
        let vertices = pack_vertices(&mesh, &tf.frames).unwrap();

        assert_eq!(vertices.len(), 3 * mesh.triangle_count());

        for (i, v) in vertices.iter().enumerate() {
            let r = mesh.faces[i];
            assert_eq!(v.position, mesh.positions[r.position as usize]);
            assert_eq!(v.normal, mesh.normals[r.normal as usize]);
            assert_eq!(v.uv, mesh.texcoords[r.uv as usize]);
        }

        // Triangle 1's corners all carry triangle 1's frame.
        assert_eq!(vertices[3].tangent, tf.frames[1].tangent);
        assert_eq!(vertices[5].bitangent, tf.frames[1].bitangent);
    }

    #[test]
    fn packed_vertex_is_14_floats() {
        assert_eq!(core::mem::size_of::<PackedVertex>(),
                   VERTEX_FLOATS * core::mem::size_of::<f32>());
    }

    #[test]
    fn out_of_range_index_aborts_the_pack() {
        let mut mesh = square_on_xz();
        mesh.faces[4].position = 99;

        let tf = build_tangent_frames(&square_on_xz()).unwrap();
        let err = pack_vertices(&mesh, &tf.frames).unwrap_err();
        assert!(matches!(err,
            MeshError::IndexOutOfRange { kind: "position", index: 99, .. }));
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let mesh = RawMesh {
            positions: Vec::new(),
            normals: Vec::new(),
            texcoords: Vec::new(),
            faces: Vec::new(),
        };
        assert!(matches!(build_tangent_frames(&mesh),
                         Err(MeshError::EmptyMesh)));

        // The packer refuses it too: an empty frame slice trivially matches
        // zero triangles, so the empty-mesh check must not depend on the
        // builder having run first.
        assert!(matches!(pack_vertices(&mesh, &[]),
                         Err(MeshError::EmptyMesh)));
    }

    #[test]
    fn frame_count_mismatch_is_rejected() {
        let mesh = square_on_xz();
        let err = pack_vertices(&mesh, &[]).unwrap_err();
        assert!(matches!(err, MeshError::FrameCountMismatch { .. }));
    }
}
