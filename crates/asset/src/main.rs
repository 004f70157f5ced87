use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use scene::{
    build_tangent_frames, pack_vertices, Format, Material, PackedMesh,
    Scene, Skybox,
};

/// Offline scene builder: OBJ mesh + textures in, compressed scene file out.
#[derive(Parser, Debug)]
#[command(name = "scene_builder")]
struct Args {
    /// Wavefront OBJ mesh for the foreground object.
    mesh: PathBuf,

    /// Output scene file.
    output: PathBuf,

    /// Albedo texture (decoded as sRGB).
    #[arg(long)]
    albedo: Option<PathBuf>,

    /// Tangent-space normal map (decoded as linear).
    #[arg(long)]
    normal: Option<PathBuf>,

    /// Directory containing skybox faces px/nx/py/ny/pz/nz.png.
    #[arg(long)]
    skybox: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let raw = asset::load_obj(&args.mesh)
        .with_context(|| format!("loading {}", args.mesh.display()))?;
    log::info!(
        "loaded {}: {} positions, {} triangles",
        args.mesh.display(),
        raw.positions.len(),
        raw.triangle_count(),
    );

    let tangents = build_tangent_frames(&raw)?;
    if tangents.degenerate > 0 {
        log::warn!(
            "{} of {} triangles had degenerate UVs; fallback tangents used",
            tangents.degenerate,
            raw.triangle_count(),
        );
    }

    let vertices = pack_vertices(&raw, &tangents.frames)?;
    log::info!("packed {} vertices", vertices.len());

    let mut scene = Scene::new();
    let mut material = Material::none();

    if let Some(path) = &args.albedo {
        material.albedo_texture = Some(scene.images.len() as u32);
        scene.images.push(asset::load_image(path, Format::Srgba8)?);
    }
    if let Some(path) = &args.normal {
        material.normal_texture = Some(scene.images.len() as u32);
        scene.images.push(asset::load_image(path, Format::Rgba8)?);
    }

    if let Some(dir) = &args.skybox {
        let paths = ["px", "nx", "py", "ny", "pz", "nz"]
            .map(|face| dir.join(format!("{face}.png")));
        let first = scene.images.len() as u32;

        let faces = asset::load_cubemap(&paths, Format::Srgba8)?;
        scene.images.extend(faces);
        scene.skybox = Some(Skybox {
            faces: [first, first + 1, first + 2,
                    first + 3, first + 4, first + 5],
        });
    }

    scene.meshes.push(PackedMesh {
        vertices,
        transform: math::mat::Mat4::identity(),
        material,
    });

    asset::write_scene_file(&scene, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!(
        "wrote {} ({} meshes, {} images)",
        args.output.display(),
        scene.meshes.len(),
        scene.images.len(),
    );

    Ok(())
}
