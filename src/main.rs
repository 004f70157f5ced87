use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use prism::{frame_constants, skybox_view, FrameState, InputEvent, Light,
            Projection};

/// Headless frame-loop driver: loads a scene, replays scripted input
/// events, and assembles the per-frame constants a GPU backend would
/// consume.
#[derive(Parser, Debug)]
#[command(name = "prism")]
struct Args {
    /// Scene file produced by scene_builder, or a Wavefront OBJ.
    input: PathBuf,

    /// Number of frames to run.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Comma-separated input events, one per frame, repeated until the
    /// frame count runs out. Example: `right,right,rotate-left,zoom-in`.
    #[arg(long)]
    script: Option<String>,
}

fn parse_event(name: &str) -> anyhow::Result<InputEvent> {
    use InputEvent::*;

    Ok(match name {
        "left" => Left,
        "right" => Right,
        "up" => Up,
        "down" => Down,
        "rotate-left" => RotateLeft,
        "rotate-right" => RotateRight,
        "rotate-up" => RotateUp,
        "rotate-down" => RotateDown,
        "scale-up" => ScaleUp,
        "scale-down" => ScaleDown,
        "zoom-in" => ZoomIn,
        "zoom-out" => ZoomOut,
        other => bail!("unknown input event {other:?}"),
    })
}

fn load_scene(path: &PathBuf) -> anyhow::Result<scene::Scene> {
    let is_obj = path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("obj"));

    if is_obj {
        let raw = asset::load_obj(path)?;
        let tangents = scene::build_tangent_frames(&raw)?;
        if tangents.degenerate > 0 {
            log::warn!("{} degenerate-UV triangles, fallback tangents used",
                       tangents.degenerate);
        }
        let vertices = scene::pack_vertices(&raw, &tangents.frames)?;

        let mut s = scene::Scene::new();
        s.meshes.push(scene::PackedMesh {
            vertices,
            transform: math::mat::Mat4::identity(),
            material: scene::Material::none(),
        });
        Ok(s)
    } else {
        Ok(asset::load_scene_file(path)?)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let script: Vec<InputEvent> = match &args.script {
        Some(text) => text.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_event)
            .collect::<anyhow::Result<_>>()?,
        None => Vec::new(),
    };

    let loaded = load_scene(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let vertex_count: usize =
        loaded.meshes.iter().map(|m| m.vertices.len()).sum();
    log::info!(
        "loaded {}: {} meshes, {} vertices, {} images, skybox: {}",
        args.input.display(),
        loaded.meshes.len(),
        vertex_count,
        loaded.images.len(),
        loaded.skybox.is_some(),
    );

    let projection = Projection::default();
    let light = Light::default();
    let mut state = FrameState::new();

    for frame in 0..args.frames {
        if !script.is_empty() {
            state.apply(script[frame as usize % script.len()]);
        }

        let snapshot = state.snapshot();
        let constants = frame_constants(&snapshot, &projection, light)?;
        let sky = skybox_view(&constants.view);

        log::debug!(
            "frame {frame}: eye {}, translation {}, angle {}°, scale {}",
            snapshot.eye,
            snapshot.transform.translation,
            snapshot.transform.angle_degrees,
            snapshot.transform.scale,
        );
        log::trace!("frame {frame}: skybox view row 3 w = {}", sky.e[3][3]);
    }

    let end = state.snapshot();
    log::info!(
        "ran {} frames; final eye {}, translation {}, angle {}°",
        args.frames,
        end.eye,
        end.transform.translation,
        end.transform.angle_degrees,
    );

    Ok(())
}
