pub mod frame;
pub mod render;

pub use frame::{FrameSnapshot, FrameState, InputEvent};
pub use render::{frame_constants, skybox_view, Light, Projection,
                 SceneConstants};
