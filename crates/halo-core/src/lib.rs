pub mod angle;
pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod lifecycle;
pub mod loader;
pub mod pipeline;
pub mod ring;
pub mod scene;
pub mod stage;
pub mod subdivision;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static RGB_SHIFT_WGSL: &str = include_str!("../shaders/rgb_shift.wgsl");

pub use angle::*;
pub use camera::{Camera, Orbit, Viewport};
pub use color::{clear_color_from_css, parse_css_color};
pub use config::{AppConfig, MeshFormat, MeshSource};
pub use constants::*;
pub use error::{HaloError, Result};
pub use geometry::{build_icosahedron, HighlightFeature, Mesh, MeshVertex};
pub use highlight::{HighlightController, HighlightOutcome, HighlightPhase, RgbShiftParams};
pub use lifecycle::{LoopState, ViewLifecycle};
pub use pipeline::{frame_plan, FramePlan, OffscreenSize, PassContent, PassDesc, PassTarget};
pub use ring::{RingCircle, RingLayout};
pub use scene::{Lights, NodeKind, Scene, SceneNode, Transform};
pub use stage::{BallInstance, LeafInstance, MeshBatch, Stage};
pub use subdivision::{Rebuild, SubdivisionController, SubdivisionLevel, SubdivisionPhase};
