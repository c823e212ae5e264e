//! Scene exports and the viewer state built from them.

mod export;
/// Camera, controls and animator for one export.
pub mod viewer;

pub use export::{
    unpack_rgb, DirectionalLight, HemisphereLight, InitialCamera, KeyframeRecord,
    Lighting, Point3, PoseRecord, QuatRecord, SceneExport, Settings,
};
pub use viewer::{PlayOutcome, SceneRenderer, ViewerScene, ViewerSceneBuilder};
