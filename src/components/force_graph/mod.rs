mod avatars;
mod component;
mod render;
pub mod scale;
mod state;
mod types;

pub use avatars::preload as preload_avatars;
pub use component::ForceGraphCanvas;
pub use types::GraphData;
