//! Camera, markers and the per-frame machinery of a mounted globe.

pub mod animation;
pub mod camera;
pub mod interaction;
pub mod marker;
pub mod projector;
pub mod state;

pub use animation::*;
pub use camera::*;
pub use interaction::*;
pub use marker::*;
pub use projector::*;
pub use state::*;
