//! The interactive globe: configuration, theming, overlay output and the
//! [`Globe`] facade hosts drive.

pub mod config;
pub mod error;
pub mod globe;
pub mod markers;
pub mod overlay;
pub mod theme;

pub use config::*;
pub use error::*;
pub use globe::*;
pub use markers::*;
pub use overlay::*;
pub use theme::*;
