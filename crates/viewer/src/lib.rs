//! Geographic overlays for a sphere-projected panorama viewer.
//!
//! Points are taken from longitude/latitude/elevation into the viewer's local
//! ENU frame, then onto the viewing sphere as yaw/pitch/distance. Paths are
//! widened into ribbons before projection. Drawing is left to the renderer.

pub mod frame;
pub mod options;
pub mod orientation;
pub mod overlay;
pub mod picking;
pub mod reference;
pub mod spherical;

pub use frame::*;
pub use options::*;
pub use orientation::*;
pub use overlay::*;
pub use picking::*;
pub use reference::*;
pub use spherical::*;
