pub mod angle;
pub mod geodesy;
pub mod local;
pub mod precision;
pub mod vec;

pub use angle::*;
pub use geodesy::*;
pub use local::*;
pub use precision::*;
pub use vec::*;
