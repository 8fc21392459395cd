pub mod centerline;
pub mod ribbon;
pub mod split;

pub use centerline::*;
pub use ribbon::*;
pub use split::*;
