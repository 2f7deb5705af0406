//! Generation - floor plans, surfaces and the placement passes that fill a room.

mod boundary;
mod layout;
mod lighting;
mod objects;
mod placement;
mod textures;
mod viewpoints;

pub use boundary::*;
pub use layout::*;
pub use lighting::*;
pub use objects::*;
pub use placement::*;
pub use textures::*;
pub use viewpoints::*;
