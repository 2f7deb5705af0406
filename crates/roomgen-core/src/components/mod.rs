//! Scene description types.
//!
//! Plain data handed to the rendering collaborator. Geometry is in grid units:
//! `x` is the grid row, `y` the grid column and `z` the height above the floor.

mod common;
mod entities;
mod scene;

pub use common::*;
pub use entities::*;
pub use scene::*;
