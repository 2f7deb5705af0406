//! Roomgen Core - procedural indoor room layouts
//!
//! Synthesizes single-room scenes on a boolean occupancy grid and describes
//! them as plain data for a renderer: floor, ceiling and wall surfaces,
//! furniture, lights and camera viewpoints.
//!
//! # Pipeline
//!
//! - **Layout**: fuse random rectangular patches into one connected floor plan
//! - **Boundary**: squeeze the plan and trace its perimeter into ordered walls
//! - **Placement**: greedy padded placement of objects, then lights, then viewpoints
//!
//! # Example
//!
//! ```rust
//! use roomgen_core::prelude::*;
//!
//! let mut generator = SceneGenerator::new(SceneConfig::default(), 42).unwrap();
//! let samples = generator.generate().unwrap();
//!
//! let scene = &samples.scenes[0];
//! assert!(scene.walls.len() >= 4);
//! println!("{}", scene.render_plan(true));
//! ```

pub mod components;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod generation;
pub mod grid;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::SceneConfig;
    pub use crate::engine::SceneGenerator;
    pub use crate::error::LayoutError;
    pub use crate::grid::Grid;
}
