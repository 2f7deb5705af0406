//! Placed entities: furniture objects, lights and camera viewpoints.

use serde::{Deserialize, Serialize};

use super::common::{Orientation, Point};
use crate::grid::{Cell, Rect};

/// Furniture object standing on the floor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Object {
    /// Category id, resolved by the renderer
    pub category: u32,
    /// Footprint centre; always at floor level
    pub position: Point,
    /// One of the horizontal orientations
    pub rotation: Orientation,
    /// Unrotated footprint (width, depth), both even
    pub size: (usize, usize),
}

impl Object {
    pub fn new(category: u32, cell: Cell, rotation: Orientation, size: (usize, usize)) -> Self {
        debug_assert!(rotation.is_horizontal());
        debug_assert!(size.0 % 2 == 0 && size.1 % 2 == 0);
        Self {
            category,
            position: Point::at_cell(cell, 0.0),
            rotation,
            size,
        }
    }

    /// Footprint size after rotation. `Front`/`Back` swap width and depth.
    pub fn rotated_size(&self) -> (usize, usize) {
        rotated_size(self.size, self.rotation)
    }

    /// Grid cells covered by the object.
    pub fn footprint(&self) -> Rect {
        let (sx, sy) = self.rotated_size();
        Rect::centred(self.position.cell(), sx, sy)
    }
}

pub(crate) fn rotated_size(size: (usize, usize), rotation: Orientation) -> (usize, usize) {
    match rotation {
        Orientation::Front | Orientation::Back => (size.1, size.0),
        _ => size,
    }
}

/// Point light
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Light {
    pub location: Point,
    /// Relative brightness, > 0
    pub intensity: f32,
    /// Soft-shadow radius; `None` when the lighting mode doesn't set one
    pub radius: Option<f32>,
}

impl Light {
    pub fn new(location: Point, intensity: f32) -> Self {
        Self {
            location,
            intensity,
            radius: None,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }
}

/// Camera pose
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewpoint {
    pub location: Point,
    /// Yaw in degrees, measured from the +x axis towards +y
    pub rotation: f32,
    /// Pitch offset in degrees
    pub horizon: f32,
}
