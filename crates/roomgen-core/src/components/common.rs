//! Points, orientations and surfaces shared by every scene element.

use serde::{Deserialize, Serialize};

use crate::grid::Cell;

/// Height of every wall, in grid units.
pub const WALL_HEIGHT: f32 = 2.0;

/// 3D position in grid units
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Point on a grid cell at height `z`.
    pub fn at_cell(cell: Cell, z: f32) -> Self {
        Self::new(cell.0 as f32, cell.1 as f32, z)
    }

    /// Grid cell under this point.
    pub fn cell(&self) -> Cell {
        (self.x.max(0.0).round() as usize, self.y.max(0.0).round() as usize)
    }
}

/// Facing of a surface, rotation of an object, or heading of the boundary walker.
///
/// In the grid plane `LEFT`/`RIGHT` run along x (rows) and `BACK`/`FRONT`
/// along y (columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Up,
    Down,
    Left,
    Front,
    Right,
    Back,
}

impl Orientation {
    /// The four orientations lying in the floor plane.
    pub const HORIZONTAL: [Orientation; 4] = [
        Orientation::Left,
        Orientation::Front,
        Orientation::Right,
        Orientation::Back,
    ];

    /// Unit step `(dx, dy)` in the grid plane. Zero for `Up`/`Down`.
    pub fn step(self) -> (i32, i32) {
        match self {
            Orientation::Left => (-1, 0),
            Orientation::Right => (1, 0),
            Orientation::Front => (0, 1),
            Orientation::Back => (0, -1),
            Orientation::Up | Orientation::Down => (0, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        !matches!(self, Orientation::Up | Orientation::Down)
    }
}

/// Planar rectangle: floor, ceiling or one wall segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Surface {
    /// Texture id, resolved by the renderer
    pub texture: u32,
    pub centre: Point,
    /// Direction the visible face points
    pub normal: Orientation,
    /// (width, depth) for floor/ceiling, (length, height) for walls
    pub size: (f32, f32),
}

impl Surface {
    pub fn new(centre: Point, normal: Orientation, size: (f32, f32)) -> Self {
        Self {
            texture: 0,
            centre,
            normal,
            size,
        }
    }

    /// Endpoints of a wall segment in the grid plane, ordered along its axis.
    ///
    /// Walls facing `Left`/`Right` run along y, walls facing `Front`/`Back`
    /// run along x.
    pub fn wall_endpoints(&self) -> ((f32, f32), (f32, f32)) {
        let half = self.size.0 / 2.0;
        let (cx, cy) = (self.centre.x, self.centre.y);
        match self.normal {
            Orientation::Left | Orientation::Right => ((cx, cy - half), (cx, cy + half)),
            _ => ((cx - half, cy), (cx + half, cy)),
        }
    }
}
