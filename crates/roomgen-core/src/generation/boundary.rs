//! Boundary tracing - turns a squeezed floor plan into floor, ceiling and walls.
//!
//! The walker moves along grid vertices (cell corners). Vertex `(x, y)` is the
//! top-left corner of cell `(x, y)`. It keeps the floor on one hand and emits a
//! wall every time the edge it follows ends. At the end of an edge the two
//! cells ahead decide the turn:
//!
//! ```text
//!   heading  step     open-side cell  floor-side cell  wall normal
//!   Front    (0,+1)   (x-1, y)        (x, y)           Right
//!   Left     (-1,0)   (x-1, y-1)      (x-1, y)         Front
//!   Back     (0,-1)   (x, y-1)        (x-1, y-1)       Left
//!   Right    (+1,0)   (x, y)          (x, y-1)         Back
//! ```
//!
//! A floor cell on the open side means a concave corner; otherwise the corner
//! is convex. Diagonal pinches resolve as concave, which keeps every directed
//! boundary edge on exactly one loop so the walk always closes.

use log::trace;

use crate::components::{Orientation, Point, Surface, WALL_HEIGHT};
use crate::error::LayoutError;
use crate::grid::Grid;

/// Heading of the boundary walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Front,
    Left,
    Back,
    Right,
}

/// Shape of the boundary where an edge ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// Boundary turns towards the open side (inside corner of the room).
    Concave,
    /// Boundary turns towards the floor side (outside corner of the room).
    Convex,
}

impl Heading {
    /// Vertex step taken while following an edge.
    pub fn step(self) -> (i32, i32) {
        match self {
            Heading::Front => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Back => (0, -1),
            Heading::Right => (1, 0),
        }
    }

    /// Offsets from the current vertex of the (open-side, floor-side) cells ahead.
    fn cells_ahead(self) -> ((i32, i32), (i32, i32)) {
        match self {
            Heading::Front => ((-1, 0), (0, 0)),
            Heading::Left => ((-1, -1), (-1, 0)),
            Heading::Back => ((0, -1), (-1, -1)),
            Heading::Right => ((0, 0), (0, -1)),
        }
    }

    /// Facing of the wall emitted while walking this way; it points at the floor.
    pub fn wall_normal(self) -> Orientation {
        match self {
            Heading::Front => Orientation::Right,
            Heading::Left => Orientation::Front,
            Heading::Back => Orientation::Left,
            Heading::Right => Orientation::Back,
        }
    }

    /// Transition table. Concave corners advance one step through
    /// Front → Left → Back → Right → Front, convex corners one step back.
    pub fn turn(self, corner: Corner) -> Heading {
        match (self, corner) {
            (Heading::Front, Corner::Concave) => Heading::Left,
            (Heading::Left, Corner::Concave) => Heading::Back,
            (Heading::Back, Corner::Concave) => Heading::Right,
            (Heading::Right, Corner::Concave) => Heading::Front,
            (Heading::Front, Corner::Convex) => Heading::Right,
            (Heading::Left, Corner::Convex) => Heading::Front,
            (Heading::Back, Corner::Convex) => Heading::Left,
            (Heading::Right, Corner::Convex) => Heading::Back,
        }
    }

    /// Cells ahead of `vertex`: (open side is floor, floor side is floor).
    fn look_ahead(self, grid: &Grid, vertex: (i32, i32)) -> (bool, bool) {
        let ((ox, oy), (fx, fy)) = self.cells_ahead();
        (
            grid.get(vertex.0 + ox, vertex.1 + oy),
            grid.get(vertex.0 + fx, vertex.1 + fy),
        )
    }
}

/// Floor, ceiling and walls of a room.
#[derive(Debug, Clone)]
pub struct Surfaces {
    pub floor: Surface,
    pub ceiling: Surface,
    /// Walls in traversal order around the perimeter
    pub walls: Vec<Surface>,
}

/// Build floor, ceiling and the ordered wall loop of a squeezed floor plan.
///
/// Floor and ceiling span the interior bounding box (the grid minus its
/// one-cell border).
pub fn make_surfaces(grid: &Grid) -> Result<Surfaces, LayoutError> {
    let (rows, cols) = grid.shape();
    let centre_x = rows as f32 / 2.0;
    let centre_y = cols as f32 / 2.0;
    let size = (rows.saturating_sub(2) as f32, cols.saturating_sub(2) as f32);

    let floor = Surface::new(Point::new(centre_x, centre_y, 0.0), Orientation::Up, size);
    let ceiling = Surface::new(
        Point::new(centre_x, centre_y, WALL_HEIGHT),
        Orientation::Down,
        size,
    );
    let walls = trace_walls(grid)?;

    Ok(Surfaces {
        floor,
        ceiling,
        walls,
    })
}

/// Walk the outer boundary of the navigable region and emit one wall per edge.
///
/// Starts at the top-left corner of the first navigable cell in row-major
/// order, heading `Front`, and stops on returning there with the same heading.
pub fn trace_walls(grid: &Grid) -> Result<Vec<Surface>, LayoutError> {
    // Every unit edge and every corner is visited at most once per loop
    let max_steps = 8 * (grid.rows() + 1) * (grid.cols() + 1);
    trace_walls_with_budget(grid, max_steps)
}

/// [`trace_walls`] with an explicit step budget. Each unit edge and each
/// corner costs one step; exceeding `max_steps` yields `MalformedFloorPlan`.
pub fn trace_walls_with_budget(grid: &Grid, max_steps: usize) -> Result<Vec<Surface>, LayoutError> {
    let start_cell = grid.first_cell().ok_or(LayoutError::EmptyFloorPlan)?;
    let start = (start_cell.0 as i32, start_cell.1 as i32);

    let mut heading = Heading::Front;
    let mut vertex = start;
    let mut steps = 0;
    let mut walls = Vec::new();

    loop {
        let segment_start = vertex;
        loop {
            let (open, floor) = heading.look_ahead(grid, vertex);
            if open || !floor {
                break;
            }
            let (dx, dy) = heading.step();
            vertex = (vertex.0 + dx, vertex.1 + dy);
            steps += 1;
            if steps > max_steps {
                return Err(LayoutError::MalformedFloorPlan {
                    steps,
                    start: start_cell,
                });
            }
        }

        steps += 1;
        if vertex == segment_start || steps > max_steps {
            return Err(LayoutError::MalformedFloorPlan {
                steps,
                start: start_cell,
            });
        }

        walls.push(wall_between(segment_start, vertex, heading));

        let (open, _) = heading.look_ahead(grid, vertex);
        let corner = if open { Corner::Concave } else { Corner::Convex };
        heading = heading.turn(corner);
        trace!("wall {} ends at {:?}, {:?} turn", walls.len(), vertex, corner);

        if vertex == start && heading == Heading::Front {
            break;
        }
    }

    Ok(walls)
}

fn wall_between(from: (i32, i32), to: (i32, i32), heading: Heading) -> Surface {
    let length = ((to.0 - from.0).abs() + (to.1 - from.1).abs()) as f32;
    let centre = Point::new(
        (from.0 + to.0) as f32 / 2.0,
        (from.1 + to.1) as f32 / 2.0,
        WALL_HEIGHT / 2.0,
    );
    Surface::new(centre, heading.wall_normal(), (length, WALL_HEIGHT))
}
