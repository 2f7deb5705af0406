//! Constrained random placement.
//!
//! One greedy primitive serves objects, lights and viewpoints: shuffle the
//! candidate cells, pop one at a time, and hand it to an `attempt` closure
//! that either commits an item or rejects the cell. The pass ends when the
//! target count is met or the candidates run out. Falling short is a normal
//! outcome and only shows up in the [`PlacementReport`].

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::PlacementError;
use crate::grid::{Cell, Grid, Rect};

/// Counts from one placement pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementReport {
    pub requested: usize,
    pub placed: usize,
    /// Candidates popped from the pool
    pub tried: usize,
    pub too_close: usize,
    pub near_boundary: usize,
    pub did_not_fit: usize,
}

impl PlacementReport {
    pub fn new(requested: usize) -> Self {
        Self {
            requested,
            ..Default::default()
        }
    }

    /// Whether fewer items were placed than requested.
    pub fn is_short(&self) -> bool {
        self.placed < self.requested
    }

    fn reject(&mut self, reason: PlacementError) {
        match reason {
            PlacementError::TooClose => self.too_close += 1,
            PlacementError::NearBoundary => self.near_boundary += 1,
            PlacementError::ObjectDoesNotFit => self.did_not_fit += 1,
        }
    }

    /// Sum the counts of two passes.
    pub fn merge(&mut self, other: &PlacementReport) {
        self.requested += other.requested;
        self.placed += other.placed;
        self.tried += other.tried;
        self.too_close += other.too_close;
        self.near_boundary += other.near_boundary;
        self.did_not_fit += other.did_not_fit;
    }
}

/// Shuffle `candidates` and try them in turn until `target` items are placed.
///
/// `attempt` receives each candidate cell together with the random source so
/// it can sample the item's remaining attributes after the cell is accepted.
pub fn place_greedy<R, T, F>(
    rng: &mut R,
    mut candidates: Vec<Cell>,
    target: usize,
    mut attempt: F,
) -> (Vec<T>, PlacementReport)
where
    R: Rng + ?Sized,
    F: FnMut(Cell, &mut R) -> Result<T, PlacementError>,
{
    candidates.shuffle(rng);
    let mut report = PlacementReport::new(target);
    let mut placed = Vec::with_capacity(target.min(candidates.len()));

    while placed.len() < target {
        let Some(cell) = candidates.pop() else {
            break;
        };
        report.tried += 1;
        match attempt(cell, rng) {
            Ok(item) => placed.push(item),
            Err(reason) => {
                trace!("rejected {:?}: {}", cell, reason);
                report.reject(reason);
            }
        }
    }

    report.placed = placed.len();
    (placed, report)
}

/// Padding rules for point-like items (lights, viewpoints).
///
/// Holds two exclusion grids: cells already taken by items of this kind, and
/// obstacle cells (walls, and furniture where it matters). A padding of `p`
/// keeps items at Chebyshev distance `>= p` from each other and from
/// obstacles; a padding of 0 disables the check.
#[derive(Debug, Clone)]
pub struct Spacing {
    placed: Grid,
    obstacles: Grid,
    min_padding: usize,
    boundary_padding: usize,
}

impl Spacing {
    /// `obstacles` marks blocked cells with `true`.
    pub fn new(obstacles: Grid, min_padding: usize, boundary_padding: usize) -> Self {
        let (rows, cols) = obstacles.shape();
        Self {
            placed: Grid::new(rows, cols),
            obstacles,
            min_padding,
            boundary_padding,
        }
    }

    /// Check a candidate against both exclusion grids.
    pub fn check(&self, cell: Cell) -> Result<(), PlacementError> {
        if !clear_of(&self.placed, cell, self.min_padding) {
            return Err(PlacementError::TooClose);
        }
        if !clear_of(&self.obstacles, cell, self.boundary_padding) {
            return Err(PlacementError::NearBoundary);
        }
        Ok(())
    }

    /// Record an accepted cell.
    pub fn mark(&mut self, cell: Cell) {
        self.placed.set(cell, true);
    }

    /// Check and, on success, record in one step.
    pub fn claim(&mut self, cell: Cell) -> Result<(), PlacementError> {
        self.check(cell)?;
        self.mark(cell);
        Ok(())
    }
}

/// No set cell of `grid` within Chebyshev distance `padding - 1` of `cell`.
fn clear_of(grid: &Grid, cell: Cell, padding: usize) -> bool {
    padding == 0 || !grid.any(&Rect::window(cell, padding - 1))
}

/// Largest Chebyshev distance between two cells.
pub fn chebyshev(a: Cell, b: Cell) -> usize {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1))
}
