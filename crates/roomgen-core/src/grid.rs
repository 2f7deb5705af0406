//! Boolean occupancy grid and rectangle queries.
//!
//! `true` marks a navigable floor cell. Cells are addressed `(x, y)` where `x`
//! is the row and `y` the column. Every rectangle query clips against the grid
//! bounds instead of panicking, so callers can query windows that hang over the
//! edge.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::ops::Range;

use crate::error::LayoutError;

/// A grid cell `(row, column)`.
pub type Cell = (usize, usize);

/// Largest radius [`Rect::window`] represents.
pub const MAX_WINDOW_RADIUS: i32 = i32::MAX / 4;

/// Half-open axis-aligned rectangle `[x, x + w) × [y, y + h)` in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Square window of cells within Chebyshev distance `radius` of `cell`.
    ///
    /// Radii are capped at [`MAX_WINDOW_RADIUS`], far beyond any grid, so a
    /// huge padding still covers the whole grid instead of wrapping.
    pub fn window(cell: Cell, radius: usize) -> Self {
        let r = i32::try_from(radius).unwrap_or(i32::MAX).min(MAX_WINDOW_RADIUS);
        let (x, y) = (cell.0 as i32, cell.1 as i32);
        Self::new(x - r, y - r, 2 * r + 1, 2 * r + 1)
    }

    /// Rectangle of size `w × h` centred on `cell`. Sizes are expected to be even.
    pub fn centred(cell: Cell, w: usize, h: usize) -> Self {
        let (w, h) = (w as i32, h as i32);
        Self::new(cell.0 as i32 - w / 2, cell.1 as i32 - h / 2, w, h)
    }

    pub fn area(&self) -> usize {
        (self.w.max(0) * self.h.max(0)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// The four halves of the rectangle: first/second half along x, then along y.
    pub fn halves(&self) -> [Rect; 4] {
        let (hw, hh) = (self.w / 2, self.h / 2);
        [
            Rect::new(self.x, self.y, hw, self.h),
            Rect::new(self.x + hw, self.y, self.w - hw, self.h),
            Rect::new(self.x, self.y, self.w, hh),
            Rect::new(self.x, self.y + hh, self.w, self.h - hh),
        ]
    }
}

/// 2D boolean occupancy matrix.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-empty grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Parse a grid from lines of `#` (navigable) and `.` (empty).
    ///
    /// Lines are rows; short lines are padded with empty cells.
    pub fn from_ascii(text: &str) -> Self {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut grid = Grid::new(lines.len(), cols);
        for (x, line) in lines.iter().enumerate() {
            for (y, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.set((x, y), true);
                }
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Cell value with signed coordinates; anything outside the grid is empty.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.rows || y as usize >= self.cols {
            return false;
        }
        self.cells[x as usize * self.cols + y as usize]
    }

    pub fn is_navigable(&self, cell: Cell) -> bool {
        self.get(cell.0 as i32, cell.1 as i32)
    }

    /// Set a cell. Out-of-range cells are ignored.
    pub fn set(&mut self, cell: Cell, value: bool) {
        if cell.0 < self.rows && cell.1 < self.cols {
            self.cells[cell.0 * self.cols + cell.1] = value;
        }
    }

    fn clip(&self, rect: &Rect) -> (Range<usize>, Range<usize>) {
        let clamp = |v: i32, max: usize| v.clamp(0, max as i32) as usize;
        let xs = clamp(rect.x, self.rows)..clamp(rect.x.saturating_add(rect.w), self.rows);
        let ys = clamp(rect.y, self.cols)..clamp(rect.y.saturating_add(rect.h), self.cols);
        (xs, ys)
    }

    /// True if the rectangle lies entirely inside the grid bounds.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        rect.x >= 0
            && rect.y >= 0
            && rect.x + rect.w <= self.rows as i32
            && rect.y + rect.h <= self.cols as i32
    }

    /// Every in-bounds cell of `rect` is navigable. Vacuously true when the
    /// clipped rectangle is empty.
    pub fn all(&self, rect: &Rect) -> bool {
        let (xs, ys) = self.clip(rect);
        xs.into_iter()
            .all(|x| ys.clone().all(|y| self.cells[x * self.cols + y]))
    }

    /// Some in-bounds cell of `rect` is navigable.
    pub fn any(&self, rect: &Rect) -> bool {
        let (xs, ys) = self.clip(rect);
        xs.into_iter()
            .any(|x| ys.clone().any(|y| self.cells[x * self.cols + y]))
    }

    /// Set every in-bounds cell of `rect` to `value`.
    pub fn fill(&mut self, rect: &Rect, value: bool) {
        let (xs, ys) = self.clip(rect);
        for x in xs {
            for y in ys.clone() {
                self.cells[x * self.cols + y] = value;
            }
        }
    }

    /// Number of navigable cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Navigable cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(i, _)| (i / self.cols, i % self.cols))
    }

    /// First navigable cell in row-major order.
    pub fn first_cell(&self) -> Option<Cell> {
        self.cells().next()
    }

    /// Tight bounding box of the navigable cells.
    pub fn bounding_box(&self) -> Option<Rect> {
        let row_has = |x: usize| self.cells[x * self.cols..(x + 1) * self.cols].contains(&true);
        let col_has = |y: usize| (0..self.rows).any(|x| self.cells[x * self.cols + y]);

        let x_min = (0..self.rows).find(|&x| row_has(x))?;
        let x_max = (0..self.rows).rev().find(|&x| row_has(x))?;
        let y_min = (0..self.cols).find(|&y| col_has(y))?;
        let y_max = (0..self.cols).rev().find(|&y| col_has(y))?;
        Some(Rect::new(
            x_min as i32,
            y_min as i32,
            (x_max - x_min + 1) as i32,
            (y_max - y_min + 1) as i32,
        ))
    }

    /// Trim to the bounding box of the navigable cells plus one empty border
    /// cell on every side.
    ///
    /// The border is always present in the result, even when navigable cells
    /// touched the edge of the original canvas.
    pub fn squeeze(&self) -> Result<Grid, LayoutError> {
        let bbox = self.bounding_box().ok_or(LayoutError::EmptyFloorPlan)?;
        let mut out = Grid::new(bbox.w as usize + 2, bbox.h as usize + 2);
        for (x, y) in self.cells() {
            out.set(
                (x - bbox.x as usize + 1, y - bbox.y as usize + 1),
                true,
            );
        }
        Ok(out)
    }

    /// Cell-wise AND of two grids of the same shape.
    pub fn intersect(&self, other: &Grid) -> Grid {
        debug_assert_eq!(self.shape(), other.shape());
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(&other.cells)
                .map(|(&a, &b)| a && b)
                .collect(),
        }
    }

    /// Cell-wise NOT; navigable cells become obstacles and vice versa.
    pub fn inverted(&self) -> Grid {
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(|&c| !c).collect(),
        }
    }

    /// All navigable cells form a single 4-connected region.
    ///
    /// An empty grid counts as connected.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.first_cell() else {
            return true;
        };
        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        seen[start.0 * self.cols + start.1] = true;
        queue.push_back(start);
        let mut reached = 0;

        while let Some((x, y)) = queue.pop_front() {
            reached += 1;
            let neighbors = [
                (x as i32 - 1, y as i32),
                (x as i32 + 1, y as i32),
                (x as i32, y as i32 - 1),
                (x as i32, y as i32 + 1),
            ];
            for (nx, ny) in neighbors {
                if !self.get(nx, ny) {
                    continue;
                }
                let idx = nx as usize * self.cols + ny as usize;
                if !seen[idx] {
                    seen[idx] = true;
                    queue.push_back((nx as usize, ny as usize));
                }
            }
        }

        reached == self.count()
    }

    /// Some navigable cell is not covered by any fully navigable 2×2 block.
    pub fn has_thin_features(&self) -> bool {
        self.cells().any(|(x, y)| {
            let (x, y) = (x as i32, y as i32);
            ![(-1, -1), (-1, 0), (0, -1), (0, 0)]
                .iter()
                .any(|&(dx, dy)| self.all(&Rect::new(x + dx, y + dy, 2, 2))
                    && self.contains_rect(&Rect::new(x + dx, y + dy, 2, 2)))
        })
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Grid {}x{}\n{}", self.rows, self.cols, self)
    }
}

/// ASCII map: `#` navigable, `.` empty, one row per line.
impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for x in 0..self.rows {
            for y in 0..self.cols {
                let ch = if self.cells[x * self.cols + y] { '#' } else { '.' };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> Grid {
        Grid::from_ascii(
            "
            ......
            .##...
            .##...
            .####.
            .####.
            ......
            ",
        )
    }

    #[test]
    fn test_rect_queries_clip_to_bounds() {
        let mut grid = Grid::new(4, 4);
        grid.fill(&Rect::new(-2, -2, 4, 4), true);
        assert_eq!(grid.count(), 4);
        assert!(grid.all(&Rect::new(-5, -5, 7, 7)));
        assert!(grid.any(&Rect::new(1, 1, 10, 10)));
        assert!(!grid.any(&Rect::new(2, 2, 10, 10)));
        // Entirely outside: nothing to check
        assert!(grid.all(&Rect::new(10, 10, 2, 2)));
        assert!(!grid.any(&Rect::new(10, 10, 2, 2)));
    }

    #[test]
    fn test_huge_window_covers_grid() {
        let mut grid = Grid::new(10, 10);
        grid.set((9, 9), true);
        for radius in [1usize << 31, (1usize << 32) + 1, usize::MAX] {
            let window = Rect::window((0, 0), radius);
            assert!(grid.any(&window), "radius {} missed the far corner", radius);
        }
        assert_eq!(Rect::window((5, 5), 2), Rect::new(3, 3, 5, 5));
    }

    #[test]
    fn test_squeeze_adds_single_border() {
        let mut canvas = Grid::new(20, 20);
        canvas.fill(&Rect::new(6, 6, 8, 8), true);
        let squeezed = canvas.squeeze().unwrap();
        assert_eq!(squeezed.shape(), (10, 10));
        assert_eq!(squeezed.count(), 64);
        assert!(!squeezed.any(&Rect::new(0, 0, 1, 10)));
        assert!(!squeezed.any(&Rect::new(9, 0, 1, 10)));
        assert!(squeezed.all(&Rect::new(1, 1, 8, 8)));
    }

    #[test]
    fn test_squeeze_is_idempotent() {
        let grid = l_shape();
        let once = grid.squeeze().unwrap();
        let twice = once.squeeze().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_squeeze_at_canvas_edge_keeps_border() {
        let mut canvas = Grid::new(8, 8);
        canvas.fill(&Rect::new(0, 0, 4, 4), true);
        let squeezed = canvas.squeeze().unwrap();
        assert_eq!(squeezed.shape(), (6, 6));
        assert!(!squeezed.is_navigable((0, 0)));
        assert!(squeezed.is_navigable((1, 1)));
    }

    #[test]
    fn test_squeeze_empty_grid_fails() {
        assert_eq!(Grid::new(5, 5).squeeze(), Err(LayoutError::EmptyFloorPlan));
    }

    #[test]
    fn test_connectivity() {
        assert!(l_shape().is_connected());
        let split = Grid::from_ascii(
            "
            ##..
            ##..
            ..##
            ..##
            ",
        );
        assert!(!split.is_connected());
    }

    #[test]
    fn test_thin_features() {
        assert!(!l_shape().has_thin_features());
        let corridor = Grid::from_ascii(
            "
            ......
            .####.
            ......
            ",
        );
        assert!(corridor.has_thin_features());
    }

    #[test]
    fn test_halves_cover_rect() {
        let r = Rect::new(2, 4, 8, 4);
        let [top, bottom, left, right] = r.halves();
        assert_eq!(top.area() + bottom.area(), r.area());
        assert_eq!(left.area() + right.area(), r.area());
        assert_eq!(bottom.x, 6);
        assert_eq!(right.y, 6);
    }

    #[test]
    fn test_ascii_roundtrip() {
        let grid = l_shape();
        let text = grid.to_string();
        assert_eq!(Grid::from_ascii(&text), grid);
    }
}
