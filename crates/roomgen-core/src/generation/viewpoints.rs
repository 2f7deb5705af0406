//! Camera viewpoint placement.
//!
//! Cameras stand on navigable cells, padded from each other and from
//! anything that is not navigable (walls and furniture). Yaw aims at a
//! fixation point with a little jitter.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::placement::{place_greedy, PlacementReport, Spacing};
use crate::components::{Point, Viewpoint};
use crate::config::{Fixation, ViewpointConfig};
use crate::grid::{Cell, Grid};

/// Place cameras on `navigable`. `floor_plan` supplies the fixation targets.
pub fn random_viewpoints(
    navigable: &Grid,
    floor_plan: &Grid,
    config: &ViewpointConfig,
    rng: &mut impl Rng,
) -> (Vec<Viewpoint>, PlacementReport) {
    let mut spacing = Spacing::new(navigable.inverted(), config.min_padding, config.boundary_padding);

    // Centre and edge targets are shared by every camera of the scene
    let shared = match config.fixation {
        Some(Fixation::Centre) => Some(plan_centre(floor_plan)),
        Some(Fixation::Edge) => Some(edge_point(floor_plan, rng)),
        None => None,
    };
    let targets: Vec<Cell> = navigable.cells().collect();

    let (viewpoints, report) = place_greedy(rng, navigable.cells().collect(), config.count as usize, |cell, rng| {
        spacing.claim(cell)?;
        let target = match shared {
            Some(point) => point,
            None => match targets.choose(rng) {
                Some(&(x, y)) => (x as f32, y as f32),
                None => (cell.0 as f32, cell.1 as f32),
            },
        };
        let height = rng.gen_range(config.height_range.0..=config.height_range.1);
        Ok(Viewpoint {
            location: Point::at_cell(cell, height),
            rotation: aim(cell, target) + symmetric(config.max_fixation_offset, rng),
            horizon: symmetric(config.max_horizon_offset, rng),
        })
    });

    debug!(
        "Viewpoints: placed {}/{}, {} too close, {} near boundary",
        report.placed, report.requested, report.too_close, report.near_boundary
    );
    (viewpoints, report)
}

/// Yaw in degrees from `cell` towards `target`, measured from +x towards +y.
pub fn aim(cell: Cell, target: (f32, f32)) -> f32 {
    let dx = target.0 - cell.0 as f32;
    let dy = target.1 - cell.1 as f32;
    dy.atan2(dx).to_degrees()
}

/// Centre of the bounding box of the plan's floor cells.
pub fn plan_centre(floor_plan: &Grid) -> (f32, f32) {
    match floor_plan.bounding_box() {
        Some(b) => (
            b.x as f32 + (b.w - 1) as f32 / 2.0,
            b.y as f32 + (b.h - 1) as f32 / 2.0,
        ),
        None => (0.0, 0.0),
    }
}

/// Uniform point on the outer edge of the grid.
fn edge_point(grid: &Grid, rng: &mut impl Rng) -> (f32, f32) {
    let (rows, cols) = grid.shape();
    let max_x = rows.saturating_sub(1) as f32;
    let max_y = cols.saturating_sub(1) as f32;
    let t = rng.gen_range(0.0..=1.0f32);
    match rng.gen_range(0..4) {
        0 => (0.0, t * max_y),
        1 => (max_x, t * max_y),
        2 => (t * max_x, 0.0),
        _ => (t * max_x, max_y),
    }
}

/// Uniform offset in `[-max, max]`; zero when `max` is zero.
fn symmetric(max: f32, rng: &mut impl Rng) -> f32 {
    if max > 0.0 {
        rng.gen_range(-max..=max)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::placement::chebyshev;
    use crate::grid::Rect;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn plan() -> Grid {
        let mut grid = Grid::new(14, 14);
        grid.fill(&Rect::new(1, 1, 12, 12), true);
        grid
    }

    fn config() -> ViewpointConfig {
        ViewpointConfig {
            count: 8,
            min_padding: 3,
            boundary_padding: 2,
            height_range: (1.0, 1.5),
            max_horizon_offset: 10.0,
            fixation: None,
            max_fixation_offset: 0.0,
        }
    }

    #[test]
    fn test_aim_angles() {
        assert_eq!(aim((0, 0), (1.0, 0.0)), 0.0);
        assert_eq!(aim((0, 0), (0.0, 1.0)), 90.0);
        assert_eq!(aim((5, 5), (5.0, 0.0)), -90.0);
    }

    #[test]
    fn test_viewpoints_respect_padding() {
        let grid = plan();
        let mut rng = StdRng::seed_from_u64(21);
        let (viewpoints, report) = random_viewpoints(&grid, &grid, &config(), &mut rng);
        assert_eq!(viewpoints.len(), report.placed);
        assert!(!viewpoints.is_empty());
        for (i, a) in viewpoints.iter().enumerate() {
            let cell = a.location.cell();
            // Boundary padding 2 keeps cameras off the outer floor ring
            assert!((2..=11).contains(&cell.0) && (2..=11).contains(&cell.1));
            assert!((1.0..=1.5).contains(&a.location.z));
            assert!(a.horizon.abs() <= 10.0);
            for b in &viewpoints[i + 1..] {
                assert!(chebyshev(cell, b.location.cell()) >= 3);
            }
        }
    }

    #[test]
    fn test_centre_fixation_without_jitter() {
        let grid = plan();
        let config = ViewpointConfig {
            fixation: Some(Fixation::Centre),
            ..config()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let (viewpoints, _) = random_viewpoints(&grid, &grid, &config, &mut rng);
        let centre = plan_centre(&grid);
        assert_eq!(centre, (6.5, 6.5));
        for v in &viewpoints {
            assert_eq!(v.rotation, aim(v.location.cell(), centre));
        }
    }

    #[test]
    fn test_furniture_blocks_cameras() {
        let floor = plan();
        let mut navigable = floor.clone();
        navigable.fill(&Rect::new(1, 1, 12, 6), false);
        let mut rng = StdRng::seed_from_u64(5);
        let config = ViewpointConfig {
            fixation: Some(Fixation::Edge),
            max_fixation_offset: 15.0,
            ..config()
        };
        let (viewpoints, _) = random_viewpoints(&navigable, &floor, &config, &mut rng);
        assert!(!viewpoints.is_empty());
        for v in &viewpoints {
            // Two cells clear of the furniture edge at y = 6
            assert!(v.location.cell().1 >= 8);
        }
    }
}
