//! Floor-plan synthesis - grows a connected region by fusing rectangular patches.
//!
//! A seed patch is stamped in the middle of the canvas. Every further patch
//! enters from one canvas edge and slides across in steps of two cells until
//! half of it (split along either axis) lies entirely on existing floor, at
//! which point it is stamped. Patches that slide off the far edge are dropped
//! and a new one is drawn. The half-overlap rule keeps the region connected
//! while letting it grow into non-convex shapes.

use log::{debug, warn};
use rand::Rng;

use crate::components::Orientation;
use crate::config::{validate_layout, LayoutConfig};
use crate::error::LayoutError;
use crate::grid::{Grid, Rect};

/// Distance a patch moves per slide step
const SLIDE_STEP: i32 = 2;

/// Generate a raw (unsqueezed) floor plan on a `canvas_size` square canvas.
pub fn random_floor_plan(config: &LayoutConfig, rng: &mut impl Rng) -> Result<Grid, LayoutError> {
    let errors = validate_layout(config);
    if !errors.is_empty() {
        return Err(LayoutError::InvalidConfiguration(errors));
    }

    let canvas = config.canvas_size;
    let mut grid = Grid::new(canvas, canvas);
    let target = rng.gen_range(config.min_patches..=config.max_patches);

    // Seed patch: largest size, centred
    let (w, h) = maybe_swap(config.max_patch_size, rng);
    let (w, h) = (w as i32, h as i32);
    let mid = canvas as i32 / 2;
    grid.fill(&Rect::new(mid - w / 2, mid - h / 2, w, h), true);
    let mut placed = 1;

    let mut attempts = 0;
    while placed < target {
        if attempts >= config.max_slide_attempts {
            warn!(
                "Stopped after {} slide attempts with {}/{} patches",
                attempts, placed, target
            );
            break;
        }
        attempts += 1;

        let size = random_patch_size(config, rng);
        let direction = Orientation::HORIZONTAL[rng.gen_range(0..4)];
        if slide_patch(&mut grid, size, direction, rng) {
            placed += 1;
        }
    }

    debug!(
        "Floor plan: {} patches, {} cells, {} slide attempts",
        placed,
        grid.count(),
        attempts
    );
    Ok(grid)
}

/// Random patch size; each axis is a multiple of 4 within the configured range.
fn random_patch_size(config: &LayoutConfig, rng: &mut impl Rng) -> (usize, usize) {
    let (min, max) = (config.min_patch_size, config.max_patch_size);
    let size = (
        rng.gen_range(min.0 / 4..=max.0 / 4) * 4,
        rng.gen_range(min.1 / 4..=max.1 / 4) * 4,
    );
    maybe_swap(size, rng)
}

fn maybe_swap(size: (usize, usize), rng: &mut impl Rng) -> (usize, usize) {
    if rng.gen_bool(0.5) {
        (size.1, size.0)
    } else {
        size
    }
}

/// Slide a patch in from the edge opposite `direction`. Returns whether it
/// was stamped.
fn slide_patch(
    grid: &mut Grid,
    (w, h): (usize, usize),
    direction: Orientation,
    rng: &mut impl Rng,
) -> bool {
    let canvas = grid.rows() as i32;
    let (w, h) = (w as i32, h as i32);
    // Random even offset across the slide axis
    let mut across = |extent: i32| rng.gen_range(0..=(canvas - extent) / 2) * 2;

    let (x, y) = match direction {
        Orientation::Left => (canvas - w, across(h)),
        Orientation::Right => (0, across(h)),
        Orientation::Front => (across(w), 0),
        _ => (across(w), canvas - h),
    };
    let (dx, dy) = direction.step();
    let mut patch = Rect::new(x, y, w, h);

    while grid.contains_rect(&patch) {
        if overlaps_by_half(grid, &patch) {
            grid.fill(&patch, true);
            return true;
        }
        patch = patch.translate(dx * SLIDE_STEP, dy * SLIDE_STEP);
    }
    false
}

/// At least one half of the patch, split along either axis, is all floor.
pub fn overlaps_by_half(grid: &Grid, patch: &Rect) -> bool {
    patch.halves().iter().any(|half| grid.all(half))
}
