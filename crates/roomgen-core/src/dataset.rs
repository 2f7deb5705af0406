//! Dataset-level viewpoint tables.
//!
//! Each layout yields one row per viewpoint, `[x, y, yaw, pitch]`, with the
//! position taken relative to the centre of the floor plan. A dataset shares
//! one scale factor so positions from every layout land in `[-1, 1]`.

use serde::{Deserialize, Serialize};

use crate::components::SceneSamples;

/// `[x, y, yaw, pitch]`
pub type ViewpointRow = [f32; 4];

/// Viewpoint rows of one layout, centred on its floor plan.
pub fn viewpoint_table(samples: &SceneSamples) -> Vec<ViewpointRow> {
    let (cx, cy) = samples
        .scenes
        .first()
        .map(|s| s.centre())
        .unwrap_or((0.0, 0.0));
    samples
        .viewpoints
        .iter()
        .map(|v| [v.location.x - cx, v.location.y - cy, v.rotation, v.horizon])
        .collect()
}

/// Divide every position by the largest absolute coordinate in the dataset.
///
/// Returns the scale used; 1 when there is nothing to scale.
pub fn normalize_tables(tables: &mut [Vec<ViewpointRow>]) -> f32 {
    let max = tables
        .iter()
        .flatten()
        .map(|row| row[0].abs().max(row[1].abs()))
        .fold(0.0f32, f32::max);
    let scale = if max > 0.0 { max } else { 1.0 };

    for row in tables.iter_mut().flatten() {
        row[0] /= scale;
        row[1] /= scale;
    }
    scale
}

/// Normalized viewpoint tables for a whole dataset, as written next to the
/// saved samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedViewpoints {
    pub scale: f32,
    /// One table per layout, in generation order
    pub scenes: Vec<Vec<ViewpointRow>>,
}

impl NormalizedViewpoints {
    pub fn from_samples(samples: &[SceneSamples]) -> Self {
        let mut scenes: Vec<_> = samples.iter().map(viewpoint_table).collect();
        let scale = normalize_tables(&mut scenes);
        Self { scale, scenes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Point, Scene, Viewpoint};
    use crate::grid::{Grid, Rect};

    fn samples_with(viewpoints: Vec<Viewpoint>) -> SceneSamples {
        let mut canvas = Grid::new(20, 20);
        canvas.fill(&Rect::new(6, 6, 8, 8), true);
        let scene = Scene::from_floor_plan(&canvas).unwrap();
        SceneSamples::new(vec![scene], viewpoints)
    }

    fn viewpoint(x: f32, y: f32, rotation: f32) -> Viewpoint {
        Viewpoint {
            location: Point::new(x, y, 1.0),
            rotation,
            horizon: -5.0,
        }
    }

    #[test]
    fn test_rows_are_centred() {
        let samples = samples_with(vec![viewpoint(4.5, 4.5, 90.0), viewpoint(1.0, 8.0, 0.0)]);
        let table = viewpoint_table(&samples);
        assert_eq!(table, vec![[0.0, 0.0, 90.0, -5.0], [-3.5, 3.5, 0.0, -5.0]]);
    }

    #[test]
    fn test_single_scale_across_dataset() {
        let mut tables = vec![vec![[2.0, -1.0, 10.0, 0.0]], vec![[0.5, -4.0, 20.0, 1.0]]];
        let scale = normalize_tables(&mut tables);
        assert_eq!(scale, 4.0);
        assert_eq!(tables[0][0], [0.5, -0.25, 10.0, 0.0]);
        assert_eq!(tables[1][0], [0.125, -1.0, 20.0, 1.0]);
    }

    #[test]
    fn test_empty_dataset_scale_is_one() {
        let mut tables: Vec<Vec<ViewpointRow>> = vec![vec![]];
        assert_eq!(normalize_tables(&mut tables), 1.0);

        let normalized = NormalizedViewpoints::from_samples(&[samples_with(vec![])]);
        assert_eq!(normalized.scale, 1.0);
        assert_eq!(normalized.scenes, vec![Vec::<ViewpointRow>::new()]);
    }
}
