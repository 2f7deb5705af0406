//! Light placement.
//!
//! Lights hang from the ceiling, so furniture never blocks them: candidates
//! are the cells of the original floor plan and only walls count as
//! obstacles.

use log::{debug, warn};
use rand::Rng;

use super::placement::{place_greedy, PlacementReport, Spacing};
use crate::components::{Light, Point, Scene};
use crate::config::LightingConfig;

/// Run the configured lighting mode on `scene`.
pub fn apply_lighting(scene: &mut Scene, config: &LightingConfig, rng: &mut impl Rng) -> PlacementReport {
    match *config {
        LightingConfig::Random {
            tiles_to_light_range,
            min_light_padding,
            min_boundary_padding,
            intensity_range,
            radius_range,
            height,
        } => {
            let tiles = rng.gen_range(tiles_to_light_range.0..=tiles_to_light_range.1).max(1);
            let target = scene.floor_area() / tiles as usize;
            let settings = RandomLights {
                target,
                min_light_padding,
                min_boundary_padding,
                intensity_range,
                radius_range,
                height,
            };
            random_lighting(scene, &settings, rng)
        }
        LightingConfig::Grid {
            interval,
            intensity,
            radius,
            height,
        } => grid_lighting(scene, interval, intensity, radius, height),
    }
}

/// Parameters of one random lighting pass.
#[derive(Debug, Clone, Copy)]
pub struct RandomLights {
    /// Lights requested; fewer may fit
    pub target: usize,
    pub min_light_padding: usize,
    pub min_boundary_padding: usize,
    pub intensity_range: (f32, f32),
    pub radius_range: Option<(f32, f32)>,
    pub height: f32,
}

/// Scatter up to `settings.target` padded lights over the floor plan.
pub fn random_lighting(scene: &mut Scene, settings: &RandomLights, rng: &mut impl Rng) -> PlacementReport {
    let mut spacing = Spacing::new(
        scene.floor_plan().inverted(),
        settings.min_light_padding,
        settings.min_boundary_padding,
    );

    let (lights, report) = place_greedy(rng, scene.floor_cells(), settings.target, |cell, rng| {
        spacing.claim(cell)?;
        let (lo, hi) = settings.intensity_range;
        let light = Light::new(Point::at_cell(cell, settings.height), rng.gen_range(lo..=hi));
        Ok(match settings.radius_range {
            Some((lo, hi)) => light.with_radius(rng.gen_range(lo..=hi)),
            None => light,
        })
    });

    if report.is_short() {
        warn!(
            "Only {}/{} lights fit (padding {}, boundary {})",
            report.placed, report.requested, settings.min_light_padding, settings.min_boundary_padding
        );
    }
    for light in lights {
        scene.add_light(light);
    }
    debug!("Lights: {} placed from {} candidates", report.placed, report.tried);
    report
}

/// Lights on a square lattice with spacing `interval`, one per lattice point
/// that lands on the floor plan.
pub fn grid_lighting(
    scene: &mut Scene,
    interval: usize,
    intensity: f32,
    radius: Option<f32>,
    height: f32,
) -> PlacementReport {
    let interval = interval.max(1);
    let (rows, cols) = scene.floor_plan().shape();
    let offset = 1 + interval / 2;

    let mut lights = Vec::new();
    for x in (offset..rows).step_by(interval) {
        for y in (offset..cols).step_by(interval) {
            if scene.floor_plan().is_navigable((x, y)) {
                let light = Light::new(Point::at_cell((x, y), height), intensity);
                lights.push(match radius {
                    Some(r) => light.with_radius(r),
                    None => light,
                });
            }
        }
    }

    let mut report = PlacementReport::new(lights.len());
    report.placed = lights.len();
    report.tried = lights.len();
    for light in lights {
        scene.add_light(light);
    }
    debug!("Lights: {} on a {}-cell lattice", report.placed, interval);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::placement::chebyshev;
    use crate::grid::{Grid, Rect};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn room(side: i32) -> Scene {
        let mut canvas = Grid::new(side as usize + 10, side as usize + 10);
        canvas.fill(&Rect::new(5, 5, side, side), true);
        Scene::from_floor_plan(&canvas).unwrap()
    }

    #[test]
    fn test_requesting_too_many_lights_is_not_an_error() {
        let mut scene = room(20);
        let settings = RandomLights {
            target: 50,
            min_light_padding: 5,
            min_boundary_padding: 1,
            intensity_range: (0.75, 1.0),
            radius_range: Some((0.0, 0.5)),
            height: 1.75,
        };
        let mut rng = StdRng::seed_from_u64(4);
        let report = random_lighting(&mut scene, &settings, &mut rng);

        let lights = scene.lights();
        assert_eq!(report.requested, 50);
        assert_eq!(lights.len(), report.placed);
        assert!(!lights.is_empty() && lights.len() <= 16);
        for (i, a) in lights.iter().enumerate() {
            assert!((0.75..=1.0).contains(&a.intensity));
            assert!(a.radius.is_some_and(|r| (0.0..=0.5).contains(&r)));
            assert_eq!(a.location.z, 1.75);
            for b in &lights[i + 1..] {
                assert!(chebyshev(a.location.cell(), b.location.cell()) >= 5);
            }
        }
    }

    #[test]
    fn test_light_count_follows_tiles_per_light() {
        let mut scene = room(20);
        let config = LightingConfig::Random {
            tiles_to_light_range: (100, 100),
            min_light_padding: 1,
            min_boundary_padding: 1,
            intensity_range: (1.0, 1.0),
            radius_range: None,
            height: 1.75,
        };
        let mut rng = StdRng::seed_from_u64(9);
        let report = apply_lighting(&mut scene, &config, &mut rng);
        assert_eq!(report.requested, 4);
        assert_eq!(scene.lights().len(), 4);
        assert!(scene.lights().iter().all(|l| l.radius.is_none()));
    }

    #[test]
    fn test_grid_lattice() {
        let mut scene = room(12);
        let config = LightingConfig::Grid {
            interval: 4,
            intensity: 0.9,
            radius: Some(0.2),
            height: 1.9,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let report = apply_lighting(&mut scene, &config, &mut rng);
        // Lattice rows and columns 3, 7, 11 of a 14×14 plan
        assert_eq!(report.placed, 9);
        assert_eq!(scene.lights()[0].location, Point::new(3.0, 3.0, 1.9));
        assert!(scene.lights().iter().all(|l| l.intensity == 0.9 && l.radius == Some(0.2)));
    }

    #[test]
    fn test_lights_ignore_furniture() {
        let mut scene = room(8);
        let sofa = crate::components::Object::new(
            0,
            (5, 5),
            crate::components::Orientation::Left,
            (8, 8),
        );
        scene.add_object(sofa).unwrap();
        assert_eq!(scene.navigable().count(), 0);

        let settings = RandomLights {
            target: 3,
            min_light_padding: 1,
            min_boundary_padding: 1,
            intensity_range: (1.0, 1.0),
            radius_range: None,
            height: 1.75,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let report = random_lighting(&mut scene, &settings, &mut rng);
        assert_eq!(report.placed, 3);
    }
}
