//! Texture id assignment

use rand::Rng;

use crate::components::Scene;
use crate::config::TextureConfig;

/// Give the floor, the ceiling and every wall a texture id.
pub fn apply_textures(scene: &mut Scene, config: &TextureConfig, rng: &mut impl Rng) {
    match *config {
        TextureConfig::Random {
            floor_range,
            ceiling_range,
            wall_range,
        } => {
            scene.floor.texture = rng.gen_range(floor_range.0..=floor_range.1);
            scene.ceiling.texture = rng.gen_range(ceiling_range.0..=ceiling_range.1);
            for wall in &mut scene.walls {
                wall.texture = rng.gen_range(wall_range.0..=wall_range.1);
            }
        }
        TextureConfig::Fixed { floor, ceiling, wall } => {
            scene.floor.texture = floor;
            scene.ceiling.texture = ceiling;
            for w in &mut scene.walls {
                w.texture = wall;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Rect};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn l_room() -> Scene {
        let mut canvas = Grid::new(30, 30);
        canvas.fill(&Rect::new(4, 4, 8, 16), true);
        canvas.fill(&Rect::new(12, 4, 8, 8), true);
        Scene::from_floor_plan(&canvas).unwrap()
    }

    #[test]
    fn test_random_ids_stay_in_range() {
        let mut scene = l_room();
        assert_eq!(scene.walls.len(), 6);
        let config = TextureConfig::Random {
            floor_range: (3, 3),
            ceiling_range: (10, 12),
            wall_range: (20, 40),
        };
        let mut rng = StdRng::seed_from_u64(6);
        apply_textures(&mut scene, &config, &mut rng);
        assert_eq!(scene.floor.texture, 3);
        assert!((10..=12).contains(&scene.ceiling.texture));
        assert!(scene.walls.iter().all(|w| (20..=40).contains(&w.texture)));
    }

    #[test]
    fn test_fixed_ids() {
        let mut scene = l_room();
        let config = TextureConfig::Fixed {
            floor: 1,
            ceiling: 2,
            wall: 7,
        };
        apply_textures(&mut scene, &config, &mut StdRng::seed_from_u64(0));
        assert_eq!((scene.floor.texture, scene.ceiling.texture), (1, 2));
        assert!(scene.walls.iter().all(|w| w.texture == 7));
    }
}
