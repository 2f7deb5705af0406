//! Furniture placement

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::placement::{place_greedy, PlacementReport};
use crate::components::{Object, Orientation, Scene};
use crate::config::ObjectsConfig;

/// Place furniture on the scene's free floor.
///
/// Each category contributes a random number of instances. Instances are
/// tried in random order, each against a freshly shuffled pool of free cells
/// with a random horizontal rotation. Every placed footprint is removed from
/// the scene's navigable grid before the next instance is tried.
pub fn random_objects(scene: &mut Scene, config: &ObjectsConfig, rng: &mut impl Rng) -> PlacementReport {
    let mut queue: Vec<(u32, (usize, usize))> = Vec::new();
    for (category, c) in config.categories.iter().enumerate() {
        let count = rng.gen_range(c.count_range.0..=c.count_range.1);
        for _ in 0..count {
            queue.push((category as u32, c.size));
        }
    }
    queue.shuffle(rng);

    let mut report = PlacementReport::default();
    for (category, size) in queue {
        let (_, pass) = place_greedy(rng, scene.free_cells(), 1, |cell, rng| {
            let rotation = Orientation::HORIZONTAL[rng.gen_range(0..4)];
            scene.add_object(Object::new(category, cell, rotation, size))
        });
        report.merge(&pass);
    }

    debug!(
        "Objects: placed {}/{}, {} free cells left",
        report.placed,
        report.requested,
        scene.navigable().count()
    );
    report
}
