//! Scene aggregate: one floor plan with its surfaces, objects and lights.

use serde::{Deserialize, Serialize};

use super::common::Surface;
use super::entities::{Light, Object, Viewpoint};
use crate::error::{ConfigError, LayoutError, PlacementError};
use crate::generation::{make_surfaces, plan_centre};
use crate::grid::{Cell, Grid};

/// A single room.
///
/// Keeps two grids: the squeezed floor plan the surfaces were traced from,
/// which never changes, and the navigable grid, which loses every placed
/// object's footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    floor_plan: Grid,
    navigable: Grid,
    pub floor: Surface,
    pub ceiling: Surface,
    /// Walls in traversal order around the perimeter
    pub walls: Vec<Surface>,
    objects: Vec<Object>,
    lights: Vec<Light>,
}

impl Scene {
    /// Squeeze a raw floor plan and derive floor, ceiling and walls from it.
    ///
    /// Rejects plans that fall apart into islands or have strips narrower
    /// than two cells.
    pub fn from_floor_plan(raw: &Grid) -> Result<Self, LayoutError> {
        let floor_plan = raw.squeeze()?;
        if !floor_plan.is_connected() {
            return Err(ConfigError::DisconnectedFloorPlan.into());
        }
        if floor_plan.has_thin_features() {
            return Err(ConfigError::ThinFloorPlan.into());
        }
        let surfaces = make_surfaces(&floor_plan)?;

        Ok(Self {
            navigable: floor_plan.clone(),
            floor_plan,
            floor: surfaces.floor,
            ceiling: surfaces.ceiling,
            walls: surfaces.walls,
            objects: Vec::new(),
            lights: Vec::new(),
        })
    }

    /// The squeezed floor plan, as it was before any object was placed.
    pub fn floor_plan(&self) -> &Grid {
        &self.floor_plan
    }

    /// Floor cells not covered by objects.
    pub fn navigable(&self) -> &Grid {
        &self.navigable
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Every floor cell, ignoring objects.
    pub fn floor_cells(&self) -> Vec<Cell> {
        self.floor_plan.cells().collect()
    }

    /// Floor cells still free of objects.
    pub fn free_cells(&self) -> Vec<Cell> {
        self.navigable.cells().collect()
    }

    /// Number of floor cells, ignoring objects.
    pub fn floor_area(&self) -> usize {
        self.floor_plan.count()
    }

    /// Whether the object's rotated footprint lies on free floor.
    pub fn fits(&self, object: &Object) -> bool {
        let footprint = object.footprint();
        !footprint.is_empty()
            && self.navigable.contains_rect(&footprint)
            && self.navigable.all(&footprint)
    }

    /// Place an object and remove its footprint from the navigable grid.
    pub fn add_object(&mut self, object: Object) -> Result<(), PlacementError> {
        if !self.fits(&object) {
            return Err(PlacementError::ObjectDoesNotFit);
        }
        self.navigable.fill(&object.footprint(), false);
        self.objects.push(object);
        Ok(())
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Centre of the bounding box of the floor cells.
    pub fn centre(&self) -> (f32, f32) {
        plan_centre(&self.floor_plan)
    }

    /// ASCII map of the floor plan, optionally with object footprints removed.
    pub fn render_plan(&self, with_objects: bool) -> String {
        if with_objects {
            self.navigable.to_string()
        } else {
            self.floor_plan.to_string()
        }
    }
}

/// Scene variants sharing one layout, plus viewpoints valid in all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSamples {
    pub scenes: Vec<Scene>,
    pub viewpoints: Vec<Viewpoint>,
}

impl SceneSamples {
    pub fn new(scenes: Vec<Scene>, viewpoints: Vec<Viewpoint>) -> Self {
        Self { scenes, viewpoints }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Orientation;
    use crate::grid::Rect;

    fn room() -> Scene {
        let mut canvas = Grid::new(20, 20);
        canvas.fill(&Rect::new(6, 6, 8, 8), true);
        Scene::from_floor_plan(&canvas).unwrap()
    }

    #[test]
    fn test_scene_squeezes_and_traces() {
        let scene = room();
        assert_eq!(scene.floor_plan().shape(), (10, 10));
        assert_eq!(scene.walls.len(), 4);
        assert_eq!(scene.floor_area(), 64);
        assert_eq!(scene.centre(), (4.5, 4.5));
    }

    #[test]
    fn test_object_shrinks_navigable_only() {
        let mut scene = room();
        let table = Object::new(1, (4, 4), Orientation::Left, (4, 2));
        scene.add_object(table).unwrap();
        assert_eq!(scene.navigable().count(), 64 - 8);
        assert_eq!(scene.floor_plan().count(), 64);
        assert_eq!(scene.objects().len(), 1);

        // Same spot is now taken
        let chair = Object::new(2, (4, 4), Orientation::Front, (2, 2));
        assert_eq!(scene.add_object(chair), Err(PlacementError::ObjectDoesNotFit));
        assert_eq!(scene.objects().len(), 1);
    }

    #[test]
    fn test_object_over_wall_does_not_fit() {
        let scene = room();
        let sofa = Object::new(0, (1, 4), Orientation::Left, (4, 2));
        assert!(!scene.fits(&sofa));
        let sofa = Object::new(0, (3, 4), Orientation::Left, (4, 2));
        assert!(scene.fits(&sofa));
    }

    #[test]
    fn test_thin_plan_rejected() {
        let mut canvas = Grid::new(10, 10);
        canvas.fill(&Rect::new(2, 2, 1, 6), true);
        assert_eq!(
            Scene::from_floor_plan(&canvas),
            Err(LayoutError::InvalidConfiguration(vec![ConfigError::ThinFloorPlan]))
        );
    }

    #[test]
    fn test_disconnected_plan_rejected() {
        let mut canvas = Grid::new(30, 30);
        canvas.fill(&Rect::new(2, 2, 4, 4), true);
        canvas.fill(&Rect::new(20, 20, 4, 4), true);
        assert_eq!(
            Scene::from_floor_plan(&canvas),
            Err(LayoutError::InvalidConfiguration(vec![
                ConfigError::DisconnectedFloorPlan
            ]))
        );

        // Touching only at a corner is not 4-connected either
        let pinched = Grid::from_ascii(
            "
            ......
            .##...
            .##...
            ...##.
            ...##.
            ......
            ",
        );
        assert_eq!(
            Scene::from_floor_plan(&pinched),
            Err(LayoutError::InvalidConfiguration(vec![
                ConfigError::DisconnectedFloorPlan
            ]))
        );
    }

    #[test]
    fn test_empty_plan_rejected() {
        assert_eq!(
            Scene::from_floor_plan(&Grid::new(10, 10)),
            Err(LayoutError::EmptyFloorPlan)
        );
    }
}
