//! Scene generator - main entry point for producing scene samples

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::{Scene, SceneSamples};
use crate::config::{validate_config, SceneConfig};
use crate::error::LayoutError;
use crate::generation::{
    apply_lighting, apply_textures, random_floor_plan, random_objects, random_viewpoints,
};

/// Seeded generator running every pass in order: floor plan, surfaces,
/// textures, objects, lights, viewpoints.
///
/// One random source is seeded at construction and threaded through every
/// pass, so a seed and configuration always reproduce the same samples.
pub struct SceneGenerator {
    config: SceneConfig,
    rng: StdRng,
    seed: u64,
    /// Layouts attempted so far
    generated: u64,
}

impl SceneGenerator {
    /// Validate `config` and seed the random source.
    pub fn new(config: SceneConfig, seed: u64) -> Result<Self, LayoutError> {
        let errors = validate_config(&config);
        if !errors.is_empty() {
            return Err(LayoutError::InvalidConfiguration(errors));
        }
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            seed,
            generated: 0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Layouts attempted so far, failed ones included.
    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Generate one layout and all its scene variants.
    pub fn generate(&mut self) -> Result<SceneSamples, LayoutError> {
        self.generated += 1;
        let config = &self.config;
        let rng = &mut self.rng;

        let raw = random_floor_plan(&config.layout, rng)?;
        let base = Scene::from_floor_plan(&raw)?;
        debug!(
            "Layout {}: {}x{} plan, {} walls\n{}",
            self.generated,
            base.floor_plan().rows(),
            base.floor_plan().cols(),
            base.walls.len(),
            base.floor_plan()
        );

        let mut scenes = Vec::with_capacity(config.variants as usize);
        for _ in 0..config.variants {
            let mut scene = base.clone();
            apply_textures(&mut scene, &config.textures, rng);
            let objects = random_objects(&mut scene, &config.objects, rng);
            if objects.is_short() {
                warn!("Only {}/{} objects fit", objects.placed, objects.requested);
            }
            apply_lighting(&mut scene, &config.lighting, rng);
            scenes.push(scene);
        }

        // Viewpoints must be valid in every variant
        let shared = scenes
            .iter()
            .fold(base.navigable().clone(), |acc, s| acc.intersect(s.navigable()));
        let (viewpoints, report) =
            random_viewpoints(&shared, base.floor_plan(), &config.viewpoints, rng);
        if report.is_short() {
            warn!("Only {}/{} viewpoints fit", report.placed, report.requested);
        }

        info!(
            "Layout {}: {} floor cells, {} variants, {} viewpoints",
            self.generated,
            base.floor_area(),
            scenes.len(),
            viewpoints.len()
        );
        Ok(SceneSamples::new(scenes, viewpoints))
    }

    /// Generate `count` layouts, skipping any that fail.
    pub fn generate_batch(&mut self, count: usize) -> Vec<SceneSamples> {
        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            match self.generate() {
                Ok(s) => samples.push(s),
                Err(e) => warn!("Skipping layout {}: {}", self.generated, e),
            }
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::error::ConfigError;

    fn small_config() -> SceneConfig {
        SceneConfig {
            layout: LayoutConfig {
                min_patches: 2,
                max_patches: 3,
                min_patch_size: (8, 8),
                max_patch_size: (12, 12),
                canvas_size: 40,
                ..Default::default()
            },
            variants: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_config_fails_before_generation() {
        let mut config = small_config();
        config.variants = 0;
        match SceneGenerator::new(config, 1) {
            Err(LayoutError::InvalidConfiguration(errors)) => {
                assert_eq!(errors, vec![ConfigError::ZeroVariants])
            }
            other => panic!("expected InvalidConfiguration, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_variants_share_layout() {
        let mut generator = SceneGenerator::new(small_config(), 42).unwrap();
        let samples = generator.generate().unwrap();
        assert_eq!(samples.scenes.len(), 3);
        let plan = samples.scenes[0].floor_plan();
        for scene in &samples.scenes {
            assert_eq!(scene.floor_plan(), plan);
            assert_eq!(scene.walls.len(), samples.scenes[0].walls.len());
        }
        for v in &samples.viewpoints {
            for scene in &samples.scenes {
                assert!(scene.navigable().is_navigable(v.location.cell()));
            }
        }
    }

    #[test]
    fn test_same_seed_same_samples() {
        let a = SceneGenerator::new(small_config(), 7).unwrap().generate_batch(3);
        let b = SceneGenerator::new(small_config(), 7).unwrap().generate_batch(3);
        assert_eq!(a.len(), 3);
        assert_eq!(a, b);
        let c = SceneGenerator::new(small_config(), 8).unwrap().generate_batch(3);
        assert_ne!(a, c);
    }

    #[test]
    fn test_batch_counts_attempts() {
        let mut generator = SceneGenerator::new(small_config(), 0).unwrap();
        let samples = generator.generate_batch(4);
        assert_eq!(samples.len(), 4);
        assert_eq!(generator.generated(), 4);
    }
}
