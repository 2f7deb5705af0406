//! Generation configuration.
//!
//! Mirrors the JSON document the batch generator reads: one section per
//! generation pass plus the number of scene variants per layout.
//!
//! ```
//! use roomgen_core::config::{validate_config, SceneConfig};
//!
//! let mut config = SceneConfig::default();
//! config.layout.max_patch_size = (18, 20);
//! let errors = validate_config(&config);
//! assert_eq!(errors.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Complete configuration for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub layout: LayoutConfig,
    pub textures: TextureConfig,
    pub lighting: LightingConfig,
    pub objects: ObjectsConfig,
    pub viewpoints: ViewpointConfig,
    /// Scene variants generated per layout (different textures, objects, lights)
    pub variants: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            textures: TextureConfig::default(),
            lighting: LightingConfig::default(),
            objects: ObjectsConfig::default(),
            viewpoints: ViewpointConfig::default(),
            variants: 1,
        }
    }
}

impl SceneConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Floor-plan synthesis parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub min_patches: u32,
    pub max_patches: u32,
    /// Smallest patch (rows, cols); multiples of 4
    pub min_patch_size: (usize, usize),
    /// Largest patch (rows, cols); multiples of 4. Also the seed patch size.
    pub max_patch_size: (usize, usize),
    /// Side of the square canvas
    pub canvas_size: usize,
    /// Slide attempts before giving up on reaching the patch count
    pub max_slide_attempts: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_patches: 3,
            max_patches: 5,
            min_patch_size: (8, 8),
            max_patch_size: (20, 20),
            canvas_size: 100,
            max_slide_attempts: 10_000,
        }
    }
}

/// Texture id assignment for floor, ceiling and walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TextureConfig {
    /// Inclusive id ranges; every wall draws its own id
    Random {
        floor_range: (u32, u32),
        ceiling_range: (u32, u32),
        wall_range: (u32, u32),
    },
    Fixed { floor: u32, ceiling: u32, wall: u32 },
}

impl Default for TextureConfig {
    fn default() -> Self {
        TextureConfig::Random {
            floor_range: (0, 0),
            ceiling_range: (0, 0),
            wall_range: (0, 0),
        }
    }
}

/// Light placement strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LightingConfig {
    /// Padded random placement, one light per `tiles_to_light` floor cells
    Random {
        tiles_to_light_range: (u32, u32),
        min_light_padding: usize,
        min_boundary_padding: usize,
        intensity_range: (f32, f32),
        #[serde(default)]
        radius_range: Option<(f32, f32)>,
        height: f32,
    },
    /// Regular lattice with spacing `interval`
    Grid {
        interval: usize,
        intensity: f32,
        #[serde(default)]
        radius: Option<f32>,
        height: f32,
    },
}

impl Default for LightingConfig {
    fn default() -> Self {
        LightingConfig::Random {
            tiles_to_light_range: (80, 100),
            min_light_padding: 5,
            min_boundary_padding: 1,
            intensity_range: (0.75, 1.0),
            radius_range: None,
            height: 1.75,
        }
    }
}

/// Furniture categories; the index in `categories` is the object category id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectsConfig {
    pub categories: Vec<ObjectCategory>,
}

impl Default for ObjectsConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                ObjectCategory {
                    count_range: (0, 2),
                    size: (4, 2),
                },
                ObjectCategory {
                    count_range: (1, 3),
                    size: (2, 2),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCategory {
    /// Inclusive number of instances per scene
    pub count_range: (u32, u32),
    /// Footprint (width, depth), both even
    pub size: (usize, usize),
}

/// Where viewpoint cameras look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fixation {
    /// Centre of the floor plan's bounding box
    Centre,
    /// One random point on the outer grid edge per scene
    Edge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewpointConfig {
    pub count: u32,
    /// Minimum Chebyshev distance between viewpoints
    pub min_padding: usize,
    /// Minimum Chebyshev distance from walls and objects
    pub boundary_padding: usize,
    pub height_range: (f32, f32),
    /// Horizon (pitch) drawn from ±this many degrees
    pub max_horizon_offset: f32,
    /// `None` aims each camera at a random floor cell
    pub fixation: Option<Fixation>,
    /// Yaw jitter drawn from ±this many degrees
    pub max_fixation_offset: f32,
}

impl Default for ViewpointConfig {
    fn default() -> Self {
        Self {
            count: 10,
            min_padding: 1,
            boundary_padding: 1,
            height_range: (1.0, 1.0),
            max_horizon_offset: 15.0,
            fixation: None,
            max_fixation_offset: 15.0,
        }
    }
}

// ── Validation ─────────────────────────────────────────────────────────

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &SceneConfig) -> Vec<ConfigError> {
    let mut errors = validate_layout(&config.layout);
    validate_textures(&config.textures, &mut errors);
    validate_lighting(&config.lighting, &mut errors);

    let canvas = config.layout.canvas_size;
    if let LightingConfig::Random {
        min_light_padding,
        min_boundary_padding,
        ..
    } = &config.lighting
    {
        check_padding("min_light_padding", *min_light_padding, canvas, &mut errors);
        check_padding("min_boundary_padding", *min_boundary_padding, canvas, &mut errors);
    }

    for (category, c) in config.objects.categories.iter().enumerate() {
        check_count_range("object count", c.count_range, &mut errors);
        let (w, d) = c.size;
        if w == 0 || d == 0 || w % 2 != 0 || d % 2 != 0 {
            errors.push(ConfigError::OddObjectSize {
                category,
                size: c.size,
            });
        }
    }

    let v = &config.viewpoints;
    check_padding("viewpoint min_padding", v.min_padding, canvas, &mut errors);
    check_padding("viewpoint boundary_padding", v.boundary_padding, canvas, &mut errors);
    check_float_range("height", v.height_range, &mut errors);
    if !(v.max_horizon_offset >= 0.0) {
        errors.push(ConfigError::InvalidRange { field: "horizon" });
    }
    if !(v.max_fixation_offset >= 0.0) {
        errors.push(ConfigError::InvalidRange { field: "fixation offset" });
    }

    if config.variants == 0 {
        errors.push(ConfigError::ZeroVariants);
    }

    errors
}

/// Layout rules only; synthesis checks these before touching the canvas.
pub fn validate_layout(layout: &LayoutConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    for (field, size) in [
        ("min_patch_size", layout.min_patch_size),
        ("max_patch_size", layout.max_patch_size),
    ] {
        if size.0 == 0 || size.1 == 0 || size.0 % 4 != 0 || size.1 % 4 != 0 {
            errors.push(ConfigError::PatchSizeNotMultipleOfFour { field, size });
        }
    }
    let (min, max) = (layout.min_patch_size, layout.max_patch_size);
    if min.0 > max.0 || min.1 > max.1 {
        errors.push(ConfigError::PatchSizeRange { min, max });
    }
    // The seed patch may be placed either way round
    if max.0.max(max.1) > layout.canvas_size {
        errors.push(ConfigError::PatchLargerThanCanvas {
            size: max,
            canvas: layout.canvas_size,
        });
    }
    if layout.min_patches == 0 || layout.min_patches > layout.max_patches {
        errors.push(ConfigError::PatchCountRange {
            min: layout.min_patches,
            max: layout.max_patches,
        });
    }

    errors
}

fn validate_textures(textures: &TextureConfig, errors: &mut Vec<ConfigError>) {
    if let TextureConfig::Random {
        floor_range,
        ceiling_range,
        wall_range,
    } = textures
    {
        check_count_range("floor texture", *floor_range, errors);
        check_count_range("ceiling texture", *ceiling_range, errors);
        check_count_range("wall texture", *wall_range, errors);
    }
}

fn validate_lighting(lighting: &LightingConfig, errors: &mut Vec<ConfigError>) {
    match lighting {
        LightingConfig::Random {
            tiles_to_light_range,
            intensity_range,
            radius_range,
            ..
        } => {
            check_count_range("tiles_to_light", *tiles_to_light_range, errors);
            if tiles_to_light_range.0 == 0 {
                errors.push(ConfigError::ZeroTilesPerLight);
            }
            check_float_range("intensity", *intensity_range, errors);
            if !(intensity_range.0 > 0.0) {
                errors.push(ConfigError::NonPositiveIntensity);
            }
            if let Some(radius) = radius_range {
                check_float_range("radius", *radius, errors);
                if radius.0 < 0.0 {
                    errors.push(ConfigError::NegativeRadius);
                }
            }
        }
        LightingConfig::Grid {
            interval,
            intensity,
            radius,
            ..
        } => {
            if *interval == 0 {
                errors.push(ConfigError::ZeroLightInterval);
            }
            if !(*intensity > 0.0) {
                errors.push(ConfigError::NonPositiveIntensity);
            }
            if radius.is_some_and(|r| r < 0.0) {
                errors.push(ConfigError::NegativeRadius);
            }
        }
    }
}

fn check_count_range(field: &'static str, (min, max): (u32, u32), errors: &mut Vec<ConfigError>) {
    if min > max {
        errors.push(ConfigError::EmptyRange { field, min, max });
    }
}

fn check_padding(field: &'static str, padding: usize, canvas: usize, errors: &mut Vec<ConfigError>) {
    if padding > canvas {
        errors.push(ConfigError::PaddingTooLarge {
            field,
            padding,
            canvas,
        });
    }
}

fn check_float_range(field: &'static str, (min, max): (f32, f32), errors: &mut Vec<ConfigError>) {
    // Also rejects NaN bounds
    if !(min <= max) || !min.is_finite() || !max.is_finite() {
        errors.push(ConfigError::InvalidRange { field });
    }
}
