//! Error types for layout generation.
//!
//! Structural errors abort the scene being generated. Placement shortfalls are
//! not errors at all; see [`crate::generation::PlacementReport`].

use crate::grid::Cell;

/// A single configuration rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Patch dimension is not a positive multiple of 4.
    PatchSizeNotMultipleOfFour { field: &'static str, size: (usize, usize) },
    /// Minimum patch size exceeds the maximum on some axis.
    PatchSizeRange { min: (usize, usize), max: (usize, usize) },
    /// Largest patch does not fit on the canvas.
    PatchLargerThanCanvas { size: (usize, usize), canvas: usize },
    /// Patch count range is empty or starts at zero.
    PatchCountRange { min: u32, max: u32 },
    /// An inclusive integer range with min > max.
    EmptyRange { field: &'static str, min: u32, max: u32 },
    /// A float range with min > max, or NaN bounds.
    InvalidRange { field: &'static str },
    /// Object footprints must have even, non-zero sides.
    OddObjectSize { category: usize, size: (usize, usize) },
    /// Light intensity must be strictly positive.
    NonPositiveIntensity,
    /// Light radius must not be negative.
    NegativeRadius,
    /// Zero tiles per light would divide by zero.
    ZeroTilesPerLight,
    /// Grid lighting needs a non-zero lattice spacing.
    ZeroLightInterval,
    /// At least one scene variant is required.
    ZeroVariants,
    /// Floor plan has navigable cells in a strip narrower than two cells.
    ThinFloorPlan,
    /// Floor plan splits into more than one 4-connected region.
    DisconnectedFloorPlan,
    /// A padding distance exceeds the canvas side.
    PaddingTooLarge { field: &'static str, padding: usize, canvas: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::PatchSizeNotMultipleOfFour { field, size } => write!(
                f,
                "{} {}x{} must be a positive multiple of 4 on both axes",
                field, size.0, size.1
            ),
            ConfigError::PatchSizeRange { min, max } => write!(
                f,
                "min_patch_size {}x{} exceeds max_patch_size {}x{}",
                min.0, min.1, max.0, max.1
            ),
            ConfigError::PatchLargerThanCanvas { size, canvas } => write!(
                f,
                "patch {}x{} does not fit on a {}x{} canvas",
                size.0, size.1, canvas, canvas
            ),
            ConfigError::PatchCountRange { min, max } => {
                write!(f, "patch count range {}..={} is invalid", min, max)
            }
            ConfigError::EmptyRange { field, min, max } => {
                write!(f, "{} range {}..={} is empty", field, min, max)
            }
            ConfigError::InvalidRange { field } => write!(f, "{} range is invalid", field),
            ConfigError::OddObjectSize { category, size } => write!(
                f,
                "object category {} size {}x{} must be even and non-zero",
                category, size.0, size.1
            ),
            ConfigError::NonPositiveIntensity => write!(f, "light intensity must be > 0"),
            ConfigError::NegativeRadius => write!(f, "light radius must be >= 0"),
            ConfigError::ZeroTilesPerLight => write!(f, "tiles_to_light must be >= 1"),
            ConfigError::ZeroLightInterval => write!(f, "grid lighting interval must be >= 1"),
            ConfigError::ZeroVariants => write!(f, "at least one scene variant is required"),
            ConfigError::ThinFloorPlan => {
                write!(f, "floor plan contains a region narrower than two cells")
            }
            ConfigError::DisconnectedFloorPlan => {
                write!(f, "floor plan is not a single connected region")
            }
            ConfigError::PaddingTooLarge {
                field,
                padding,
                canvas,
            } => write!(
                f,
                "{} {} exceeds the canvas size {}",
                field, padding, canvas
            ),
        }
    }
}

/// Errors that abort generation of a single scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Configuration or input grid rejected before any work was done.
    InvalidConfiguration(Vec<ConfigError>),
    /// The grid has no navigable cell to squeeze or trace.
    EmptyFloorPlan,
    /// The boundary walk did not return to its start within the step budget.
    MalformedFloorPlan { steps: usize, start: Cell },
}

impl From<ConfigError> for LayoutError {
    fn from(e: ConfigError) -> Self {
        LayoutError::InvalidConfiguration(vec![e])
    }
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::InvalidConfiguration(errors) => {
                write!(f, "Invalid configuration: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", e)?;
                }
                Ok(())
            }
            LayoutError::EmptyFloorPlan => write!(f, "Floor plan has no navigable cells"),
            LayoutError::MalformedFloorPlan { steps, start } => write!(
                f,
                "Boundary trace from ({}, {}) did not close after {} steps",
                start.0, start.1, steps
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for LayoutError {}

/// Why a single placement candidate was rejected.
///
/// Never escapes the placement engine: rejections drive the retry loop and
/// are tallied in the pass report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementError {
    /// Another item of the same kind is within the padding distance.
    TooClose,
    /// A wall (or object, where excluded) is within the boundary padding.
    NearBoundary,
    /// The rotated object footprint leaves the navigable area.
    ObjectDoesNotFit,
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::TooClose => write!(f, "too close to a placed item"),
            PlacementError::NearBoundary => write!(f, "too close to the boundary"),
            PlacementError::ObjectDoesNotFit => write!(f, "object does not fit"),
        }
    }
}

impl std::error::Error for PlacementError {}
