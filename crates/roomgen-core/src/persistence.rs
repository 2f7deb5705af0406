//! Save/Load for generated scene samples
//!
//! Uses bincode for the compact on-disk dataset format and JSON for the
//! export handed to the renderer.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::components::SceneSamples;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Versioned envelope around one layout's samples
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    pub samples: SceneSamples,
}

/// Save samples to a writer
pub fn save_samples<W: Write>(writer: W, samples: &SceneSamples) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        samples: samples.clone(),
    };
    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load samples from a reader
pub fn load_samples<R: Read>(reader: R) -> Result<SceneSamples, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;
    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }
    Ok(save_data.samples)
}

/// Write samples as pretty-printed JSON
pub fn write_samples_json<W: Write>(writer: W, samples: &SceneSamples) -> Result<(), SaveError> {
    serde_json::to_writer_pretty(writer, samples)?;
    Ok(())
}

pub fn read_samples_json<R: Read>(reader: R) -> Result<SceneSamples, SaveError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Error type for save/load operations
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::Json(e) => write!(f, "JSON error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, SceneConfig};
    use crate::engine::SceneGenerator;

    fn samples() -> SceneSamples {
        let config = SceneConfig {
            layout: LayoutConfig {
                canvas_size: 48,
                max_patch_size: (16, 16),
                ..Default::default()
            },
            variants: 2,
            ..Default::default()
        };
        let mut generator = SceneGenerator::new(config, 13).expect("valid config");
        generator.generate().expect("generation failed")
    }

    #[test]
    fn test_save_load_roundtrip() {
        let original = samples();

        let mut save_buffer = Vec::new();
        save_samples(&mut save_buffer, &original).expect("Save failed");
        let loaded = load_samples(&save_buffer[..]).expect("Load failed");

        assert_eq!(loaded, original);
        assert_eq!(loaded.scenes[1].navigable(), original.scenes[1].navigable());
    }

    #[test]
    fn test_version_mismatch() {
        let data = SaveData {
            version: SAVE_VERSION + 1,
            samples: samples(),
        };
        let bytes = bincode::serialize(&data).unwrap();
        match load_samples(&bytes[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_json_export_readable() {
        let original = samples();
        let mut buffer = Vec::new();
        write_samples_json(&mut buffer, &original).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert!(value["scenes"][0]["walls"].as_array().is_some_and(|w| w.len() >= 4));
        assert!(value["viewpoints"].is_array());

        let loaded = read_samples_json(&buffer[..]).unwrap();
        assert_eq!(loaded.scenes.len(), 2);
        assert_eq!(loaded.scenes[0].floor_plan(), original.scenes[0].floor_plan());
    }

    #[test]
    fn test_truncated_file_is_an_error() {
        let mut save_buffer = Vec::new();
        save_samples(&mut save_buffer, &samples()).unwrap();
        save_buffer.truncate(save_buffer.len() / 2);
        assert!(matches!(load_samples(&save_buffer[..]), Err(SaveError::Bincode(_))));
    }
}
