//! Action mesh asset parsing.
//!
//! The asset is a JSON array of `{ "time": f, "landmarks": [{x, y, z, visibility}, ...] }`
//! produced by the offline video analysis job. Fetching and caching the file is
//! the caller's job; this module only turns bytes into an [`ActionMesh`].

use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

use super::checkpoint::{ActionMesh, ActionMeshCheckpoint};
use crate::pose::{Landmark, LandmarkIndex, Pose};

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("failed to read action mesh: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid action mesh JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("action mesh contains no usable checkpoints")]
    Empty,
}

impl MeshError {
    /// Whether fetching the asset again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MeshError::Io(_))
    }
}

/// On-disk checkpoint before landmark count validation.
#[derive(Debug, Deserialize)]
struct RawCheckpoint {
    time: f32,
    landmarks: Vec<Landmark>,
}

/// Load an action mesh from a JSON file.
pub fn load_action_mesh<P: AsRef<Path>>(path: P) -> Result<ActionMesh, MeshError> {
    let file = File::open(path.as_ref())?;
    read_action_mesh(BufReader::new(file))
}

/// Parse an action mesh from any reader.
pub fn read_action_mesh<R: Read>(reader: R) -> Result<ActionMesh, MeshError> {
    let raw: Vec<RawCheckpoint> = serde_json::from_reader(reader)?;
    build_mesh(raw)
}

/// Parse an action mesh from a JSON string.
pub fn parse_action_mesh(json: &str) -> Result<ActionMesh, MeshError> {
    let raw: Vec<RawCheckpoint> = serde_json::from_str(json)?;
    build_mesh(raw)
}

fn build_mesh(raw: Vec<RawCheckpoint>) -> Result<ActionMesh, MeshError> {
    let total = raw.len();
    let checkpoints: Vec<ActionMeshCheckpoint> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, cp)| match Pose::from_slice(&cp.landmarks) {
            Some(pose) => Some(ActionMeshCheckpoint::new(cp.time, pose)),
            None => {
                log::warn!(
                    "skipping checkpoint #{} at {:.2}s: {} landmarks (expected {})",
                    i,
                    cp.time,
                    cp.landmarks.len(),
                    LandmarkIndex::COUNT
                );
                None
            }
        })
        .collect();

    if checkpoints.is_empty() {
        return Err(MeshError::Empty);
    }

    log::info!(
        "loaded action mesh: {} checkpoints ({} skipped)",
        checkpoints.len(),
        total - checkpoints.len()
    );
    Ok(ActionMesh::new(checkpoints))
}
