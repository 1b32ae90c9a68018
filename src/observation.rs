//! Recorded live-pose observations.
//!
//! One JSON object per line: `{"time": 1.25, "landmarks": [...]}`. A missing or
//! `null` `landmarks` field means the detector found nobody on that tick.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::pose::Landmark;

#[derive(Error, Debug)]
pub enum ObservationError {
    #[error("failed to read observations: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid observation on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// 参照動画の再生時刻（秒）
    pub time: f32,
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
}

pub fn load_observations<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>, ObservationError> {
    let file = File::open(path.as_ref())?;
    read_observations(BufReader::new(file))
}

/// 空行は読み飛ばす
pub fn read_observations<R: BufRead>(reader: R) -> Result<Vec<Observation>, ObservationError> {
    let mut observations = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let observation = serde_json::from_str(trimmed)
            .map_err(|source| ObservationError::Parse { line: i + 1, source })?;
        observations.push(observation);
    }
    Ok(observations)
}
