use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::detection::domain::landmark_transformer::DisplayPosition;
use crate::detection::domain::raw_pose::RawLandmark;

/// One display-space landmark as handed to the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub landmark_type: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Ordered landmark records for one frame. Serializes as a plain JSON array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoseResult(Vec<LandmarkRecord>);

impl PoseResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn into_vec(self) -> Vec<LandmarkRecord> {
        self.0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Deref for PoseResult {
    type Target = [LandmarkRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<LandmarkRecord>> for PoseResult {
    fn from(records: Vec<LandmarkRecord>) -> Self {
        Self(records)
    }
}

impl IntoIterator for PoseResult {
    type Item = LandmarkRecord;
    type IntoIter = std::vec::IntoIter<LandmarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Stamps every transformed landmark with the frame timestamp, keeping the
/// detector's order. No reordering, no deduplication.
pub fn marshal<'a, I>(timestamp: i64, landmarks: I) -> PoseResult
where
    I: IntoIterator<Item = (&'a RawLandmark, DisplayPosition)>,
{
    landmarks
        .into_iter()
        .map(|(raw, pos)| LandmarkRecord {
            timestamp,
            landmark_type: raw.landmark_type.id(),
            x: pos.x,
            y: pos.y,
            z: pos.z,
        })
        .collect::<Vec<_>>()
        .into()
}
