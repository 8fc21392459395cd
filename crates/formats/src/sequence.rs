use std::collections::BTreeSet;
use std::fmt;

use foundation::GeometryError;
use foundation::math::{GeoPoint, ReferencePosition};
use serde::{Deserialize, Deserializer, Serialize};

/// Eye height added to a pano's ground elevation when the viewer stands there.
pub const CAMERA_HEIGHT_M: f64 = 1.5;

/// Sequence id given to a bare array of panos.
pub const DEFAULT_SEQID: u64 = 1;

/// One panorama as described by a sequence provider. Angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanoRecord {
    pub panoid: u64,
    #[serde(deserialize_with = "number_or_string")]
    pub lon: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub ele: f64,
    #[serde(default)]
    pub pan: f64,
    #[serde(default)]
    pub tilt: f64,
    #[serde(default)]
    pub roll: f64,
    #[serde(default, rename = "poseheadingdegrees")]
    pub pose_heading_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PanoRecord {
    /// Ground position of the pano, as a path/marker point.
    pub fn geo_point(&self) -> GeoPoint {
        GeoPoint::with_elevation(self.lon, self.lat, self.ele)
    }

    /// Where the viewer's eye is when this pano is shown.
    pub fn camera_position(&self) -> Result<ReferencePosition, GeometryError> {
        ReferencePosition::new(self.lon, self.lat, self.ele + CAMERA_HEIGHT_M)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub seqid: u64,
    pub panos: Vec<PanoRecord>,
}

#[derive(Debug)]
pub enum SequenceError {
    Parse(serde_json::Error),
    Empty,
    DuplicatePano { panoid: u64 },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::Parse(err) => write!(f, "sequence parse error: {err}"),
            SequenceError::Empty => write!(f, "sequence has no panoramas"),
            SequenceError::DuplicatePano { panoid } => {
                write!(f, "pano {panoid} appears more than once")
            }
        }
    }
}

impl std::error::Error for SequenceError {}

impl Sequence {
    /// Parses either `{"seqid": .., "panos": [..]}` or a bare array of panos.
    pub fn from_json_str(payload: &str) -> Result<Self, SequenceError> {
        let value: serde_json::Value =
            serde_json::from_str(payload).map_err(SequenceError::Parse)?;
        let seq = if value.is_array() {
            Sequence {
                seqid: DEFAULT_SEQID,
                panos: serde_json::from_value(value).map_err(SequenceError::Parse)?,
            }
        } else {
            serde_json::from_value(value).map_err(SequenceError::Parse)?
        };
        seq.validate()?;
        Ok(seq)
    }

    fn validate(&self) -> Result<(), SequenceError> {
        if self.panos.is_empty() {
            return Err(SequenceError::Empty);
        }
        let mut seen = BTreeSet::new();
        for p in &self.panos {
            if !seen.insert(p.panoid) {
                return Err(SequenceError::DuplicatePano { panoid: p.panoid });
            }
        }
        Ok(())
    }

    /// Position of `panoid` within the sequence.
    pub fn index_of(&self, panoid: u64) -> Option<usize> {
        self.panos.iter().position(|p| p.panoid == panoid)
    }

    pub fn get(&self, panoid: u64) -> Option<&PanoRecord> {
        self.panos.iter().find(|p| p.panoid == panoid)
    }

    /// The sequence as a path centerline, in sequence order.
    pub fn points(&self) -> Vec<GeoPoint> {
        self.panos.iter().map(PanoRecord::geo_point).collect()
    }
}

// Providers disagree on whether coordinates are numbers or numeric strings.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(v) => Ok(v),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
