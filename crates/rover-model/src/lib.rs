//! Records returned by the Mars Rover Photos API.
//!
//! Field names follow the API's snake_case JSON so the types deserialize
//! straight from a response body and serialize back to the same shape.

use std::fmt;

use chrono::NaiveDate;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// One captured image. Never mutated once acquired.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PhotoRecord {
    pub id: u64,
    /// Mission day the photo was taken on.
    pub sol: u32,
    pub camera: Camera,
    pub img_src: String,
    pub earth_date: NaiveDate,
    pub rover: Rover,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Camera {
    #[serde(default)]
    pub id: u64,
    /// Short name such as `FHAZ` or `MAST`.
    pub name: String,
    #[serde(default)]
    pub rover_id: u64,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rover {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub status: RoverStatus,
    pub launch_date: NaiveDate,
    pub landing_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sol: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_photos: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoverStatus {
    Active,
    Complete,
    Other(String),
}

impl RoverStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Complete => "complete",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for RoverStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "complete" => Self::Complete,
            _ => Self::Other(raw),
        }
    }
}

impl fmt::Display for RoverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RoverStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}

impl Serialize for RoverStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl PhotoRecord {
    /// One-line description used by list views.
    pub fn caption(&self) -> String {
        format!(
            "#{} {} sol {} ({}) {} / {}",
            self.id, self.rover.name, self.sol, self.earth_date, self.camera.name, self.camera.full_name
        )
    }
}
