use chrono::{DateTime, Utc};
use geoprompt_core::models::FeatureCollection;
use serde::{Deserialize, Serialize};

/// Layer identifier: creation time in milliseconds, bumped to stay strictly
/// increasing within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl LayerId {
    /// Next id after `previous`, based on `now`
    pub fn after(previous: Option<LayerId>, now: DateTime<Utc>) -> Self {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        match previous {
            Some(LayerId(last)) if millis <= last => LayerId(last + 1),
            _ => LayerId(millis),
        }
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LayerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(LayerId)
    }
}

/// One query's results, tracked as a unit on the map.
///
/// Color is not stored; it follows from the layer's position in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub data: FeatureCollection,
    pub timestamp: DateTime<Utc>,
    pub visible: bool,
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>, data: FeatureCollection, timestamp: DateTime<Utc>) -> Self {
        Self { id, name: name.into(), data, timestamp, visible: true }
    }

    pub fn feature_count(&self) -> usize {
        self.data.len()
    }
}
