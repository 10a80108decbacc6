//! GeoJSON types for subfault polygons.
//!
//! The collection carries a non-standard `metadata.epicenter` member with
//! the event summary alongside the usual `features` array.

use fault_common::Event;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::corners::CornerRing;
use crate::GeoJsonResult;

/// Per-feature property map.
pub type Properties = Map<String, Value>;

/// Event summary written under `metadata.epicenter`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Epicenter {
    pub location: String,
    /// `%Y-%m-%dT%H:%M:%S.%fZ` timestamp or `UNK`
    pub date: String,
    /// km
    pub depth: f64,
    pub moment: f64,
    pub mag: f64,
    pub lon: f64,
    pub lat: f64,
}

impl From<&Event> for Epicenter {
    fn from(event: &Event) -> Self {
        Self {
            location: event.location.clone(),
            date: event.date.to_string(),
            depth: event.depth,
            moment: event.moment,
            mag: event.magnitude,
            lon: event.lon,
            lat: event.lat,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub epicenter: Epicenter,
}

/// Subfault geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum FaultGeometry {
    /// One exterior ring of `[lon, lat, depth_m]` triples.
    Polygon { coordinates: Vec<Vec<[f64; 3]>> },
}

impl FaultGeometry {
    pub fn polygon(ring: CornerRing) -> Self {
        FaultGeometry::Polygon {
            coordinates: vec![ring.to_vec()],
        }
    }

    /// Exterior ring.
    pub fn exterior(&self) -> &[[f64; 3]] {
        match self {
            FaultGeometry::Polygon { coordinates } => {
                coordinates.first().map(Vec::as_slice).unwrap_or(&[])
            }
        }
    }
}

/// One subfault cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaultFeature {
    #[serde(rename = "type")]
    pub type_: String,
    pub properties: Properties,
    pub geometry: FaultGeometry,
}

impl FaultFeature {
    pub fn new(geometry: FaultGeometry, properties: Properties) -> Self {
        Self {
            type_: "Feature".to_string(),
            properties,
            geometry,
        }
    }

    /// Numeric property by name.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.properties.get(name).and_then(Value::as_f64)
    }
}

/// All subfault cells of a fault with its event metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaultFeatureCollection {
    #[serde(rename = "type")]
    pub type_: String,
    pub metadata: Metadata,
    pub features: Vec<FaultFeature>,
}

impl FaultFeatureCollection {
    pub fn new(event: &Event, features: Vec<FaultFeature>) -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            metadata: Metadata {
                epicenter: Epicenter::from(event),
            },
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self, pretty: bool) -> GeoJsonResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
