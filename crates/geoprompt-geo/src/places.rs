//! Place name resolution for "center the map on X" requests.

use std::time::Duration;

use async_trait::async_trait;
use geoprompt_core::models::LatLon;
use geoprompt_core::{GeopromptError, Result};
use serde::Deserialize;

/// Known Estonian cities: (name, lat, lon)
pub const KNOWN_CITIES: [(&str, f64, f64); 12] = [
    ("Tallinn", 59.4370, 24.7536),
    ("Tartu", 58.3780, 26.7290),
    ("Pärnu", 58.3859, 24.4971),
    ("Narva", 59.3772, 28.1903),
    ("Viljandi", 58.3639, 25.5900),
    ("Rakvere", 59.3464, 26.3550),
    ("Kuressaare", 58.2527, 22.4853),
    ("Haapsalu", 58.9431, 23.5362),
    ("Võru", 57.8339, 27.0064),
    ("Jõhvi", 59.3592, 27.4099),
    ("Valga", 57.7770, 26.0469),
    ("Paide", 58.8853, 25.5625),
];

/// Lowercase and fold Estonian diacritics to ASCII ("Pärnu" -> "parnu")
pub fn fold_place_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'ä' | 'á' | 'à' => 'a',
            'õ' | 'ö' | 'ó' => 'o',
            'ü' | 'ú' => 'u',
            'é' => 'e',
            'š' => 's',
            'ž' => 'z',
            other => other,
        })
        .collect()
}

/// Look a name up in [`KNOWN_CITIES`], case-insensitively and accepting
/// ASCII spellings.
pub fn known_city(name: &str) -> Option<LatLon> {
    let folded = fold_place_name(name);
    KNOWN_CITIES
        .iter()
        .find(|(city, _, _)| fold_place_name(city) == folded)
        .map(|(_, lat, lon)| LatLon::new(*lat, *lon))
}

/// Port for turning a place name into a position
#[async_trait]
pub trait PlaceResolver: Send + Sync {
    /// Resolve a place name; `Ok(None)` when nothing matches
    async fn resolve(&self, name: &str) -> Result<Option<LatLon>>;

    /// Short identifier for logs
    fn name(&self) -> &str;
}

/// Resolver backed by the built-in city table
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPlaceResolver;

#[async_trait]
impl PlaceResolver for StaticPlaceResolver {
    async fn resolve(&self, name: &str) -> Result<Option<LatLon>> {
        Ok(known_city(name))
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Resolver backed by a Nominatim search endpoint
pub struct NominatimResolver {
    /// Base URL (e.g., "https://nominatim.openstreetmap.org")
    base_url: String,

    client: reqwest::Client,
}

impl NominatimResolver {
    pub const PUBLIC_URL: &'static str = "https://nominatim.openstreetmap.org";

    /// Create a resolver with a request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("geoprompt/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeopromptError::PlaceResolution {
                reason: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { base_url: base_url.into().trim_end_matches('/').to_string(), client })
    }

    /// Create against the public OpenStreetMap instance
    pub fn public(timeout: Duration) -> Result<Self> {
        Self::new(Self::PUBLIC_URL, timeout)
    }
}

/// One Nominatim search hit; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

#[async_trait]
impl PlaceResolver for NominatimResolver {
    async fn resolve(&self, name: &str) -> Result<Option<LatLon>> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/search", self.base_url),
            &[("q", name), ("format", "json"), ("limit", "1")],
        )
        .map_err(|e| GeopromptError::PlaceResolution {
            reason: format!("Invalid geocoder URL '{}': {}", self.base_url, e),
        })?;

        let response = self.client.get(url).send().await.map_err(|e| {
            GeopromptError::PlaceResolution {
                reason: format!("Failed to reach geocoder at {}: {}", self.base_url, e),
            }
        })?;

        if !response.status().is_success() {
            return Err(GeopromptError::PlaceResolution {
                reason: format!("Geocoder returned {}", response.status()),
            });
        }

        let places: Vec<NominatimPlace> =
            response.json().await.map_err(|e| GeopromptError::PlaceResolution {
                reason: format!("Failed to parse geocoder response: {}", e),
            })?;

        let Some(place) = places.into_iter().next() else {
            tracing::debug!(place = %name, "geocoder returned no match");
            return Ok(None);
        };

        match (place.lat.parse::<f64>(), place.lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => Ok(Some(LatLon::new(lat, lon))),
            _ => Err(GeopromptError::PlaceResolution {
                reason: format!("Geocoder returned non-numeric coordinates for '{}'", name),
            }),
        }
    }

    fn name(&self) -> &str {
        "nominatim"
    }
}
