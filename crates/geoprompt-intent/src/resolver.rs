use std::sync::Arc;

use geoprompt_core::models::{DataType, LatLon, QueryIntent, DEFAULT_RADIUS_KM};
use geoprompt_geo::known_city;
use geoprompt_llm::Generator;
use serde::Serialize;

use crate::catalog::{describe_catalog, match_keyword};
use crate::patterns::{self, DirectiveKind};
use crate::prompt::build_prompt;
use crate::recovery::{self, RecoveryError};
use crate::sql::{template_query, DEFAULT_RESULT_LIMIT};

/// City used by the last-resort default intent
pub const DEFAULT_PLACE: &str = "Tartu";
const DEFAULT_CENTER: LatLon = LatLon { lat: 58.3780, lon: 26.7290 };

/// What the user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Move the map to a named place
    CenterOn { place: String },

    /// Describe what can be queried; nothing is executed
    Explain { text: String },

    /// Run a query
    Execute { intent: QueryIntent, source: IntentSource },
}

/// Which resolution tier produced an intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntentSource {
    /// Strict JSON from the reasoning service
    Generator,
    /// JSON recovered from a loosely formatted completion
    RecoveredJson,
    /// A canned catalog query
    Catalog { keyword: String },
    /// The deterministic SQL template (no reasoning service configured)
    Template,
    /// Nothing else worked
    Default,
}

impl IntentSource {
    /// Soft informational message for the user, when one is warranted
    pub fn notice(&self) -> Option<String> {
        match self {
            IntentSource::Generator | IntentSource::Template => None,
            IntentSource::RecoveredJson => {
                Some("The model's answer was loosely formatted; the query was recovered from it.".to_string())
            }
            IntentSource::Catalog { keyword } => {
                Some(format!("Using the ready-made \"{}\" query.", keyword))
            }
            IntentSource::Default => Some(format!(
                "Could not interpret the request, showing buildings near {} instead.",
                DEFAULT_PLACE
            )),
        }
    }
}

/// Tunables taken from configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverSettings {
    pub result_limit: u32,
    pub default_radius_km: f64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
            default_radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

/// Location, radius and dataset read from the request text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestHints {
    pub location: Option<String>,
    pub radius_km: Option<f64>,
    pub data_type: Option<DataType>,
}

impl RequestHints {
    pub fn read(text: &str) -> Self {
        Self {
            location: patterns::extract_location(text),
            radius_km: patterns::extract_radius(text),
            data_type: patterns::classify_dataset(text),
        }
    }
}

/// Buildings near Tartu within the default radius
pub fn default_intent(limit: u32) -> QueryIntent {
    let query = template_query(DataType::Buildings, Some((DEFAULT_CENTER, DEFAULT_RADIUS_KM)), limit);
    QueryIntent::new(DataType::Buildings, query)
        .with_location(DEFAULT_PLACE)
        .with_radius(DEFAULT_RADIUS_KM)
        .with_explanation(format!("Buildings within {} km of {}", DEFAULT_RADIUS_KM, DEFAULT_PLACE))
}

fn dataset_label(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Buildings => "Buildings",
        DataType::Roads => "Roads",
        DataType::Landuse => "Land use areas",
    }
}

/// Turns free text into a [`Directive`]. Never fails: every request ends in
/// some executable intent.
pub struct IntentResolver {
    generator: Option<Arc<dyn Generator>>,
    settings: ResolverSettings,
}

impl IntentResolver {
    /// Create a resolver, with or without a reasoning service
    pub fn new(generator: Option<Arc<dyn Generator>>, settings: ResolverSettings) -> Self {
        Self { generator, settings }
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Resolve a request
    pub async fn resolve(&self, text: &str) -> Directive {
        let text = text.trim();

        if let Some((kind, place)) = patterns::match_directive(text) {
            match (kind, place) {
                (DirectiveKind::CenterOn, Some(place)) => {
                    tracing::debug!(place = %place, "center directive");
                    return Directive::CenterOn { place };
                }
                _ => return Directive::Explain { text: describe_catalog() },
            }
        }

        let hints = RequestHints::read(text);
        let (intent, source) = match &self.generator {
            Some(generator) => self.resolve_with_generator(generator.as_ref(), text).await,
            None => self.resolve_offline(text, &hints),
        };

        tracing::info!(
            dataset = %intent.data_type,
            location = ?intent.location,
            radius_km = intent.radius,
            source = ?source,
            "resolved request"
        );
        Directive::Execute { intent, source }
    }

    /// Reasoning service, then fence stripping, strict parse, object
    /// recovery, catalog keyword, and finally the default intent.
    async fn resolve_with_generator(
        &self,
        generator: &dyn Generator,
        text: &str,
    ) -> (QueryIntent, IntentSource) {
        let prompt = build_prompt(text, self.settings.result_limit);

        match generator.generate(&prompt).await {
            Ok(completion) => {
                let body = recovery::strip_code_fences(&completion);

                match recovery::parse_strict(body) {
                    Ok(intent) => return (intent, IntentSource::Generator),
                    Err(e) => tracing::warn!(error = %e, "completion is not a strict intent"),
                }

                match recovery::recover_object(body) {
                    Ok(intent) => return (intent, IntentSource::RecoveredJson),
                    Err(e) => tracing::warn!(error = %e, "could not recover an intent from the completion"),
                }
            }
            Err(e) => {
                tracing::warn!(model = generator.model_name(), error = %e, "reasoning service failed");
            }
        }

        match catalog_intent(text) {
            Ok((intent, keyword)) => (intent, IntentSource::Catalog { keyword }),
            Err(e) => {
                tracing::warn!(error = %e, "falling back to the default intent");
                (default_intent(self.settings.result_limit), IntentSource::Default)
            }
        }
    }

    /// Dataset keyword, then catalog keyword, then buildings; SQL from the template.
    fn resolve_offline(&self, text: &str, hints: &RequestHints) -> (QueryIntent, IntentSource) {
        let data_type = match hints.data_type {
            Some(data_type) => data_type,
            None => match catalog_intent(text) {
                Ok((intent, keyword)) => return (intent, IntentSource::Catalog { keyword }),
                Err(_) => DataType::Buildings,
            },
        };

        (self.template_intent(data_type, hints), IntentSource::Template)
    }

    /// Template intent; the distance predicate is added only for known cities
    pub fn template_intent(&self, data_type: DataType, hints: &RequestHints) -> QueryIntent {
        let limit = self.settings.result_limit;
        let radius = match hints.radius_km {
            Some(radius) => radius,
            None if self.settings.default_radius_km > 0.0 => self.settings.default_radius_km,
            None => DEFAULT_RADIUS_KM,
        };
        let center = hints.location.as_deref().and_then(known_city);
        let query = template_query(data_type, center.map(|c| (c, radius)), limit);

        let label = dataset_label(data_type);
        let explanation = match (&hints.location, center) {
            (Some(place), Some(_)) => format!("{} within {} km of {}", label, radius, place),
            (Some(place), None) => {
                format!("{} (\"{}\" is not a known city, so no distance filter was applied)", label, place)
            }
            (None, _) => format!("{}, up to {} rows", label, limit),
        };

        let mut intent = QueryIntent::new(data_type, query)
            .with_radius(radius)
            .with_explanation(explanation);
        if let Some(place) = &hints.location {
            intent = intent.with_location(place.clone());
        }
        intent.normalized()
    }
}

fn catalog_intent(text: &str) -> Result<(QueryIntent, String), RecoveryError> {
    let canned = match_keyword(text).ok_or(RecoveryError::NoCatalogKeyword)?;
    Ok((canned.to_intent(), canned.keyword.to_string()))
}
