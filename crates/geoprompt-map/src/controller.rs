//! One request, end to end.

use std::sync::Arc;

use chrono::NaiveDate;
use geoprompt_core::models::{DataType, Feature, QueryIntent};
use geoprompt_core::Result;
use geoprompt_geo::{bounding_box, rows_to_features, PlaceResolver};
use geoprompt_intent::{Directive, IntentResolver, IntentSource};
use geoprompt_store::{ColumnInfo, QueryExecutor};
use serde::Serialize;

use crate::export::{export, ExportDocument, ExportFormat};
use crate::layer::LayerId;
use crate::session::Session;

/// How a submission ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReplyOutcome {
    /// The map moved to a place
    Centered { place: String, lat: f64, lon: f64 },
    /// The catalog summary was shown
    Explained,
    /// A new layer holds the results
    LayerAdded { layer_id: LayerId, feature_count: usize },
    /// The query ran and matched nothing
    NoData,
    /// The request could not be carried out
    Failed { reason: String },
}

/// Answer to one chat submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(flatten)]
    pub outcome: ReplyOutcome,
    /// Soft note about a fallback that was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// SQL that was executed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl ChatReply {
    fn new(message: impl Into<String>, outcome: ReplyOutcome) -> Self {
        Self { message: message.into(), outcome, notice: None, query: None }
    }

    fn executed(mut self, intent: &QueryIntent, source: &IntentSource) -> Self {
        self.notice = source.notice();
        self.query = Some(intent.query.clone());
        self
    }
}

/// Resolver, executor and place lookup.
///
/// Holds no session state, so the slow part of a submission runs without
/// blocking readers of the session.
#[derive(Clone)]
pub struct ChatPipeline {
    resolver: Arc<IntentResolver>,
    executor: QueryExecutor,
    places: Arc<dyn PlaceResolver>,
}

impl ChatPipeline {
    pub fn new(resolver: IntentResolver, executor: QueryExecutor, places: Arc<dyn PlaceResolver>) -> Self {
        Self { resolver: Arc::new(resolver), executor, places }
    }

    pub fn resolver(&self) -> &IntentResolver {
        &self.resolver
    }

    pub fn executor(&self) -> &QueryExecutor {
        &self.executor
    }

    /// Resolve, look up and execute `text` without touching a session.
    ///
    /// Unknown places, query errors and empty results come back as replies.
    /// Only a failed engine setup is an error.
    pub async fn prepare(&self, text: &str) -> Result<PendingReply> {
        match self.resolver.resolve(text).await {
            Directive::CenterOn { place } => Ok(self.locate(place).await),
            Directive::Explain { text } => Ok(PendingReply::Ready(ChatReply::new(text, ReplyOutcome::Explained))),
            Directive::Execute { intent, source } => self.run(intent, source).await,
        }
    }

    async fn locate(&self, place: String) -> PendingReply {
        let not_found = |reason: String| {
            PendingReply::Ready(ChatReply::new(reason.clone(), ReplyOutcome::Failed { reason }))
        };

        match self.places.resolve(&place).await {
            Ok(Some(position)) => PendingReply::Center { place, lat: position.lat, lon: position.lon },
            Ok(None) => not_found(format!("Could not find a place called \"{}\".", place)),
            Err(e) => {
                tracing::warn!(resolver = self.places.name(), place = %place, error = %e, "place lookup failed");
                not_found(format!("Could not find \"{}\": {}", place, e))
            }
        }
    }

    async fn run(&self, intent: QueryIntent, source: IntentSource) -> Result<PendingReply> {
        let rows = match self.executor.execute(&intent.query).await {
            Ok(rows) => rows,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "query failed");
                let reason = e.to_string();
                return Ok(PendingReply::Ready(
                    ChatReply::new(reason.clone(), ReplyOutcome::Failed { reason }).executed(&intent, &source),
                ));
            }
        };

        let features = rows_to_features(&rows);
        if features.is_empty() {
            return Ok(PendingReply::Ready(
                ChatReply::new(
                    "The query ran but found no matching features. Try a wider radius or another place.",
                    ReplyOutcome::NoData,
                )
                .executed(&intent, &source),
            ));
        }

        Ok(PendingReply::Layer { features, intent, source })
    }

    pub async fn describe_schema(&self, data_type: DataType) -> Result<Vec<ColumnInfo>> {
        self.executor.describe_schema(data_type).await
    }
}

/// A prepared submission waiting to be applied to a session
#[derive(Debug, Clone)]
pub enum PendingReply {
    /// Nothing left to change
    Ready(ChatReply),
    /// Move the camera to a resolved place
    Center { place: String, lat: f64, lon: f64 },
    /// Append a layer and fit the camera to it
    Layer { features: Vec<Feature>, intent: QueryIntent, source: IntentSource },
}

/// Layer name from the queried place and dataset
fn layer_name(intent: &QueryIntent) -> Option<String> {
    intent.location.as_ref().map(|location| format!("{} {}", location, intent.data_type))
}

impl PendingReply {
    /// Apply the prepared change. Only synchronous session mutations run here.
    pub fn apply(self, session: &mut Session) -> ChatReply {
        match self {
            PendingReply::Ready(reply) => reply,
            PendingReply::Center { place, lat, lon } => {
                session.center_on(lat, lon, place.clone());
                tracing::info!(place = %place, lat, lon, "centered map");
                ChatReply::new(format!("Centered the map on {}.", place), ReplyOutcome::Centered { place, lat, lon })
            }
            PendingReply::Layer { features, intent, source } => {
                let label = layer_name(&intent).unwrap_or_else(|| session.auto_label());
                let bbox = bounding_box(&features);
                let feature_count = features.len();

                let Some(layer_id) = session.apply_result(features, label).map(|layer| layer.id) else {
                    return ChatReply::new("No features to show.", ReplyOutcome::NoData);
                };
                if let Some(location) = &intent.location {
                    session.set_location_label(location.clone());
                }
                session.set_viewport_to_bounds(bbox);

                let message = if intent.explanation.is_empty() {
                    format!("Found {} features.", feature_count)
                } else {
                    format!("{} ({} features)", intent.explanation, feature_count)
                };
                ChatReply::new(message, ReplyOutcome::LayerAdded { layer_id, feature_count })
                    .executed(&intent, &source)
            }
        }
    }
}

/// A pipeline bound to one session, running each submission strictly in
/// sequence: resolve, then center or explain or execute, convert, append and fit.
pub struct MapController {
    pipeline: ChatPipeline,
    session: Session,
}

impl MapController {
    pub fn new(
        resolver: IntentResolver,
        executor: QueryExecutor,
        places: Arc<dyn PlaceResolver>,
        session: Session,
    ) -> Self {
        Self { pipeline: ChatPipeline::new(resolver, executor, places), session }
    }

    /// Split into the shared pipeline and the session it was serving
    pub fn into_parts(self) -> (ChatPipeline, Session) {
        (self.pipeline, self.session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn resolver(&self) -> &IntentResolver {
        self.pipeline.resolver()
    }

    pub fn executor(&self) -> &QueryExecutor {
        self.pipeline.executor()
    }

    /// Handle one chat message
    pub async fn submit(&mut self, text: &str) -> Result<ChatReply> {
        let pending = self.pipeline.prepare(text).await?;
        Ok(pending.apply(&mut self.session))
    }

    /// Export the given layers, or all of them
    pub fn export(&self, format: ExportFormat, ids: Option<&[LayerId]>, date: NaiveDate) -> Result<ExportDocument> {
        export(&self.session.select(ids), format, date)
    }

    pub async fn describe_schema(&self, data_type: DataType) -> Result<Vec<ColumnInfo>> {
        self.pipeline.describe_schema(data_type).await
    }
}
