//! Integration tests for the map controller
//!
//! Runs whole submissions against the in-memory engine with sample data.

use std::sync::Arc;

use chrono::NaiveDate;
use geoprompt_core::models::Viewport;
use geoprompt_geo::StaticPlaceResolver;
use geoprompt_intent::{IntentResolver, ResolverSettings};
use geoprompt_llm::{Generator, ScriptedGenerator};
use geoprompt_map::{ExportFormat, MapController, ReplyOutcome, Session};
use geoprompt_store::{MemoryEngine, QueryExecutor, SharedEngine};

fn controller_with(engine: MemoryEngine, generator: Option<Arc<dyn Generator>>) -> MapController {
    let executor = QueryExecutor::new(Arc::new(SharedEngine::preloaded(Arc::new(engine))));
    MapController::new(
        IntentResolver::new(generator, ResolverSettings::default()),
        executor,
        Arc::new(StaticPlaceResolver),
        Session::default(),
    )
}

fn sample_controller() -> MapController {
    controller_with(MemoryEngine::with_sample_data(), None)
}

#[tokio::test]
async fn test_center_directive_moves_viewport() {
    let mut controller = sample_controller();
    let reply = controller.submit("Center map on Tartu.").await.unwrap();

    match reply.outcome {
        ReplyOutcome::Centered { place, lat, lon } => {
            assert_eq!(place, "Tartu");
            assert!((lat - 58.378).abs() < 0.01);
            assert!((lon - 26.729).abs() < 0.01);
        }
        other => panic!("Expected Centered, got {:?}", other),
    }
    assert_eq!(controller.session().viewport().zoom, 12.0);
    assert_eq!(controller.session().location_label(), Some("Tartu"));
    assert!(controller.session().layers().is_empty());
}

#[tokio::test]
async fn test_unknown_place_leaves_viewport() {
    let mut controller = sample_controller();
    let reply = controller.submit("fly to Atlantis").await.unwrap();

    assert!(matches!(reply.outcome, ReplyOutcome::Failed { .. }));
    assert!(reply.message.contains("Atlantis"));
    assert_eq!(*controller.session().viewport(), Viewport::default());
}

#[tokio::test]
async fn test_explain_runs_nothing() {
    let mut controller = sample_controller();
    let reply = controller.submit("What data types are available?").await.unwrap();

    assert_eq!(reply.outcome, ReplyOutcome::Explained);
    assert!(reply.message.contains("buildings"));
    assert!(reply.query.is_none());
    assert!(controller.session().layers().is_empty());
}

#[tokio::test]
async fn test_query_adds_layer_and_fits_viewport() {
    let mut controller = sample_controller();
    let reply = controller.submit("Show me buildings within 5km of Tallinn").await.unwrap();

    let ReplyOutcome::LayerAdded { layer_id, feature_count } = reply.outcome else {
        panic!("Expected LayerAdded, got {:?}", reply.outcome);
    };
    assert_eq!(feature_count, 4);

    let query = reply.query.unwrap();
    assert!(query.contains("ST_DWithin"));
    assert!(query.contains("LIMIT 1000"));

    let session = controller.session();
    let layer = session.layer(layer_id).unwrap();
    assert!(layer.name.eq_ignore_ascii_case("tallinn buildings"));
    assert_eq!(layer.feature_count(), 4);
    assert_ne!(*session.viewport(), Viewport::default());
    assert_eq!(session.render_layers().len(), 1);
}

#[tokio::test]
async fn test_layer_without_location_gets_auto_label() {
    let mut controller = sample_controller();
    controller.submit("show roads").await.unwrap();
    controller.submit("show landuse").await.unwrap();

    let names: Vec<&str> = controller.session().layers().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Layer 1", "Layer 2"]);
}

#[tokio::test]
async fn test_layer_names_tell_datasets_apart() {
    let mut controller = sample_controller();
    controller.submit("show buildings near Tartu").await.unwrap();
    controller.submit("show roads near Tartu").await.unwrap();

    let names: Vec<String> = controller.session().layers().iter().map(|l| l.name.to_lowercase()).collect();
    assert_eq!(names, vec!["tartu buildings", "tartu roads"]);
}

#[tokio::test]
async fn test_pipeline_prepares_without_a_session() {
    let controller = sample_controller();
    let (pipeline, mut session) = controller.into_parts();

    let pending = pipeline.prepare("show roads").await.unwrap();
    assert!(session.layers().is_empty());

    let reply = pending.apply(&mut session);
    assert!(matches!(reply.outcome, ReplyOutcome::LayerAdded { feature_count: 3, .. }));
    assert_eq!(session.layers().len(), 1);
}

#[tokio::test]
async fn test_empty_result_is_no_data() {
    let engine = MemoryEngine::new();
    engine.insert_rows("landuse", Vec::new());
    let mut controller = controller_with(engine, None);

    let reply = controller.submit("landuse areas").await.unwrap();
    assert_eq!(reply.outcome, ReplyOutcome::NoData);
    assert!(controller.session().layers().is_empty());
}

#[tokio::test]
async fn test_query_error_is_a_failed_reply() {
    let completion = r#"{"dataType": "roads", "query": "SELECT * FROM read_parquet('rivers.parquet') LIMIT 1000", "explanation": "Rivers"}"#;
    let generator: Arc<dyn Generator> = Arc::new(ScriptedGenerator::replying(completion));
    let mut controller = controller_with(MemoryEngine::with_sample_data(), Some(generator));

    let reply = controller.submit("rivers in Tartu").await.unwrap();
    match &reply.outcome {
        ReplyOutcome::Failed { reason } => assert!(reason.contains("rivers")),
        other => panic!("Expected Failed, got {:?}", other),
    }
    assert!(reply.query.is_some());
    assert!(controller.session().layers().is_empty());
}

#[tokio::test]
async fn test_engine_setup_failure_is_an_error() {
    let executor = QueryExecutor::new(Arc::new(SharedEngine::new(
        Arc::new(MemoryEngine::new()),
        "/nonexistent/geoprompt-data",
    )));
    let mut controller = MapController::new(
        IntentResolver::new(None, ResolverSettings::default()),
        executor,
        Arc::new(StaticPlaceResolver),
        Session::default(),
    );

    let err = controller.submit("show buildings").await.unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_export_selected_layers() {
    let mut controller = sample_controller();
    controller.submit("show roads").await.unwrap();
    controller.submit("show buildings near Tartu").await.unwrap();
    let roads_id = controller.session().layers()[0].id;

    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let document = controller.export(ExportFormat::GeoJson, Some(&[roads_id]), date).unwrap();
    assert_eq!(document.filename, "geoprompt-export-2024-05-01.geojson");

    let value: serde_json::Value = serde_json::from_slice(&document.bytes).unwrap();
    let features = value["features"].as_array().unwrap();
    assert_eq!(features.len(), 3);
    assert!(features.iter().all(|f| f["properties"]["layer_id"] == roads_id.0));
}

#[tokio::test]
async fn test_chat_reply_serializes_flat() {
    let mut controller = sample_controller();
    let reply = controller.submit("show roads").await.unwrap();

    let value = serde_json::to_value(&reply).unwrap();
    assert_eq!(value["status"], "layer_added");
    assert_eq!(value["feature_count"], 3);
    assert!(value["message"].is_string());
}
