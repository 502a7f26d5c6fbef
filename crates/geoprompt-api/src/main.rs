use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use geoprompt_map::{build_controller, EngineChoice};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoprompt_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoprompt_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env();
    let config = api_config.load_layered().context("Failed to load configuration")?;

    tracing::info!(
        port = api_config.port,
        data_dir = %config.data_dir.value.display(),
        generator = %config.generator.value,
        demo = api_config.demo,
        "Starting GeoPrompt API server"
    );

    let choice = if api_config.demo { EngineChoice::Sample } else { EngineChoice::Datasets };
    let controller = build_controller(&config, choice).context("Failed to set up the map controller")?;

    // Run dataset setup now so a broken data directory is reported at startup
    if let Err(e) = controller.executor().engine().get().await {
        tracing::error!(error = %e, "Dataset engine setup failed; queries will be refused until restart");
    }

    let state = Arc::new(AppState::new(controller));

    let origin = api_config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid GEOPROMPT_CORS_ORIGIN: {}", api_config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = create_router(state).layer(cors);

    let addr = api_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", api_config.cors_origin);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
