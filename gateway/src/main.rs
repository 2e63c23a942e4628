use anyhow::Result;
use asset_resolver::ResolverConfig;
use axum::{routing::get, Json, Router};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod routes;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ResolverConfig>,
    pub zones_dir: Arc<PathBuf>,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "hazard_gateway=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let zones_dir = PathBuf::from(
        std::env::var("HAZARD_ZONES_DIR").unwrap_or_else(|_| "data/zones".to_string()),
    );
    tracing::info!("   Hazard zones: {}", zones_dir.display());

    let state = AppState {
        config: Arc::new(ResolverConfig::default()),
        zones_dir: Arc::new(zones_dir),
    };

    let api_routes = Router::new()
        .route("/assets", get(routes::resolve_assets))
        .route("/neighborhoods", get(routes::list_neighborhoods))
        .route("/events", get(routes::list_events))
        .route("/zones/:hazard/:level", get(routes::zone_collection))
        .with_state(state);

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_routes)
        .layer(CorsLayer::permissive());

    // Static file serving for the dashboard bundle (if built)
    let ui_path = std::path::Path::new("ui/dashboard/dist");
    let app = if ui_path.exists() {
        tracing::info!("   Serving dashboard from {}", ui_path.display());
        app.nest_service("/", ServeDir::new(ui_path))
    } else {
        app
    };

    let port = std::env::var("HAZARD_GATEWAY_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "18080".to_string());
    let addr = format!("0.0.0.0:{}", port);

    tracing::info!("Hazard gateway starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
