//! Crop Stress Advisory Platform - Backend Server
//!
//! Turns weather readings and farmers' field notes into a stress
//! classification and a crop-specific advisory.

use axum::{extract::State, routing::get, Router};
use shared::ClassifierAdapter;
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{WeatherClient, WeatherProvider};
use services::{
    load_classifier, AdvisoryService, AugmentationChain, InMemoryReportStore, PgReportStore,
    ReportStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub classifier: Arc<ClassifierAdapter>,
    pub weather: Arc<dyn WeatherProvider>,
    pub augmentation: Arc<AugmentationChain>,
    pub reports: Arc<dyn ReportStore>,
}

impl AppState {
    pub fn advisory_service(&self) -> AdvisoryService {
        AdvisoryService::new(
            self.classifier.clone(),
            self.weather.clone(),
            self.augmentation.clone(),
            self.reports.clone(),
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "csa_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Crop Stress Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    let classifier = Arc::new(load_classifier(Path::new(&config.model.path)));

    let weather: Arc<dyn WeatherProvider> = Arc::new(WeatherClient::new(
        config.weather.api_endpoint.clone(),
        config.weather.api_key.clone(),
        config.weather.timeout(),
    )?);
    if config.weather.api_key.is_none() {
        tracing::warn!("No weather API key configured; reports will use offline weather");
    }

    let augmentation = Arc::new(AugmentationChain::from_config(&config.ai)?);
    if augmentation.is_enabled() {
        tracing::info!(
            primary = %config.ai.provider,
            providers = ?augmentation.provider_names(),
            "AI augmentation chain configured"
        );
    } else {
        tracing::warn!("AI augmentation disabled; reports will have no AI analysis");
    }

    let reports = connect_report_store(&config).await?;

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        classifier,
        weather,
        augmentation,
        reports,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Postgres when a database URL is configured, process memory otherwise
async fn connect_report_store(config: &Config) -> anyhow::Result<Arc<dyn ReportStore>> {
    let Some(url) = config.database.url.as_deref() else {
        tracing::warn!("No database URL configured; reports are kept in memory");
        return Ok(Arc::new(InMemoryReportStore::new()));
    };

    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    Ok(Arc::new(PgReportStore::new(db_pool)))
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api", routes::api_routes())
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Root endpoint
async fn root(State(state): State<AppState>) -> String {
    format!(
        "Crop Stress Advisory Platform API v{} ({})",
        env!("CARGO_PKG_VERSION"),
        state.config.environment
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::external::llm::ProviderChoice;

    fn test_app() -> Router {
        let mut config = Config::load().unwrap();
        config.ai.provider = ProviderChoice::None;
        config.weather.api_key = None;

        let weather: Arc<dyn WeatherProvider> = Arc::new(
            WeatherClient::new(
                config.weather.api_endpoint.clone(),
                None,
                config.weather.timeout(),
            )
            .unwrap(),
        );
        let state = AppState {
            augmentation: Arc::new(AugmentationChain::from_config(&config.ai).unwrap()),
            config: Arc::new(config),
            classifier: Arc::new(ClassifierAdapter::unloaded()),
            weather,
            reports: Arc::new(InMemoryReportStore::new()),
        };
        create_app(state)
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_report_missing_field_is_bad_request() {
        let (status, body) = post_json(
            "/api/reports",
            r#"{"crop_type":"rice","growth_stage":"vegetative","latitude":10.0}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let details = body["error"]["details"][0].as_str().unwrap();
        assert!(details.contains("longitude"));
    }

    #[tokio::test]
    async fn test_predict_malformed_json_is_bad_request() {
        let (status, body) = post_json("/api/predict", r#"{"temperature": 30.0,"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_report_invalid_values_are_bad_request() {
        let (status, body) = post_json(
            "/api/reports",
            r#"{"crop_type":" ","growth_stage":"vegetative","latitude":95.0,"longitude":20.0}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_valid_report_without_model_is_unavailable() {
        let (status, body) = post_json(
            "/api/reports",
            r#"{"crop_type":"rice","growth_stage":"vegetative","latitude":10.0,"longitude":20.0}"#,
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "MODEL_UNAVAILABLE");
    }
}
