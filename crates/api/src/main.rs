use axum::{
    extract::Path,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use asesor_core::domain::contract::{AnswersPayload, AnswersValidationError};
use asesor_core::domain::portfolio::{
    all_suggestions, suggestion_for, PortfolioSuggestion, INSTRUMENT_DISCLAIMER,
    INSTRUMENT_EXAMPLES,
};
use asesor_core::domain::profile::ProfileLabel;
use asesor_core::scoring::{self, Assessment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = asesor_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let app = router();

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.require_port()?));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router() -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/profile", post(evaluate_profile))
        .route("/portfolios", get(list_portfolios))
        .route("/portfolios/:label", get(get_portfolio))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
struct ApiAssessment {
    evaluation_id: Uuid,
    evaluated_at: DateTime<Utc>,
    #[serde(flatten)]
    assessment: Assessment,
    instrument_examples: &'static [&'static str],
    disclaimer: &'static str,
}

async fn evaluate_profile(
    Json(payload): Json<AnswersPayload>,
) -> Result<Json<ApiAssessment>, (StatusCode, String)> {
    let answers = payload.validate_and_into_answers().map_err(|e| {
        if let Some(invalid) = e.downcast_ref::<AnswersValidationError>() {
            tracing::info!(field = invalid.field, error = %invalid, "rejected questionnaire");
            return (StatusCode::UNPROCESSABLE_ENTITY, invalid.to_string());
        }
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %e, "questionnaire conversion failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
    })?;

    let assessment = scoring::evaluate(&answers);
    let evaluation_id = Uuid::new_v4();

    tracing::info!(
        %evaluation_id,
        score = assessment.score.score,
        label = %assessment.score.label,
        "evaluated risk profile"
    );

    Ok(Json(ApiAssessment {
        evaluation_id,
        evaluated_at: Utc::now(),
        assessment,
        instrument_examples: &INSTRUMENT_EXAMPLES,
        disclaimer: INSTRUMENT_DISCLAIMER,
    }))
}

async fn list_portfolios() -> Json<Vec<&'static PortfolioSuggestion>> {
    Json(all_suggestions().to_vec())
}

async fn get_portfolio(
    Path(label): Path<String>,
) -> Result<Json<&'static PortfolioSuggestion>, StatusCode> {
    let label = label
        .parse::<ProfileLabel>()
        .map_err(|_| StatusCode::NOT_FOUND)?;
    Ok(Json(suggestion_for(label)))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &asesor_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
