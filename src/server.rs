use crate::config::AppConfig;
use crate::error::{CountryNotFound, NarrativeError};
use crate::narrative::NarrativeClient;
use crate::overlay::build_overlay;
use crate::render;
use crate::selection::{country_names, select};
use crate::series::{build_series, YearRange};
use crate::summary::{summarize, summary_lines};
use crate::types::{MapOverlayRow, PopulationSeries, PopulationTable, SummaryStats};
use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

pub struct AppState {
    pub table: PopulationTable,
    pub years: YearRange,
    pub narrator: NarrativeClient,
}

#[derive(Deserialize)]
pub struct CountryParams {
    country: String,
}

#[derive(Serialize)]
pub struct TrendResponse {
    country: String,
    series: PopulationSeries,
    summary: SummaryStats,
    summary_text: [String; 2],
    figure: Value,
}

#[derive(Serialize)]
pub struct MapResponse {
    overlay: Vec<MapOverlayRow>,
    figure: Value,
}

/// Failures surfaced to the page as JSON with a matching status.
pub enum ApiError {
    NotFound(CountryNotFound),
    Narrative(NarrativeError),
}

impl From<CountryNotFound> for ApiError {
    fn from(err: CountryNotFound) -> Self {
        ApiError::NotFound(err)
    }
}

impl From<NarrativeError> for ApiError {
    fn from(err: NarrativeError) -> Self {
        ApiError::Narrative(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(err) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": err.to_string() }))).into_response()
            }
            ApiError::Narrative(err) => {
                let status = match &err {
                    NarrativeError::Rejected { .. }
                    | NarrativeError::MalformedResponse(_)
                    | NarrativeError::Transport(_) => StatusCode::BAD_GATEWAY,
                    NarrativeError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    NarrativeError::Credential(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let body = match &err {
                    NarrativeError::Rejected { status, body } => {
                        json!({ "error": err.to_string(), "status": status, "body": body })
                    }
                    _ => json!({ "error": err.to_string() }),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/countries", get(countries_handler))
        .route("/api/trend", get(trend_handler))
        .route("/api/map", get(map_handler))
        .route("/api/narrative", post(narrative_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(config: AppConfig, table: PopulationTable) -> Result<()> {
    let narrator = NarrativeClient::new(&config.narrative)?;
    let state = Arc::new(AppState {
        table,
        years: YearRange::STANDARD,
        narrator,
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], config.server.port));
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn index_handler() -> Html<String> {
    Html(render::dashboard_page())
}

async fn countries_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "countries": country_names(&state.table) }))
}

async fn trend_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryParams>,
) -> Result<Json<TrendResponse>, ApiError> {
    let row = select(&state.table, &params.country)?;
    let series = build_series(row, &state.years);
    let summary = summarize(&series);
    debug!("Trend for {}: {:?}", row.country_name, summary);

    Ok(Json(TrendResponse {
        country: row.country_name.clone(),
        summary_text: summary_lines(&summary, state.years.last),
        figure: render::trend_figure(&row.country_name, &series),
        series,
        summary,
    }))
}

async fn map_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryParams>,
) -> Result<Json<MapResponse>, ApiError> {
    // Unknown names would silently highlight nothing
    select(&state.table, &params.country)?;
    let overlay = build_overlay(&state.table, &params.country);
    debug!("Map overlay for {} covers {} countries", params.country, overlay.len());

    Ok(Json(MapResponse {
        figure: render::map_figure(&overlay),
        overlay,
    }))
}

async fn narrative_handler(
    State(state): State<Arc<AppState>>,
    Json(params): Json<CountryParams>,
) -> Result<Json<Value>, ApiError> {
    let row = select(&state.table, &params.country)?;
    match state.narrator.fetch_narrative(&row.country_name).await {
        Ok(narrative) => Ok(Json(json!({ "text": narrative.text }))),
        Err(err) => {
            warn!("Narrative for {} failed: {}", row.country_name, err);
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NarrativeConfig;
    use crate::data::read_table;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::path::Path;
    use tower::ServiceExt;

    const SAMPLE: &str = "\
Country Name,Country Code,1960,1962,2020,2022
Testland,TST,,100,400,500
Otherland,OTH,10,20,30,42
";

    fn app(narrative: NarrativeConfig) -> Router {
        let table = read_table(SAMPLE.as_bytes(), Path::new("sample.csv")).unwrap();
        router(Arc::new(AppState {
            table,
            years: YearRange::STANDARD,
            narrator: NarrativeClient::new(&narrative).unwrap(),
        }))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn lists_countries() {
        let (status, body) = get_json(app(NarrativeConfig::default()), "/api/countries").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["countries"], json!(["Testland", "Otherland"]));
    }

    #[tokio::test]
    async fn trend_for_testland() {
        let (status, body) = get_json(app(NarrativeConfig::default()), "/api/trend?country=Testland").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["series"].as_array().unwrap().len(), 32);
        assert_eq!(body["summary"]["latest_population"], 500.0);
        assert!(body["summary"]["average_growth"].is_null());
        assert_eq!(body["summary_text"][1], "Average annual growth: N/A");
    }

    #[tokio::test]
    async fn unknown_country_is_404() {
        let (status, body) = get_json(app(NarrativeConfig::default()), "/api/trend?country=Atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Country not found: Atlantis");

        let (status, _) = get_json(app(NarrativeConfig::default()), "/api/map?country=Atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn map_highlights_one_country() {
        let (status, body) = get_json(app(NarrativeConfig::default()), "/api/map?country=Otherland").await;
        assert_eq!(status, StatusCode::OK);
        let overlay = body["overlay"].as_array().unwrap();
        assert_eq!(overlay.len(), 2);
        assert_eq!(overlay[1]["is_selected"], true);
        assert_eq!(overlay[1]["color"], "selected");
        assert_eq!(overlay[0]["color"], "unselected");
    }

    #[tokio::test]
    async fn narrative_rejection_is_502_with_body() {
        let upstream = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, r#"{"error":"bad key"}"#) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, upstream).await.unwrap();
        });

        let dir = tempfile::tempdir().unwrap();
        let secrets = dir.path().join("secrets.toml");
        std::fs::write(&secrets, "auth_api_key = \"k\"\n").unwrap();
        let app = app(NarrativeConfig {
            endpoint: format!("http://{}/v1/chat/completions", addr),
            secrets_file: secrets,
            timeout_secs: 5,
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/narrative")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"country":"Testland"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 401);
        assert_eq!(body["body"], r#"{"error":"bad key"}"#);
    }
}
