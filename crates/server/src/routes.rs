pub mod players;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::pagination::Pagination;
use service::player::repository::PlayerRepository;
use service::player::PlayerService;

use crate::openapi::ApiDoc;

/// Shared handler state. The repository is type-erased so the same
/// router serves SeaORM in production and the in-memory store in tests.
#[derive(Clone)]
pub struct ServerState {
    pub players: Arc<PlayerService<dyn PlayerRepository>>,
    pub default_page_size: u32,
}

impl ServerState {
    pub fn new(repo: Arc<dyn PlayerRepository>, default_page_size: u32) -> Self {
        Self { players: Arc::new(PlayerService::new(repo)), default_page_size }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(
            Arc::new(service::player::repository::mock::InMemoryPlayerRepository::default()),
            Pagination::DEFAULT_PER_PAGE,
        )
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: health, API doc and the player routes under `/rest`.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let player_routes = Router::new()
        .route("/rest/players", get(players::list_players).post(players::create_player))
        .route("/rest/players/count", get(players::count_players))
        .route(
            "/rest/players/:id",
            get(players::get_player).post(players::update_player).delete(players::delete_player),
        );

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(player_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
