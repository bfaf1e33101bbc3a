use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use service::pagination::Pagination;
use service::player::domain::{Profession, Race};
use service::player::repository::PlayerRepository;
use service::player::{Player, PlayerFilter, PlayerInput, PlayerOrder, PlayerService};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

/// Filter predicates, read by both list and count.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    pub name: Option<String>,
    pub title: Option<String>,
    #[param(value_type = Option<String>)]
    pub race: Option<Race>,
    #[param(value_type = Option<String>)]
    pub profession: Option<Profession>,
    /// epoch ms, inclusive
    pub after: Option<i64>,
    /// epoch ms, inclusive
    pub before: Option<i64>,
    pub banned: Option<bool>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
}

/// Sort and paging, list only. Count never parses these.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// ID | NAME | EXPERIENCE | BIRTHDAY
    #[param(value_type = Option<String>)]
    pub order: Option<PlayerOrder>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl FilterQuery {
    pub fn filter(&self) -> PlayerFilter {
        PlayerFilter {
            name: self.name.clone(),
            title: self.title.clone(),
            race: self.race,
            profession: self.profession,
            after: self.after,
            before: self.before,
            banned: self.banned,
            min_experience: self.min_experience,
            max_experience: self.max_experience,
            min_level: self.min_level,
            max_level: self.max_level,
        }
    }
}

impl ListQuery {
    pub fn page(&self, default_page_size: u32) -> Pagination {
        Pagination {
            page: self.page_number.unwrap_or(0),
            per_page: self.page_size.unwrap_or(default_page_size),
        }
    }
}

/// Path ids must be positive integers; anything else is a bare 400.
fn parse_id(raw: &str) -> Result<i64, JsonApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| PlayerService::<dyn PlayerRepository>::is_valid_id(*id))
        .ok_or_else(|| JsonApiError::bare(StatusCode::BAD_REQUEST))
}

#[utoipa::path(
    get, path = "/rest/players", tag = "players",
    params(FilterQuery, ListQuery),
    responses(
        (status = 200, description = "Page of matching players", body = [crate::openapi::PlayerDoc]),
        (status = 400, description = "Malformed query")
    )
)]
pub async fn list_players(
    State(state): State<ServerState>,
    Query(f): Query<FilterQuery>,
    Query(l): Query<ListQuery>,
) -> Result<Json<Vec<Player>>, JsonApiError> {
    let page = l.page(state.default_page_size);
    let players = state
        .players
        .list(&f.filter(), l.order.unwrap_or_default(), page)
        .await
        .map_err(JsonApiError::from_service)?;
    Ok(Json(players))
}

#[utoipa::path(
    get, path = "/rest/players/count", tag = "players",
    params(FilterQuery),
    responses(
        (status = 200, description = "Number of matching players", body = usize),
        (status = 400, description = "Malformed query")
    )
)]
pub async fn count_players(State(state): State<ServerState>, Query(f): Query<FilterQuery>) -> Result<Json<usize>, JsonApiError> {
    let n = state.players.count(&f.filter()).await.map_err(JsonApiError::from_service)?;
    Ok(Json(n))
}

#[utoipa::path(
    get, path = "/rest/players/{id}", tag = "players",
    params(("id" = i64, Path, description = "Player id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PlayerDoc),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_player(State(state): State<ServerState>, Path(raw): Path<String>) -> Result<Json<Player>, JsonApiError> {
    let id = parse_id(&raw)?;
    match state.players.get(id).await.map_err(JsonApiError::from_service)? {
        Some(p) => Ok(Json(p)),
        None => Err(JsonApiError::bare(StatusCode::NOT_FOUND)),
    }
}

#[utoipa::path(
    post, path = "/rest/players", tag = "players",
    request_body = crate::openapi::PlayerInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::PlayerDoc),
        (status = 400, description = "Invalid player, empty body")
    )
)]
pub async fn create_player(
    State(state): State<ServerState>,
    payload: Result<Json<PlayerInput>, JsonRejection>,
) -> Result<Json<Player>, JsonApiError> {
    let Json(input) = payload.map_err(|rej| {
        warn!(reason = %rej.body_text(), "player_create_rejected");
        JsonApiError::bare(StatusCode::BAD_REQUEST)
    })?;

    match state.players.create(input).await {
        Ok(p) => Ok(Json(p)),
        Err(e) if e.is_validation() => {
            info!(reason = %e, "player_create_invalid");
            Err(JsonApiError::bare(StatusCode::BAD_REQUEST))
        }
        Err(e) => Err(JsonApiError::from_service(e)),
    }
}

#[utoipa::path(
    post, path = "/rest/players/{id}", tag = "players",
    params(("id" = i64, Path, description = "Player id")),
    request_body = crate::openapi::PlayerInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PlayerDoc),
        (status = 400, description = "Malformed id or invalid field"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_player(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
    payload: Result<Json<PlayerInput>, JsonRejection>,
) -> Result<Json<Player>, JsonApiError> {
    let id = parse_id(&raw)?;
    let Json(patch) = payload
        .map_err(|rej| JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Body", Some(rej.body_text())))?;

    let updated = state.players.update(id, patch).await.map_err(JsonApiError::from_service)?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/rest/players/{id}", tag = "players",
    params(("id" = i64, Path, description = "Player id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_player(State(state): State<ServerState>, Path(raw): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&raw)?;
    // 先确认记录存在，不存在直接 404
    if state.players.get(id).await.map_err(JsonApiError::from_service)?.is_none() {
        return Err(JsonApiError::bare(StatusCode::NOT_FOUND));
    }
    state.players.delete(id).await.map_err(JsonApiError::from_service)?;
    Ok(StatusCode::OK)
}
