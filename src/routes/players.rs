use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::Player;
use super::SharedStore;

// Query parameters for searching players
#[derive(Deserialize)]
pub struct SearchQuery {
    name: String,
}

// GET /api/players - List all players
pub async fn get_players(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = store.find_all().await?;

    Ok(Json(players))
}

// GET /api/players/{id} - Get player by ID
pub async fn get_player_by_id(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<Json<Player>, ApiError> {
    let player = store.find_by_id(id).await?.ok_or(ApiError::NotFound)?;

    Ok(Json(player))
}

// POST /api/players - Create a player; any id in the body is ignored
pub async fn create_player(
    State(store): State<SharedStore>,
    Json(mut player): Json<Player>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    player.id = None;
    let saved = store.save(player).await?;

    tracing::info!(id = ?saved.id, "created player");

    Ok((StatusCode::CREATED, Json(saved)))
}

// PUT /api/players/{id} - Replace every field of an existing player
pub async fn update_player(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
    Json(details): Json<Player>,
) -> Result<Json<Player>, ApiError> {
    let updated = store.update(id, details).await?.ok_or(ApiError::NotFound)?;

    tracing::info!(id, "updated player");

    Ok(Json(updated))
}

// DELETE /api/players/{id} - Delete a player
pub async fn delete_player(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !store.exists_by_id(id).await? {
        return Err(ApiError::NotFound);
    }

    store.delete_by_id(id).await?;

    tracing::info!(id, "deleted player");

    Ok(StatusCode::OK)
}

// GET /api/players/search?name=messi - Case-insensitive name substring search
pub async fn search_players(
    State(store): State<SharedStore>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = store.find_by_name_containing_ignore_case(&params.name).await?;

    Ok(Json(players))
}

// GET /api/players/position/{position} - Players with exactly this position
pub async fn get_players_by_position(
    State(store): State<SharedStore>,
    Path(position): Path<String>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = store.find_by_position(&position).await?;

    Ok(Json(players))
}

// GET /api/players/team/{team} - Players on exactly this team
pub async fn get_players_by_team(
    State(store): State<SharedStore>,
    Path(team): Path<String>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = store.find_by_team(&team).await?;

    Ok(Json(players))
}
