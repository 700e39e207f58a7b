use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{free_agent, season, team};
use crate::error::{AppError, ErrorBody};
use crate::models::league::{LeagueStatusResponse, SeasonResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/league-status",
    tag = "League",
    operation_id = "getLeagueStatus",
    summary = "League summary",
    description = "The active season, the number of registered teams and free agents, and every season ordered by start date (most recent first).",
    responses(
        (status = 200, description = "League status", body = LeagueStatusResponse),
        (status = 500, description = "Store failure (STORE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn league_status(
    State(state): State<AppState>,
) -> Result<Json<LeagueStatusResponse>, AppError> {
    let seasons = season::Entity::find()
        .order_by_desc(season::Column::StartDate)
        .order_by_desc(season::Column::Id)
        .all(&state.db)
        .await?;

    let teams = team::Entity::find().count(&state.db).await?;
    let free_agents = free_agent::Entity::find().count(&state.db).await?;

    let active_season = seasons
        .iter()
        .filter(|s| s.active)
        .min_by_key(|s| s.id)
        .cloned()
        .map(SeasonResponse::from);

    Ok(Json(LeagueStatusResponse {
        active_season,
        teams,
        free_agents,
        seasons: seasons.into_iter().map(SeasonResponse::from).collect(),
    }))
}
