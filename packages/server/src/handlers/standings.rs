use axum::Json;
use axum::extract::State;
use chrono::Utc;
use common::MatchStatus;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{league_match, season_team, team, team_challenge};
use crate::error::{AppError, ErrorBody};
use crate::models::standings::{RecentChallenge, StandingRow, StandingsResponse};
use crate::state::AppState;
use crate::utils::season::find_active_season;
use crate::utils::standings::next_match_for;

const RECENT_CHALLENGES: u64 = 20;

#[utoipa::path(
    get,
    path = "/standings",
    tag = "League",
    operation_id = "getStandings",
    summary = "Standings of the active season",
    description = "Teams of the active season ordered by points, then flag differential (both descending). Each row carries the team's next upcoming scheduled match. Also lists the 20 most recent challenges. Returns `season: null` when no season is active.",
    responses(
        (status = 200, description = "Standings", body = StandingsResponse),
        (status = 500, description = "Store failure (STORE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_standings(
    State(state): State<AppState>,
) -> Result<Json<StandingsResponse>, AppError> {
    let Some(season) = find_active_season(&state.db).await? else {
        return Ok(Json(StandingsResponse {
            season: None,
            standings: vec![],
            recent_challenges: vec![],
        }));
    };

    let rows = season_team::Entity::find()
        .filter(season_team::Column::SeasonId.eq(season.id))
        .find_also_related(team::Entity)
        .order_by_desc(season_team::Column::Points)
        .order_by_desc(season_team::Column::FlagDiff)
        .order_by_asc(season_team::Column::TeamId)
        .all(&state.db)
        .await?;

    let open_matches = league_match::Entity::find()
        .filter(league_match::Column::SeasonId.eq(season.id))
        .filter(league_match::Column::Status.eq(MatchStatus::Scheduled))
        .order_by_asc(league_match::Column::ScheduledAt)
        .all(&state.db)
        .await?;

    let now = Utc::now();
    let standings = rows
        .into_iter()
        .enumerate()
        .map(|(idx, (st, team))| {
            let (name, tag) = team.map(|t| (t.name, t.tag)).unwrap_or_default();
            StandingRow {
                rank: idx + 1,
                team_id: st.team_id,
                name,
                tag,
                division_id: st.division_id,
                wins: st.wins,
                losses: st.losses,
                points: st.points,
                flag_diff: st.flag_diff,
                next_match: next_match_for(st.team_id, &open_matches, now),
            }
        })
        .collect();

    let recent_challenges = team_challenge::Entity::find()
        .filter(team_challenge::Column::SeasonId.eq(season.id))
        .order_by_desc(team_challenge::Column::CreatedAt)
        .order_by_desc(team_challenge::Column::Id)
        .limit(RECENT_CHALLENGES)
        .all(&state.db)
        .await?
        .into_iter()
        .map(RecentChallenge::from)
        .collect();

    Ok(Json(StandingsResponse {
        season: Some(season.into()),
        standings,
        recent_challenges,
    }))
}
