use std::collections::HashMap;
use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use common::ChallengeStatus;
use sea_orm::*;
use tracing::instrument;

use crate::challenge::{challenge_service, parse_proposed_times};
use crate::entity::{challenge_time_option, league_match, team_challenge};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::body::AppForm;
use crate::models::challenge::*;
use crate::models::shared::clamp_limit;
use crate::state::AppState;
use crate::utils::season::find_active_season;

/// Where form posts land after a successful write.
pub fn challenge_location(id: i32) -> String {
    format!("/api/v1/challenges/{id}")
}

fn redirect_to_challenge(id: i32) -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, challenge_location(id))])
}

#[utoipa::path(
    post,
    path = "/challenges/create",
    tag = "Challenges",
    operation_id = "createChallenge",
    summary = "Challenge another team",
    description = "Opens a challenge against the defender in the given season. The challenger is the caller's own team; admins must name it in `challengerTeamId`. The division is copied from the defender's season placement.",
    request_body(content = CreateChallengeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Challenge created; redirects to its detail"),
        (status = 400, description = "Missing or invalid field, self-challenge, or defender not placed (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Acting for another team (PERMISSION_DENIED)", body = ErrorBody),
        (status = 500, description = "Store failure (STORE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, form), fields(user_id = auth_user.user_id))]
pub async fn create_challenge(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppForm(form): AppForm<CreateChallengeForm>,
) -> Result<impl IntoResponse, AppError> {
    let input = validate_create_challenge(&form)?;
    let challenger_team_id = auth_user.acting_team(input.challenger_team_id)?;

    let challenge = challenge_service(&state.db)
        .create(input.season_id, input.defender_team_id, challenger_team_id)
        .await?;

    Ok(redirect_to_challenge(challenge.id))
}

#[utoipa::path(
    post,
    path = "/challenges/propose-times",
    tag = "Challenges",
    operation_id = "proposeTimes",
    summary = "Propose three start times",
    description = "The defending team proposes three candidate start times (`YYYY-MM-DDTHH:MM`, UTC). All three are validated before anything is stored. Proposing again before a time is picked adds another three options.",
    request_body(content = ProposeTimesForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Times stored; redirects to the challenge detail"),
        (status = 400, description = "Missing field or unparseable time (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not the defending team (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Challenge already scheduled (CONFLICT)", body = ErrorBody),
        (status = 500, description = "Store failure (STORE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, form), fields(user_id = auth_user.user_id))]
pub async fn propose_times(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppForm(form): AppForm<ProposeTimesForm>,
) -> Result<impl IntoResponse, AppError> {
    let challenge_id = validate_propose_times(&form)?;
    parse_proposed_times(form.times())?;

    let service = challenge_service(&state.db);
    let challenge = service.find(challenge_id).await?;
    auth_user.require_team(challenge.defender_team_id, "defending")?;

    service.propose_times(challenge_id, form.times()).await?;

    Ok(redirect_to_challenge(challenge_id))
}

#[utoipa::path(
    post,
    path = "/challenges/pick-time",
    tag = "Challenges",
    operation_id = "pickTime",
    summary = "Pick a proposed time",
    description = "The challenging team picks one of the proposed times. A match is created (defender at home, challenger away) and the challenge becomes `scheduled`, atomically.",
    request_body(content = PickTimeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Match scheduled; redirects to the challenge detail"),
        (status = 400, description = "Missing field (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not the challenging team (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Challenge or time option not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Challenge already scheduled (CONFLICT)", body = ErrorBody),
        (status = 500, description = "Store failure (STORE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, form), fields(user_id = auth_user.user_id))]
pub async fn pick_time(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppForm(form): AppForm<PickTimeForm>,
) -> Result<impl IntoResponse, AppError> {
    let (challenge_id, time_option_id) = validate_pick_time(&form)?;

    let service = challenge_service(&state.db);
    let challenge = service.find(challenge_id).await?;
    auth_user.require_team(challenge.challenger_team_id, "challenging")?;

    service.pick_time(challenge_id, time_option_id).await?;

    Ok(redirect_to_challenge(challenge_id))
}

#[utoipa::path(
    get,
    path = "/challenges",
    tag = "Challenges",
    operation_id = "listChallenges",
    summary = "Challenges inbox for the active season",
    description = "Newest challenges of the active season, each with its proposed times sorted earliest first. Returns `season: null` and no data when no season is active.",
    params(ChallengeInboxQuery),
    responses(
        (status = 200, description = "Inbox", body = ChallengeInboxResponse),
        (status = 400, description = "Unknown status filter (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_challenges(
    State(state): State<AppState>,
    Query(query): Query<ChallengeInboxQuery>,
) -> Result<Json<ChallengeInboxResponse>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(ChallengeStatus::from_str)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let limit = clamp_limit(query.limit, 50, 100);

    let Some(season) = find_active_season(&state.db).await? else {
        return Ok(Json(ChallengeInboxResponse {
            season: None,
            data: vec![],
        }));
    };

    let mut select = team_challenge::Entity::find()
        .filter(team_challenge::Column::SeasonId.eq(season.id));
    if let Some(status) = status {
        select = select.filter(team_challenge::Column::Status.eq(status));
    }
    let challenges = select
        .order_by_desc(team_challenge::Column::CreatedAt)
        .order_by_desc(team_challenge::Column::Id)
        .limit(limit)
        .all(&state.db)
        .await?;

    let ids: Vec<i32> = challenges.iter().map(|c| c.id).collect();
    let mut options_by_challenge: HashMap<i32, Vec<TimeOptionResponse>> = HashMap::new();
    if !ids.is_empty() {
        let options = challenge_time_option::Entity::find()
            .filter(challenge_time_option::Column::ChallengeId.is_in(ids))
            .order_by_asc(challenge_time_option::Column::ProposedAt)
            .order_by_asc(challenge_time_option::Column::Id)
            .all(&state.db)
            .await?;
        for option in options {
            options_by_challenge
                .entry(option.challenge_id)
                .or_default()
                .push(option.into());
        }
    }

    let data = challenges
        .into_iter()
        .map(|c| ChallengeWithOptions {
            time_options: options_by_challenge.remove(&c.id).unwrap_or_default(),
            challenge: c.into(),
        })
        .collect();

    Ok(Json(ChallengeInboxResponse {
        season: Some(season.into()),
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/challenges/{id}",
    tag = "Challenges",
    operation_id = "getChallenge",
    summary = "Challenge detail",
    description = "A single challenge with its proposed times and, once scheduled, the match it produced.",
    params(("id" = i32, Path, description = "Challenge ID")),
    responses(
        (status = 200, description = "Challenge detail", body = ChallengeDetailResponse),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_challenge(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ChallengeDetailResponse>, AppError> {
    let service = challenge_service(&state.db);
    let challenge = service.find(id).await?;
    let time_options = service.time_options(id).await?;

    let scheduled_match = match challenge.match_id {
        Some(match_id) => league_match::Entity::find_by_id(match_id)
            .one(&state.db)
            .await?
            .map(MatchResponse::from),
        None => None,
    };

    Ok(Json(ChallengeDetailResponse {
        challenge: challenge.into(),
        time_options: time_options.into_iter().map(Into::into).collect(),
        scheduled_match,
    }))
}
