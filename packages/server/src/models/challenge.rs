use chrono::{DateTime, Utc};
use common::{ChallengeStatus, MatchStatus};
use serde::{Deserialize, Serialize};

use super::shared::{parse_form_id, require_form_id};
use crate::entity::{challenge_time_option, league_match, team_challenge};
use crate::error::AppError;

const CREATE_MISSING: &str = "Missing seasonId/defenderTeamId/challengerTeamId";
const PROPOSE_MISSING: &str = "Need challengeId and 3 times";
const PICK_MISSING: &str = "Missing challengeId/timeOptionId";

/// Form body for opening a challenge.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateChallengeForm {
    #[schema(example = "1")]
    pub season_id: String,
    #[schema(example = "2")]
    pub defender_team_id: String,
    /// Optional for players (derived from the session). Admins must set it.
    #[schema(example = "3")]
    pub challenger_team_id: String,
}

pub struct CreateChallengeInput {
    pub season_id: i32,
    pub defender_team_id: i32,
    pub challenger_team_id: Option<i32>,
}

pub fn validate_create_challenge(form: &CreateChallengeForm) -> Result<CreateChallengeInput, AppError> {
    Ok(CreateChallengeInput {
        season_id: require_form_id("seasonId", &form.season_id, CREATE_MISSING)?,
        defender_team_id: require_form_id("defenderTeamId", &form.defender_team_id, CREATE_MISSING)?,
        challenger_team_id: parse_form_id("challengerTeamId", &form.challenger_team_id)?,
    })
}

/// Form body for the defender's three proposed start times.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProposeTimesForm {
    #[schema(example = "1")]
    pub challenge_id: String,
    #[schema(example = "2026-01-12T20:00")]
    pub t1: String,
    #[schema(example = "2026-01-13T20:00")]
    pub t2: String,
    #[schema(example = "2026-01-14T20:00")]
    pub t3: String,
}

impl ProposeTimesForm {
    pub fn times(&self) -> [&str; 3] {
        [self.t1.trim(), self.t2.trim(), self.t3.trim()]
    }
}

pub fn validate_propose_times(form: &ProposeTimesForm) -> Result<i32, AppError> {
    if form.times().iter().any(|t| t.is_empty()) {
        return Err(AppError::Validation(PROPOSE_MISSING.into()));
    }
    require_form_id("challengeId", &form.challenge_id, PROPOSE_MISSING)
}

/// Form body for picking one of the proposed times.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PickTimeForm {
    #[schema(example = "1")]
    pub challenge_id: String,
    #[schema(example = "2")]
    pub time_option_id: String,
}

pub fn validate_pick_time(form: &PickTimeForm) -> Result<(i32, i32), AppError> {
    let challenge_id = require_form_id("challengeId", &form.challenge_id, PICK_MISSING)?;
    let time_option_id = require_form_id("timeOptionId", &form.time_option_id, PICK_MISSING)?;
    Ok((challenge_id, time_option_id))
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ChallengeInboxQuery {
    /// Only challenges in this status (`requested`, `times_proposed`, `scheduled`).
    pub status: Option<String>,
    /// Maximum number of challenges (1-100, default 50).
    pub limit: Option<u64>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChallengeResponse {
    pub id: i32,
    pub season_id: i32,
    pub division_id: i32,
    pub challenger_team_id: i32,
    pub defender_team_id: i32,
    pub status: ChallengeStatus,
    pub selected_time_option_id: Option<i32>,
    pub match_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<team_challenge::Model> for ChallengeResponse {
    fn from(m: team_challenge::Model) -> Self {
        Self {
            id: m.id,
            season_id: m.season_id,
            division_id: m.division_id,
            challenger_team_id: m.challenger_team_id,
            defender_team_id: m.defender_team_id,
            status: m.status,
            selected_time_option_id: m.selected_time_option_id,
            match_id: m.match_id,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TimeOptionResponse {
    pub id: i32,
    pub proposed_at: DateTime<Utc>,
}

impl From<challenge_time_option::Model> for TimeOptionResponse {
    fn from(m: challenge_time_option::Model) -> Self {
        Self {
            id: m.id,
            proposed_at: m.proposed_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MatchResponse {
    pub id: i32,
    pub season_id: i32,
    pub division_id: i32,
    pub home_team: i32,
    pub away_team: i32,
    pub scheduled_at: DateTime<Utc>,
    pub status: MatchStatus,
}

impl From<league_match::Model> for MatchResponse {
    fn from(m: league_match::Model) -> Self {
        Self {
            id: m.id,
            season_id: m.season_id,
            division_id: m.division_id,
            home_team: m.home_team,
            away_team: m.away_team,
            scheduled_at: m.scheduled_at,
            status: m.status,
        }
    }
}

/// A challenge together with its proposed times, earliest first.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ChallengeWithOptions {
    pub challenge: ChallengeResponse,
    pub time_options: Vec<TimeOptionResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChallengeDetailResponse {
    pub challenge: ChallengeResponse,
    pub time_options: Vec<TimeOptionResponse>,
    /// Present once the challenge is scheduled.
    pub scheduled_match: Option<MatchResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChallengeInboxResponse {
    /// The active season, or null when none is flagged active.
    pub season: Option<super::league::SeasonResponse>,
    pub data: Vec<ChallengeWithOptions>,
}
