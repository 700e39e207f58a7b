use chrono::{DateTime, Utc};
use common::ChallengeStatus;
use serde::Serialize;

use super::league::SeasonResponse;
use crate::entity::team_challenge;
use crate::utils::standings::NextMatch;

#[derive(Serialize, utoipa::ToSchema)]
pub struct StandingRow {
    /// 1-based position after ordering by points, then flag differential.
    pub rank: usize,
    pub team_id: i32,
    pub name: String,
    pub tag: String,
    pub division_id: i32,
    pub wins: i32,
    pub losses: i32,
    pub points: i32,
    pub flag_diff: i32,
    pub next_match: Option<NextMatch>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecentChallenge {
    pub id: i32,
    pub status: ChallengeStatus,
    pub challenger_team_id: i32,
    pub defender_team_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<team_challenge::Model> for RecentChallenge {
    fn from(m: team_challenge::Model) -> Self {
        Self {
            id: m.id,
            status: m.status,
            challenger_team_id: m.challenger_team_id,
            defender_team_id: m.defender_team_id,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StandingsResponse {
    /// The active season, or null when none is flagged active.
    pub season: Option<SeasonResponse>,
    pub standings: Vec<StandingRow>,
    pub recent_challenges: Vec<RecentChallenge>,
}
