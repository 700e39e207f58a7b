use chrono::NaiveDate;
use serde::Serialize;

use crate::entity::season;

#[derive(Serialize, utoipa::ToSchema)]
pub struct SeasonResponse {
    pub id: i32,
    pub name: String,
    pub active: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<season::Model> for SeasonResponse {
    fn from(m: season::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            active: m.active,
            start_date: m.start_date,
            end_date: m.end_date,
        }
    }
}

/// League-wide summary.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LeagueStatusResponse {
    pub active_season: Option<SeasonResponse>,
    #[schema(example = 12)]
    pub teams: u64,
    #[schema(example = 4)]
    pub free_agents: u64,
    /// Every season, most recent start first.
    pub seasons: Vec<SeasonResponse>,
}
