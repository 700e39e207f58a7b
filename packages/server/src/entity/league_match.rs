use common::MatchStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub season_id: i32,
    pub division_id: i32,
    /// Always the defender of the originating challenge.
    pub home_team: i32,
    /// Always the challenger of the originating challenge.
    pub away_team: i32,
    pub scheduled_at: DateTimeUtc,
    pub status: MatchStatus,
}

impl Model {
    /// Whether `team_id` plays in this match, on either side.
    pub fn involves(&self, team_id: i32) -> bool {
        self.home_team == team_id || self.away_team == team_id
    }
}

impl ActiveModelBehavior for ActiveModel {}
