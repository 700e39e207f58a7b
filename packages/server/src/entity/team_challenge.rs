use common::ChallengeStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_challenges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub season_id: i32,
    /// Copied from the defender's `season_teams` row at creation.
    pub division_id: i32,
    pub challenger_team_id: i32,
    pub defender_team_id: i32,

    pub status: ChallengeStatus,

    /// Set together with `match_id` when a time is picked.
    pub selected_time_option_id: Option<i32>,
    pub match_id: Option<i32>,

    #[sea_orm(has_many)]
    pub time_options: HasMany<super::challenge_time_option::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
