use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A team's membership and standing within one season.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "season_teams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub season_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub team_id: i32,
    #[sea_orm(belongs_to, from = "season_id", to = "id")]
    pub season: HasOne<super::season::Entity>,
    #[sea_orm(belongs_to, from = "team_id", to = "id")]
    pub team: HasOne<super::team::Entity>,

    pub division_id: i32,
    #[sea_orm(default_value = 0)]
    pub wins: i32,
    #[sea_orm(default_value = 0)]
    pub losses: i32,
    #[sea_orm(default_value = 0)]
    pub points: i32,
    #[sea_orm(default_value = 0)]
    pub flag_diff: i32,
}

impl ActiveModelBehavior for ActiveModel {}
