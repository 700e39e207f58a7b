use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub tag: String,

    #[sea_orm(has_many)]
    pub season_teams: HasMany<super::season_team::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
