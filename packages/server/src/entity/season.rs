use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seasons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    /// At most one season is expected to be active; not enforced by the store.
    #[sea_orm(default_value = false)]
    pub active: bool,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,

    #[sea_orm(has_many)]
    pub season_teams: HasMany<super::season_team::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
