use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A candidate start time proposed by the defender. Never updated or deleted.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challenge_time_options")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub challenge_id: i32,
    #[sea_orm(belongs_to, from = "challenge_id", to = "id")]
    pub challenge: HasOne<super::team_challenge::Entity>,

    pub proposed_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
