use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::season;
use crate::error::AppError;

/// The current season, if one is flagged active. Lowest id wins if several are.
pub async fn find_active_season<C: sea_orm::ConnectionTrait>(
    db: &C,
) -> Result<Option<season::Model>, AppError> {
    Ok(season::Entity::find()
        .filter(season::Column::Active.eq(true))
        .order_by_asc(season::Column::Id)
        .one(db)
        .await?)
}
