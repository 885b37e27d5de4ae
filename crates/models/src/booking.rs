use sea_orm::{entity::prelude::*, sea_query::OnConflict, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,
    pub municipality: String,
    pub address: String,
    pub time_slot: DateTime,
    #[sea_orm(column_type = "Text")]
    pub item_description: String,
    pub status: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert the row, or overwrite every mutable column when the token already exists.
/// A slot held by another token surfaces as [`errors::ModelError::UniqueViolation`].
pub async fn upsert(db: &DatabaseConnection, model: Model) -> Result<(), errors::ModelError> {
    let am: ActiveModel = model.into();
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Token)
                .update_columns([
                    Column::Municipality,
                    Column::Address,
                    Column::TimeSlot,
                    Column::ItemDescription,
                    Column::Status,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

pub async fn find_by_token(db: &DatabaseConnection, token: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(token.to_string()).one(db).await?)
}

pub async fn find_by_slot(
    db: &DatabaseConnection,
    municipality: &str,
    time_slot: DateTime,
) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find()
        .filter(Column::Municipality.eq(municipality))
        .filter(Column::TimeSlot.eq(time_slot))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().all(db).await?)
}

pub async fn list_by_municipality(db: &DatabaseConnection, municipality: &str) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::Municipality.eq(municipality))
        .all(db)
        .await?;
    Ok(rows)
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, token: &str) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(token.to_string()).exec(db).await?;
    Ok(res.rows_affected > 0)
}
