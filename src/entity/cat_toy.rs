use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join row for the cat/toy many-to-many relation. The composite primary key
/// makes association idempotent: a duplicate add is a unique violation the
/// handler swallows.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cat_toy")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub cat_id: i32,
    #[sea_orm(primary_key)]
    pub toy_id: i32,
    #[sea_orm(belongs_to, from = "cat_id", to = "id")]
    pub cat: BelongsTo<super::cat::Entity>,
    #[sea_orm(belongs_to, from = "toy_id", to = "id")]
    pub toy: BelongsTo<super::toy::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
