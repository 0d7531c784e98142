use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cat")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub breed: String,
    pub description: String,
    #[sea_orm(default_value = 0)]
    pub age: i32,

    /// Every cat has exactly one owner; only that owner may see or mutate it.
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    #[sea_orm(has_many)]
    pub feedings: HasMany<super::feeding::Entity>,

    #[sea_orm(has_many)]
    pub photos: HasMany<super::photo::Entity>,

    #[sea_orm(has_many, via = "cat_toy")]
    pub toys: HasMany<super::toy::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
