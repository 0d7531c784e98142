use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shared toy catalog. Toys are not owned by any user; cats reference them
/// through the `cat_toy` join table.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "toy")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub color: String,

    #[sea_orm(has_many, via = "cat_toy")]
    pub cats: HasMany<super::cat::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
