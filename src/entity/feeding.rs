use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One meal given to one cat on one calendar date. Append-only from the
/// application's perspective; listed newest date first.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feeding")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub date: Date,
    /// One of: B, L, D. See [`crate::models::feeding::Meal`].
    #[sea_orm(default_value = "B")]
    pub meal: String,

    pub cat_id: i32,
    #[sea_orm(belongs_to, from = "cat_id", to = "id")]
    pub cat: HasOne<super::cat::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
