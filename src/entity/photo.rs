use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reference to an externally stored image. Only the public URL is persisted;
/// the binary lives in the object store and is not cleaned up when the row
/// goes away.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "photo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub url: String,

    pub cat_id: i32,
    #[sea_orm(belongs_to, from = "cat_id", to = "id")]
    pub cat: HasOne<super::cat::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
