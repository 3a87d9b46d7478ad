use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    /// UUIDv7, so ids sort roughly by creation time.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// JSON array of strings, in entry order.
    #[sea_orm(column_type = "JsonBinary")]
    pub ingredients: serde_json::Value,
    /// JSON array of strings, in execution order.
    #[sea_orm(column_type = "JsonBinary")]
    pub instructions: serde_json::Value,

    pub prep_time: Option<i32>, // in minutes
    pub cook_time: Option<i32>, // in minutes
    pub servings: Option<i32>,
    pub price: Option<f64>,
    pub image_url: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
