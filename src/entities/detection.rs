use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One stored diagnosis run against an uploaded image. Rows are written once
/// and never updated. `plant_id` is a soft reference: the plant may have been
/// deleted since, and no cleanup happens.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "detections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plant_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub image_data: String,
    pub disease_name: String,
    // Stored as a 0-1 fraction; the API reports it as a percentage.
    pub confidence: f64,
    pub severity: String,
    #[sea_orm(column_type = "Text")]
    pub treatment: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub timestamp: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
