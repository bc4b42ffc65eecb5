use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "plants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub plant_type: String,
    pub created_at: DateTime,
    pub last_watered: Option<DateTime>,
    // Carried on the profile but only ever written at creation; live readings
    // go to sensor_readings instead.
    pub soil_moisture: Option<f64>,
    pub health_status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
