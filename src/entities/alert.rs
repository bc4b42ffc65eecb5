use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Derived notification created by rule evaluation. `resolved` is the only
/// mutable column and only ever flips false -> true.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plant_id: Uuid,
    pub alert_type: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub severity: String,
    pub timestamp: DateTime,
    pub resolved: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
