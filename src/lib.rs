pub mod api;
pub mod app;
pub mod diagnosis;
pub mod entities;
pub mod metrics;
pub mod migrator;
pub mod rules;
pub mod telemetry;

pub use sea_orm;
