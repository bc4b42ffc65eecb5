pub use super::alert::Entity as Alert;
pub use super::detection::Entity as Detection;
pub use super::plant::Entity as Plant;
pub use super::sensor_reading::Entity as SensorReading;
