pub mod alert;
pub mod detection;
pub mod plant;
pub mod sensor_reading;

pub use alert::Entity as Alert;
pub use detection::Entity as Detection;
pub use plant::Entity as Plant;
pub use sensor_reading::Entity as SensorReading;

pub mod prelude;
