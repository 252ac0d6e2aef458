pub mod dashboard;
pub mod deployments;
pub mod health;
pub mod telemetry;

pub use dashboard::get_dashboard;
pub use health::health_check;
