pub mod runner;
pub mod telemetry_retention;
pub mod wal_checkpoint;

pub use runner::JobRunner;
pub use telemetry_retention::TelemetryRetentionJob;
pub use wal_checkpoint::WalCheckpointJob;
