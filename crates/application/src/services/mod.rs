pub mod dashboard_renderer;
pub mod ip_lock;

pub use dashboard_renderer::{DashboardData, DashboardRenderer};
pub use ip_lock::{IpMergeGuard, IpMergeLocks};
