pub mod serve_dashboard;

pub use serve_dashboard::ServeDashboardUseCase;
