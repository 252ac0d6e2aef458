mod jobs;
mod repositories;
mod use_cases;

pub use jobs::start_jobs;
pub use repositories::Repositories;
pub use use_cases::UseCases;
