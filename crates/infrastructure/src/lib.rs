//! Call-home Infrastructure Layer
pub mod database;
pub mod geolocation;
pub mod repositories;
