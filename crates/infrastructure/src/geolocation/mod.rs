mod http_location_service;

pub use http_location_service::HttpLocationService;
