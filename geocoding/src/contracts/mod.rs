pub mod address_search;
pub mod failed_geocoding;
pub mod geocode_projects;
