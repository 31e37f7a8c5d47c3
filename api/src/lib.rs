pub mod basic_types;
pub mod endpoints;
pub mod files;
pub mod params;
pub mod proto;
pub mod request;
pub mod response;
