pub mod admin;
pub mod api_error;
pub mod default_route;
pub mod place_route;

pub use admin::*;
pub use api_error::ApiError;
