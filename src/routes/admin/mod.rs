pub mod ai_route;
pub mod auth;
pub mod event_route;
pub mod hotel_route;
pub mod import_route;
