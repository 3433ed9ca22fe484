pub mod event_db;
pub mod hotel_db;
pub mod record_store;
