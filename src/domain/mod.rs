pub mod event;
pub mod hotel;
pub mod import_report;
pub mod place;
pub mod sheet_row;
