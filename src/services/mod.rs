pub mod bulk_import;
pub mod gemini_client;
pub mod place_validator;
pub mod spreadsheet;
pub mod templates;
pub mod wikipedia_client;

pub use bulk_import::*;
pub use gemini_client::*;
pub use place_validator::*;
pub use spreadsheet::*;
pub use templates::*;
pub use wikipedia_client::*;
