use super::{
    bulk_import::ImportKind,
    spreadsheet::{write_template, SpreadsheetError},
};

const EVENT_TEMPLATE: &[(&str, &str)] = &[
    ("Title", "Example Event Name"),
    ("Description", "This is a sample event description"),
    ("Location", "Event Venue Address"),
    ("City", "Mumbai"),
    ("State", "Maharashtra"),
    ("Event Date", "2024-12-25"),
    ("Start Time", "10:00"),
    ("End Time", "18:00"),
    ("Category", "Cultural Festival"),
    ("Price", "500"),
    ("Max Capacity", "1000"),
    ("Image URL", "https://example.com/image.jpg"),
    ("Organizer", "Event Organizer Name"),
    ("Contact Email", "contact@example.com"),
    ("Contact Phone", "+91 1234567890"),
    ("Maps URL", "https://maps.google.com/..."),
    ("Website", "https://example.com"),
    ("Tags", "music, outdoor, family-friendly"),
    ("Is Active", "true"),
];

const HOTEL_TEMPLATE: &[(&str, &str)] = &[
    ("Name", "Example Hotel Name"),
    ("City", "Mumbai"),
    ("State", "Maharashtra"),
    ("Address", "Hotel Address, Street, Area"),
    ("Price Per Night", "3000"),
    ("Rating", "4"),
    ("Amenities", "WiFi, Pool, Restaurant, Parking"),
    ("Maps URL", "https://maps.google.com/..."),
    ("Website", "https://example.com"),
    ("Contact", "+91 1234567890"),
];

pub struct Template {
    pub filename: &'static str,
    pub bytes: Vec<u8>,
}

pub fn import_template(kind: &ImportKind) -> Result<Template, SpreadsheetError> {
    let (sheet_name, columns, filename) = match kind {
        ImportKind::Events => ("Events", EVENT_TEMPLATE, "events-template.xlsx"),
        ImportKind::Hotels => ("Hotels", HOTEL_TEMPLATE, "hotels-template.xlsx"),
    };

    Ok(Template {
        filename,
        bytes: write_template(sheet_name, columns)?,
    })
}

#[cfg(test)]
mod tests {
    use super::import_template;
    use crate::services::{
        bulk_import::{import_rows, tests::MemoryStore, ImportKind},
        spreadsheet::read_first_sheet,
    };

    #[tokio::test]
    async fn event_template_example_row_imports_cleanly() {
        let template = import_template(&ImportKind::Events).unwrap();
        assert_eq!(template.filename, "events-template.xlsx");

        let rows = read_first_sheet(template.bytes).unwrap();
        let store = MemoryStore::default();
        let report = import_rows(&store, &ImportKind::Events, &rows, "admin").await;

        assert_eq!((report.success, report.failed), (1, 0));
        let event = store.events.lock().unwrap().remove(0);
        assert_eq!(event.category, "Cultural Festival");
        assert_eq!(event.max_capacity, Some(1000));
        assert_eq!(event.tags, vec!["music", "outdoor", "family-friendly"]);
        assert!(event.is_active);
    }

    #[tokio::test]
    async fn hotel_template_example_row_imports_cleanly() {
        let template = import_template(&ImportKind::Hotels).unwrap();
        let rows = read_first_sheet(template.bytes).unwrap();
        let store = MemoryStore::default();
        let report = import_rows(&store, &ImportKind::Hotels, &rows, "admin").await;

        assert_eq!((report.success, report.failed), (1, 0));
        let hotel = store.hotels.lock().unwrap().remove(0);
        assert_eq!(hotel.rating, Some(4.0));
        assert_eq!(hotel.amenities.len(), 4);
    }
}
