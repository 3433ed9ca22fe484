use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::{
    import_report::RowError,
    sheet_row::{Cell, SheetRow},
};

const EXCEL_EPOCH_OFFSET_DAYS: f64 = 25569.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    pub description: String,
    pub location: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub event_date: i64,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub category: String,
    pub price: Option<f64>,
    pub max_capacity: Option<i64>,
    pub image_url: Option<String>,
    pub organizer: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub maps_url: Option<String>,
    pub website: Option<String>,
    pub tags: Vec<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub created_by: String,
}

impl Event {
    pub fn from_row(row: &SheetRow, created_by: &str, created_at: i64) -> Result<Self, RowError> {
        let title = row.required_text(&["Title", "title", "Event Title"]);
        let description = row.required_text(&["Description", "description"]);
        let location = row.required_text(&["Location", "location", "Venue"]);
        let event_date = row.pick(&["Event Date", "eventDate", "Date"]);

        let (Some(title), Some(description), Some(location), Some(event_date)) =
            (title, description, location, event_date)
        else {
            return Err(RowError::MissingFields(
                "Title, Description, Location, Event Date",
            ));
        };

        let event_date = parse_event_date(event_date)?;

        let max_capacity = match row.number(&["Max Capacity", "maxCapacity", "MaxCapacity"])? {
            Some(n) if n.fract() != 0.0 => {
                return Err(RowError::InvalidNumber("Max Capacity".to_string()))
            }
            other => other.map(|n| n as i64),
        };

        Ok(Event {
            title,
            description,
            location,
            city: row.text(&["City", "city"]),
            state: row.text(&["State", "state"]),
            event_date,
            start_time: row.text(&["Start Time", "startTime", "StartTime"]),
            end_time: row.text(&["End Time", "endTime", "EndTime"]),
            category: row
                .text(&["Category", "category"])
                .unwrap_or_else(|| "General".to_string()),
            price: row.number(&["Price", "price"])?,
            max_capacity,
            image_url: row.text(&["Image URL", "imageUrl", "ImageUrl"]),
            organizer: row.text(&["Organizer", "organizer"]),
            contact_email: row.text(&["Contact Email", "contactEmail", "ContactEmail"]),
            contact_phone: row.text(&["Contact Phone", "contactPhone", "ContactPhone"]),
            maps_url: row.text(&["Maps URL", "mapsUrl", "MapsUrl"]),
            website: row.text(&["Website", "website"]),
            tags: row.list(&["Tags", "tags"]),
            is_active: row
                .get("Is Active")
                .map(|cell| cell.to_text().to_lowercase() == "true")
                .unwrap_or(true),
            created_at,
            created_by: created_by.to_string(),
        })
    }
}

/// Milliseconds since the Unix epoch. Numbers are Excel serial dates; text is read as UTC.
pub fn parse_event_date(cell: &Cell) -> Result<i64, RowError> {
    match cell {
        Cell::Number(serial) => Ok(excel_serial_to_millis(*serial)),
        Cell::Text(text) => parse_date_text(text.trim()).ok_or(RowError::InvalidDate),
        Cell::Bool(_) => Err(RowError::InvalidDate),
    }
}

fn excel_serial_to_millis(serial: f64) -> i64 {
    ((serial - EXCEL_EPOCH_OFFSET_DAYS) * MILLIS_PER_DAY).round() as i64
}

fn parse_date_text(text: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }

    const DATE_TIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    if let Some(dt) = DATE_TIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
    {
        return Some(dt.and_utc().timestamp_millis());
    }

    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
    {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis());
    }

    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(excel_serial_to_millis)
}
