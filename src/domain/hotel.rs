use serde::Serialize;

use super::{import_report::RowError, sheet_row::SheetRow};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub name: String,
    pub city: String,
    pub city_lower: String,
    pub state: Option<String>,
    pub address: Option<String>,
    pub location: GeoPoint,
    #[serde(rename = "pricePerNightINR")]
    pub price_per_night_inr: Option<f64>,
    pub rating: Option<f64>,
    pub amenities: Vec<String>,
    pub maps_url: Option<String>,
    pub website: Option<String>,
    pub contact: Option<String>,
    pub created_at: i64,
    pub created_by: String,
}

impl Hotel {
    pub fn from_row(row: &SheetRow, created_by: &str, created_at: i64) -> Result<Self, RowError> {
        let (Some(name), Some(city)) = (
            row.required_text(&["Name", "name", "Hotel Name"]),
            row.required_text(&["City", "city"]),
        ) else {
            return Err(RowError::MissingFields("Name, City"));
        };

        Ok(Hotel {
            city_lower: city.to_lowercase(),
            name,
            city,
            state: row.text(&["State", "state"]),
            address: row.text(&["Address", "address"]),
            location: GeoPoint::default(),
            price_per_night_inr: row.number(&["Price Per Night", "pricePerNight", "PricePerNight"])?,
            rating: row.number(&["Rating", "rating"])?,
            amenities: row.list(&["Amenities", "amenities"]),
            maps_url: row.text(&["Maps URL", "mapsUrl", "MapsUrl"]),
            website: row.text(&["Website", "website"]),
            contact: row.text(&["Contact", "contact"]),
            created_at,
            created_by: created_by.to_string(),
        })
    }
}
