use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

pub const NON_INDIA_COUNTRIES: &[&str] = &[
    "usa",
    "united states",
    "united states of america",
    "u.s.",
    "u.s.a.",
    "uk",
    "united kingdom",
    "england",
    "scotland",
    "wales",
    "britain",
    "great britain",
    "canada",
    "australia",
    "new zealand",
    "france",
    "germany",
    "italy",
    "spain",
    "portugal",
    "netherlands",
    "holland",
    "belgium",
    "switzerland",
    "austria",
    "greece",
    "turkey",
    "russia",
    "china",
    "japan",
    "south korea",
    "korea",
    "north korea",
    "thailand",
    "singapore",
    "malaysia",
    "indonesia",
    "philippines",
    "vietnam",
    "cambodia",
    "laos",
    "myanmar",
    "burma",
    "nepal",
    "bangladesh",
    "pakistan",
    "sri lanka",
    "maldives",
    "bhutan",
    "afghanistan",
    "iran",
    "iraq",
    "saudi arabia",
    "uae",
    "united arab emirates",
    "qatar",
    "kuwait",
    "israel",
    "egypt",
    "south africa",
    "brazil",
    "argentina",
    "mexico",
    "chile",
    "peru",
    "colombia",
];

/// Checked in order; the first phrase found in the article text decides.
pub const INDIA_INDICATORS: &[&str] = &[
    "india",
    "indian",
    "states of india",
    "union territory",
    "district in",
    "city in",
    "town in",
    "village in",
    "municipality in",
    "located in india",
    "situated in india",
    "in the state of",
    "in the union territory of",
];

const SNIPPET_DIASPORA: &[&str] = &[
    "indian american",
    "indian british",
    "indian canadian",
    "indian australian",
];

const ARTICLE_DIASPORA: &[&str] = &[
    "indian american",
    "indian british",
    "indian canadian",
    "indian australian",
    "indian origin",
];

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

pub const INDIA_BOUNDS: BoundingBox = BoundingBox {
    min_lat: 6.5,
    max_lat: 37.1,
    min_lon: 68.1,
    max_lon: 97.4,
};

impl BoundingBox {
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coordinate.lat)
            && (self.min_lon..=self.max_lon).contains(&coordinate.lon)
    }
}

/// Patterns for one denylisted country, compiled once per process.
pub struct CountryMatcher {
    pub country: &'static str,
    located_in: Regex,
    title_suffix: Regex,
    comma_prefix: String,
    space_prefix: String,
}

impl CountryMatcher {
    fn new(country: &'static str) -> Self {
        let escaped = regex::escape(country);
        let located_in = Regex::new(&format!(
            r"(?i)\b(in|of|from|located in|situated in|city in|town in|state of|country of|capital of|largest city in|in the|of the)\s+(the\s+)?{}\b",
            escaped
        ))
        .expect("country pattern is a valid regex");
        let title_suffix = Regex::new(&format!(r"(?i)(,|\s+in\s+|,\s+)(the\s+)?{}\b", escaped))
            .expect("country pattern is a valid regex");

        CountryMatcher {
            country,
            located_in,
            title_suffix,
            comma_prefix: format!("{},", country),
            space_prefix: format!("{} ", country),
        }
    }

    /// "capital of France", "a town in the UK"
    pub fn locates_in_text(&self, text: &str) -> bool {
        self.located_in.is_match(text)
    }

    /// "Paris, France", "Springfield in the United States", or a title that is the country itself.
    pub fn names_country_in_title(&self, title: &str) -> bool {
        self.title_suffix.is_match(title)
            || title == self.country
            || title.starts_with(&self.comma_prefix)
            || title.starts_with(&self.space_prefix)
    }
}

pub static COUNTRY_MATCHERS: Lazy<Vec<CountryMatcher>> =
    Lazy::new(|| NON_INDIA_COUNTRIES.iter().map(|c| CountryMatcher::new(*c)).collect());

pub fn is_non_india_country(place_name: &str) -> bool {
    let normalized = place_name.trim().to_lowercase();
    NON_INDIA_COUNTRIES.iter().any(|country| {
        normalized == *country || normalized.contains(country) || country.contains(&normalized)
    })
}

/// Returns the denylisted country the text places this article in, if any.
pub fn foreign_country_in(title: &str, text: &str) -> Option<&'static str> {
    COUNTRY_MATCHERS
        .iter()
        .find(|m| m.locates_in_text(text) || m.names_country_in_title(title))
        .map(|m| m.country)
}

pub fn snippet_mentions_india(snippet: &str) -> bool {
    snippet.contains("india")
}

pub fn snippet_is_about_diaspora(snippet: &str) -> bool {
    SNIPPET_DIASPORA.iter().any(|q| snippet.contains(q))
}

pub fn article_indicates_india(text: &str) -> Option<&'static str> {
    let diaspora = ARTICLE_DIASPORA.iter().any(|q| text.contains(q));
    INDIA_INDICATORS
        .iter()
        .filter(|indicator| text.contains(*indicator))
        .find(|indicator| !(**indicator == "indian" && diaspora))
        .copied()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PlacesInput {
    One(String),
    Many(#[serde(deserialize_with = "scalars_as_strings")] Vec<String>),
}

/// `[42, "Agra", true]` reads as `["42", "Agra", "true"]`.
fn scalars_as_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

impl PlacesInput {
    pub fn into_places(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            PlacesInput::One(s) => s.split(',').map(str::to_string).collect(),
            PlacesInput::Many(v) => v,
        };

        raw.into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceValidation {
    pub valid: bool,
    pub invalid_places: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub const NO_PLACES_MESSAGE: &str = "No places provided";
pub const OUTSIDE_INDIA_MESSAGE: &str = "Please provide places within India";

impl PlaceValidation {
    pub fn no_places() -> Self {
        PlaceValidation {
            valid: false,
            invalid_places: vec![],
            message: Some(NO_PLACES_MESSAGE.to_string()),
        }
    }

    pub fn from_rejected(invalid_places: Vec<String>) -> Self {
        match invalid_places.is_empty() {
            true => PlaceValidation {
                valid: true,
                invalid_places,
                message: None,
            },
            false => PlaceValidation {
                valid: false,
                invalid_places,
                message: Some(OUTSIDE_INDIA_MESSAGE.to_string()),
            },
        }
    }
}
