use std::sync::Arc;

use futures::future::join_all;

use crate::domain::place::{
    article_indicates_india, foreign_country_in, is_non_india_country, snippet_is_about_diaspora,
    snippet_mentions_india, PlaceValidation, PlacesInput, INDIA_BOUNDS,
};

use super::wikipedia_client::{strip_markup, LookupError, PlaceLookup};

/// Decides whether free-text place names are in India. Inconclusive evidence and
/// lookup failures reject; nothing is surfaced to the caller as an error.
pub struct PlaceValidator {
    lookup: Arc<dyn PlaceLookup>,
}

impl PlaceValidator {
    pub fn new(lookup: Arc<dyn PlaceLookup>) -> Self {
        PlaceValidator { lookup }
    }

    pub async fn is_place_in_india(&self, place_name: &str) -> bool {
        let place = place_name.trim();
        if place.is_empty() {
            return false;
        }

        if is_non_india_country(place) {
            log::info!("Rejected {}: Known non-India country", place);
            return false;
        }

        self.classify(place).await
    }

    async fn classify(&self, place: &str) -> bool {
        let hit = match self.lookup.top_search_hit(place).await {
            Ok(Some(hit)) => hit,
            Ok(None) => {
                log::info!("Rejected {}: No search results", place);
                return false;
            }
            Err(e) => {
                log::error!("Wikipedia search failed for {}: {}", place, e);
                return false;
            }
        };

        if is_non_india_country(&hit.title) {
            log::info!(
                "Rejected {}: Page title \"{}\" is a non-India country",
                place,
                hit.title
            );
            return false;
        }

        let snippet = strip_markup(&hit.snippet).to_lowercase();
        if snippet_mentions_india(&snippet) && !snippet_is_about_diaspora(&snippet) {
            return true;
        }

        let page = match self.lookup.page_summary(&hit.title).await {
            Ok(Some(page)) => page,
            Ok(None) => {
                log::info!("Rejected {}: No page found for \"{}\"", place, hit.title);
                return false;
            }
            Err(LookupError::Status(status)) => {
                log::error!(
                    "Wikipedia page fetch failed for {} with status {}",
                    hit.title,
                    status
                );
                return snippet_mentions_india(&snippet);
            }
            Err(e) => {
                log::error!("Wikipedia page fetch failed for {}: {}", hit.title, e);
                return false;
            }
        };

        let title = page.title.to_lowercase();
        if is_non_india_country(&title) {
            log::info!(
                "Rejected {}: Page title \"{}\" is a non-India country",
                place,
                title
            );
            return false;
        }

        let extract = page.extract.as_deref().unwrap_or_default().to_lowercase();
        let text = format!("{} {}", title, extract);

        if let Some(country) = foreign_country_in(&title, &text) {
            log::info!("Rejected {}: Text indicates location in \"{}\"", place, country);
            return false;
        }

        if let Some(indicator) = article_indicates_india(&text) {
            log::debug!("Accepted {}: Article mentions \"{}\"", place, indicator);
            return true;
        }

        if let Some(coordinate) = page.coordinates.first() {
            if INDIA_BOUNDS.contains(coordinate) {
                return true;
            }
            log::info!(
                "Rejected {}: Coordinates ({}, {}) are outside India",
                place,
                coordinate.lat,
                coordinate.lon
            );
            return false;
        }

        log::info!("Rejected {}: Could not confirm location is in India", place);
        false
    }

    /// Every listed place must be in India for the batch to be valid.
    pub async fn validate_places(&self, input: PlacesInput) -> PlaceValidation {
        let places = input.into_places();
        if places.is_empty() {
            return PlaceValidation::no_places();
        }

        let verdicts = join_all(places.iter().map(|p| self.is_place_in_india(p))).await;

        let invalid_places = places
            .into_iter()
            .zip(verdicts)
            .filter_map(|(place, in_india)| (!in_india).then_some(place))
            .collect();

        PlaceValidation::from_rejected(invalid_places)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    use async_trait::async_trait;

    use super::PlaceValidator;
    use crate::{
        domain::place::{
            Coordinate, PlacesInput, NON_INDIA_COUNTRIES, NO_PLACES_MESSAGE,
            OUTSIDE_INDIA_MESSAGE,
        },
        services::wikipedia_client::{LookupError, PageSummary, PlaceLookup, SearchHit},
    };

    #[derive(Default)]
    pub(crate) struct FakeLookup {
        hits: HashMap<String, Result<Option<SearchHit>, LookupError>>,
        pages: HashMap<String, Result<Option<PageSummary>, LookupError>>,
        search_calls: AtomicUsize,
        page_calls: AtomicUsize,
    }

    impl FakeLookup {
        pub(crate) fn hit(mut self, query: &str, title: &str, snippet: &str) -> Self {
            self.hits.insert(
                query.to_string(),
                Ok(Some(SearchHit {
                    title: title.to_string(),
                    snippet: snippet.to_string(),
                })),
            );
            self
        }

        pub(crate) fn failing_search(mut self, query: &str, error: LookupError) -> Self {
            self.hits.insert(query.to_string(), Err(error));
            self
        }

        pub(crate) fn page(mut self, title: &str, extract: &str, coordinates: Vec<Coordinate>) -> Self {
            self.pages.insert(
                title.to_string(),
                Ok(Some(PageSummary {
                    title: title.to_string(),
                    extract: Some(extract.to_string()),
                    coordinates,
                })),
            );
            self
        }

        pub(crate) fn failing_page(mut self, title: &str, error: LookupError) -> Self {
            self.pages.insert(title.to_string(), Err(error));
            self
        }

        pub(crate) fn calls(&self) -> (usize, usize) {
            (
                self.search_calls.load(Ordering::SeqCst),
                self.page_calls.load(Ordering::SeqCst),
            )
        }
    }

    #[async_trait]
    impl PlaceLookup for FakeLookup {
        async fn top_search_hit(&self, query: &str) -> Result<Option<SearchHit>, LookupError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            self.hits.get(query).cloned().unwrap_or(Ok(None))
        }

        async fn page_summary(&self, title: &str) -> Result<Option<PageSummary>, LookupError> {
            self.page_calls.fetch_add(1, Ordering::SeqCst);
            self.pages.get(title).cloned().unwrap_or(Ok(None))
        }
    }

    fn validator(lookup: FakeLookup) -> (PlaceValidator, Arc<FakeLookup>) {
        let lookup = Arc::new(lookup);
        (PlaceValidator::new(lookup.clone()), lookup)
    }

    fn india_and_london() -> FakeLookup {
        FakeLookup::default()
            .hit(
                "Mumbai",
                "Mumbai",
                r#"Mumbai is the capital of the <span class="searchmatch">Indian</span> state of Maharashtra"#,
            )
            .hit(
                "London",
                "London",
                "London is the capital and largest city of England and the United Kingdom",
            )
            .page(
                "London",
                "London is the capital and largest city of England and the United Kingdom.",
                vec![Coordinate { lat: 51.507, lon: -0.128 }],
            )
    }

    #[tokio::test]
    async fn denylisted_names_are_rejected_without_lookups() {
        let (validator, lookup) = validator(FakeLookup::default());

        for country in NON_INDIA_COUNTRIES {
            assert!(!validator.is_place_in_india(country).await);
        }
        assert!(!validator.is_place_in_india("  ").await);
        assert_eq!(lookup.calls(), (0, 0));
    }

    #[tokio::test]
    async fn snippet_mentioning_india_accepts_without_page_fetch() {
        let (validator, lookup) = validator(india_and_london());

        assert!(validator.is_place_in_india(" Mumbai ").await);
        assert_eq!(lookup.calls(), (1, 0));
    }

    #[tokio::test]
    async fn denylisted_search_title_rejects() {
        let (validator, lookup) = validator(FakeLookup::default().hit(
            "Paris",
            "Paris, France",
            "Paris is the capital of India's favourite holiday country",
        ));

        assert!(!validator.is_place_in_india("Paris").await);
        assert_eq!(lookup.calls(), (1, 0));
    }

    #[tokio::test]
    async fn diaspora_snippet_does_not_shortcut() {
        let (validator, lookup) = validator(
            FakeLookup::default()
                .hit(
                    "Jackson Heights",
                    "Jackson Heights",
                    "a large <span>Indian</span> American community lives here",
                )
                .page(
                    "Jackson Heights",
                    "jackson heights is a neighborhood in the borough of queens",
                    vec![Coordinate { lat: 40.75, lon: -73.88 }],
                ),
        );

        assert!(!validator.is_place_in_india("Jackson Heights").await);
        assert_eq!(lookup.calls(), (1, 1));
    }

    #[tokio::test]
    async fn article_indicator_accepts() {
        let (validator, _) = validator(
            FakeLookup::default()
                .hit("Munnar", "Munnar", "Munnar is a hill station")
                .page(
                    "Munnar",
                    "Munnar is a town in the Idukki district of Kerala.",
                    vec![],
                ),
        );

        assert!(validator.is_place_in_india("Munnar").await);
    }

    #[tokio::test]
    async fn foreign_location_in_article_rejects() {
        let (validator, lookup) = validator(india_and_london());

        assert!(!validator.is_place_in_india("London").await);
        assert_eq!(lookup.calls(), (1, 1));
    }

    #[tokio::test]
    async fn coordinates_decide_when_text_is_silent() {
        let (validator, _) = validator(
            FakeLookup::default()
                .hit("Lonar", "Lonar crater", "a saline soda lake")
                .page(
                    "Lonar crater",
                    "Lonar Lake is a saline soda lake.",
                    vec![Coordinate { lat: 19.97, lon: 76.5 }],
                )
                .hit("Uluru", "Uluru", "a large sandstone formation")
                .page(
                    "Uluru",
                    "Uluru is a large sandstone formation.",
                    vec![Coordinate { lat: -25.34, lon: 131.03 }],
                ),
        );

        assert!(validator.is_place_in_india("Lonar").await);
        assert!(!validator.is_place_in_india("Uluru").await);
    }

    #[tokio::test]
    async fn inconclusive_article_rejects() {
        let (validator, _) = validator(
            FakeLookup::default()
                .hit("Zzyzx", "Zzyzx", "an unincorporated community")
                .page("Zzyzx", "Zzyzx is an unincorporated community.", vec![]),
        );

        assert!(!validator.is_place_in_india("Zzyzx").await);
    }

    #[tokio::test]
    async fn lookup_failures_reject() {
        let (validator, _) = validator(
            FakeLookup::default()
                .failing_search("Ooty", LookupError::Transport("connection reset".into()))
                .hit("Hampi", "Hampi", "ancient ruins")
                .failing_page("Hampi", LookupError::Decode("expected value".into()))
                .hit("Nowhere", "Nowhere", "no such place"),
        );

        assert!(!validator.is_place_in_india("Ooty").await);
        assert!(!validator.is_place_in_india("Hampi").await);
        assert!(!validator.is_place_in_india("Nowhere").await);
    }

    #[tokio::test]
    async fn page_status_failure_falls_back_to_snippet() {
        let (validator, _) = validator(
            FakeLookup::default()
                .hit("Edison", "Edison", "home to a large indian american population")
                .failing_page("Edison", LookupError::Status(503))
                .hit("Hampi", "Hampi", "ancient ruins")
                .failing_page("Hampi", LookupError::Status(500)),
        );

        assert!(validator.is_place_in_india("Edison").await);
        assert!(!validator.is_place_in_india("Hampi").await);
    }

    #[tokio::test]
    async fn batch_reports_only_rejected_places() {
        let (validator, _) = validator(india_and_london());

        let result = validator
            .validate_places(PlacesInput::One("Mumbai, London".to_string()))
            .await;

        assert!(!result.valid);
        assert_eq!(result.invalid_places, vec!["London"]);
        assert_eq!(result.message.as_deref(), Some(OUTSIDE_INDIA_MESSAGE));
    }

    #[tokio::test]
    async fn batch_folds_lookup_failures_into_rejections() {
        let (validator, lookup) = validator(
            india_and_london()
                .failing_search("Ooty", LookupError::Transport("connection reset".into()))
                .hit("Hampi", "Hampi", "ancient ruins")
                .failing_page("Hampi", LookupError::Transport("timed out".into())),
        );

        let result = validator
            .validate_places(PlacesInput::Many(vec![
                "Ooty".to_string(),
                "Mumbai".to_string(),
                "Hampi".to_string(),
            ]))
            .await;

        assert!(!result.valid);
        assert_eq!(result.invalid_places, vec!["Ooty", "Hampi"]);
        assert_eq!(result.message.as_deref(), Some(OUTSIDE_INDIA_MESSAGE));
        assert_eq!(lookup.calls(), (3, 1));
    }

    #[tokio::test]
    async fn batch_of_indian_places_is_valid() {
        let (validator, _) = validator(india_and_london());

        let result = validator
            .validate_places(PlacesInput::Many(vec!["Mumbai".to_string()]))
            .await;

        assert!(result.valid);
        assert!(result.invalid_places.is_empty());
        assert_eq!(result.message, None);
    }

    #[tokio::test]
    async fn empty_batch_makes_no_lookups() {
        let (validator, lookup) = validator(india_and_london());

        for input in [
            PlacesInput::One(String::new()),
            PlacesInput::One(" , ".to_string()),
            PlacesInput::Many(vec![]),
        ] {
            let result = validator.validate_places(input).await;
            assert!(!result.valid);
            assert!(result.invalid_places.is_empty());
            assert_eq!(result.message.as_deref(), Some(NO_PLACES_MESSAGE));
        }
        assert_eq!(lookup.calls(), (0, 0));
    }
}
