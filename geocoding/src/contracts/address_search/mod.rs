use budget_projects::project::Coordinates;
use shared_kernel::http_client::HttpClientError;
use shared_kernel::non_empty_string;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{GeocodingSettings, SETTINGS_CONFIG};

non_empty_string!(AddressQuery);

#[derive(Error, Debug)]
pub enum GeocodingError {
    #[error("Failed to build search url: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] HttpClientError),
    #[error("Invalid coordinate {0:?} in response")]
    InvalidCoordinate(String),
}

/// Looks addresses up in Nominatim, one request at a time.
pub struct Geocoder {
    settings: GeocodingSettings,
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::new(SETTINGS_CONFIG.geocoding.clone())
    }
}

impl Geocoder {
    pub fn new(settings: GeocodingSettings) -> Self {
        Self { settings }
    }

    /// Coordinates of `address`, or `None` when the address is blank, nothing
    /// was found or the request failed. Failures are logged and not retried.
    /// Every request is followed by the configured delay.
    pub async fn geocode(&self, address: &str) -> Option<Coordinates> {
        let address = AddressQuery::try_from(address).ok()?;
        let result = search::execute(&self.settings, &address).await;
        tokio::time::sleep(self.settings.delay()).await;

        match result {
            Ok(Some(coordinates)) => {
                info!(
                    "Geocoded: {address} -> ({}, {})",
                    coordinates.lat, coordinates.lon
                );
                Some(coordinates)
            }
            Ok(None) => {
                warn!("Failed to geocode: {address}");
                None
            }
            Err(err) => {
                error!("Geocoding error for {address}: {err}");
                None
            }
        }
    }
}

pub(crate) mod search {
    use budget_projects::project::Coordinates;
    use serde::Deserialize;
    use shared_kernel::http_client::HttpClient;
    use std::collections::HashMap;
    use url::Url;

    use super::{AddressQuery, GeocodingError};
    use crate::config::GeocodingSettings;

    #[derive(Deserialize, Debug)]
    pub(crate) struct NominatimPlace {
        lat: String,
        lon: String,
    }

    impl NominatimPlace {
        fn coordinates(&self) -> Result<Coordinates, GeocodingError> {
            let parse = |value: &str| {
                value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| GeocodingError::InvalidCoordinate(value.to_string()))
            };
            Ok(Coordinates::rounded(parse(&self.lat)?, parse(&self.lon)?))
        }
    }

    pub fn generate_search_url(
        settings: &GeocodingSettings,
        address: &AddressQuery,
    ) -> Result<Url, GeocodingError> {
        let host_with_path = format!("{}/search", settings.host.trim_end_matches('/'));
        let url = Url::parse_with_params(
            &host_with_path,
            &[
                ("q", settings.query_for(address.as_ref()).as_str()),
                ("format", "json"),
                ("limit", "1"),
            ],
        )?;
        Ok(url)
    }

    #[tracing::instrument(err, skip(settings), level = "debug")]
    pub(crate) async fn execute(
        settings: &GeocodingSettings,
        address: &AddressQuery,
    ) -> Result<Option<Coordinates>, GeocodingError> {
        let url = generate_search_url(settings, address)?;
        let headers = HashMap::from([("User-Agent", settings.user_agent.clone())]);
        let places = HttpClient::get_with_headers::<Vec<NominatimPlace>>(url, headers).await?;

        places
            .first()
            .map(NominatimPlace::coordinates)
            .transpose()
    }

    #[cfg(test)]
    mod tests {
        use super::{execute, generate_search_url};
        use crate::config::GeocodingSettings;
        use crate::contracts::address_search::{AddressQuery, GeocodingError};
        use httpmock::prelude::*;
        use serde_json::json;

        fn settings(server: &MockServer) -> GeocodingSettings {
            GeocodingSettings {
                host: server.base_url(),
                delay_millis: 0,
                ..Default::default()
            }
        }

        #[test]
        fn test_search_url_carries_the_full_query() {
            let settings = GeocodingSettings::default();
            let address = AddressQuery::try_from("Szosa Chełmińska 49/51").unwrap();

            let url = generate_search_url(&settings, &address).unwrap();

            assert_eq!(url.path(), "/search");
            let pairs = url.query_pairs().into_owned().collect::<Vec<_>>();
            assert_eq!(
                pairs,
                vec![
                    ("q".to_string(), "Szosa Chełmińska 49/51, Toruń, Poland".to_string()),
                    ("format".to_string(), "json".to_string()),
                    ("limit".to_string(), "1".to_string()),
                ]
            );
        }

        #[tokio::test]
        async fn test_first_result_is_used_and_rounded() {
            let server = MockServer::start();
            let mock = server.mock(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("q", "Reja 1, Toruń, Poland")
                    .query_param("format", "json")
                    .query_param("limit", "1")
                    .header("user-agent", "torun-budzet-visualization");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([
                        { "lat": "53.0183746", "lon": "18.6045123", "display_name": "Reja 1" },
                        { "lat": "1.0", "lon": "2.0", "display_name": "elsewhere" }
                    ]));
            });

            let address = AddressQuery::try_from("Reja 1").unwrap();
            let coordinates = execute(&settings(&server), &address).await.unwrap().unwrap();

            mock.assert();
            assert_eq!(coordinates.lat, 53.01837);
            assert_eq!(coordinates.lon, 18.60451);
        }

        #[tokio::test]
        async fn test_empty_result_set_has_no_coordinates() {
            let server = MockServer::start();
            server.mock(|when, then| {
                when.method(GET).path("/search");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([]));
            });

            let address = AddressQuery::try_from("Nieistniejąca 999").unwrap();
            let result = execute(&settings(&server), &address).await.unwrap();

            assert!(result.is_none());
        }

        #[tokio::test]
        async fn test_malformed_coordinate_is_an_error() {
            let server = MockServer::start();
            server.mock(|when, then| {
                when.method(GET).path("/search");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([{ "lat": "north", "lon": "18.6" }]));
            });

            let address = AddressQuery::try_from("Reja 1").unwrap();
            let result = execute(&settings(&server), &address).await;

            assert!(matches!(result, Err(GeocodingError::InvalidCoordinate(value)) if value == "north"));
        }
    }
}
