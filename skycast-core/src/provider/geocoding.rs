use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::ResolveError, model::Coordinates, provider::truncate_body};

use super::Geocoder;

/// Only the best match is ever used.
const MATCH_LIMIT: &str = "1";

/// OpenWeather direct geocoding (`/geo/1.0/direct`).
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl GeocodingClient {
    pub fn new(http: Client, api_key: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            http,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoCandidate {
    #[serde(default)]
    name: Option<String>,
    lat: f64,
    lon: f64,
}

#[async_trait]
impl Geocoder for GeocodingClient {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn resolve(&self, query: &str) -> Result<Coordinates, ResolveError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("limit", MATCH_LIMIT),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ResolveError::Network(format!(
                "geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let candidates: Vec<GeoCandidate> = serde_json::from_str(&body).map_err(|e| {
            ResolveError::MalformedResponse(format!("geocoding JSON: {e}"))
        })?;

        let best = candidates
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::NotFound(query.to_string()))?;

        tracing::debug!(
            place = best.name.as_deref().unwrap_or("?"),
            lat = best.lat,
            lon = best.lon,
            "geocoded"
        );

        Ok(Coordinates::new(best.lat, best.lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GeocodingClient {
        GeocodingClient::new(Client::new(), "test_key", &format!("{}/geo/1.0/direct", server.uri()))
    }

    #[tokio::test]
    async fn sends_query_limit_and_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Kraków"))
            .and(query_param("limit", "1"))
            .and(query_param("appid", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "name": "Kraków", "lat": 50.0619, "lon": 19.9369, "country": "PL" }
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let coords = client(&mock_server).resolve("Kraków").await.unwrap();
        assert_eq!(coords, Coordinates::new(50.0619, 19.9369));
    }

    #[tokio::test]
    async fn picks_first_of_several_candidates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "name": "London", "lat": 51.5073, "lon": -0.1276, "country": "GB" },
                { "name": "London", "lat": 42.9834, "lon": -81.2330, "country": "CA" }
            ])))
            .mount(&mock_server)
            .await;

        let coords = client(&mock_server).resolve("London").await.unwrap();
        assert_eq!(coords, Coordinates::new(51.5073, -0.1276));
    }

    #[tokio::test]
    async fn empty_list_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server).resolve("Atlantis").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(ref q) if q == "Atlantis"));
    }

    #[tokio::test]
    async fn non_success_status_is_network_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server).resolve("Paris").await.unwrap_err();
        match err {
            ResolveError::Network(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("Invalid API key"));
            }
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_body_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cod": "400", "message": "Nothing to geocode"
            })))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server).resolve("Paris").await.unwrap_err();
        assert!(matches!(err, ResolveError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client = GeocodingClient::new(Client::new(), "k", &format!("http://{addr}/geo"));
        let err = client.resolve("Paris").await.unwrap_err();
        assert!(matches!(err, ResolveError::Network(_)));
    }
}
