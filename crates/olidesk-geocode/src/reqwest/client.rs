//! Reqwest-based client for Nominatim search lookups.

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{Error, NominatimConfig, TRACING_TARGET};
use crate::{AddressQuery, Coordinates, ErrorKind, GeocodeProvider, GeocodeService};

/// Inner client that holds the HTTP client, endpoint and configuration.
struct NominatimClientInner {
    http: Client,
    endpoint: Url,
    config: NominatimConfig,
}

/// Reqwest-based client resolving addresses through a Nominatim search endpoint.
///
/// Issues `GET {endpoint}?q=<address>&format=json&limit=1` with the configured
/// User-Agent and timeout. No retries are attempted.
///
/// # Examples
///
/// ```rust,ignore
/// use olidesk_geocode::reqwest::{NominatimClient, NominatimConfig};
///
/// let client = NominatimClient::new(NominatimConfig::default())?;
/// let coordinates = client.geocode(&query).await?;
/// ```
#[derive(Clone)]
pub struct NominatimClient {
    inner: Arc<NominatimClientInner>,
}

impl std::fmt::Debug for NominatimClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl NominatimClient {
    /// Creates a new lookup client with the given configuration.
    pub fn new(config: NominatimConfig) -> crate::Result<Self> {
        config.validate()?;
        let endpoint = config.endpoint()?;
        let timeout = config.timeout();

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            timeout_ms = timeout.as_millis(),
            "Creating nominatim client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&config.geocode_user_agent)
            .build()
            .map_err(|e| {
                crate::Error::from_source(ErrorKind::Configuration, e)
                    .with_message("failed to create HTTP client")
            })?;

        let inner = NominatimClientInner {
            http,
            endpoint,
            config,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &NominatimConfig {
        &self.inner.config
    }

    /// Converts this client into a [`GeocodeService`] for use with dependency injection.
    pub fn into_service(self) -> GeocodeService {
        GeocodeService::new(self)
    }
}

#[async_trait::async_trait]
impl GeocodeProvider for NominatimClient {
    async fn geocode(&self, query: &AddressQuery) -> crate::Result<Coordinates> {
        let q = query.to_query_string();

        tracing::trace!(
            target: TRACING_TARGET,
            query = %q,
            "Sending lookup request"
        );

        let response = self
            .inner
            .http
            .get(self.inner.endpoint.clone())
            .query(&[("q", q.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(Error::from)?;

        let body = response.bytes().await.map_err(Error::from)?;
        parse_search_response(&body)
    }
}

/// A coordinate as returned upstream: either a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn to_f64(&self, field: &'static str) -> crate::Result<f64> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text.trim().parse().map_err(|_| {
                crate::Error::new(ErrorKind::MalformedUpstreamResponse)
                    .with_message(format!("{field} is not numeric: {text:?}"))
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: Degrees,
    lon: Degrees,
}

/// Decodes a search response body into the first result's coordinates.
fn parse_search_response(body: &[u8]) -> crate::Result<Coordinates> {
    let places: Vec<Place> = serde_json::from_slice(body).map_err(Error::from)?;

    let Some(place) = places.first() else {
        return Err(crate::Error::new(ErrorKind::NoResultsFound)
            .with_message("no results for address"));
    };

    let latitude = place.lat.to_f64("lat")?;
    let longitude = place.lon.to_f64("lon")?;

    Coordinates::new(latitude, longitude)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::net::SocketAddr;

    use axum::Router;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::get;

    use super::*;

    fn paulista() -> AddressQuery {
        AddressQuery {
            street: "Avenida Paulista".into(),
            number: "1578".into(),
            neighborhood: "Bela Vista".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
            postal_code: "01310-200".into(),
            country: "Brasil".into(),
        }
    }

    async fn spawn_stub(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr) -> NominatimClient {
        let config = NominatimConfig::new(format!("http://{addr}/search"))
            .with_timeout_secs(2)
            .with_user_agent("olidesk-test/1.0");
        NominatimClient::new(config).unwrap()
    }

    #[test]
    fn parses_string_and_number_coordinates() {
        let coordinates =
            parse_search_response(br#"[{"lat":"-23.55","lon":"-46.63","display_name":"x"}]"#)
                .unwrap();
        assert_eq!(coordinates.latitude(), -23.55);
        assert_eq!(coordinates.longitude(), -46.63);

        let coordinates = parse_search_response(br#"[{"lat":-23.55,"lon":-46.63}]"#).unwrap();
        assert_eq!(coordinates.longitude(), -46.63);
    }

    #[test]
    fn maps_parse_failures() {
        let error = parse_search_response(b"[]").unwrap_err();
        assert_eq!(error.kind, ErrorKind::NoResultsFound);

        let error = parse_search_response(b"<html>").unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedUpstreamResponse);

        let error = parse_search_response(br#"[{"lat":"north","lon":"1"}]"#).unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedUpstreamResponse);

        let error = parse_search_response(br#"[{"lat":"95","lon":"1"}]"#).unwrap_err();
        assert_eq!(error.kind, ErrorKind::CoordinateOutOfRange);
    }

    #[test]
    fn rejects_invalid_config() {
        let error = NominatimClient::new(NominatimConfig::new("::")).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn sends_expected_query_and_user_agent() {
        let router = Router::new().route(
            "/search",
            get(
                |Query(params): Query<HashMap<String, String>>, headers: HeaderMap| async move {
                    let agent = headers
                        .get(header::USER_AGENT)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default();

                    let expected = params.get("format").map(String::as_str) == Some("json")
                        && params.get("limit").map(String::as_str) == Some("1")
                        && params.get("q").map(String::as_str)
                            == Some(
                                "Avenida Paulista, 1578, Bela Vista, São Paulo, SP, 01310-200, Brasil",
                            )
                        && agent == "olidesk-test/1.0";

                    if expected {
                        (StatusCode::OK, r#"[{"lat":"-23.55","lon":"-46.63"}]"#)
                    } else {
                        (StatusCode::BAD_REQUEST, "[]")
                    }
                },
            ),
        );

        let addr = spawn_stub(router).await;
        let coordinates = client_for(addr).geocode(&paulista()).await.unwrap();

        assert_eq!(coordinates.latitude(), -23.55);
        assert_eq!(coordinates.longitude(), -46.63);
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_unavailable() {
        let router = Router::new().route(
            "/search",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );

        let addr = spawn_stub(router).await;
        let error = client_for(addr).geocode(&paulista()).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::UpstreamUnavailable);
    }

    #[tokio::test]
    async fn empty_result_is_no_results_found() {
        let router = Router::new().route("/search", get(|| async { "[]" }));

        let addr = spawn_stub(router).await;
        let error = client_for(addr).geocode(&paulista()).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::NoResultsFound);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_upstream_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let error = client_for(addr).geocode(&paulista()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::UpstreamUnavailable);
    }
}
