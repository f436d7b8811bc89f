//! Integration tests for the HTTP providers using wiremock.
//!
//! These tests verify the geocoding and forecast clients, and the whole
//! resolver pipeline, against mock HTTP servers.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use eventweather::config::{ForecastConfig, GeocodingConfig};
use eventweather::{
    BoundingBox, ErrorCode, ForecastProvider, Geocoder, GoogleGeocoder, GridPoint,
    LocationWeatherResolver, ResolveError, SmhiClient,
};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORECAST_PATH: &str = "/api/category/pmp3g/version/2/geotype/point/lon/18.1/lat/59.3/data.json";

fn geocoding_config(server: &MockServer) -> GeocodingConfig {
    GeocodingConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.uri(),
        country_qualifier: "Sweden".to_string(),
        timeout_seconds: 1,
    }
}

fn forecast_config(server: &MockServer) -> ForecastConfig {
    ForecastConfig {
        base_url: server.uri(),
        timeout_seconds: 1,
    }
}

/// Serves one response whose headers promise more body than is ever sent,
/// then holds the connection open past the client timeout
fn stalled_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 1000\r\n\r\n{\"status\": ",
            );
            let _ = stream.flush();
            thread::sleep(Duration::from_secs(5));
        }
    });

    format!("http://{addr}")
}

/// Helper to create a geocoding response with a single result
fn geocode_body(lat: f64, lng: f64, formatted_address: &str) -> Value {
    json!({
        "status": "OK",
        "results": [{
            "formatted_address": formatted_address,
            "geometry": { "location": { "lat": lat, "lng": lng } },
            "address_components": [
                { "long_name": "Sergels torg", "types": ["route"] },
                { "long_name": "Stockholm", "types": ["locality", "political"] }
            ]
        }]
    })
}

/// Helper to create a forecast entry with temperature and weather symbol
fn entry(valid_time: &str, temperature: f64, symbol: u8) -> Value {
    json!({
        "validTime": valid_time,
        "parameters": [
            { "name": "msl", "values": [1012.3] },
            { "name": "t", "values": [temperature] },
            { "name": "Wsymb2", "values": [symbol] }
        ]
    })
}

fn forecast_body() -> Value {
    json!({
        "approvedTime": "2024-06-01T05:00:00Z",
        "referenceTime": "2024-06-01T05:00:00Z",
        "timeSeries": [
            entry("2024-06-01T06:00:00Z", 14.2, 2),
            entry("2024-06-01T12:00:00Z", 19.6, 1),
            entry("2024-06-01T18:00:00Z", 16.0, 3),
            entry("2024-06-02T00:00:00Z", 11.0, 6),
            entry("2024-06-02T12:00:00Z", 15.4, 19),
            entry("2024-06-03T00:00:00Z", 9.0, 6)
        ]
    })
}

#[tokio::test]
async fn test_geocode_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("address", "Sergels torg, Sweden"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_body(
            59.3326,
            18.0649,
            "Sergels torg, 111 57 Stockholm, Sweden",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let geocoder = GoogleGeocoder::new(&geocoding_config(&mock_server)).unwrap();
    let location = geocoder.geocode("Sergels torg").await.unwrap();

    assert_eq!(location.latitude, 59.3326);
    assert_eq!(location.longitude, 18.0649);
    assert_eq!(
        location.formatted_address,
        "Sergels torg, 111 57 Stockholm, Sweden"
    );
    assert_eq!(location.clean_address.as_deref(), Some("Sergels torg, Stockholm"));
}

#[tokio::test]
async fn test_geocode_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let geocoder = GoogleGeocoder::new(&geocoding_config(&mock_server)).unwrap();
    let err = geocoder.geocode("Stockholm").await.unwrap_err();

    assert_eq!(err, ResolveError::geocode("provider returned HTTP 500"));
}

#[tokio::test]
async fn test_geocode_provider_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota for this API.",
            "results": []
        })))
        .mount(&mock_server)
        .await;

    let geocoder = GoogleGeocoder::new(&geocoding_config(&mock_server)).unwrap();
    let err = geocoder.geocode("Stockholm").await.unwrap_err();

    assert!(matches!(err, ResolveError::Geocode { .. }));
    assert!(err.to_string().contains("OVER_QUERY_LIMIT"));
    assert!(err.to_string().contains("daily request quota"));
}

#[tokio::test]
async fn test_geocode_malformed_body_is_unknown_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let geocoder = GoogleGeocoder::new(&geocoding_config(&mock_server)).unwrap();
    let err = geocoder.geocode("Stockholm").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::UnknownError);
}

#[tokio::test]
async fn test_geocode_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocode_body(59.3326, 18.0649, "Stockholm, Sweden"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let geocoder = GoogleGeocoder::new(&geocoding_config(&mock_server)).unwrap();
    let err = geocoder.geocode("Stockholm").await.unwrap_err();

    assert_eq!(err, ResolveError::geocode("request timed out after 1s"));
}

#[tokio::test]
async fn test_geocode_stalled_body_is_timeout() {
    let config = GeocodingConfig {
        api_key: Some("test-key".to_string()),
        base_url: stalled_body_server(),
        country_qualifier: "Sweden".to_string(),
        timeout_seconds: 1,
    };

    let geocoder = GoogleGeocoder::new(&config).unwrap();
    let err = geocoder.geocode("Stockholm").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::GeocodeError);
    assert!(err.to_string().contains("timed out"), "got: {err}");
}

#[tokio::test]
async fn test_forecast_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SmhiClient::new(&forecast_config(&mock_server)).unwrap();
    let samples = client
        .fetch(GridPoint::from_coordinates(59.33, 18.06))
        .await
        .unwrap();

    assert_eq!(samples.len(), 6);
    assert_eq!(samples[1].temperature, 19.6);
    assert_eq!(samples[1].weather_code, 1);
}

#[tokio::test]
async fn test_forecast_fetch_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = SmhiClient::new(&forecast_config(&mock_server)).unwrap();
    let err = client
        .fetch(GridPoint::from_coordinates(59.3, 18.1))
        .await
        .unwrap_err();

    assert_eq!(err, ResolveError::forecast_fetch("provider returned HTTP 404"));
}

#[tokio::test]
async fn test_forecast_fetch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = SmhiClient::new(&forecast_config(&mock_server)).unwrap();
    let err = client
        .fetch(GridPoint::from_coordinates(59.3, 18.1))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ForecastFetchError);
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn test_forecast_stalled_body_is_timeout() {
    let config = ForecastConfig {
        base_url: stalled_body_server(),
        timeout_seconds: 1,
    };

    let client = SmhiClient::new(&config).unwrap();
    let err = client
        .fetch(GridPoint::from_coordinates(59.3, 18.1))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ForecastFetchError);
    assert!(err.to_string().contains("timed out"), "got: {err}");
}

fn http_resolver(server: &MockServer) -> LocationWeatherResolver {
    LocationWeatherResolver::new(
        Arc::new(GoogleGeocoder::new(&geocoding_config(server)).unwrap()),
        Arc::new(SmhiClient::new(&forecast_config(server)).unwrap()),
        BoundingBox::SWEDEN,
    )
}

#[tokio::test]
async fn test_pipeline_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_body(
            59.3326,
            18.0649,
            "Sergels torg, 111 57 Stockholm, Sweden",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = http_resolver(&mock_server).resolve("Sergels torg").await;

    assert!(result.is_valid, "unexpected error: {:?}", result.error);
    let forecast = result.forecast.unwrap();
    assert_eq!(forecast.len(), 3);
    assert_eq!(forecast[0].date.to_string(), "2024-06-01");
    assert_eq!(forecast[0].temperature, 20);
    assert_eq!(forecast[0].description, "Clear sky");
    assert_eq!(forecast[1].temperature, 15);
    assert_eq!(forecast[1].description, "Moderate rain");
    assert_eq!(forecast[2].temperature, 9);
    assert_eq!(forecast[2].description, "Overcast");
}

#[tokio::test]
async fn test_pipeline_out_of_region_skips_forecast_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_body(
            52.5200,
            13.4050,
            "Berlin, Germany",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = http_resolver(&mock_server).resolve("Berlin").await;

    assert!(!result.is_valid);
    assert_eq!(result.error_code, Some(ErrorCode::UnsupportedRegion));
    assert!(result.coordinates.is_none());
}
