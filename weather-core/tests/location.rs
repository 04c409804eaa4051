//! Integration tests for IP-based device location using wiremock.

use reqwest::Client;
use weather_core::{
    ConsentLocator, DeviceLocator, IpLocator, LookupError, OpenWeatherProvider, PermissionPrompt,
    WeatherLookupService,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug)]
struct Answer(bool);

impl PermissionPrompt for Answer {
    fn allow_location(&self) -> bool {
        self.0
    }
}

fn locator_for(server: &MockServer) -> IpLocator {
    IpLocator::new(Client::new(), format!("{}/json", server.uri()))
}

#[tokio::test]
async fn test_ip_location_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "country": "France",
            "city": "Lyon",
            "lat": 45.76,
            "lon": 4.84
        })))
        .mount(&mock_server)
        .await;

    let coords = locator_for(&mock_server).current_position().await.unwrap();

    assert_eq!(coords.latitude(), 45.76);
    assert_eq!(coords.longitude(), 4.84);
}

#[tokio::test]
async fn test_ip_location_fail_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range"
        })))
        .mount(&mock_server)
        .await;

    let err = locator_for(&mock_server).current_position().await.unwrap_err();
    assert!(matches!(err, LookupError::NetworkFailure(ref msg) if msg.contains("private range")));
}

#[tokio::test]
async fn test_ip_location_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let err = locator_for(&mock_server).current_position().await.unwrap_err();
    assert!(matches!(err, LookupError::NetworkFailure(_)));
}

#[tokio::test]
async fn test_declined_consent_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let locator = ConsentLocator::new(locator_for(&mock_server), Answer(false));
    assert_eq!(locator.current_position().await, Err(LookupError::PermissionDenied));
}

#[tokio::test]
async fn test_current_location_weather() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 43.3,
            "lon": 5.37
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "43.3"))
        .and(query_param("lon", "5.37"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Marseille",
            "main": { "temp": 27.4, "humidity": 35 },
            "weather": [{ "main": "Thunderstorm" }],
            "wind": { "speed": 8.0 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenWeatherProvider::new("TEST_KEY".into(), mock_server.uri(), "fr".into());
    let locator = ConsentLocator::new(locator_for(&mock_server), Answer(true));
    let service = WeatherLookupService::with_locator(provider, locator);

    let snapshot = service.lookup_current_location().await.unwrap();

    assert_eq!(snapshot.place(), "Marseille");
    assert_eq!(snapshot.temperature_celsius(), 27);
    assert_eq!(snapshot.wind_kph(), 29);
}
