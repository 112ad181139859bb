//! Integration tests for OpenWeatherClient using wiremock.

use citycast_core::{
    Config, Coordinate, OpenWeatherClient, TransportError, WeatherError, WeatherQuery,
    WeatherService,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn istanbul_current() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 28.9784, "lat": 41.0082 },
        "weather": [{ "id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d" }],
        "main": { "temp": 20.0, "feels_like": 19.6, "humidity": 68, "pressure": 1016 },
        "visibility": 10000,
        "wind": { "speed": 4.63, "deg": 40 },
        "dt": 1736942400,
        "name": "Istanbul"
    })
}

fn forecast_entry(dt: i64, temp: f64) -> serde_json::Value {
    serde_json::json!({
        "dt": dt,
        "main": { "temp": temp, "feels_like": temp - 1.0, "humidity": 70, "pressure": 1015 },
        "weather": [{ "main": "Rain", "description": "light rain", "icon": "10d" }],
        "wind": { "speed": 3.2, "deg": 200 },
        "dt_txt": "ignored"
    })
}

fn client(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::new("TEST_KEY", server.uri())
}

#[tokio::test]
async fn current_weather_by_city() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Istanbul"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(istanbul_current()))
        .expect(1)
        .mount(&server)
        .await;

    let weather = client(&server)
        .current_weather(&WeatherQuery::city("Istanbul"))
        .await
        .unwrap();

    assert_eq!(weather.location_name, "Istanbul");
    assert_eq!(weather.coordinate, Coordinate { lat: 41.0082, lon: 28.9784 });
    assert_eq!(weather.temperature_c, 20.0);
    assert_eq!(weather.humidity_pct, 68);
    assert_eq!(weather.pressure_hpa, 1016);
    assert_eq!(weather.wind_direction_deg, 40);
    assert_eq!(weather.condition_description, "few clouds");
}

#[tokio::test]
async fn current_weather_by_coordinate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "41.0082"))
        .and(query_param("lon", "28.9784"))
        .respond_with(ResponseTemplate::new(200).set_body_json(istanbul_current()))
        .expect(1)
        .mount(&server)
        .await;

    let coord = Coordinate::new(41.0082, 28.9784).unwrap();
    let weather = client(&server)
        .current_weather(&WeatherQuery::Coordinate(coord))
        .await
        .unwrap();

    assert_eq!(weather.location_name, "Istanbul");
}

#[tokio::test]
async fn not_found_maps_to_city_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .current_weather(&WeatherQuery::city("Atlantis"))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::CityNotFound), "got {err:?}");
}

#[tokio::test]
async fn server_error_maps_to_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client(&server)
        .current_weather(&WeatherQuery::city("Istanbul"))
        .await
        .unwrap_err();

    match err {
        WeatherError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"name\": 42"))
        .mount(&server)
        .await;

    let err = client(&server)
        .current_weather(&WeatherQuery::city("Istanbul"))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Transport(TransportError::Decode(_))), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_maps_to_transport_error() {
    // Nothing listens on port 1.
    let err = OpenWeatherClient::new("TEST_KEY", "http://127.0.0.1:1")
        .current_weather(&WeatherQuery::city("Istanbul"))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Transport(TransportError::Network(_))), "got {err:?}");
}

#[tokio::test]
async fn network_error_does_not_expose_api_key() {
    let err = OpenWeatherClient::new("SECRET_KEY_123", "http://127.0.0.1:1")
        .current_weather(&WeatherQuery::city("Istanbul"))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Transport(TransportError::Network(_))), "got {err:?}");
    assert!(!err.to_string().contains("SECRET_KEY_123"), "{err}");
    assert!(!format!("{err:?}").contains("SECRET_KEY_123"), "{err:?}");
}

#[tokio::test]
async fn blank_city_is_rejected_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(istanbul_current()))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .current_weather(&WeatherQuery::city("   "))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::CityNotFound));
}

#[tokio::test]
async fn forecast_by_coordinate_is_sorted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "41.0082"))
        .and(query_param("lon", "28.9784"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cod": "200",
            "cnt": 3,
            "list": [
                forecast_entry(1736953200, 14.0),
                forecast_entry(1736942400, 16.5),
                forecast_entry(1736964000, 12.0),
            ],
            "city": { "name": "Istanbul", "country": "TR" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = client(&server)
        .forecast(Coordinate::new(41.0082, 28.9784).unwrap())
        .await
        .unwrap();

    assert_eq!(forecast.len(), 3);
    let stamps: Vec<i64> = forecast.points.iter().map(|p| p.timestamp).collect();
    assert_eq!(stamps, vec![1736942400, 1736953200, 1736964000]);
    assert_eq!(forecast.points[0].temperature_c, 16.5);
    assert_eq!(forecast.points[0].condition_icon_id, "10d");
}

#[tokio::test]
async fn forecast_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server)
        .forecast(Coordinate { lat: 0.0, lon: 0.0 })
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::CityNotFound));
}

#[tokio::test]
async fn client_from_config_uses_base_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("appid", "CFG_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(istanbul_current()))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        api_key: Some("CFG_KEY".into()),
        base_url: Some(server.uri()),
        default_city: None,
    };

    let weather = OpenWeatherClient::from_config(&config)
        .unwrap()
        .current_weather(&WeatherQuery::city("Istanbul"))
        .await
        .unwrap();

    assert_eq!(weather.location_name, "Istanbul");
}
