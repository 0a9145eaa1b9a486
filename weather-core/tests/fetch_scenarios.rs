//! End-to-end fetch scenarios against a mock OpenWeather server.

use futures::StreamExt;
use std::{sync::Arc, time::Duration};
use weather_core::{
    Config, FetchState, FileCityStore, LastCityStore, WeatherRepository, WeatherSession,
    provider_from_config,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, timeout_secs: u64) -> Config {
    Config {
        api_key: Some("TEST_KEY".into()),
        base_url: server.uri(),
        timeout_secs,
    }
}

fn repository(config: &Config, store: Arc<FileCityStore>) -> WeatherRepository {
    let provider = provider_from_config(config).expect("provider must build");
    WeatherRepository::new(provider, store)
}

#[tokio::test]
async fn paris_success_is_persisted_across_restart() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("weather_prefs.toml");

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"name":"Paris","main":{"temp":18.5},"weather":[{"description":"clear sky","icon":"01d"}]}"#,
        ))
        .mount(&server)
        .await;

    let repo = repository(&config_for(&server, 5), Arc::new(FileCityStore::new(&prefs)));
    let states: Vec<FetchState> = repo.fetch_by_city("Paris").collect().await;

    assert_eq!(states.len(), 2);
    assert_eq!(states[0], FetchState::Loading);
    let snapshot = states[1].snapshot().expect("Success expected");
    assert_eq!(snapshot.location_name, "Paris");
    assert_eq!(snapshot.temperature.current, 18.5);
    assert_eq!(snapshot.conditions.len(), 1);
    assert_eq!(snapshot.conditions[0].description, "clear sky");
    assert_eq!(snapshot.conditions[0].icon_code, "01d");

    // A fresh store over the same file plays the part of the next process start.
    let restarted = FileCityStore::new(&prefs);
    assert_eq!(restarted.get().await.unwrap().as_deref(), Some("Paris"));
}

#[tokio::test]
async fn unknown_city_fails_with_body_text() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileCityStore::new(dir.path().join("weather_prefs.toml")));

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Nowhere123"))
        .respond_with(ResponseTemplate::new(404).set_body_string("city not found"))
        .mount(&server)
        .await;

    let repo = repository(&config_for(&server, 5), store.clone());
    let states: Vec<FetchState> = repo.fetch_by_city("Nowhere123").collect().await;

    assert_eq!(
        states,
        vec![FetchState::Loading, FetchState::Failure("city not found".into())]
    );
    assert_eq!(store.get().await.unwrap(), None);
}

#[tokio::test]
async fn empty_success_body_fails_with_sentinel() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileCityStore::new(dir.path().join("weather_prefs.toml")));

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let repo = repository(&config_for(&server, 5), store.clone());
    let states: Vec<FetchState> = repo.fetch_by_city("London").collect().await;

    assert_eq!(
        states,
        vec![
            FetchState::Loading,
            FetchState::Failure("empty response from server".into())
        ]
    );
    assert_eq!(store.get().await.unwrap(), None);
}

#[tokio::test]
async fn coordinate_timeout_fails_and_leaves_store_untouched() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileCityStore::new(dir.path().join("weather_prefs.toml")));
    store.set("London").await.unwrap();

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"name":"London"}"#)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let repo = repository(&config_for(&server, 1), store.clone());
    let states: Vec<FetchState> = repo.fetch_by_coordinates(51.5, -0.12).collect().await;

    assert_eq!(states.len(), 2);
    assert_eq!(states[0], FetchState::Loading);
    match &states[1] {
        FetchState::Failure(msg) => assert!(!msg.is_empty()),
        other => panic!("expected Failure, got {other:?}"),
    }
    assert_eq!(store.get().await.unwrap().as_deref(), Some("London"));
}

#[tokio::test]
async fn session_restores_last_city_on_start() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileCityStore::new(dir.path().join("weather_prefs.toml")));
    store.set("London").await.unwrap();

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "London",
            "coord": {"lat": 51.5085, "lon": -0.1257},
            "main": {"temp": 9.4, "temp_min": 7.0, "temp_max": 11.2},
            "weather": [{"description": "overcast clouds", "icon": "04n"}],
            "sys": {"country": "GB"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = WeatherSession::new(repository(&config_for(&server, 5), store));
    let (city, handle) = session.restore().await.expect("stored city");
    handle.await.unwrap();

    assert_eq!(city, "London");
    let state = session.current();
    let snapshot = state.snapshot().expect("Success expected");
    assert_eq!(snapshot.country, "GB");
    assert_eq!(snapshot.temperature.min, 7.0);
    assert_eq!(
        snapshot.icon_url().as_deref(),
        Some("https://openweathermap.org/img/wn/04n@2x.png")
    );
}
