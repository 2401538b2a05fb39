//! Tests for the REST Countries client against a local mock server
//!
//! Each test spawns a one-shot HTTP server that answers with a canned body
//! and status, then points the client at it.

use std::thread;
use std::time::Duration;

use atlasd::data::{CountryProvider, ProviderError, RestCountriesClient};
use tiny_http::{Response, Server};

/// Spawns a local test server that responds with the given body and status.
fn spawn_server(body: &'static str, status: u16) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("Failed to start mock server");
    let addr = server.server_addr().to_ip().expect("Mock server has no IP addr");
    let url = format!("http://{addr}");

    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let response = Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    (url, handle)
}

fn client_for(url: &str) -> RestCountriesClient {
    RestCountriesClient::new(Duration::from_secs(5))
        .expect("Client should build")
        .with_base_url(url.to_string())
}

const TWO_COUNTRIES: &str = r#"[
    {
        "name": { "common": "France", "official": "French Republic" },
        "population": 67391582,
        "flags": { "svg": "https://flags.example/fr.svg" },
        "region": "Europe",
        "currencies": { "EUR": { "name": "Euro", "symbol": "€" } },
        "timezones": ["UTC+01:00"],
        "capital": ["Paris"],
        "cca2": "FR",
        "cca3": "FRA"
    },
    {
        "name": { "common": "Japan" },
        "region": "Asia",
        "cca2": "JP",
        "cca3": "JPN"
    }
]"#;

#[tokio::test]
async fn test_fetch_all_parses_country_array() {
    let (url, handle) = spawn_server(TWO_COUNTRIES, 200);

    let records = client_for(&url).fetch_all().await.expect("Fetch should succeed");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name.common, "France");
    assert_eq!(records[0].cca3, "FRA");
    assert_eq!(records[1].name.common, "Japan");
    assert_eq!(records[1].population, 0);

    handle.join().expect("Server thread panicked");
}

#[tokio::test]
async fn test_fetch_all_rejects_non_success_status() {
    let (url, handle) = spawn_server("[]", 502);

    let err = client_for(&url).fetch_all().await.unwrap_err();
    assert!(matches!(err, ProviderError::BadStatus(status) if status.as_u16() == 502));

    handle.join().expect("Server thread panicked");
}

#[tokio::test]
async fn test_fetch_all_rejects_empty_dataset() {
    let (url, handle) = spawn_server("[]", 200);

    let err = client_for(&url).fetch_all().await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyDataset));

    handle.join().expect("Server thread panicked");
}

#[tokio::test]
async fn test_fetch_all_rejects_malformed_body() {
    let (url, handle) = spawn_server("{\"not\": \"an array\"}", 200);

    let err = client_for(&url).fetch_all().await.unwrap_err();
    assert!(matches!(err, ProviderError::ParseError(_)));

    handle.join().expect("Server thread panicked");
}

#[tokio::test]
async fn test_fetch_all_surfaces_connection_failure() {
    // Nothing is listening on this port
    let client = client_for("http://127.0.0.1:1");

    let err = client.fetch_all().await.unwrap_err();
    assert!(matches!(err, ProviderError::RequestFailed(_)));
}
