mod common;

use std::time::Duration;

use common::{Canned, FixtureServer, PNG_BYTES};
use itineria_core::{PlaceSearch, PlacesClient, RemoteError};

const TEXT_SEARCH_BODY: &str = r#"{
    "html_attributions": [],
    "results": [
        {
            "place_id": "p-1",
            "name": "Queen Victoria Market",
            "formatted_address": "Queen St, Melbourne VIC 3000",
            "geometry": {
                "location": {"lat": -37.8076, "lng": 144.9568},
                "viewport": {
                    "northeast": {"lat": -37.80, "lng": 144.96},
                    "southwest": {"lat": -37.81, "lng": 144.95}
                }
            }
        }
    ],
    "status": "OK"
}"#;

const NEARBY_BODY: &str = r#"{
    "results": [
        {"place_id": "n-1", "name": "Flinders Street Station",
         "photos": [{"photo_reference": "ref-a", "height": 10, "width": 10}]},
        {"place_id": "n-2", "name": "Federation Square"}
    ],
    "status": "OK"
}"#;

#[tokio::test]
async fn test_search_by_text_sends_expected_request() {
    let server = FixtureServer::always(Canned::json(TEXT_SEARCH_BODY)).await;
    let client = PlacesClient::new(&server.base_url, "secret");

    let places = client
        .search_by_text("night market", -37.8136, 144.9631)
        .await;

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].id, "p-1");
    assert_eq!(places[0].formatted_address, "Queen St, Melbourne VIC 3000");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].target(),
        "/textsearch/json?query=night%20market&location=-37.8136,144.9631&key=secret"
    );
}

#[tokio::test]
async fn test_search_by_text_failures_return_empty() {
    let server = FixtureServer::always(Canned::status(500)).await;
    let client = PlacesClient::new(&server.base_url, "k");
    assert!(client.search_by_text("cafe", 1.0, 2.0).await.is_empty());
    assert!(matches!(
        client.try_search_by_text("cafe", 1.0, 2.0).await,
        Err(RemoteError::Status(status)) if status.as_u16() == 500
    ));

    let server = FixtureServer::always(Canned::json("{\"results\": 7}")).await;
    let client = PlacesClient::new(&server.base_url, "k");
    assert!(client.search_by_text("cafe", 1.0, 2.0).await.is_empty());
    assert!(matches!(
        client.try_search_by_text("cafe", 1.0, 2.0).await,
        Err(RemoteError::Decode(_))
    ));
}

#[tokio::test]
async fn test_network_failure_returns_empty() {
    // Bind then drop to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = PlacesClient::new(format!("http://{addr}"), "k");
    assert!(client.search_nearby(0.0, 0.0).await.is_empty());
    assert!(matches!(
        client.try_search_nearby(0.0, 0.0).await,
        Err(RemoteError::Network(_))
    ));
}

#[tokio::test]
async fn test_search_nearby_projects_first_photo() {
    let server = FixtureServer::always(Canned::json(NEARBY_BODY)).await;
    let client = PlacesClient::new(&server.base_url, "k");

    let places = client.search_nearby(-37.81, 144.96).await;

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].photo_reference.as_deref(), Some("ref-a"));
    assert_eq!(places[1].photo_reference, None);
    assert!(server.requests()[0].target().contains("radius=100"));
}

#[tokio::test]
async fn test_fetch_photo_returns_image_bytes() {
    let server = FixtureServer::always(Canned::bytes("image/png", PNG_BYTES)).await;
    let client = PlacesClient::new(&server.base_url, "k");

    let photo = client.fetch_photo("ref-a").await;

    assert_eq!(photo.as_deref(), Some(PNG_BYTES));
    assert!(server.requests()[0]
        .target()
        .starts_with("/photo?maxwidth=400&photoreference=ref-a"));
}

#[tokio::test]
async fn test_fetch_photo_rejects_non_image_payload() {
    let server = FixtureServer::always(Canned::bytes("text/html", b"<html>quota</html>")).await;
    let client = PlacesClient::new(&server.base_url, "k");

    assert!(client.fetch_photo("ref-a").await.is_none());
    assert!(matches!(
        client.try_fetch_photo("ref-a").await,
        Err(RemoteError::NotAnImage)
    ));
}

#[tokio::test]
async fn test_fetch_photo_garbage_reference_sends_nothing() {
    let server = FixtureServer::always(Canned::bytes("image/png", PNG_BYTES)).await;
    let client = PlacesClient::new(&server.base_url, "k");

    assert!(client.fetch_photo("").await.is_none());
    assert!(client.fetch_photo("two words").await.is_none());
    assert!(client.fetch_photo("bell\u{7}").await.is_none());
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_place_search_keeps_newest_results() {
    let slow_body = TEXT_SEARCH_BODY.replace("p-1", "slow");
    let fast_body = TEXT_SEARCH_BODY.replace("p-1", "fast");
    let server = FixtureServer::start(move |request| {
        if request.target().contains("query=slow") {
            Canned::json(&slow_body).delayed(Duration::from_millis(300))
        } else {
            Canned::json(&fast_body)
        }
    })
    .await;
    let search = PlaceSearch::new(PlacesClient::new(&server.base_url, "k"));

    let slow = {
        let search = search.clone();
        tokio::spawn(async move { search.search("slow", 0.0, 0.0).await })
    };
    // Let the slow search take its ticket first.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let fast = search.search("fast", 0.0, 0.0).await;

    let slow = slow.await.unwrap();
    assert!(slow.is_none());
    assert_eq!(fast.unwrap()[0].id, "fast");

    let stored = search.results().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, "fast");
}
