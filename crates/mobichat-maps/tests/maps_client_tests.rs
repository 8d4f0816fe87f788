use mobichat_maps::{MapsClient, MapsError};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> MapsClient {
    MapsClient::new("test-key".to_string())
        .unwrap()
        .with_base_urls(
            format!("{}/v1/places:searchText", server.uri()),
            format!("{}/directions/v2:computeRoutes", server.uri()),
        )
}

#[tokio::test]
async fn search_place_returns_first_match() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "textQuery": "gare du midi brussels"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "places": [
                {"id": "ChIJfirst", "formattedAddress": "Avenue Fonsny 47B, Brussels"},
                {"id": "ChIJsecond"}
            ]
        })))
        .mount(&server)
        .await;

    let place = test_client(&server).search_place("gare du midi").await.unwrap();
    assert_eq!(place.id, "ChIJfirst");
    assert_eq!(
        place.formatted_address.as_deref(),
        Some("Avenue Fonsny 47B, Brussels")
    );
}

#[tokio::test]
async fn search_place_with_no_results_is_a_no_matches_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .search_place("nowhere at all")
        .await
        .unwrap_err();
    match err {
        MapsError::NoMatches { query } => assert_eq!(query, "nowhere at all brussels"),
        other => panic!("expected NoMatches, got {:?}", other),
    }
}

#[tokio::test]
async fn search_place_surfaces_api_errors_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key invalid"))
        .mount(&server)
        .await;

    let err = test_client(&server).search_place("flagey").await.unwrap_err();
    match err {
        MapsError::Api { status, body } => {
            assert_eq!(status.as_u16(), 403);
            assert_eq!(body, "API key invalid");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn compute_route_sends_transit_payload_and_passes_routes_through() {
    let server = MockServer::start().await;

    let routes_body = serde_json::json!({
        "routes": [{
            "legs": [{"steps": [{"travelMode": "TRANSIT"}]}],
            "duration": "1620s"
        }]
    });

    Mock::given(method("POST"))
        .and(path("/directions/v2:computeRoutes"))
        .and(query_param("fields", "routes"))
        .and(body_partial_json(serde_json::json!({
            "origin": {"placeId": "ChIJorigin"},
            "destination": {"placeId": "ChIJdest"},
            "travelMode": "TRANSIT",
            "departureTime": "2025-12-16T10:00:00Z",
            "languageCode": "en-US"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(routes_body.clone()))
        .mount(&server)
        .await;

    let routes = test_client(&server)
        .compute_route("ChIJorigin", "ChIJdest", "2025-12-16T10:00:00Z")
        .await
        .unwrap();
    assert_eq!(routes, routes_body);
}

#[tokio::test]
async fn compute_route_surfaces_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/directions/v2:computeRoutes"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid place id"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .compute_route("bogus", "bogus", "2025-12-16T10:00:00Z")
        .await
        .unwrap_err();
    assert!(matches!(err, MapsError::Api { .. }));
}
