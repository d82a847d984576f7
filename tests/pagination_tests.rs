//! Integration tests for pages and cursors.
//!
//! These tests serve a three-page attribute collection from a mock server
//! and walk it through cursors, streams and explicit page navigation.

use futures::TryStreamExt;
use pim_api::{
    AccessToken, ApiError, BaseUri, ListParams, Page, PimClient, PimConfig, QueryParameters,
    Resource,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COLLECTION: &str = "/api/rest/v1/attributes";

fn create_client(server: &MockServer) -> PimClient {
    let config = PimConfig::builder()
        .base_uri(BaseUri::new(server.uri()).unwrap())
        .access_token(AccessToken::new("test-token").unwrap())
        .build()
        .unwrap();
    PimClient::new(&config).unwrap()
}

fn page_link(server: &MockServer, page: u32) -> String {
    format!(
        "{}{COLLECTION}?page={page}&limit=2&with_count=false",
        server.uri()
    )
}

fn envelope(server: &MockServer, page: u32, codes: &[&str], has_next: bool) -> Value {
    let mut links = json!({
        "self": {"href": page_link(server, page)},
        "first": {"href": page_link(server, 1)}
    });
    if page > 1 {
        links["previous"] = json!({"href": page_link(server, page - 1)});
    }
    if has_next {
        links["next"] = json!({"href": page_link(server, page + 1)});
    }
    let items: Vec<Value> = codes.iter().map(|code| json!({"code": code})).collect();

    json!({
        "_links": links,
        "current_page": page,
        "_embedded": {"items": items}
    })
}

/// Mounts pages A (color, size), B (weight, height) and C (material).
///
/// Each follow-up page expects exactly one request.
async fn mount_three_pages(server: &MockServer, first_page_requests: u64) {
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(server, 2, &["weight", "height"], true)),
        )
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(server, 3, &["material"], false)),
        )
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param("limit", "2"))
        .and(query_param("with_count", "false"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(server, 1, &["color", "size"], true)),
        )
        .expect(first_page_requests)
        .mount(server)
        .await;
}

fn codes(resources: &[Resource]) -> Vec<String> {
    resources
        .iter()
        .map(|resource| resource["code"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_cursor_walks_three_pages_in_order() {
    let server = MockServer::start().await;
    mount_three_pages(&server, 1).await;

    let client = create_client(&server);
    let mut cursor = client
        .attributes()
        .all((), 2, QueryParameters::new())
        .await
        .unwrap();
    assert_eq!(cursor.page_size(), 2);

    let mut seen = Vec::new();
    while let Some(resource) = cursor.next().await.unwrap() {
        seen.push(resource);
    }

    assert_eq!(
        codes(&seen),
        vec!["color", "size", "weight", "height", "material"]
    );
    assert!(cursor.next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_cursor_stream_yields_the_same_sequence() {
    let server = MockServer::start().await;
    mount_three_pages(&server, 1).await;

    let client = create_client(&server);
    let cursor = client
        .attributes()
        .all((), 2, QueryParameters::new())
        .await
        .unwrap();

    let resources: Vec<Resource> = cursor.into_stream().try_collect().await.unwrap();
    assert_eq!(
        codes(&resources),
        vec!["color", "size", "weight", "height", "material"]
    );
}

#[tokio::test]
async fn test_cursor_over_single_page_issues_no_extra_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(&server, 1, &["color"], false)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut cursor = client
        .attributes()
        .all((), 2, QueryParameters::new())
        .await
        .unwrap();

    assert_eq!(cursor.next().await.unwrap().unwrap()["code"], "color");
    assert!(cursor.next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_page_navigation_follows_links() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(&server, 1, &["color", "size"], true)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_three_pages(&server, 1).await;

    let client = create_client(&server);
    let attributes = client.attributes();

    let first = attributes
        .list_per_page((), ListParams::default().limit(2))
        .await
        .unwrap();
    assert!(!first.has_previous_page());
    assert!(attributes.previous_page(&first).await.unwrap().is_none());

    let second = attributes.next_page(&first).await.unwrap().unwrap();
    assert_eq!(second.current_page(), Some(2));
    assert!(second.has_previous_page());

    let third = attributes.next_page(&second).await.unwrap().unwrap();
    assert_eq!(third.current_page(), Some(3));
    assert!(attributes.next_page(&third).await.unwrap().is_none());

    let back_to_first = attributes.first_page(&third).await.unwrap().unwrap();
    assert_eq!(codes(back_to_first.items()), vec!["color", "size"]);
}

#[tokio::test]
async fn test_links_to_other_hosts_are_not_followed() {
    let server = MockServer::start().await;
    let client = create_client(&server);

    let page = Page::new(Vec::new()).with_next_link("https://elsewhere.test/api/rest/v1/attributes?page=2");
    let result = client.attributes().next_page(&page).await;

    assert!(matches!(result, Err(ApiError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_failed_page_fetch_surfaces_from_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(&server, 1, &["color"], true)),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut cursor = client
        .attributes()
        .all((), 2, QueryParameters::new())
        .await
        .unwrap();

    assert!(cursor.next().await.unwrap().is_some());
    match cursor.next().await {
        Err(ApiError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("Expected Server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_page_is_an_error_not_the_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(&server, 1, &["color"], true)),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut cursor = client
        .attributes()
        .all((), 2, QueryParameters::new())
        .await
        .unwrap();

    assert_eq!(cursor.next().await.unwrap().unwrap()["code"], "color");
    assert!(matches!(
        cursor.next().await,
        Err(ApiError::UnexpectedResponse(_))
    ));
}
