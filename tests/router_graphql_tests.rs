//! Integration tests for the router and GraphQL clients.

use std::sync::Arc;

use drupal_api_client::clients::router::RouterResponse;
use drupal_api_client::{
    BaseUrl, ClientConfig, GraphqlClient, MemoryCache, RequestOptions, RouterClient,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

// ============================================================================
// Router
// ============================================================================

#[tokio::test]
async fn test_translate_path_with_locale() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/es/router/translate-path"))
        .and(query_param("path", "/recetas/quiche"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resolved": "https://cms.example.com/es/recetas/quiche",
            "entity": { "uuid": "35f7cd32", "type": "node", "bundle": "recipe", "langcode": "es" },
            "jsonapi": { "resourceName": "node--recipe" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let router = RouterClient::new(&config(&server));
    let response = router
        .translate_path("/recetas/quiche", Some(RequestOptions::new().locale("es")))
        .await
        .unwrap();

    match response.into_json() {
        RouterResponse::Resolved(resolved) => {
            assert_eq!(resolved.entity.uuid, "35f7cd32");
            assert_eq!(resolved.entity.langcode.as_deref(), Some("es"));
            assert_eq!(resolved.jsonapi.unwrap().resource_name, "node--recipe");
        }
        RouterResponse::Unresolved(unresolved) => panic!("Expected resolved, got: {unresolved:?}"),
    }
}

#[tokio::test]
async fn test_translate_path_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/router/translate-path"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resolved": "https://cms.example.com/about",
            "entity": { "uuid": "b1d3" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let router = RouterClient::new(
        &ClientConfig::builder()
            .base_url(BaseUrl::new(server.uri()).unwrap())
            .cache(Arc::new(MemoryCache::new()))
            .build()
            .unwrap(),
    );

    let first = router.translate_path("/about", None).await.unwrap();
    let second = router.translate_path("/about", None).await.unwrap();

    assert!(first.json().is_resolved());
    assert_eq!(first.json(), second.json());
}

// ============================================================================
// GraphQL
// ============================================================================

#[tokio::test]
async fn test_graphql_query_posts_query_and_variables() {
    let server = MockServer::start().await;
    let query = "query ($id: ID!) { article(id: $id) { title } }";
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "query": query, "variables": { "id": "1" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "article": { "title": "Hello" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&config(&server));
    let response = client
        .query(query, Some(json!({ "id": "1" })), None)
        .await
        .unwrap();

    assert_eq!(response.json()["data"]["article"]["title"], "Hello");
}

#[tokio::test]
async fn test_graphql_errors_are_returned_in_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_json(json!({ "query": "{ nope }" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Cannot query field \"nope\" on type \"Query\"." }]
        })))
        .mount(&server)
        .await;

    let response = GraphqlClient::new(&config(&server))
        .query("{ nope }", None, Some(RequestOptions::new().raw_response(true)))
        .await
        .unwrap();

    assert_eq!(response.response().unwrap().status, 200);
    assert!(response.json().get("errors").is_some());
}
