use anyhow::Result;
use httptest::{
    cycle,
    matchers::request,
    responders::{json_encoded, status_code},
    Expectation, Server,
};
use serde_json::json;

use common::create_client;

pub mod common;

#[tokio::test]
async fn test_group_is_resolved_once() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/traffic/assign"))
            .times(1)
            .respond_with(json_encoded(json!({
                "code": 200,
                "message": "success",
                "data": "B"
            }))),
    );

    let client = create_client(&server);
    for _ in 0..3 {
        assert_eq!(client.get_group().await, Some("B".to_string()));
    }

    Ok(())
}

#[tokio::test]
async fn test_group_resolution_retries_after_failure() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/traffic/assign"))
            .times(2)
            .respond_with(cycle![
                status_code(500),
                json_encoded(json!({
                    "code": 200,
                    "message": "success",
                    "data": "A"
                }))
            ]),
    );

    let client = create_client(&server);
    assert_eq!(client.get_group().await, None);
    assert_eq!(client.get_group().await, Some("A".to_string()));
    // Served from the cache, no third request.
    assert_eq!(client.get_group().await, Some("A".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_group_absent_when_payload_empty() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/traffic/assign"))
            .times(2)
            .respond_with(json_encoded(json!({
                "code": 404,
                "message": "experiment not found"
            }))),
    );

    let client = create_client(&server);
    // An empty payload is not cached either; both calls go to the server.
    assert_eq!(client.get_group().await, None);
    assert_eq!(client.get_group().await, None);

    Ok(())
}
