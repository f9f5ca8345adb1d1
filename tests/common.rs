use httptest::{matchers::request, responders::json_encoded, Expectation, Server};
use serde_json::json;

use bucket::{models::BucketOptions, Client};

pub const EXPERIMENT_ID: &str = "exp_price_001";
pub const VISITOR_ID: &str = "visitor_1";

pub fn expect_assignment(server: &Server, group_id: &str) {
    server.expect(
        Expectation::matching(request::method_path("POST", "/traffic/assign"))
            .times(..)
            .respond_with(json_encoded(json!({
                "code": 200,
                "message": "success",
                "data": group_id
            }))),
    );
}

pub fn expect_experiment(server: &Server) {
    server.expect(
        Expectation::matching(request::method_path("GET", "/experiments/exp_price_001"))
            .times(..)
            .respond_with(json_encoded(json!({
                "code": 200,
                "message": "success",
                "data": {
                    "id": EXPERIMENT_ID,
                    "name": "price sensitivity test",
                    "status": "RUNNING",
                    "groups": {
                        "A": { "id": "A", "trafficRatio": 0.5, "config": { "x": 1 } },
                        "B": { "id": "B", "trafficRatio": 0.5, "config": { "x": 2 } }
                    }
                }
            }))),
    );
}

pub fn create_client(server: &Server) -> Client {
    Client::new(
        EXPERIMENT_ID.to_string(),
        VISITOR_ID.to_string(),
        BucketOptions {
            api_url: Some(format!("http://{}", server.addr())),
        },
    )
}
