use reqwest::{
    header,
    header::{HeaderMap, HeaderValue},
    Client, ClientBuilder, StatusCode,
};
use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use crate::{
    error::{Error, Result},
    models::{BucketEvent, Experiment},
};

const API_URL: &str = "http://localhost:8080/api";

/// The environment variable to change the default timeout for bucket requests.
const BUCKET_TIMEOUT_MS: &str = "BUCKET_TIMEOUT_MS";

fn create_http_connection_client() -> Client {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    let timeout = std::env::var(BUCKET_TIMEOUT_MS)
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u64>()
        .unwrap_or(3000);
    ClientBuilder::new()
        .pool_idle_timeout(Some(Duration::from_secs(60)))
        .tcp_keepalive(Some(Duration::from_secs(30)))
        .timeout(Duration::from_millis(timeout))
        .default_headers(headers)
        .build()
        .expect("should be able to build the http client")
}

/// All service endpoints answer with this envelope; only `data` matters
/// to the client.
#[derive(Deserialize)]
struct ApiResponse<T> {
    data: Option<T>,
}

#[derive(Clone)]
pub struct BucketHttpClient {
    base_url: String,
    http_client: Client,
}

impl BucketHttpClient {
    pub fn new(api_url: Option<String>) -> Self {
        let base_url = api_url.unwrap_or_else(|| API_URL.to_string());
        let http_client = create_http_connection_client();
        Self {
            base_url,
            http_client,
        }
    }

    pub async fn assign_group(&self, experiment_id: &str, visitor_id: &str) -> Result<String> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct AssignGroupBody<'a> {
            experiment_id: &'a str,
            visitor_id: &'a str,
        }

        let url = format!("{}/traffic/assign", self.base_url);
        let body = AssignGroupBody {
            experiment_id,
            visitor_id,
        };

        let response = self.http_client.post(url).json(&body).send().await;
        let res = match response {
            Ok(result) => match result.status() {
                StatusCode::OK => Ok(result),
                err => Err(Error::Status(err)),
            },
            Err(err) => Err(Error::Network(err)),
        }?;

        let parsed = match res.json::<ApiResponse<String>>().await {
            Ok(parsed) => Ok(parsed),
            Err(err) => Err(Error::Decode(err)),
        }?;

        parsed.data.ok_or(Error::Missing("data"))
    }

    pub async fn fetch_experiment(&self, experiment_id: &str) -> Result<Experiment> {
        let url = format!("{}/experiments/{}", self.base_url, experiment_id);

        let response = self.http_client.get(url).send().await;
        let res = match response {
            Ok(result) => match result.status() {
                StatusCode::OK => Ok(result),
                err => Err(Error::Status(err)),
            },
            Err(err) => Err(Error::Network(err)),
        }?;

        let parsed = match res.json::<ApiResponse<Experiment>>().await {
            Ok(parsed) => Ok(parsed),
            Err(err) => Err(Error::Decode(err)),
        }?;

        parsed.data.ok_or(Error::Missing("data"))
    }

    /// Posts one event envelope and hands the response body back
    /// unexamined.
    pub async fn report_event(&self, event: &BucketEvent) -> Result<serde_json::Value> {
        let url = format!("{}/data/event", self.base_url);

        let response = self.http_client.post(url).json(event).send().await;
        let res = match response {
            Ok(result) => match result.status() {
                StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(result),
                err => Err(Error::Status(err)),
            },
            Err(err) => Err(Error::Network(err)),
        }?;

        match res.json::<serde_json::Value>().await {
            Ok(body) => Ok(body),
            Err(err) => Err(Error::Decode(err)),
        }
    }
}
