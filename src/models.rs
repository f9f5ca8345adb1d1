use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::HashMap;

/// Options to use when creating the client, they will override default
/// values, if they exist.
///
/// The default value for api_url is http://localhost:8080/api
#[derive(Debug, Clone, Default)]
pub struct BucketOptions {
    pub api_url: Option<String>,
}

/// An experiment definition as served by the experiments endpoint:
/// metadata plus the per-group configurations keyed by group id.
#[skip_serializing_none]
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// DRAFT, RUNNING, PAUSED or STOPPED.
    pub status: Option<String>,
    pub groups: Option<HashMap<String, ExperimentGroup>>,
}

/// A single experiment group (variant) and its configuration payload.
#[skip_serializing_none]
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentGroup {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Share of traffic routed to this group, between 0.0 and 1.0.
    pub traffic_ratio: Option<f64>,
    pub config: Option<serde_json::Value>,
}

/// The envelope posted to the event ingestion endpoint.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketEvent {
    pub experiment_id: String,
    pub visitor_id: String,
    pub event_type: String,
    pub event_name: String,
    pub properties: serde_json::Value,
}

/// Product data reported on a product page view.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub product_id: String,
    pub product_price: f64,
    pub market_price: f64,
    pub product_model: String,
    /// Condition label of the listed product, e.g. "new" or "used".
    pub condition: String,
}

/// Data reported when a visitor clicks through to contact the seller.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactClick {
    pub product_id: String,
    pub product_price: f64,
}

/// Data reported on a completed transaction.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    pub product_id: String,
    pub transaction_price: f64,
    pub list_price: f64,
    pub market_price: f64,
}

impl Transaction {
    /// Ratio of the realized price to the market price, the central
    /// conversion-quality signal. Zero whenever the market price is not
    /// positive.
    pub fn price_ratio(&self) -> f64 {
        if self.market_price > 0.0 {
            self.transaction_price / self.market_price
        } else {
            0.0
        }
    }
}
