use crossbeam::sync::ShardedLock;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{event, Level};

use crate::{
    http::BucketHttpClient,
    models::{BucketEvent, BucketOptions, ContactClick, Experiment, ProductView, Transaction},
};

const VIEW_EVENT_TYPE: &str = "VIEW";
const CLICK_EVENT_TYPE: &str = "CLICK";
const CONVERT_EVENT_TYPE: &str = "CONVERT";

const PRODUCT_VIEW_EVENT: &str = "product_view";
const CONTACT_SELLER_EVENT: &str = "contact_seller";
const TRANSACTION_COMPLETED_EVENT: &str = "transaction_completed";

/// Bucket client scoped to one experiment and one visitor.
///
/// The group assignment and the experiment definition are each fetched at
/// most once per instance and cached for its whole lifetime; a failed
/// fetch leaves the slot empty so the next call retries. All methods
/// degrade failures to `None` after logging, they never raise.
pub struct Client {
    experiment_id: String,
    visitor_id: String,
    http_client: BucketHttpClient,
    group_cache: ShardedLock<Option<String>>,
    experiment_cache: ShardedLock<Option<Experiment>>,
}

impl Client {
    pub fn new(experiment_id: String, visitor_id: String, options: BucketOptions) -> Self {
        let http_client = BucketHttpClient::new(options.api_url);
        Self {
            experiment_id,
            visitor_id,
            http_client,
            group_cache: ShardedLock::new(None),
            experiment_cache: ShardedLock::new(None),
        }
    }

    /// Returns the experiment group this visitor is assigned to.
    ///
    /// The first successful call resolves the assignment through the
    /// traffic endpoint and pins it for the lifetime of the instance.
    /// Concurrent first calls may each issue a request; the server answer
    /// is deterministic per visitor, so the slot converges either way.
    pub async fn get_group(&self) -> Option<String> {
        {
            let cache = self
                .group_cache
                .read()
                .expect("should always be able to acquire lock");
            if let Some(group_id) = cache.as_ref() {
                return Some(group_id.clone());
            }
        }

        match self
            .http_client
            .assign_group(&self.experiment_id, &self.visitor_id)
            .await
        {
            Ok(group_id) => {
                let mut cache = self
                    .group_cache
                    .write()
                    .expect("should always be able to acquire lock");
                *cache = Some(group_id.clone());
                Some(group_id)
            }
            Err(e) => {
                event!(
                    Level::ERROR,
                    "Failed to resolve group for experiment {}: {}",
                    self.experiment_id,
                    e
                );
                None
            }
        }
    }

    /// Returns the full experiment definition, fetched once and cached.
    ///
    /// The cache slot is independent from the group assignment slot; a
    /// failure on one side never blocks the other.
    pub async fn get_experiment_config(&self) -> Option<Experiment> {
        {
            let cache = self
                .experiment_cache
                .read()
                .expect("should always be able to acquire lock");
            if let Some(experiment) = cache.as_ref() {
                return Some(experiment.clone());
            }
        }

        match self.http_client.fetch_experiment(&self.experiment_id).await {
            Ok(experiment) => {
                let mut cache = self
                    .experiment_cache
                    .write()
                    .expect("should always be able to acquire lock");
                *cache = Some(experiment.clone());
                Some(experiment)
            }
            Err(e) => {
                event!(
                    Level::ERROR,
                    "Failed to fetch experiment {}: {}",
                    self.experiment_id,
                    e
                );
                None
            }
        }
    }

    /// Returns the configuration of the group this visitor belongs to.
    ///
    /// Recomputed from the two underlying caches on every call: absent
    /// while either of them is unresolved, or when the definition carries
    /// no matching group or config.
    pub async fn get_group_config(&self) -> Option<Value> {
        let group_id = self.get_group().await?;
        let experiment = self.get_experiment_config().await?;
        experiment.groups?.get(&group_id)?.config.clone()
    }

    /// Returns the visitor's group configuration parsed into `T`.
    pub async fn get_group_config_as<T: DeserializeOwned>(&self) -> Option<T> {
        let config = self.get_group_config().await?;
        match serde_json::from_value(config) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                event!(
                    Level::ERROR,
                    "Failed to parse group config for experiment {}: {}",
                    self.experiment_id,
                    e
                );
                None
            }
        }
    }

    /// Reports a single event and returns the ingestion response body.
    ///
    /// The event type is passed through as-is, nothing is validated.
    /// Errors are logged but not propagated.
    pub async fn report_event(
        &self,
        event_type: &str,
        event_name: &str,
        properties: Value,
    ) -> Option<Value> {
        let bucket_event = BucketEvent {
            experiment_id: self.experiment_id.clone(),
            visitor_id: self.visitor_id.clone(),
            event_type: event_type.to_string(),
            event_name: event_name.to_string(),
            properties,
        };

        match self.http_client.report_event(&bucket_event).await {
            Ok(body) => Some(body),
            Err(e) => {
                event!(
                    Level::ERROR,
                    "Failed to report {} event for experiment {}: {}",
                    event_type,
                    self.experiment_id,
                    e
                );
                None
            }
        }
    }

    /// Reports a product page view.
    pub async fn report_view(&self, product: &ProductView) -> Option<Value> {
        self.report_event(
            VIEW_EVENT_TYPE,
            PRODUCT_VIEW_EVENT,
            json!({
                "productId": product.product_id,
                "productPrice": product.product_price,
                "marketPrice": product.market_price,
                "productModel": product.product_model,
                "condition": product.condition,
            }),
        )
        .await
    }

    /// Reports a contact-seller click.
    pub async fn report_click(&self, click: &ContactClick) -> Option<Value> {
        self.report_event(
            CLICK_EVENT_TYPE,
            CONTACT_SELLER_EVENT,
            json!({
                "productId": click.product_id,
                "productPrice": click.product_price,
            }),
        )
        .await
    }

    /// Reports a completed transaction, the key conversion metric.
    pub async fn report_transaction(&self, transaction: &Transaction) -> Option<Value> {
        self.report_event(
            CONVERT_EVENT_TYPE,
            TRANSACTION_COMPLETED_EVENT,
            json!({
                "transactionId": transaction.transaction_id,
                "productId": transaction.product_id,
                "transactionPrice": transaction.transaction_price,
                "listPrice": transaction.list_price,
                "marketPrice": transaction.market_price,
                "priceRatio": transaction.price_ratio(),
            }),
        )
        .await
    }
}
