//! `DynamoDB`-backed [`ItemStore`].

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Region;
use tokio::sync::OnceCell;

use itemshim_app::ports::ItemStore;
use itemshim_domain::error::ItemShimError;
use itemshim_domain::item::Item;

use crate::conversions;
use crate::error::StorageError;

/// Table used when none is configured.
pub const DEFAULT_TABLE_NAME: &str = "items";
/// Region used when the platform provides none.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Configuration for the `DynamoDB` storage adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Table holding the items, keyed by `id`.
    pub table_name: String,
    /// AWS region of the table.
    pub region: String,
    /// Endpoint override, e.g. `http://localhost:8000` for `DynamoDB` Local.
    pub endpoint_url: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }
}

impl StoreConfig {
    /// Read configuration from `TABLE_NAME`, `AWS_REGION` and
    /// `DYNAMODB_ENDPOINT`, falling back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            table_name: std::env::var("TABLE_NAME").unwrap_or(defaults.table_name),
            region: std::env::var("AWS_REGION").unwrap_or(defaults.region),
            endpoint_url: std::env::var("DYNAMODB_ENDPOINT").ok(),
        }
    }

    /// Build a [`DynamoItemStore`] from this configuration.
    ///
    /// No network call is made here: the SDK client is created on first use.
    #[must_use]
    pub fn build(self) -> DynamoItemStore {
        DynamoItemStore {
            config: self,
            client: OnceCell::new(),
        }
    }
}

/// `DynamoDB`-backed item store.
pub struct DynamoItemStore {
    config: StoreConfig,
    client: OnceCell<Client>,
}

impl DynamoItemStore {
    /// Wrap an already-built client.
    #[must_use]
    pub fn with_client(config: StoreConfig, client: Client) -> Self {
        Self {
            config,
            client: OnceCell::new_with(Some(client)),
        }
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.config.table_name
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                let mut loader = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(self.config.region.clone()));
                if let Some(endpoint) = &self.config.endpoint_url {
                    loader = loader.endpoint_url(endpoint);
                }
                let sdk_config = loader.load().await;
                tracing::debug!(
                    table = %self.config.table_name,
                    region = %self.config.region,
                    "initialised DynamoDB client"
                );
                Client::new(&sdk_config)
            })
            .await
    }
}

impl ItemStore for DynamoItemStore {
    async fn scan(&self, limit: usize) -> Result<Vec<Item>, ItemShimError> {
        let output = self
            .client()
            .await
            .scan()
            .table_name(&self.config.table_name)
            .limit(i32::try_from(limit).unwrap_or(i32::MAX))
            .send()
            .await
            .map_err(StorageError::from)?;

        Ok(conversions::from_page(output.items()))
    }

    async fn put(&self, item: &Item) -> Result<(), ItemShimError> {
        self.client()
            .await
            .put_item()
            .table_name(&self.config.table_name)
            .set_item(Some(conversions::to_record(item)))
            .send()
            .await
            .map_err(StorageError::from)?;

        tracing::debug!(id = %item.id, table = %self.config.table_name, "stored item");
        Ok(())
    }
}
