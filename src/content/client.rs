use crate::config::SiteConfig;
use crate::content::{ContentSource, EntryCollection, EntryQuery};
use crate::error::SiteError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

/// Contentful Content Delivery API client
pub struct DeliveryClient {
    client: Client,
    base_url: String,
    space_id: String,
    environment: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

impl DeliveryClient {
    /// Create a client from configuration.
    ///
    /// Credentials come from config first, then `CONTENTFUL_SPACE_ID` and
    /// `CONTENTFUL_ACCESS_KEY`.
    pub fn new(config: &SiteConfig) -> Result<Self, SiteError> {
        let space_id = config.resolve_space_id()?;
        let access_token = config.resolve_access_token()?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("recipe-pages/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(DeliveryClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            space_id,
            environment: config.environment.clone(),
            access_token,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(space_id: String, access_token: String, base_url: String) -> Self {
        DeliveryClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            space_id,
            environment: "master".to_string(),
            access_token,
        }
    }

    fn entries_url(&self) -> String {
        format!(
            "{}/spaces/{}/environments/{}/entries",
            self.base_url, self.space_id, self.environment
        )
    }
}

#[async_trait]
impl ContentSource for DeliveryClient {
    fn source_name(&self) -> &str {
        "contentful"
    }

    async fn get_entries(&self, query: &EntryQuery) -> Result<EntryCollection, SiteError> {
        debug!("GET {} {:?}", self.entries_url(), query.to_pairs());

        let response = self
            .client
            .get(self.entries_url())
            .bearer_auth(&self.access_token)
            .query(&query.to_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            return Err(SiteError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let collection: EntryCollection = response.json().await?;
        debug!(
            "received {} of {} entries of type '{}'",
            collection.items.len(),
            collection.total,
            query.get_content_type()
        );
        Ok(collection)
    }
}
