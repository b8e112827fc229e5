use crate::client::{IconClient, SearchOptions, SearchResult};
use crate::descriptor::IconDescriptor;
use crate::error::IconError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Where the panel gets icons from.
#[async_trait]
pub trait IconSource: Send + Sync {
    async fn search(&self, query: &str, options: &SearchOptions)
    -> Result<SearchResult, IconError>;

    async fn fetch_batch(
        &self,
        prefix: &str,
        names: &[String],
    ) -> Result<HashMap<String, IconDescriptor>, IconError>;

    async fn list_collection_icons(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<String>, IconError>;
}

#[async_trait]
impl IconSource for IconClient {
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResult, IconError> {
        IconClient::search(self, query, options).await
    }

    async fn fetch_batch(
        &self,
        prefix: &str,
        names: &[String],
    ) -> Result<HashMap<String, IconDescriptor>, IconError> {
        IconClient::fetch_batch(self, prefix, names).await
    }

    async fn list_collection_icons(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<String>, IconError> {
        IconClient::list_collection_icons(self, prefix, limit).await
    }
}
