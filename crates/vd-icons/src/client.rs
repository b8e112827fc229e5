//! HTTP client for the Iconify public API.

use crate::descriptor::IconDescriptor;
use crate::error::IconError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_API_BASE: &str = "https://api.iconify.design";

/// Fallback edge length when neither the icon nor its set declares one.
const DEFAULT_EXTENT: f32 = 24.0;

pub const DEFAULT_SEARCH_LIMIT: usize = 64;
pub const DEFAULT_COLLECTION_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Restrict results to one icon set.
    pub prefix: Option<String>,
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    /// `prefix:name` entries.
    pub icons: Vec<String>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Deserialize)]
struct IconSetResponse {
    #[serde(default)]
    icons: HashMap<String, IconEntry>,
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct IconEntry {
    body: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct CollectionResponse {
    uncategorized: Option<Vec<String>>,
    #[serde(default)]
    categories: serde_json::Map<String, serde_json::Value>,
}

/// First positive extent in the chain, else 24.
fn extent(candidates: &[Option<f32>]) -> f32 {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|v| *v > 0.0)
        .unwrap_or(DEFAULT_EXTENT)
}

#[derive(Debug, Clone)]
pub struct IconClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for IconClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl IconClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One GET, decoded as JSON. Non-2xx is an error; there is no retry.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, IconError> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("GET {url} {query:?}");
        let resp = self.http.get(&url).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(IconError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResult, IconError> {
        let mut params = vec![
            ("query", query.to_string()),
            ("limit", options.limit.to_string()),
        ];
        if let Some(prefix) = options.prefix.as_deref().filter(|p| !p.is_empty()) {
            params.push(("prefix", prefix.to_string()));
        }
        self.get_json("/search", &params).await
    }

    /// Fetch several icons of one set. Names the set does not know, or
    /// that come back without a body, are left out of the map.
    pub async fn fetch_batch(
        &self,
        prefix: &str,
        names: &[String],
    ) -> Result<HashMap<String, IconDescriptor>, IconError> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }
        let mut set: IconSetResponse = self
            .get_json(&format!("/{prefix}.json"), &[("icons", names.join(","))])
            .await?;

        let mut out = HashMap::with_capacity(names.len());
        for name in names {
            let Some(entry) = set.icons.remove(name) else {
                continue;
            };
            let Some(body) = entry.body else {
                continue;
            };
            out.insert(
                name.clone(),
                IconDescriptor {
                    prefix: prefix.to_string(),
                    name: name.clone(),
                    width: extent(&[entry.width, set.width]),
                    height: extent(&[entry.height, set.height]),
                    body,
                },
            );
        }
        if out.len() < names.len() {
            log::debug!(
                "{prefix}: {} of {} icons missing",
                names.len() - out.len(),
                names.len()
            );
        }
        Ok(out)
    }

    /// Fetch a single icon.
    pub async fn fetch_icon(
        &self,
        prefix: &str,
        name: &str,
    ) -> Result<IconDescriptor, IconError> {
        let entry: IconEntry = self
            .get_json(&format!("/{prefix}/{name}.json"), &[])
            .await?;
        let body = entry
            .body
            .ok_or_else(|| IconError::NotFound(format!("{prefix}:{name}")))?;
        Ok(IconDescriptor {
            prefix: prefix.to_string(),
            name: name.to_string(),
            width: extent(&[entry.width]),
            height: extent(&[entry.height]),
            body,
        })
    }

    /// Icon names of a set (without prefix), at most `limit`.
    ///
    /// Uses the uncategorized list when the set has one, otherwise every
    /// category's icons in document order.
    pub async fn list_collection_icons(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<String>, IconError> {
        let data: CollectionResponse = self
            .get_json("/collection", &[("prefix", prefix.to_string())])
            .await?;

        let mut names = match data.uncategorized {
            Some(names) => names,
            None => {
                let mut all = Vec::new();
                for icons in data.categories.into_values() {
                    let icons: Vec<String> = serde_json::from_value(icons)?;
                    all.extend(icons);
                }
                all
            }
        };
        names.truncate(limit);
        Ok(names)
    }
}
