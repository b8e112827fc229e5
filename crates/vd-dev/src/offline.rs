//! A small built-in icon set for running without network access.

use async_trait::async_trait;
use std::collections::HashMap;
use vd_icons::{IconDescriptor, IconError, IconSource, SearchOptions, SearchResult};

const HOUSE: &str = r#"<g fill="none" stroke="currentColor" stroke-width="2"><path d="M3 10l9-7l9 7v10a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z"/><path d="M9 22V12h6v10"/></g>"#;
const STAR: &str = r#"<path fill="none" stroke="currentColor" stroke-width="2" d="M12 2l3.09 6.26L22 9.27l-5 4.87L18.18 21L12 17.77L5.82 21L7 14.14l-5-4.87l6.91-1.01z"/>"#;
const BELL: &str = r#"<path fill="none" stroke="currentColor" stroke-width="2" d="M6 8a6 6 0 0 1 12 0c0 7 3 9 3 9H3s3-2 3-9m4.3 13a1.94 1.94 0 0 0 3.4 0"/>"#;
const CIRCLE: &str = r#"<circle cx="12" cy="12" r="10" fill="none" stroke="currentColor" stroke-width="2"/>"#;
const MDI_HOME: &str = r#"<path fill="currentColor" d="M10 20v-6h4v6h5v-8h3L12 3L2 12h3v8z"/>"#;
const MDI_STAR: &str = r#"<path fill="currentColor" d="M12 17.27L18.18 21l-1.64-7.03L22 9.24l-7.19-.62L12 2L9.19 8.62L2 9.24l5.45 4.73L5.82 21z"/>"#;

const ICONS: &[(&str, &str, &str)] = &[
    ("lucide", "house", HOUSE),
    ("lucide", "star", STAR),
    ("lucide", "bell", BELL),
    ("lucide", "circle", CIRCLE),
    ("mdi", "home", MDI_HOME),
    ("mdi", "star", MDI_STAR),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineSource;

fn descriptor(prefix: &str, name: &str, body: &str) -> IconDescriptor {
    IconDescriptor {
        prefix: prefix.to_string(),
        name: name.to_string(),
        width: 24.0,
        height: 24.0,
        body: body.to_string(),
    }
}

#[async_trait]
impl IconSource for OfflineSource {
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResult, IconError> {
        let query = query.trim().to_lowercase();
        let matches: Vec<String> = ICONS
            .iter()
            .filter(|(prefix, name, _)| {
                options.prefix.as_deref().is_none_or(|p| p == *prefix) && name.contains(&query)
            })
            .map(|(prefix, name, _)| format!("{prefix}:{name}"))
            .collect();
        let total = matches.len() as u32;
        Ok(SearchResult {
            icons: matches.into_iter().take(options.limit).collect(),
            total,
        })
    }

    async fn fetch_batch(
        &self,
        prefix: &str,
        names: &[String],
    ) -> Result<HashMap<String, IconDescriptor>, IconError> {
        Ok(ICONS
            .iter()
            .filter(|(p, name, _)| *p == prefix && names.iter().any(|n| n == name))
            .map(|(p, name, body)| (name.to_string(), descriptor(p, name, body)))
            .collect())
    }

    async fn list_collection_icons(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<String>, IconError> {
        let names: Vec<String> = ICONS
            .iter()
            .filter(|(p, _, _)| *p == prefix)
            .map(|(_, name, _)| name.to_string())
            .take(limit)
            .collect();
        if names.is_empty() {
            return Err(IconError::NotFound(prefix.to_string()));
        }
        Ok(names)
    }
}
