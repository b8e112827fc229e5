use crate::debounce::DEFAULT_WINDOW;
use crate::search::CollectionFilter;
use std::time::Duration;
use vd_icons::DEFAULT_API_BASE;

/// Environment variable overriding the icon API base URL.
pub const API_BASE_ENV: &str = "VECTOR_DROP_ICON_API";

/// Results requested per search or collection listing.
pub const RESULT_LIMIT: usize = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub api_base: String,
    pub debounce: Duration,
    pub result_limit: usize,
    /// Collection selected when the panel opens.
    pub collection: CollectionFilter,
    /// How long the "inserted" toast stays up.
    pub toast: Duration,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            debounce: DEFAULT_WINDOW,
            result_limit: RESULT_LIMIT,
            collection: CollectionFilter::Prefix("lucide".into()),
            toast: Duration::from_secs(2),
        }
    }
}

impl PanelConfig {
    /// Defaults, with the API base taken from `VECTOR_DROP_ICON_API` when
    /// set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(base) = std::env::var(API_BASE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            config.api_base = base;
        }
        config
    }
}
