//! Icon search state and the request plan behind it.
//!
//! State changes are synchronous ([`SearchPanel::begin`] /
//! [`SearchPanel::finish`]); the network part is [`run_search`], which the
//! driver runs as a separate task so the panel stays responsive while it
//! is suspended.

use std::fmt;
use vd_icons::{IconDescriptor, IconError, IconSource, SearchOptions, split_name};

pub const LOAD_FAILED: &str = "Failed to load icons";
pub const SEARCH_FAILED: &str = "Search failed";
pub const PROMPT_TEXT: &str = "Type to search across all icon sets";
pub const NO_RESULTS_TEXT: &str = "No icons found";

/// Which icon sets a search covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionFilter {
    All,
    Prefix(String),
}

impl CollectionFilter {
    /// `all` (any case) selects every set, anything else is a prefix.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            CollectionFilter::All
        } else {
            CollectionFilter::Prefix(s.to_string())
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        match self {
            CollectionFilter::All => None,
            CollectionFilter::Prefix(p) => Some(p),
        }
    }
}

impl fmt::Display for CollectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix().unwrap_or("all"))
    }
}

/// A search to run, tagged so late answers to superseded searches can be
/// told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
    pub collection: CollectionFilter,
    pub limit: usize,
}

impl SearchRequest {
    fn is_listing(&self) -> bool {
        self.query.trim().is_empty()
    }
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub request: SearchRequest,
    pub result: Result<Vec<IconDescriptor>, IconError>,
}

#[derive(Debug, Clone)]
pub struct SearchPanel {
    pub query: String,
    pub collection: CollectionFilter,
    pub icons: Vec<IconDescriptor>,
    pub loading: bool,
    pub error: Option<&'static str>,
    limit: usize,
    generation: u64,
}

impl SearchPanel {
    pub fn new(collection: CollectionFilter, limit: usize) -> Self {
        Self {
            query: String::new(),
            collection,
            icons: Vec::new(),
            loading: false,
            error: None,
            limit,
            generation: 0,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_collection(&mut self, collection: CollectionFilter) {
        self.collection = collection;
    }

    /// Start a search for the current query and collection.
    pub fn begin(&mut self) -> SearchRequest {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        SearchRequest {
            generation: self.generation,
            query: self.query.clone(),
            collection: self.collection.clone(),
            limit: self.limit,
        }
    }

    /// Apply a finished search. Returns false if a newer search has
    /// started since, in which case nothing changes.
    pub fn finish(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.request.generation != self.generation {
            log::debug!(
                "dropping stale results for {:?}",
                outcome.request.query
            );
            return false;
        }
        self.loading = false;
        match outcome.result {
            Ok(icons) => self.icons = icons,
            Err(e) => {
                let text = if outcome.request.is_listing() {
                    LOAD_FAILED
                } else {
                    SEARCH_FAILED
                };
                log::error!("{text}: {e}");
                self.error = Some(text);
            }
        }
        true
    }

    /// Text for an empty grid, `None` while there is something else to show.
    pub fn empty_text(&self) -> Option<&'static str> {
        if self.loading || self.error.is_some() || !self.icons.is_empty() {
            return None;
        }
        if self.collection == CollectionFilter::All && self.query.trim().is_empty() {
            Some(PROMPT_TEXT)
        } else {
            Some(NO_RESULTS_TEXT)
        }
    }
}

/// Run the network part of a search.
///
/// An empty query lists the selected collection; with no collection
/// selected that is an empty result and no request at all. Otherwise the
/// query is searched, results are grouped by icon set in first-seen order
/// and each group is fetched in one batch. Icons the service cannot
/// deliver are dropped.
pub async fn run_search<S: IconSource + ?Sized>(
    source: &S,
    request: &SearchRequest,
) -> Result<Vec<IconDescriptor>, IconError> {
    if request.is_listing() {
        let Some(prefix) = request.collection.prefix() else {
            return Ok(Vec::new());
        };
        let names = source.list_collection_icons(prefix, request.limit).await?;
        let mut found = source.fetch_batch(prefix, &names).await?;
        return Ok(names.iter().filter_map(|n| found.remove(n)).collect());
    }

    let options = SearchOptions {
        prefix: request.collection.prefix().map(str::to_string),
        limit: request.limit,
    };
    let result = source.search(request.query.trim(), &options).await?;

    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for full in &result.icons {
        let Some((prefix, name)) = split_name(full) else {
            log::debug!("ignoring malformed icon name {full:?}");
            continue;
        };
        match groups.iter_mut().find(|(p, _)| p == prefix) {
            Some((_, names)) => names.push(name.to_string()),
            None => groups.push((prefix.to_string(), vec![name.to_string()])),
        }
    }

    let mut icons = Vec::with_capacity(result.icons.len());
    for (prefix, names) in &groups {
        let mut found = source.fetch_batch(prefix, names).await?;
        icons.extend(names.iter().filter_map(|n| found.remove(n)));
    }
    Ok(icons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn icon(name: &str) -> IconDescriptor {
        IconDescriptor {
            prefix: "mdi".into(),
            name: name.into(),
            width: 24.0,
            height: 24.0,
            body: String::new(),
        }
    }

    #[test]
    fn collection_filter_parsing() {
        assert_eq!(CollectionFilter::parse("ALL"), CollectionFilter::All);
        assert_eq!(
            CollectionFilter::parse(" mdi "),
            CollectionFilter::Prefix("mdi".into())
        );
        assert_eq!(CollectionFilter::Prefix("ph".into()).to_string(), "ph");
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut panel = SearchPanel::new(CollectionFilter::All, 60);
        panel.set_query("home");
        let first = panel.begin();
        panel.set_query("house");
        let second = panel.begin();

        assert!(!panel.finish(SearchOutcome {
            request: first,
            result: Ok(vec![icon("home")]),
        }));
        assert!(panel.loading);

        assert!(panel.finish(SearchOutcome {
            request: second,
            result: Ok(vec![icon("house")]),
        }));
        assert!(!panel.loading);
        assert_eq!(panel.icons, vec![icon("house")]);
    }

    #[test]
    fn failure_text_depends_on_query() {
        let mut panel = SearchPanel::new(CollectionFilter::Prefix("mdi".into()), 60);
        let req = panel.begin();
        panel.finish(SearchOutcome {
            request: req,
            result: Err(IconError::NotFound("x".into())),
        });
        assert_eq!(panel.error, Some(LOAD_FAILED));
        assert!(!panel.loading);

        panel.set_query("x");
        let req = panel.begin();
        assert_eq!(panel.error, None);
        panel.finish(SearchOutcome {
            request: req,
            result: Err(IconError::NotFound("x".into())),
        });
        assert_eq!(panel.error, Some(SEARCH_FAILED));
    }

    #[test]
    fn empty_state_text() {
        let mut panel = SearchPanel::new(CollectionFilter::All, 60);
        assert_eq!(panel.empty_text(), Some(PROMPT_TEXT));
        panel.set_query("zzz");
        assert_eq!(panel.empty_text(), Some(NO_RESULTS_TEXT));
        panel.set_query("");
        panel.set_collection(CollectionFilter::Prefix("mdi".into()));
        assert_eq!(panel.empty_text(), Some(NO_RESULTS_TEXT));
        panel.icons.push(icon("home"));
        assert_eq!(panel.empty_text(), None);
    }
}
