//! Icon service client.
//!
//! Talks to the Iconify HTTP API to search icons, list icon sets and fetch
//! icon bodies, and renders fetched icons as standalone SVG documents.

#[cfg(feature = "client")]
pub mod client;
pub mod collections;
pub mod descriptor;
#[cfg(feature = "client")]
pub mod error;
#[cfg(feature = "client")]
pub mod source;

#[cfg(feature = "client")]
pub use client::{
    DEFAULT_API_BASE, DEFAULT_COLLECTION_LIMIT, DEFAULT_SEARCH_LIMIT, IconClient, SearchOptions,
    SearchResult,
};
pub use collections::{FEATURED_COLLECTIONS, FeaturedCollection, featured};
pub use descriptor::{DEFAULT_SIZE, IconDescriptor, RenderOptions, render_svg, split_name};
#[cfg(feature = "client")]
pub use error::IconError;
#[cfg(feature = "client")]
pub use source::IconSource;
