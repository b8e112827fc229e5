pub mod id;
pub mod import;
pub mod layout;
pub mod model;
pub mod protocol;
pub mod svg;

pub use id::NodeId;
pub use import::import_svg;
pub use layout::{Bounds, Point};
pub use model::*;
pub use protocol::{
    IconInsertSpec, PluginMessage, ProtocolError, SelectionInfo, ShapeSpec, SpecError, UiMessage,
};
pub use svg::{SvgError, parse_svg};

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
