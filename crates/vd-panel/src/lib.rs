pub mod app;
pub mod config;
pub mod debounce;
pub mod driver;
pub mod search;
pub mod shape_form;

pub use app::IconPanel;
pub use config::PanelConfig;
pub use debounce::Debounce;
pub use driver::{Driver, PanelEvent, PanelUpdate};
pub use search::{CollectionFilter, SearchPanel, run_search};
pub use shape_form::{ShapeEdit, ShapeForm, hex_to_rgb};
