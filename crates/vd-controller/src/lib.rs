pub mod controller;
pub mod host;
pub mod icons;
pub mod recolor;
pub mod shapes;

pub use controller::{Controller, ControllerConfig};
pub use host::{Host, HostError, MemoryHost, PaintTree, PanelOptions};
pub use icons::{BATCH_GAP, insert_batch, insert_icon};
pub use recolor::{recolor_paints, recolor_tree};
pub use shapes::create_shapes;
