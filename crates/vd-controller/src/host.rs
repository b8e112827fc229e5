//! The host boundary.
//!
//! The controller never touches a document directly; everything goes
//! through [`Host`], the narrow slice of the design tool's plugin API the
//! plugin needs. [`MemoryHost`] implements it over an in-memory page so the
//! controller can run headless.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vd_core::layout::{Bounds, Point};
use vd_core::model::{Paints, SceneGraph, SceneNode, ShapeType};
use vd_core::protocol::PluginMessage;
use vd_core::{NodeId, NodeIndex, import_svg};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),
    #[error("node {id} has no {capability}")]
    Unsupported {
        id: NodeId,
        capability: &'static str,
    },
    #[error("could not import SVG: {0}")]
    Import(String),
    #[error("{0}")]
    Rejected(String),
}

/// How the host should present the UI panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelOptions {
    pub width: u32,
    pub height: u32,
    /// Follow the host's light/dark theme.
    pub theme_colors: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            width: 320,
            height: 480,
            theme_colors: true,
        }
    }
}

/// Paint access keyed on node capabilities.
///
/// Each accessor returns `Ok(None)` when the node does not expose that
/// capability (a group has no fills, a vector has no children).
pub trait PaintTree {
    fn fills(&self, id: NodeId) -> Result<Option<Paints>, HostError>;
    fn set_fills(&mut self, id: NodeId, paints: Paints) -> Result<(), HostError>;
    fn strokes(&self, id: NodeId) -> Result<Option<Paints>, HostError>;
    fn set_strokes(&mut self, id: NodeId, paints: Paints) -> Result<(), HostError>;
    fn children(&self, id: NodeId) -> Result<Option<Vec<NodeId>>, HostError>;
}

/// The host application's plugin API.
pub trait Host: PaintTree {
    // ── UI channel ──
    fn show_ui(&mut self, options: PanelOptions);
    fn post_message(&mut self, message: &PluginMessage);
    /// Transient toast shown by the host.
    fn notify(&mut self, text: &str);
    fn close_plugin(&mut self);

    // ── Node creation ──
    fn create_shape(&mut self, shape: ShapeType) -> Result<NodeId, HostError>;
    fn create_node_from_svg(&mut self, svg: &str) -> Result<NodeId, HostError>;
    fn append_to_page(&mut self, id: NodeId) -> Result<(), HostError>;
    fn remove(&mut self, id: NodeId) -> Result<(), HostError>;

    // ── Node properties ──
    fn type_name(&self, id: NodeId) -> Result<String, HostError>;
    fn size(&self, id: NodeId) -> Result<(f32, f32), HostError>;
    fn set_name(&mut self, id: NodeId, name: &str) -> Result<(), HostError>;
    fn set_position(&mut self, id: NodeId, at: Point) -> Result<(), HostError>;
    fn resize(&mut self, id: NodeId, width: f32, height: f32) -> Result<(), HostError>;

    // ── Viewport & selection ──
    fn viewport_center(&self) -> Result<Point, HostError>;
    fn selection(&self) -> Result<Vec<NodeId>, HostError>;
    fn set_selection(&mut self, ids: &[NodeId]) -> Result<(), HostError>;
    fn scroll_and_zoom_into_view(&mut self, ids: &[NodeId]);
}

// ─── In-memory host ──────────────────────────────────────────────────────

/// A headless host backed by a [`SceneGraph`] page.
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub scene: SceneGraph,
    pub center: Point,
    /// Panel options from the last `show_ui`, `None` until shown.
    pub ui: Option<PanelOptions>,
    /// Messages posted to the UI, oldest first.
    pub outbox: Vec<PluginMessage>,
    pub toasts: Vec<String>,
    pub closed: bool,
    /// Number of shapes that may still be created before `create_shape`
    /// starts failing. `None` disables the fault.
    pub shape_budget: Option<usize>,
    /// Makes `selection` fail while set.
    pub selection_unavailable: bool,
    selection: Vec<NodeId>,
    selection_changed: bool,
}

impl MemoryHost {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            ..Self::default()
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.scene.get_by_id(id)
    }

    /// Ids of the page's top-level nodes.
    pub fn page_nodes(&self) -> Vec<NodeId> {
        self.scene
            .children(self.scene.root)
            .into_iter()
            .map(|idx| self.scene.graph[idx].id)
            .collect()
    }

    /// Drain posted messages.
    pub fn take_messages(&mut self) -> Vec<PluginMessage> {
        std::mem::take(&mut self.outbox)
    }

    /// Whether the selection changed since the last call.
    pub fn take_selection_changed(&mut self) -> bool {
        std::mem::take(&mut self.selection_changed)
    }

    fn index(&self, id: NodeId) -> Result<NodeIndex, HostError> {
        self.scene.index_of(id).ok_or(HostError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, HostError> {
        self.scene
            .get_by_id_mut(id)
            .ok_or(HostError::NodeNotFound(id))
    }
}

impl PaintTree for MemoryHost {
    fn fills(&self, id: NodeId) -> Result<Option<Paints>, HostError> {
        let node = self.node(id).ok_or(HostError::NodeNotFound(id))?;
        Ok(node.fills.clone())
    }

    fn set_fills(&mut self, id: NodeId, paints: Paints) -> Result<(), HostError> {
        let node = self.node_mut(id)?;
        match node.fills.as_mut() {
            Some(fills) => {
                *fills = paints;
                Ok(())
            }
            None => Err(HostError::Unsupported {
                id,
                capability: "fills",
            }),
        }
    }

    fn strokes(&self, id: NodeId) -> Result<Option<Paints>, HostError> {
        let node = self.node(id).ok_or(HostError::NodeNotFound(id))?;
        Ok(node.strokes.clone())
    }

    fn set_strokes(&mut self, id: NodeId, paints: Paints) -> Result<(), HostError> {
        let node = self.node_mut(id)?;
        match node.strokes.as_mut() {
            Some(strokes) => {
                *strokes = paints;
                Ok(())
            }
            None => Err(HostError::Unsupported {
                id,
                capability: "strokes",
            }),
        }
    }

    fn children(&self, id: NodeId) -> Result<Option<Vec<NodeId>>, HostError> {
        let idx = self.index(id)?;
        if !self.scene.graph[idx].kind.has_children() {
            return Ok(None);
        }
        Ok(Some(
            self.scene
                .children(idx)
                .into_iter()
                .map(|c| self.scene.graph[c].id)
                .collect(),
        ))
    }
}

impl Host for MemoryHost {
    fn show_ui(&mut self, options: PanelOptions) {
        self.ui = Some(options);
    }

    fn post_message(&mut self, message: &PluginMessage) {
        self.outbox.push(message.clone());
    }

    fn notify(&mut self, text: &str) {
        log::info!("toast: {text}");
        self.toasts.push(text.to_string());
    }

    fn close_plugin(&mut self) {
        self.closed = true;
    }

    fn create_shape(&mut self, shape: ShapeType) -> Result<NodeId, HostError> {
        if let Some(budget) = self.shape_budget.as_mut() {
            if *budget == 0 {
                return Err(HostError::Rejected(format!(
                    "cannot create {shape:?}: document is read-only"
                )));
            }
            *budget -= 1;
        }
        let node = SceneNode::create(shape.node_type());
        let id = node.id;
        let root = self.scene.root;
        self.scene.add_node(root, node);
        Ok(id)
    }

    fn create_node_from_svg(&mut self, svg: &str) -> Result<NodeId, HostError> {
        let root = self.scene.root;
        let idx = import_svg(&mut self.scene, root, svg)
            .map_err(|e| HostError::Import(e.to_string()))?;
        Ok(self.scene.graph[idx].id)
    }

    fn append_to_page(&mut self, id: NodeId) -> Result<(), HostError> {
        let idx = self.index(id)?;
        let root = self.scene.root;
        if self.scene.parent(idx) != Some(root) {
            self.scene.reparent_node(idx, root);
        }
        Ok(())
    }

    fn remove(&mut self, id: NodeId) -> Result<(), HostError> {
        let idx = self.index(id)?;
        self.scene.remove_subtree(idx);
        self.selection.retain(|s| self.scene.index_of(*s).is_some());
        Ok(())
    }

    fn type_name(&self, id: NodeId) -> Result<String, HostError> {
        let node = self.node(id).ok_or(HostError::NodeNotFound(id))?;
        Ok(node.kind.as_str().to_string())
    }

    fn size(&self, id: NodeId) -> Result<(f32, f32), HostError> {
        let node = self.node(id).ok_or(HostError::NodeNotFound(id))?;
        Ok((node.width, node.height))
    }

    fn set_name(&mut self, id: NodeId, name: &str) -> Result<(), HostError> {
        self.node_mut(id)?.name = name.to_string();
        Ok(())
    }

    fn set_position(&mut self, id: NodeId, at: Point) -> Result<(), HostError> {
        let idx = self.index(id)?;
        self.scene.move_to(idx, at.x, at.y);
        Ok(())
    }

    fn resize(&mut self, id: NodeId, width: f32, height: f32) -> Result<(), HostError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(HostError::Rejected(format!(
                "invalid size {width}×{height}"
            )));
        }
        let idx = self.index(id)?;
        self.scene.resize(idx, width, height);
        Ok(())
    }

    fn viewport_center(&self) -> Result<Point, HostError> {
        Ok(self.center)
    }

    fn selection(&self) -> Result<Vec<NodeId>, HostError> {
        if self.selection_unavailable {
            return Err(HostError::Rejected("selection is unavailable".into()));
        }
        Ok(self.selection.clone())
    }

    fn set_selection(&mut self, ids: &[NodeId]) -> Result<(), HostError> {
        for id in ids {
            self.index(*id)?;
        }
        self.selection = ids.to_vec();
        self.selection_changed = true;
        Ok(())
    }

    fn scroll_and_zoom_into_view(&mut self, ids: &[NodeId]) {
        let boxes: Vec<Bounds> = ids
            .iter()
            .filter_map(|id| self.node(*id))
            .map(SceneNode::bounds)
            .collect();
        if let Some(b) = Bounds::enclosing(&boxes) {
            self.center = b.center();
        }
    }
}
