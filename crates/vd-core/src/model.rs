//! Paint model and the in-memory scene graph.
//!
//! The scene graph mirrors the subset of a host document the plugin
//! touches: a page with shapes, frames, groups and vectors. Each node
//! kind exposes an optional set of capabilities (fills, strokes,
//! children) instead of a fixed field layout, which is what the recolor
//! walk keys on.

use crate::id::NodeId;
use crate::layout::Bounds;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::collections::HashMap;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGB color, each channel in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    /// What the UI panel substitutes for unparseable hex. The controller
    /// falls back to black instead.
    pub const UI_FALLBACK: Rgb = Rgb::new(0.4, 0.4, 0.9);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the `#` is optional, digits are case-insensitive).
    /// Each channel is `byte / 255`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        if bytes.len() != 6 {
            return None;
        }
        let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
        let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
        let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
        Some(Self::from_bytes(r, g, b))
    }

    /// Parse a hex color, substituting `fallback` when the input is invalid.
    pub fn from_hex_or(hex: &str, fallback: Rgb) -> Self {
        Self::from_hex(hex).unwrap_or(fallback)
    }

    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

// ─── Paint ───────────────────────────────────────────────────────────────

/// Fields of a host paint the plugin does not interpret.
pub type HostFields = serde_json::Map<String, serde_json::Value>;

/// Transform the host assigns to a gradient it did not lay out itself.
const IDENTITY_TRANSFORM: [[f32; 3]; 2] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

/// A gradient stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f32, // 0.0 .. 1.0
    pub color: Rgb,
    pub alpha: f32,
}

/// One entry of a node's fill or stroke list.
///
/// Only solid paints are interpreted. On the wire every other paint is
/// kept as [`Paint::Host`], exactly as the host sent it, and host fields
/// of a solid paint (`visible`, `blendMode`, ...) ride along in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid {
        color: Rgb,
        opacity: f32,
        extra: HostFields,
    },
    /// Built by the SVG importer.
    GradientLinear { stops: Vec<GradientStop> },
    /// Built by the SVG importer.
    GradientRadial { stops: Vec<GradientStop> },
    /// A non-solid paint as received from the host.
    Host(HostFields),
}

impl Paint {
    pub fn solid(color: Rgb) -> Self {
        Self::solid_with_opacity(color, 1.0)
    }

    pub fn solid_with_opacity(color: Rgb, opacity: f32) -> Self {
        Paint::Solid {
            color,
            opacity,
            extra: HostFields::new(),
        }
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, Paint::Solid { .. })
    }

    /// The host `type` tag.
    pub fn kind(&self) -> &str {
        match self {
            Paint::Solid { .. } => "SOLID",
            Paint::GradientLinear { .. } => "GRADIENT_LINEAR",
            Paint::GradientRadial { .. } => "GRADIENT_RADIAL",
            Paint::Host(fields) => fields
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("UNKNOWN"),
        }
    }

    /// Replace the color of a solid paint, keeping everything else.
    /// Other paints come back unchanged.
    pub fn recolored(&self, color: Rgb) -> Paint {
        match self {
            Paint::Solid { opacity, extra, .. } => Paint::Solid {
                color,
                opacity: *opacity,
                extra: extra.clone(),
            },
            other => other.clone(),
        }
    }

    /// Interpret a host paint object. Anything that is not a well-formed
    /// solid paint is kept verbatim.
    pub fn from_host(mut fields: HostFields) -> Self {
        if fields.get("type").and_then(serde_json::Value::as_str) != Some("SOLID") {
            return Paint::Host(fields);
        }
        let Some(color) = fields
            .get("color")
            .and_then(|c| Rgb::deserialize(c).ok())
        else {
            return Paint::Host(fields);
        };
        let opacity = match fields.get("opacity") {
            None => 1.0,
            Some(v) => match v.as_f64() {
                Some(o) => o as f32,
                None => return Paint::Host(fields),
            },
        };
        for key in ["type", "color", "opacity"] {
            fields.remove(key);
        }
        Paint::Solid {
            color,
            opacity,
            extra: fields,
        }
    }
}

#[derive(Serialize)]
struct HostColor {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

#[derive(Serialize)]
struct HostStop {
    color: HostColor,
    position: f32,
}

fn host_stops(stops: &[GradientStop]) -> Vec<HostStop> {
    stops
        .iter()
        .map(|s| HostStop {
            color: HostColor {
                r: s.color.r,
                g: s.color.g,
                b: s.color.b,
                a: s.alpha,
            },
            position: s.position,
        })
        .collect()
}

impl Serialize for Paint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Paint::Solid {
                color,
                opacity,
                extra,
            } => {
                let mut map = serializer.serialize_map(Some(extra.len() + 3))?;
                map.serialize_entry("type", "SOLID")?;
                map.serialize_entry("color", color)?;
                map.serialize_entry("opacity", opacity)?;
                for (key, value) in extra {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Paint::GradientLinear { stops } | Paint::GradientRadial { stops } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", self.kind())?;
                map.serialize_entry("gradientTransform", &IDENTITY_TRANSFORM)?;
                map.serialize_entry("gradientStops", &host_stops(stops))?;
                map.end()
            }
            Paint::Host(fields) => fields.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Paint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        HostFields::deserialize(deserializer).map(Paint::from_host)
    }
}

/// Paint list of a node. Almost always zero or one entry.
pub type Paints = SmallVec<[Paint; 1]>;

// ─── Node kinds ──────────────────────────────────────────────────────────

/// Shapes the shape generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Rectangle,
    Ellipse,
    Frame,
}

impl ShapeType {
    pub fn node_type(self) -> NodeType {
        match self {
            ShapeType::Rectangle => NodeType::Rectangle,
            ShapeType::Ellipse => NodeType::Ellipse,
            ShapeType::Frame => NodeType::Frame,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Some(ShapeType::Rectangle),
            "ellipse" | "circle" => Some(ShapeType::Ellipse),
            "frame" => Some(ShapeType::Frame),
            _ => None,
        }
    }
}

/// Node kinds of the host document, as reported in selection snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Page,
    Frame,
    Group,
    Rectangle,
    Ellipse,
    Vector,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Page => "PAGE",
            NodeType::Frame => "FRAME",
            NodeType::Group => "GROUP",
            NodeType::Rectangle => "RECTANGLE",
            NodeType::Ellipse => "ELLIPSE",
            NodeType::Vector => "VECTOR",
        }
    }

    /// Whether nodes of this kind carry fill and stroke lists.
    pub fn has_paints(self) -> bool {
        !matches!(self, NodeType::Page | NodeType::Group)
    }

    /// Whether nodes of this kind can contain other nodes.
    pub fn has_children(self) -> bool {
        matches!(self, NodeType::Page | NodeType::Frame | NodeType::Group)
    }

    fn default_name(self) -> &'static str {
        match self {
            NodeType::Page => "Page 1",
            NodeType::Frame => "Frame",
            NodeType::Group => "Group",
            NodeType::Rectangle => "Rectangle",
            NodeType::Ellipse => "Ellipse",
            NodeType::Vector => "Vector",
        }
    }
}

// ─── Scene Graph Nodes ───────────────────────────────────────────────────

/// A single node in the scene graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeType,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// `None` when the kind has no fill capability.
    pub fills: Option<Paints>,
    /// `None` when the kind has no stroke capability.
    pub strokes: Option<Paints>,
}

impl SceneNode {
    pub fn new(id: NodeId, kind: NodeType) -> Self {
        let paints = kind.has_paints().then(SmallVec::new);
        Self {
            id,
            name: kind.default_name().to_string(),
            kind,
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            fills: paints.clone(),
            strokes: paints,
        }
    }

    /// Fresh node with a generated id.
    pub fn create(kind: NodeType) -> Self {
        let prefix = kind.as_str().to_ascii_lowercase();
        Self::new(NodeId::with_prefix(&prefix), kind)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

// ─── Scene Graph ─────────────────────────────────────────────────────────

/// A page of host nodes. Edges go from parent → child.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    pub graph: StableDiGraph<SceneNode, ()>,

    /// The page node.
    pub root: NodeIndex,

    /// Index from NodeId → NodeIndex for fast lookup.
    pub id_index: HashMap<NodeId, NodeIndex>,
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let page = SceneNode::new(NodeId::intern("0:1"), NodeType::Page);
        let page_id = page.id;
        let root = graph.add_node(page);

        let mut id_index = HashMap::new();
        id_index.insert(page_id, root);

        Self {
            graph,
            root,
            id_index,
        }
    }

    /// Add a node as a child of `parent`. Returns the new node's index.
    pub fn add_node(&mut self, parent: NodeIndex, node: SceneNode) -> NodeIndex {
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, ());
        self.id_index.insert(id, idx);
        idx
    }

    /// Remove a node and its whole subtree.
    pub fn remove_subtree(&mut self, idx: NodeIndex) {
        for child in self.children(idx) {
            self.remove_subtree(child);
        }
        if let Some(removed) = self.graph.remove_node(idx) {
            self.id_index.remove(&removed.id);
        }
    }

    pub fn get_by_id(&self, id: NodeId) -> Option<&SceneNode> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn get_by_id_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.id_index
            .get(&id)
            .copied()
            .map(|idx| &mut self.graph[idx])
    }

    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Reparent a node to a new parent.
    pub fn reparent_node(&mut self, child: NodeIndex, new_parent: NodeIndex) {
        if let Some(old_parent) = self.parent(child)
            && let Some(edge) = self.graph.find_edge(old_parent, child)
        {
            self.graph.remove_edge(edge);
        }
        self.graph.add_edge(new_parent, child, ());
    }

    /// Children sorted by `NodeIndex`: insertion order until a removal
    /// frees an index for reuse.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// All nodes below `idx` (excluding it), depth-first pre-order.
    pub fn descendants(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeIndex> = self.children(idx).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }

    /// Resize a node, scaling its descendants' geometry by the same factors.
    pub fn resize(&mut self, idx: NodeIndex, width: f32, height: f32) {
        let (old_w, old_h, origin_x, origin_y) = {
            let node = &self.graph[idx];
            (node.width, node.height, node.x, node.y)
        };
        let sx = if old_w > 0.0 { width / old_w } else { 1.0 };
        let sy = if old_h > 0.0 { height / old_h } else { 1.0 };

        for d in self.descendants(idx) {
            let node = &mut self.graph[d];
            node.x = origin_x + (node.x - origin_x) * sx;
            node.y = origin_y + (node.y - origin_y) * sy;
            node.width *= sx;
            node.height *= sy;
        }

        let node = &mut self.graph[idx];
        node.width = width;
        node.height = height;
    }

    /// Move a node so its top-left sits at `(x, y)`; descendants follow.
    pub fn move_to(&mut self, idx: NodeIndex, x: f32, y: f32) {
        let (dx, dy) = {
            let node = &self.graph[idx];
            (x - node.x, y - node.y)
        };
        for d in self.descendants(idx) {
            let node = &mut self.graph[d];
            node.x += dx;
            node.y += dy;
        }
        let node = &mut self.graph[idx];
        node.x = x;
        node.y = y;
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
