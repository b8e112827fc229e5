//! SVG markup → scene-graph nodes.
//!
//! Mirrors what a design host's SVG import produces: the `<svg>` root
//! becomes a FRAME, `<g>` becomes a GROUP and every drawable element
//! becomes a VECTOR carrying the resolved fill and stroke paints.

use crate::layout::Bounds;
use crate::model::{GradientStop, NodeType, Paint, Paints, Rgb, SceneGraph, SceneNode};
use crate::svg::{SvgElement, SvgError, parse_svg};
use petgraph::graph::NodeIndex;
use smallvec::smallvec;
use std::collections::HashMap;

const DEFAULT_EXTENT: f32 = 100.0;

const DRAWABLES: &[&str] = &[
    "path", "rect", "circle", "ellipse", "line", "polyline", "polygon",
];

/// A paint value as written in markup, before inheritance is applied.
#[derive(Debug, Clone, PartialEq)]
enum PaintAttr {
    None,
    Paint(Paint),
}

/// Inherited presentation state while walking the element tree.
#[derive(Debug, Clone, Default)]
struct Inherited {
    fill: Option<PaintAttr>,
    stroke: Option<PaintAttr>,
}

/// Parse `markup` and add the resulting tree under `parent`.
/// Returns the index of the new root frame.
pub fn import_svg(
    graph: &mut SceneGraph,
    parent: NodeIndex,
    markup: &str,
) -> Result<NodeIndex, SvgError> {
    let root = parse_svg(markup)?;

    let view_box = root.attr("viewBox").and_then(parse_view_box);
    let width = root
        .attr("width")
        .and_then(parse_length)
        .or(view_box.map(|v| v.width))
        .unwrap_or(DEFAULT_EXTENT);
    let height = root
        .attr("height")
        .and_then(parse_length)
        .or(view_box.map(|v| v.height))
        .unwrap_or(DEFAULT_EXTENT);
    let view_box = view_box.unwrap_or(Bounds {
        x: 0.0,
        y: 0.0,
        width,
        height,
    });

    let mut gradients = HashMap::new();
    collect_gradients(&root, &mut gradients);

    let mut frame = SceneNode::create(NodeType::Frame);
    frame.name = root.attr("id").unwrap_or("svg").to_string();
    frame.width = width;
    frame.height = height;
    let frame_idx = graph.add_node(parent, frame);

    let ctx = Importer {
        gradients: &gradients,
        scale: (
            width / view_box.width.max(f32::EPSILON),
            height / view_box.height.max(f32::EPSILON),
        ),
        view_box,
    };
    let inherited = ctx.inherit(&Inherited::default(), &root);
    for child in &root.children {
        ctx.import_element(graph, frame_idx, child, &inherited);
    }

    log::debug!(
        "imported svg: {} nodes under frame {}",
        graph.descendants(frame_idx).len(),
        graph.graph[frame_idx].id
    );
    Ok(frame_idx)
}

struct Importer<'a> {
    gradients: &'a HashMap<String, Paint>,
    view_box: Bounds,
    scale: (f32, f32),
}

impl Importer<'_> {
    fn import_element(
        &self,
        graph: &mut SceneGraph,
        parent: NodeIndex,
        el: &SvgElement,
        inherited: &Inherited,
    ) {
        let tag = el.tag.as_str();
        if tag == "g" {
            let state = self.inherit(inherited, el);
            let mut group = SceneNode::create(NodeType::Group);
            if let Some(id) = el.attr("id") {
                group.name = id.to_string();
            }
            let group_idx = graph.add_node(parent, group);
            for child in &el.children {
                self.import_element(graph, group_idx, child, &state);
            }
            self.fit_group(graph, group_idx);
        } else if DRAWABLES.contains(&tag) {
            let state = self.inherit(inherited, el);
            let mut vector = SceneNode::create(NodeType::Vector);
            if let Some(id) = el.attr("id") {
                vector.name = id.to_string();
            }
            let b = self.element_bounds(el);
            vector.x = b.x;
            vector.y = b.y;
            vector.width = b.width;
            vector.height = b.height;
            vector.fills = Some(match state.fill {
                Some(PaintAttr::None) => Paints::new(),
                Some(PaintAttr::Paint(p)) => smallvec![p],
                // SVG initial fill is black
                None => smallvec![Paint::solid(Rgb::BLACK)],
            });
            vector.strokes = Some(match state.stroke {
                Some(PaintAttr::Paint(p)) => smallvec![p],
                Some(PaintAttr::None) | None => Paints::new(),
            });
            graph.add_node(parent, vector);
        }
        // defs, gradients, title, desc, clipPath and friends are not drawn
    }

    fn inherit(&self, parent: &Inherited, el: &SvgElement) -> Inherited {
        let mut state = parent.clone();
        let style = el.attr("style").map(parse_style).unwrap_or_default();
        let lookup = |name: &str| {
            style
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
                .or_else(|| el.attr(name))
        };
        if let Some(fill) = lookup("fill").and_then(|v| self.paint_attr(v)) {
            state.fill = Some(fill);
        }
        if let Some(stroke) = lookup("stroke").and_then(|v| self.paint_attr(v)) {
            state.stroke = Some(stroke);
        }
        state
    }

    /// Resolve a `fill`/`stroke` value. `None` means "inherit".
    fn paint_attr(&self, value: &str) -> Option<PaintAttr> {
        let value = value.trim();
        match value {
            "" | "inherit" => None,
            "none" | "transparent" => Some(PaintAttr::None),
            // hosts import currentColor as black
            "currentColor" => Some(PaintAttr::Paint(Paint::solid(Rgb::BLACK))),
            v if v.starts_with("url(") => {
                let id = v
                    .trim_start_matches("url(")
                    .trim_end_matches(')')
                    .trim_start_matches('#');
                let paint = self
                    .gradients
                    .get(id)
                    .cloned()
                    .unwrap_or(Paint::GradientLinear { stops: Vec::new() });
                Some(PaintAttr::Paint(paint))
            }
            v => parse_color(v).map(|c| PaintAttr::Paint(Paint::solid(c))),
        }
    }

    /// Page-space bounds of a drawable, relative to the frame origin.
    fn element_bounds(&self, el: &SvgElement) -> Bounds {
        let num = |name: &str| el.attr(name).and_then(parse_length).unwrap_or(0.0);
        let local = match el.tag.as_str() {
            "rect" => Bounds {
                x: num("x"),
                y: num("y"),
                width: num("width"),
                height: num("height"),
            },
            "circle" => {
                let r = num("r");
                Bounds {
                    x: num("cx") - r,
                    y: num("cy") - r,
                    width: r * 2.0,
                    height: r * 2.0,
                }
            }
            "ellipse" => {
                let (rx, ry) = (num("rx"), num("ry"));
                Bounds {
                    x: num("cx") - rx,
                    y: num("cy") - ry,
                    width: rx * 2.0,
                    height: ry * 2.0,
                }
            }
            "line" => {
                let (x1, y1, x2, y2) = (num("x1"), num("y1"), num("x2"), num("y2"));
                Bounds {
                    x: x1.min(x2),
                    y: y1.min(y2),
                    width: (x2 - x1).abs(),
                    height: (y2 - y1).abs(),
                }
            }
            "polyline" | "polygon" => el
                .attr("points")
                .and_then(points_bounds)
                .unwrap_or(self.view_box),
            // path data is not interpreted; take the whole canvas
            _ => self.view_box,
        };
        Bounds {
            x: (local.x - self.view_box.x) * self.scale.0,
            y: (local.y - self.view_box.y) * self.scale.1,
            width: local.width * self.scale.0,
            height: local.height * self.scale.1,
        }
    }

    fn fit_group(&self, graph: &mut SceneGraph, group_idx: NodeIndex) {
        let boxes: Vec<Bounds> = graph
            .children(group_idx)
            .into_iter()
            .map(|c| graph.graph[c].bounds())
            .collect();
        if let Some(b) = Bounds::enclosing(&boxes) {
            let group = &mut graph.graph[group_idx];
            group.x = b.x;
            group.y = b.y;
            group.width = b.width;
            group.height = b.height;
        }
    }
}

fn collect_gradients(el: &SvgElement, out: &mut HashMap<String, Paint>) {
    let linear = el.tag == "linearGradient";
    if (linear || el.tag == "radialGradient")
        && let Some(id) = el.attr("id")
    {
        let stops = el
            .children
            .iter()
            .filter(|s| s.tag == "stop")
            .map(|s| {
                let style = s.attr("style").map(parse_style).unwrap_or_default();
                let prop = |name: &str| {
                    style
                        .iter()
                        .find(|(k, _)| k == name)
                        .map(|(_, v)| v.clone())
                        .or_else(|| s.attr(name).map(str::to_string))
                };
                GradientStop {
                    position: s.attr("offset").and_then(parse_offset).unwrap_or(0.0),
                    color: prop("stop-color")
                        .as_deref()
                        .and_then(parse_color)
                        .unwrap_or(Rgb::BLACK),
                    alpha: prop("stop-opacity")
                        .and_then(|v| v.trim().parse().ok())
                        .unwrap_or(1.0),
                }
            })
            .collect();
        let paint = if linear {
            Paint::GradientLinear { stops }
        } else {
            Paint::GradientRadial { stops }
        };
        out.insert(id.to_string(), paint);
    }
    for child in &el.children {
        collect_gradients(child, out);
    }
}

// ─── Attribute value parsing ────────────────────────────────────────────

/// `#rgb`, `#rrggbb`, and the two named colors icon sets actually use.
fn parse_color(value: &str) -> Option<Rgb> {
    let value = value.trim();
    match value {
        "black" => return Some(Rgb::BLACK),
        "white" => return Some(Rgb::WHITE),
        _ => {}
    }
    let hex = value.strip_prefix('#')?;
    match hex.len() {
        3 => {
            let b = hex.as_bytes();
            let d = |i: usize| crate::model::hex_val(b[i]).map(|v| v * 17);
            Some(Rgb::from_bytes(d(0)?, d(1)?, d(2)?))
        }
        6 => Rgb::from_hex(hex),
        _ => None,
    }
}

/// Leading number of a length (`24`, `24px`, `1.5em` → 1.5).
fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

fn parse_offset(value: &str) -> Option<f32> {
    let value = value.trim();
    match value.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().ok().map(|p| p / 100.0),
        None => value.parse().ok(),
    }
}

fn parse_numbers(value: &str) -> Vec<f32> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

fn parse_view_box(value: &str) -> Option<Bounds> {
    match parse_numbers(value).as_slice() {
        [x, y, w, h] if *w > 0.0 && *h > 0.0 => Some(Bounds {
            x: *x,
            y: *y,
            width: *w,
            height: *h,
        }),
        _ => None,
    }
}

fn points_bounds(value: &str) -> Option<Bounds> {
    let nums = parse_numbers(value);
    let boxes: Vec<Bounds> = nums
        .chunks_exact(2)
        .map(|p| Bounds {
            x: p[0],
            y: p[1],
            width: 0.0,
            height: 0.0,
        })
        .collect();
    Bounds::enclosing(&boxes)
}

/// `fill:red; stroke : none` → key/value pairs.
fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            Some((k.trim().to_string(), v.trim().to_string()))
        })
        .collect()
}
