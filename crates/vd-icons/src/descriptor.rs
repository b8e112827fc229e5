//! Icon data and SVG rendering.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Default edge length of a rendered icon.
pub const DEFAULT_SIZE: u32 = 24;

/// Everything needed to render one icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconDescriptor {
    pub prefix: String,
    pub name: String,
    /// viewBox width.
    pub width: f32,
    /// viewBox height.
    pub height: f32,
    /// SVG inner markup, without the `<svg>` wrapper.
    pub body: String,
}

impl IconDescriptor {
    /// `prefix:name`, the form search results and node names use.
    pub fn full_name(&self) -> String {
        format!("{}:{}", self.prefix, self.name)
    }
}

/// Split `prefix:name`. `None` when there is no prefix.
pub fn split_name(full: &str) -> Option<(&str, &str)> {
    full.split_once(':')
        .filter(|(prefix, name)| !prefix.is_empty() && !name.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub size: u32,
    /// Replaces every `currentColor` in the body when set.
    pub color: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            color: None,
        }
    }
}

/// Wrap the icon body in a complete SVG document.
pub fn render_svg(icon: &IconDescriptor, options: &RenderOptions) -> String {
    let body = match options.color.as_deref() {
        Some(color) if !color.is_empty() => icon.body.replace("currentColor", color),
        _ => icon.body.clone(),
    };

    let mut out = String::with_capacity(body.len() + 128);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {w} {h}">"#,
        size = options.size,
        w = icon.width,
        h = icon.height,
    );
    out.push_str(&body);
    out.push_str("</svg>");
    out
}
