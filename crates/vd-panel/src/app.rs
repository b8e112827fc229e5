//! Top-level panel state.

use crate::config::PanelConfig;
use crate::search::SearchPanel;
use crate::shape_form::ShapeForm;
use std::time::Duration;
use tokio::time::Instant;
use vd_core::protocol::{IconInsertSpec, PluginMessage, SelectionInfo, UiMessage};
use vd_icons::{RenderOptions, render_svg};

pub const MIN_ICON_SIZE: u32 = 16;
pub const MAX_ICON_SIZE: u32 = 128;
pub const DEFAULT_ICON_SIZE: u32 = 24;
pub const DEFAULT_COLOR: &str = "#000000";

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    text: String,
    until: Instant,
}

#[derive(Debug, Clone)]
pub struct IconPanel {
    pub search: SearchPanel,
    pub shapes: ShapeForm,
    size: u32,
    use_custom_color: bool,
    color: String,
    selection: SelectionInfo,
    last_error: Option<String>,
    toast: Option<Toast>,
    toast_duration: Duration,
}

impl IconPanel {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            search: SearchPanel::new(config.collection.clone(), config.result_limit),
            shapes: ShapeForm::default(),
            size: DEFAULT_ICON_SIZE,
            use_custom_color: false,
            color: DEFAULT_COLOR.to_string(),
            selection: SelectionInfo::default(),
            last_error: None,
            toast: None,
            toast_duration: config.toast,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Slider position, kept within 16..=128.
    pub fn set_size(&mut self, size: u32) {
        self.size = size.clamp(MIN_ICON_SIZE, MAX_ICON_SIZE);
    }

    /// Recolor target sent with inserts, `None` unless custom color is on.
    pub fn color(&self) -> Option<&str> {
        self.use_custom_color.then_some(self.color.as_str())
    }

    pub fn set_custom_color(&mut self, enabled: bool) {
        self.use_custom_color = enabled;
    }

    pub fn set_color(&mut self, hex: impl Into<String>) {
        self.color = hex.into();
    }

    pub fn selection(&self) -> &SelectionInfo {
        &self.selection
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Insert request for the `index`-th icon in the grid.
    pub fn insert_icon(&self, index: usize) -> Option<UiMessage> {
        let icon = self.search.icons.get(index)?;
        let color = self.color().map(str::to_string);
        let svg = render_svg(
            icon,
            &RenderOptions {
                size: self.size,
                color: color.clone(),
            },
        );
        Some(UiMessage::InsertIcon(IconInsertSpec {
            svg,
            name: icon.full_name(),
            size: self.size as f32,
            color,
        }))
    }

    pub fn close(&self) -> UiMessage {
        UiMessage::Cancel
    }

    /// Apply a controller reply.
    pub fn apply(&mut self, message: PluginMessage, now: Instant) {
        match message {
            PluginMessage::IconInserted { name } => {
                self.toast = Some(Toast {
                    text: name,
                    until: now + self.toast_duration,
                });
            }
            PluginMessage::ShapesCreated { .. } => {
                self.last_error = None;
                self.shapes.settle();
            }
            PluginMessage::SelectionChanged(info) => self.selection = info,
            PluginMessage::Error { message } => {
                self.last_error = Some(message);
                self.shapes.settle();
            }
        }
    }

    /// The toast text, if it has not expired yet.
    pub fn toast(&self, now: Instant) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|t| now < t.until)
            .map(|t| t.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vd_icons::IconDescriptor;

    fn panel_with_icon() -> IconPanel {
        let mut panel = IconPanel::new(&PanelConfig::default());
        panel.search.icons.push(IconDescriptor {
            prefix: "lucide".into(),
            name: "house".into(),
            width: 24.0,
            height: 24.0,
            body: r#"<path stroke="currentColor"/>"#.into(),
        });
        panel
    }

    #[test]
    fn size_is_clamped_to_slider_range() {
        let mut panel = IconPanel::new(&PanelConfig::default());
        assert_eq!(panel.size(), 24);
        panel.set_size(4);
        assert_eq!(panel.size(), 16);
        panel.set_size(1000);
        assert_eq!(panel.size(), 128);
    }

    #[test]
    fn insert_without_custom_color_keeps_current_color() {
        let panel = panel_with_icon();
        let Some(UiMessage::InsertIcon(spec)) = panel.insert_icon(0) else {
            panic!("expected an insert");
        };
        assert_eq!(spec.name, "lucide:house");
        assert_eq!(spec.size, 24.0);
        assert_eq!(spec.color, None);
        assert!(spec.svg.contains("currentColor"));
        assert_eq!(panel.insert_icon(1), None);
    }

    #[test]
    fn insert_with_custom_color() {
        let mut panel = panel_with_icon();
        panel.set_custom_color(true);
        panel.set_color("#ff00aa");
        panel.set_size(64);
        let Some(UiMessage::InsertIcon(spec)) = panel.insert_icon(0) else {
            panic!("expected an insert");
        };
        assert_eq!(spec.color.as_deref(), Some("#ff00aa"));
        assert!(spec.svg.contains(r##"stroke="#ff00aa""##));
        assert!(spec.svg.contains(r#"width="64""#));
        assert_eq!(panel.close(), UiMessage::Cancel);
    }

    #[test]
    fn replies_update_state() {
        let mut panel = IconPanel::new(&PanelConfig::default());
        let now = Instant::now();

        panel.apply(
            PluginMessage::IconInserted {
                name: "mdi:home".into(),
            },
            now,
        );
        assert_eq!(panel.toast(now + Duration::from_millis(1999)), Some("mdi:home"));
        assert_eq!(panel.toast(now + Duration::from_secs(2)), None);

        panel.shapes.submit();
        panel.apply(PluginMessage::error("nope"), now);
        assert!(panel.shapes.can_submit());
        assert_eq!(panel.last_error(), Some("nope"));

        panel.apply(
            PluginMessage::SelectionChanged(SelectionInfo {
                count: 1,
                types: vec!["FRAME".into()],
            }),
            now,
        );
        assert_eq!(panel.selection().count, 1);
    }
}
