//! WASM bridge for Vector Drop.
//!
//! The controller half runs inside the design tool's plugin sandbox: JS
//! constructs a [`PluginBridge`] with the host API object and forwards UI
//! messages and selection events to it. The UI half can use the standalone
//! helpers ([`render_icon_svg`], [`hex_to_rgb`]).

mod host;
mod logger;

pub use host::{HostApi, JsHost};

use vd_controller::{Controller, ControllerConfig};
use vd_core::model::Rgb;
use vd_icons::{IconDescriptor, RenderOptions, render_svg};
use wasm_bindgen::prelude::*;

/// The controller, driven from JS.
#[wasm_bindgen]
pub struct PluginBridge {
    controller: Controller<JsHost>,
}

#[wasm_bindgen]
impl PluginBridge {
    /// Take over the host API and show the UI panel.
    #[wasm_bindgen(constructor)]
    pub fn new(api: HostApi) -> Self {
        console_error_panic_hook_setup();
        logger::init(log::LevelFilter::Info);
        Self {
            controller: Controller::start(JsHost::new(api), ControllerConfig::default()),
        }
    }

    /// Handle a JSON message posted by the UI (bare or `{pluginMessage}`).
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&mut self, json: &str) {
        self.controller.handle_json(json);
    }

    /// Forward the host's `selectionchange` event.
    #[wasm_bindgen(js_name = selectionChanged)]
    pub fn selection_changed(&mut self) {
        self.controller.on_selection_change();
    }

    /// Raise log verbosity (`"debug"`, `"trace"`, ...). Unknown names are
    /// ignored.
    #[wasm_bindgen(js_name = setLogLevel)]
    pub fn set_log_level(&self, level: &str) {
        match level.parse() {
            Ok(level) => log::set_max_level(level),
            Err(_) => log::warn!("unknown log level {level:?}"),
        }
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Vector Drop WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone UI helpers ───────────────────────────────────────────────

/// Render an icon descriptor (JSON, as returned by the icon API client) to
/// a complete SVG document. An empty `color` keeps `currentColor`.
/// Returns JSON: `{"ok":true,"svg":"..."}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn render_icon_svg(descriptor_json: &str, size: u32, color: Option<String>) -> String {
    let icon: IconDescriptor = match serde_json::from_str(descriptor_json) {
        Ok(icon) => icon,
        Err(e) => return error_json(&format!("invalid icon: {e}")),
    };
    let svg = render_svg(
        &icon,
        &RenderOptions {
            size,
            color: color.filter(|c| !c.is_empty()),
        },
    );
    serde_json::json!({ "ok": true, "svg": svg }).to_string()
}

/// Convert a hex color the way the UI panel does. Invalid input yields
/// `{"r":0.4,"g":0.4,"b":0.9}`.
#[wasm_bindgen]
pub fn hex_to_rgb(hex: &str) -> String {
    let rgb = Rgb::from_hex_or(hex, Rgb::UI_FALLBACK);
    serde_json::to_string(&rgb).unwrap_or_else(|_| r#"{"r":0.4,"g":0.4,"b":0.9}"#.to_string())
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "ok": false, "error": message }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_conversion_uses_ui_fallback() {
        let rgb: Rgb = serde_json::from_str(&hex_to_rgb("not-a-color")).unwrap();
        assert_eq!(rgb, Rgb::UI_FALLBACK);
        let rgb: Rgb = serde_json::from_str(&hex_to_rgb("#ffffff")).unwrap();
        assert_eq!(rgb, Rgb::WHITE);
    }

    #[test]
    fn renders_descriptor_json() {
        let icon = r#"{"prefix":"mdi","name":"home","width":24,"height":24,"body":"<path fill=\"currentColor\"/>"}"#;
        let out: serde_json::Value =
            serde_json::from_str(&render_icon_svg(icon, 32, Some("#123456".into()))).unwrap();
        assert_eq!(out["ok"], true);
        let svg = out["svg"].as_str().unwrap();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="32""#));
        assert!(svg.contains("#123456"));

        let out: serde_json::Value =
            serde_json::from_str(&render_icon_svg(icon, 24, Some(String::new()))).unwrap();
        assert!(out["svg"].as_str().unwrap().contains("currentColor"));
    }

    #[test]
    fn bad_descriptor_is_reported() {
        let out: serde_json::Value =
            serde_json::from_str(&render_icon_svg("{}", 24, None)).unwrap();
        assert_eq!(out["ok"], false);
    }
}
