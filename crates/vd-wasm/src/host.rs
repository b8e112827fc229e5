//! [`Host`] over the plugin runtime's JavaScript API.
//!
//! The JS side passes in one object implementing the methods below. Node
//! ids travel as strings; paints, points and id lists as JSON. A thrown
//! exception becomes [`HostError::Rejected`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use vd_controller::{Host, HostError, PaintTree, PanelOptions};
use vd_core::layout::Point;
use vd_core::model::{Paints, ShapeType};
use vd_core::NodeId;
use vd_core::protocol::{self, PluginMessage};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// The host API object handed over by the plugin's JS entry point.
    pub type HostApi;

    #[wasm_bindgen(method, js_name = showUI)]
    fn show_ui(this: &HostApi, options_json: &str);
    #[wasm_bindgen(method, js_name = postMessage)]
    fn post_message(this: &HostApi, json: &str);
    #[wasm_bindgen(method)]
    fn notify(this: &HostApi, text: &str);
    #[wasm_bindgen(method, js_name = closePlugin)]
    fn close_plugin(this: &HostApi);

    #[wasm_bindgen(method, catch, js_name = createShape)]
    fn create_shape(this: &HostApi, node_type: &str) -> Result<String, JsValue>;
    #[wasm_bindgen(method, catch, js_name = createNodeFromSvg)]
    fn create_node_from_svg(this: &HostApi, svg: &str) -> Result<String, JsValue>;
    #[wasm_bindgen(method, catch, js_name = appendToPage)]
    fn append_to_page(this: &HostApi, id: &str) -> Result<(), JsValue>;
    #[wasm_bindgen(method, catch)]
    fn remove(this: &HostApi, id: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = nodeType)]
    fn node_type(this: &HostApi, id: &str) -> Result<String, JsValue>;
    #[wasm_bindgen(method, catch)]
    fn width(this: &HostApi, id: &str) -> Result<f64, JsValue>;
    #[wasm_bindgen(method, catch)]
    fn height(this: &HostApi, id: &str) -> Result<f64, JsValue>;
    #[wasm_bindgen(method, catch, js_name = setName)]
    fn set_name(this: &HostApi, id: &str, name: &str) -> Result<(), JsValue>;
    #[wasm_bindgen(method, catch, js_name = setPosition)]
    fn set_position(this: &HostApi, id: &str, x: f64, y: f64) -> Result<(), JsValue>;
    #[wasm_bindgen(method, catch)]
    fn resize(this: &HostApi, id: &str, width: f64, height: f64) -> Result<(), JsValue>;

    /// JSON paint list, `undefined` when the node has no fills.
    #[wasm_bindgen(method, catch)]
    fn fills(this: &HostApi, id: &str) -> Result<Option<String>, JsValue>;
    #[wasm_bindgen(method, catch, js_name = setFills)]
    fn set_fills(this: &HostApi, id: &str, json: &str) -> Result<(), JsValue>;
    #[wasm_bindgen(method, catch)]
    fn strokes(this: &HostApi, id: &str) -> Result<Option<String>, JsValue>;
    #[wasm_bindgen(method, catch, js_name = setStrokes)]
    fn set_strokes(this: &HostApi, id: &str, json: &str) -> Result<(), JsValue>;
    /// JSON id list, `undefined` when the node cannot have children.
    #[wasm_bindgen(method, catch)]
    fn children(this: &HostApi, id: &str) -> Result<Option<String>, JsValue>;

    #[wasm_bindgen(method, catch, js_name = viewportCenter)]
    fn viewport_center(this: &HostApi) -> Result<String, JsValue>;
    #[wasm_bindgen(method, catch)]
    fn selection(this: &HostApi) -> Result<String, JsValue>;
    #[wasm_bindgen(method, catch, js_name = setSelection)]
    fn set_selection(this: &HostApi, ids_json: &str) -> Result<(), JsValue>;
    #[wasm_bindgen(method, js_name = scrollAndZoomIntoView)]
    fn scroll_and_zoom_into_view(this: &HostApi, ids_json: &str);
}

fn js_message(e: &JsValue) -> String {
    e.as_string()
        .or_else(|| {
            e.dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{e:?}"))
}

fn rejected(e: JsValue) -> HostError {
    HostError::Rejected(js_message(&e))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, HostError> {
    serde_json::to_string(value).map_err(|e| HostError::Rejected(e.to_string()))
}

fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, HostError> {
    serde_json::from_str(json).map_err(|e| HostError::Rejected(format!("bad host data: {e}")))
}

pub struct JsHost {
    api: HostApi,
}

impl JsHost {
    pub fn new(api: HostApi) -> Self {
        Self { api }
    }
}

impl PaintTree for JsHost {
    fn fills(&self, id: NodeId) -> Result<Option<Paints>, HostError> {
        let json = self.api.fills(id.as_str()).map_err(rejected)?;
        json.as_deref().map(from_json).transpose()
    }

    fn set_fills(&mut self, id: NodeId, paints: Paints) -> Result<(), HostError> {
        self.api
            .set_fills(id.as_str(), &to_json(&paints)?)
            .map_err(rejected)
    }

    fn strokes(&self, id: NodeId) -> Result<Option<Paints>, HostError> {
        let json = self.api.strokes(id.as_str()).map_err(rejected)?;
        json.as_deref().map(from_json).transpose()
    }

    fn set_strokes(&mut self, id: NodeId, paints: Paints) -> Result<(), HostError> {
        self.api
            .set_strokes(id.as_str(), &to_json(&paints)?)
            .map_err(rejected)
    }

    fn children(&self, id: NodeId) -> Result<Option<Vec<NodeId>>, HostError> {
        let json = self.api.children(id.as_str()).map_err(rejected)?;
        json.as_deref().map(from_json).transpose()
    }
}

impl Host for JsHost {
    fn show_ui(&mut self, options: PanelOptions) {
        match to_json(&options) {
            Ok(json) => self.api.show_ui(&json),
            Err(e) => log::error!("could not encode panel options: {e}"),
        }
    }

    fn post_message(&mut self, message: &PluginMessage) {
        match protocol::encode(message) {
            Ok(json) => self.api.post_message(&json),
            Err(e) => log::error!("could not encode reply: {e}"),
        }
    }

    fn notify(&mut self, text: &str) {
        self.api.notify(text);
    }

    fn close_plugin(&mut self) {
        self.api.close_plugin();
    }

    fn create_shape(&mut self, shape: ShapeType) -> Result<NodeId, HostError> {
        let id = self
            .api
            .create_shape(shape.node_type().as_str())
            .map_err(rejected)?;
        Ok(NodeId::intern(&id))
    }

    fn create_node_from_svg(&mut self, svg: &str) -> Result<NodeId, HostError> {
        let id = self
            .api
            .create_node_from_svg(svg)
            .map_err(|e| HostError::Import(js_message(&e)))?;
        Ok(NodeId::intern(&id))
    }

    fn append_to_page(&mut self, id: NodeId) -> Result<(), HostError> {
        self.api.append_to_page(id.as_str()).map_err(rejected)
    }

    fn remove(&mut self, id: NodeId) -> Result<(), HostError> {
        self.api.remove(id.as_str()).map_err(rejected)
    }

    fn type_name(&self, id: NodeId) -> Result<String, HostError> {
        self.api.node_type(id.as_str()).map_err(rejected)
    }

    fn size(&self, id: NodeId) -> Result<(f32, f32), HostError> {
        let w = self.api.width(id.as_str()).map_err(rejected)?;
        let h = self.api.height(id.as_str()).map_err(rejected)?;
        Ok((w as f32, h as f32))
    }

    fn set_name(&mut self, id: NodeId, name: &str) -> Result<(), HostError> {
        self.api.set_name(id.as_str(), name).map_err(rejected)
    }

    fn set_position(&mut self, id: NodeId, at: Point) -> Result<(), HostError> {
        self.api
            .set_position(id.as_str(), at.x as f64, at.y as f64)
            .map_err(rejected)
    }

    fn resize(&mut self, id: NodeId, width: f32, height: f32) -> Result<(), HostError> {
        self.api
            .resize(id.as_str(), width as f64, height as f64)
            .map_err(rejected)
    }

    fn viewport_center(&self) -> Result<Point, HostError> {
        from_json(&self.api.viewport_center().map_err(rejected)?)
    }

    fn selection(&self) -> Result<Vec<NodeId>, HostError> {
        from_json(&self.api.selection().map_err(rejected)?)
    }

    fn set_selection(&mut self, ids: &[NodeId]) -> Result<(), HostError> {
        self.api
            .set_selection(&to_json(ids)?)
            .map_err(rejected)
    }

    fn scroll_and_zoom_into_view(&mut self, ids: &[NodeId]) {
        match to_json(ids) {
            Ok(json) => self.api.scroll_and_zoom_into_view(&json),
            Err(e) => log::warn!("could not encode ids: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vd_core::model::{Paint, Rgb};

    const HOST_FILLS: &str = r#"[
        {"type":"SOLID","visible":false,"opacity":0.5,"blendMode":"MULTIPLY","color":{"r":0,"g":0,"b":0}},
        {"type":"GRADIENT_LINEAR","visible":true,"opacity":1,"blendMode":"NORMAL",
         "gradientTransform":[[1,0,0],[0,1,0]],
         "gradientStops":[{"color":{"r":1,"g":0,"b":0,"a":1},"position":0},{"color":{"r":0,"g":0,"b":1,"a":1},"position":1}]},
        {"type":"GRADIENT_ANGULAR","gradientTransform":[[0,1,0],[-1,0,1]],"gradientStops":[]},
        {"type":"IMAGE","scaleMode":"FILL","imageHash":"f00d","filters":{"exposure":0.2}}
    ]"#;

    #[test]
    fn recolored_host_paints_keep_every_field() {
        let fills: Paints = from_json(HOST_FILLS).unwrap();
        assert_eq!(fills.len(), 4);
        assert!(fills[0].is_solid());

        let (recolored, changed) = vd_controller::recolor_paints(&fills, Rgb::WHITE);
        assert_eq!(changed, 1);

        let sent: serde_json::Value = serde_json::from_str(&to_json(&recolored).unwrap()).unwrap();
        let mut expected: serde_json::Value = serde_json::from_str(HOST_FILLS).unwrap();
        expected[0]["color"] = serde_json::json!({ "r": 1.0, "g": 1.0, "b": 1.0 });
        assert_eq!(sent, expected);
    }

    #[test]
    fn bad_host_data_is_rejected() {
        let err = from_json::<Vec<NodeId>>("{not json").unwrap_err();
        assert!(matches!(err, HostError::Rejected(m) if m.starts_with("bad host data")));
        assert!(from_json::<Point>(r#"{"x":1}"#).is_err());
        assert_eq!(
            from_json::<Paints>("[]").unwrap().into_vec(),
            Vec::<Paint>::new()
        );
    }
}
