//! Integration tests: the JSON wire form both sides of the plugin rely on,
//! and the markup → scene graph import of a real icon.

use pretty_assertions::assert_eq;
use serde_json::json;
use vd_core::model::{NodeType, Paint, Rgb, SceneGraph, ShapeType};
use vd_core::protocol::{self, IconInsertSpec, PluginMessage, SelectionInfo, ShapeSpec, UiMessage};
use vd_core::import_svg;

fn wire<T: serde::Serialize>(message: &T) -> serde_json::Value {
    serde_json::from_str(&protocol::encode(message).unwrap()).unwrap()
}

// ─── UI → controller ─────────────────────────────────────────────────────

#[test]
fn create_shapes_wire_form() {
    let spec = ShapeSpec::new(ShapeType::Ellipse, 40.0, 30.0, Rgb::WHITE, 3, 8.0).unwrap();
    assert_eq!(
        wire(&UiMessage::CreateShapes(spec)),
        json!({
            "type": "CREATE_SHAPES",
            "payload": {
                "shapeType": "ellipse",
                "width": 40.0,
                "height": 30.0,
                "color": { "r": 1.0, "g": 1.0, "b": 1.0 },
                "count": 3,
                "spacing": 8.0
            }
        })
    );
}

#[test]
fn unit_messages_have_no_payload() {
    assert_eq!(wire(&UiMessage::Cancel), json!({ "type": "CANCEL" }));
    assert_eq!(wire(&UiMessage::GetSelection), json!({ "type": "GET_SELECTION" }));
}

#[test]
fn insert_icon_accepts_null_and_missing_color() {
    let with_null = r#"{"type":"INSERT_ICON","payload":{"svg":"<svg/>","name":"mdi:home","size":24,"color":null}}"#;
    let without = r#"{"pluginMessage":{"type":"INSERT_ICON","payload":{"svg":"<svg/>","name":"mdi:home","size":24}}}"#;
    let expected = UiMessage::InsertIcon(IconInsertSpec::new("<svg/>", "mdi:home", 24.0, None).unwrap());
    assert_eq!(protocol::decode_ui(with_null).unwrap(), expected);
    assert_eq!(protocol::decode_ui(without).unwrap(), expected);
}

#[test]
fn invalid_payloads_are_rejected_on_decode() {
    let zero_width = r#"{"type":"CREATE_SHAPES","payload":{"shapeType":"frame","width":0,"height":10,"color":{"r":0,"g":0,"b":0},"count":1,"spacing":0}}"#;
    assert!(protocol::decode_ui(zero_width).is_err());
    assert!(protocol::decode_ui(r#"{"type":"EXPLODE"}"#).is_err());
    assert!(protocol::decode_ui("not json").is_err());
}

// ─── controller → UI ─────────────────────────────────────────────────────

#[test]
fn replies_wire_form() {
    assert_eq!(
        wire(&PluginMessage::ShapesCreated { count: 2 }),
        json!({ "type": "SHAPES_CREATED", "payload": { "count": 2 } })
    );
    assert_eq!(
        wire(&PluginMessage::SelectionChanged(SelectionInfo::from_types([
            "RECTANGLE",
            "FRAME",
            "RECTANGLE",
        ]))),
        json!({
            "type": "SELECTION_CHANGED",
            "payload": { "count": 3, "types": ["RECTANGLE", "FRAME"] }
        })
    );
    let enveloped = protocol::encode_enveloped(&PluginMessage::error("boom")).unwrap();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&enveloped).unwrap(),
        json!({ "pluginMessage": { "type": "ERROR", "payload": { "message": "boom" } } })
    );
}

// ─── import ──────────────────────────────────────────────────────────────

#[test]
fn rendered_icon_imports_as_frame_of_vectors() {
    let markup = concat!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="48" viewBox="0 0 24 24">"#,
        r##"<g fill="none" stroke="#ff0000" stroke-width="2">"##,
        r#"<path d="M3 10l9-7l9 7v10H3z"/><path d="M9 22V12h6v10"/></g></svg>"#,
    );
    let mut graph = SceneGraph::new();
    let root = graph.root;
    let frame = import_svg(&mut graph, root, markup).unwrap();

    let node = &graph.graph[frame];
    assert_eq!(node.kind, NodeType::Frame);
    assert_eq!((node.width, node.height), (48.0, 48.0));

    let groups = graph.children(frame);
    assert_eq!(groups.len(), 1);
    assert_eq!(graph.graph[groups[0]].kind, NodeType::Group);

    let vectors = graph.children(groups[0]);
    assert_eq!(vectors.len(), 2);
    for idx in vectors {
        let vector = &graph.graph[idx];
        assert_eq!(vector.kind, NodeType::Vector);
        assert_eq!(vector.fills.as_deref(), Some(&[][..]));
        assert_eq!(
            vector.strokes.as_deref(),
            Some(&[Paint::solid(Rgb::from_bytes(255, 0, 0))][..])
        );
    }
}
