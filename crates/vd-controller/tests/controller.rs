use pretty_assertions::assert_eq;
use vd_controller::{Controller, ControllerConfig, Host, MemoryHost, PanelOptions};
use vd_core::layout::Point;
use vd_core::model::{GradientStop, NodeType, Paint, Rgb, ShapeType};
use vd_core::protocol::{self, IconInsertSpec, PluginMessage, SelectionInfo, ShapeSpec, UiMessage};

fn controller() -> Controller<MemoryHost> {
    Controller::start(
        MemoryHost::new(Point::new(400.0, 300.0)),
        ControllerConfig::default(),
    )
}

fn icon(svg: &str, name: &str, color: Option<&str>) -> IconInsertSpec {
    IconInsertSpec::new(svg, name, 24.0, color.map(str::to_string)).unwrap()
}

const STAR: &str = r##"<svg width="24" height="24" viewBox="0 0 24 24">
  <defs><linearGradient id="g"><stop offset="0" stop-color="#ff0000"/><stop offset="1" stop-color="#0000ff"/></linearGradient></defs>
  <g stroke="currentColor" fill="none">
    <path d="M12 2l3 7h7l-6 4 2 7-6-4-6 4 2-7-6-4h7z"/>
    <circle cx="12" cy="12" r="3" fill="#00ff00"/>
  </g>
  <rect x="0" y="20" width="24" height="4" fill="url(#g)"/>
</svg>"##;

#[test]
fn startup_shows_panel() {
    let c = controller();
    assert_eq!(
        c.host().ui,
        Some(PanelOptions {
            width: 320,
            height: 480,
            theme_colors: true,
        })
    );
}

#[test]
fn create_shapes_replies_and_toasts() {
    let mut c = controller();
    let spec = ShapeSpec::new(ShapeType::Frame, 100.0, 50.0, Rgb::WHITE, 1, 20.0).unwrap();
    c.handle(UiMessage::CreateShapes(spec));

    let host = c.host_mut();
    assert_eq!(
        host.take_messages(),
        vec![PluginMessage::ShapesCreated { count: 1 }]
    );
    assert_eq!(host.toasts, vec!["Created 1 shape(s)!"]);

    let node = host.node(host.page_nodes()[0]).unwrap();
    assert_eq!((node.x, node.y), (400.0, 300.0));
    assert_eq!(node.kind, NodeType::Frame);
}

#[test]
fn host_failure_becomes_single_error_and_session_survives() {
    let mut c = controller();
    c.host_mut().shape_budget = Some(0);
    let spec = ShapeSpec::new(ShapeType::Rectangle, 10.0, 10.0, Rgb::BLACK, 3, 0.0).unwrap();
    c.handle(UiMessage::CreateShapes(spec.clone()));

    let replies = c.host_mut().take_messages();
    assert_eq!(replies.len(), 1);
    assert!(matches!(replies[0], PluginMessage::Error { .. }));

    c.host_mut().shape_budget = None;
    c.handle(UiMessage::CreateShapes(spec));
    assert_eq!(
        c.host_mut().take_messages(),
        vec![PluginMessage::ShapesCreated { count: 3 }]
    );
}

#[test]
fn recolor_hits_every_solid_and_spares_gradients() {
    let mut c = controller();
    c.handle(UiMessage::InsertIcon(icon(STAR, "custom:star", Some("#6366f1"))));
    assert_eq!(
        c.host_mut().take_messages(),
        vec![PluginMessage::IconInserted {
            name: "custom:star".into()
        }]
    );

    let host = c.host();
    let target = Rgb::from_hex("#6366f1").unwrap();
    let root = host.scene.index_of(host.selection().unwrap()[0]).unwrap();
    let mut solids = 0;
    let mut gradients = 0;
    for idx in host.scene.descendants(root) {
        let node = &host.scene.graph[idx];
        for paint in node.fills.iter().chain(node.strokes.iter()).flatten() {
            match paint {
                Paint::Solid { color, .. } => {
                    assert_eq!(*color, target);
                    solids += 1;
                }
                Paint::GradientLinear { stops } => {
                    assert_eq!(
                        stops[0],
                        GradientStop {
                            position: 0.0,
                            color: Rgb::new(1.0, 0.0, 0.0),
                            alpha: 1.0,
                        }
                    );
                    gradients += 1;
                }
                other => panic!("unexpected paint {other:?}"),
            }
        }
    }
    // path stroke, circle fill + stroke
    assert_eq!(solids, 3);
    assert_eq!(gradients, 1);
}

#[test]
fn bad_hex_recolors_black() {
    let mut c = controller();
    let svg = r##"<svg viewBox="0 0 24 24"><path d="M0 0" fill="#ffffff"/></svg>"##;
    c.handle(UiMessage::InsertIcon(icon(svg, "x:y", Some("nope"))));

    let host = c.host();
    let root = host.scene.index_of(host.selection().unwrap()[0]).unwrap();
    let path = host.scene.children(root)[0];
    assert_eq!(
        host.scene.graph[path].fills.as_deref(),
        Some(&[Paint::solid(Rgb::BLACK)][..])
    );
}

#[test]
fn import_failure_is_generic() {
    let mut c = controller();
    c.handle(UiMessage::InsertIcon(icon("<svg><path></svg>", "bad:icon", None)));
    assert_eq!(
        c.host_mut().take_messages(),
        vec![PluginMessage::error("Failed to insert icon bad:icon")]
    );
}

#[test]
fn batch_skips_malformed_entries() {
    let mut c = controller();
    let mut specs: Vec<_> = (0..5)
        .map(|i| icon(STAR, &format!("custom:star-{i}"), None))
        .collect();
    specs[2] = icon("<svg", "custom:broken", None);
    c.handle(UiMessage::InsertIconsBatch(specs));

    let host = c.host_mut();
    assert_eq!(host.page_nodes().len(), 4);
    assert_eq!(host.selection().unwrap().len(), 4);
    assert_eq!(
        host.take_messages(),
        vec![PluginMessage::IconInserted {
            name: "custom:star-0, custom:star-1, custom:star-3, custom:star-4".into()
        }]
    );
}

#[test]
fn batch_with_nothing_inserted_is_an_error() {
    let mut c = controller();
    c.handle(UiMessage::InsertIconsBatch(vec![icon("junk", "a:b", None)]));
    assert_eq!(
        c.host_mut().take_messages(),
        vec![PluginMessage::error("Failed to insert icons")]
    );
}

#[test]
fn selection_snapshot_and_notifications() {
    let mut c = controller();
    c.handle(UiMessage::GetSelection);
    assert_eq!(
        c.host_mut().take_messages(),
        vec![PluginMessage::SelectionChanged(SelectionInfo::default())]
    );

    let spec = ShapeSpec::new(ShapeType::Ellipse, 10.0, 10.0, Rgb::BLACK, 2, 0.0).unwrap();
    c.handle(UiMessage::CreateShapes(spec));
    c.host_mut().take_messages();
    assert!(c.host_mut().take_selection_changed());

    c.on_selection_change();
    assert_eq!(
        c.host_mut().take_messages(),
        vec![PluginMessage::SelectionChanged(SelectionInfo {
            count: 2,
            types: vec!["ELLIPSE".into()],
        })]
    );
}

#[test]
fn unreadable_selection_is_an_error_not_an_empty_snapshot() {
    let mut c = controller();
    c.host_mut().selection_unavailable = true;
    c.handle(UiMessage::GetSelection);
    let replies = c.host_mut().take_messages();
    assert_eq!(replies.len(), 1);
    assert!(matches!(replies[0], PluginMessage::Error { .. }));

    c.on_selection_change();
    assert!(c.host_mut().take_messages().is_empty());
}

#[test]
fn json_entry_point() {
    let mut c = controller();
    c.handle_json(r#"{"pluginMessage":{"type":"CANCEL"}}"#);
    assert!(c.host().closed);
    assert!(c.host_mut().take_messages().is_empty());

    c.handle_json(r#"{"type":"CREATE_SHAPES","payload":{"shapeType":"rectangle"}}"#);
    let replies = c.host_mut().take_messages();
    assert!(matches!(replies.as_slice(), [PluginMessage::Error { .. }]));

    let json = protocol::encode(&UiMessage::GetSelection).unwrap();
    c.handle_json(&json);
    assert_eq!(c.host_mut().take_messages().len(), 1);
}
