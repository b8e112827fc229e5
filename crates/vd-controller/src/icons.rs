//! Icon insertion, single and batched.

use crate::host::{Host, HostError};
use crate::recolor::recolor_tree;
use vd_core::NodeId;
use vd_core::layout::{centered_origin, strip_positions};
use vd_core::model::Rgb;
use vd_core::protocol::IconInsertSpec;

/// Horizontal gap between icons placed by one batch.
pub const BATCH_GAP: f32 = 16.0;

/// Color used when a recolor target is not valid hex.
pub const FALLBACK_COLOR: Rgb = Rgb::BLACK;

/// Rename an imported icon, fit it to a `size × size` square and
/// optionally recolor it. Returns the final size.
fn fit_icon<H: Host + ?Sized>(
    host: &mut H,
    id: NodeId,
    spec: &IconInsertSpec,
) -> Result<(f32, f32), HostError> {
    host.set_name(id, &spec.name)?;
    host.resize(id, spec.size, spec.size)?;
    if let Some(hex) = spec.color.as_deref() {
        recolor_tree(host, id, Rgb::from_hex_or(hex, FALLBACK_COLOR))?;
    }
    host.size(id)
}

/// Insert one icon centred on the viewport, select it and bring it into
/// view.
pub fn insert_icon<H: Host + ?Sized>(
    host: &mut H,
    spec: &IconInsertSpec,
) -> Result<NodeId, HostError> {
    let id = host.create_node_from_svg(&spec.svg)?;
    let (w, h) = fit_icon(host, id, spec)?;
    let center = host.viewport_center()?;
    host.set_position(id, centered_origin(center, w, h))?;
    host.append_to_page(id)?;
    host.set_selection(&[id])?;
    host.scroll_and_zoom_into_view(&[id]);
    Ok(id)
}

/// One icon placed by [`insert_batch`].
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub id: NodeId,
    pub name: String,
}

/// Insert every spec independently and lay the successes out as a row
/// centred on the viewport, `gap` apart.
///
/// A failing entry is logged and skipped; whatever it already created is
/// removed. Only the placed icons end up selected.
pub fn insert_batch<H: Host + ?Sized>(
    host: &mut H,
    specs: &[IconInsertSpec],
    gap: f32,
) -> Result<Vec<Placed>, HostError> {
    let mut placed = Vec::with_capacity(specs.len());
    let mut sizes = Vec::with_capacity(specs.len());

    for spec in specs {
        let id = match host.create_node_from_svg(&spec.svg) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("skipping icon {}: {e}", spec.name);
                continue;
            }
        };
        match fit_icon(host, id, spec) {
            Ok(size) => {
                sizes.push(size);
                placed.push(Placed {
                    id,
                    name: spec.name.clone(),
                });
            }
            Err(e) => {
                log::warn!("skipping icon {}: {e}", spec.name);
                if let Err(e) = host.remove(id) {
                    log::warn!("could not remove partial icon {}: {e}", spec.name);
                }
            }
        }
    }

    if placed.is_empty() {
        return Ok(placed);
    }

    let center = host.viewport_center()?;
    for (p, origin) in placed.iter().zip(strip_positions(center, &sizes, gap)) {
        host.set_position(p.id, origin)?;
        host.append_to_page(p.id)?;
    }

    let ids: Vec<NodeId> = placed.iter().map(|p| p.id).collect();
    host.set_selection(&ids)?;
    host.scroll_and_zoom_into_view(&ids);
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use pretty_assertions::assert_eq;
    use vd_core::layout::Point;

    const HOUSE: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24"><path d="M3 10l9-7 9 7" stroke="currentColor" fill="none"/></svg>"#;

    fn spec(svg: &str, name: &str, size: f32) -> IconInsertSpec {
        IconInsertSpec::new(svg, name, size, None).unwrap()
    }

    #[test]
    fn single_icon_is_square_and_centered() {
        let mut host = MemoryHost::new(Point::new(100.0, 100.0));
        let id = insert_icon(&mut host, &spec(HOUSE, "lucide:house", 48.0)).unwrap();

        let node = host.node(id).unwrap();
        assert_eq!(node.name, "lucide:house");
        assert_eq!((node.x, node.y, node.width, node.height), (76.0, 76.0, 48.0, 48.0));
        assert_eq!(host.selection().unwrap(), vec![id]);
    }

    #[test]
    fn batch_lays_out_a_gapped_row() {
        let mut host = MemoryHost::new(Point::new(0.0, 0.0));
        let specs = [spec(HOUSE, "a", 24.0), spec(HOUSE, "b", 48.0)];
        let placed = insert_batch(&mut host, &specs, BATCH_GAP).unwrap();

        let a = host.node(placed[0].id).unwrap();
        let b = host.node(placed[1].id).unwrap();
        assert_eq!((a.x, a.y), (-44.0, -12.0));
        assert_eq!((b.x, b.y), (-4.0, -24.0));
    }

    #[test]
    fn batch_with_no_successes_is_empty() {
        let mut host = MemoryHost::default();
        let broken = [spec("<svg>", "broken", 24.0)];
        let placed = insert_batch(&mut host, &broken, BATCH_GAP).unwrap();
        assert!(placed.is_empty());
        assert!(host.page_nodes().is_empty());
        assert!(host.selection().unwrap().is_empty());
    }
}
