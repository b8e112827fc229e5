use crate::host::{Host, HostError};
use smallvec::smallvec;
use vd_core::NodeId;
use vd_core::layout::row_positions;
use vd_core::model::Paint;
use vd_core::protocol::ShapeSpec;

/// Create a row of shapes centred on the viewport, select them and bring
/// them into view. Returns how many were created.
///
/// The first host error aborts the run. Nodes created before it stay on
/// the page.
pub fn create_shapes<H: Host + ?Sized>(host: &mut H, spec: &ShapeSpec) -> Result<u32, HostError> {
    let center = host.viewport_center()?;
    let origins = row_positions(center, spec.width, spec.spacing, spec.count as usize);

    let mut created: Vec<NodeId> = Vec::with_capacity(origins.len());
    for origin in origins {
        let id = host.create_shape(spec.shape_type)?;
        host.resize(id, spec.width, spec.height)?;
        host.set_position(id, origin)?;
        host.set_fills(id, smallvec![Paint::solid(spec.color)])?;
        host.append_to_page(id)?;
        created.push(id);
    }

    host.set_selection(&created)?;
    host.scroll_and_zoom_into_view(&created);
    log::debug!("created {} {:?} node(s)", created.len(), spec.shape_type);
    Ok(spec.count)
}
