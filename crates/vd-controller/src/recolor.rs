//! Recoloring of inserted icons.
//!
//! Walks a node tree through [`PaintTree`] and replaces the color of every
//! solid fill and stroke. Any other paint is left as it is. Nodes
//! lacking a capability are skipped for that capability only.

use crate::host::{HostError, PaintTree};
use vd_core::NodeId;
use vd_core::model::{Paint, Paints, Rgb};

/// Recolor the solid entries of a paint list.
///
/// Returns the new list and how many entries changed.
pub fn recolor_paints(paints: &[Paint], color: Rgb) -> (Paints, usize) {
    let mut changed = 0;
    let out = paints
        .iter()
        .map(|p| {
            if p.is_solid() {
                changed += 1;
            }
            p.recolored(color)
        })
        .collect();
    (out, changed)
}

/// Recolor `root` and everything below it. Returns the number of solid
/// paints replaced.
pub fn recolor_tree<T: PaintTree + ?Sized>(
    tree: &mut T,
    root: NodeId,
    color: Rgb,
) -> Result<usize, HostError> {
    let mut total = 0;
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if let Some(fills) = tree.fills(id)? {
            let (fills, n) = recolor_paints(&fills, color);
            if n > 0 {
                tree.set_fills(id, fills)?;
                total += n;
            }
        }
        if let Some(strokes) = tree.strokes(id)? {
            let (strokes, n) = recolor_paints(&strokes, color);
            if n > 0 {
                tree.set_strokes(id, strokes)?;
                total += n;
            }
        }
        if let Some(children) = tree.children(id)? {
            stack.extend(children.into_iter().rev());
        }
    }

    log::debug!("recolored {total} paint(s) under {root}");
    Ok(total)
}
