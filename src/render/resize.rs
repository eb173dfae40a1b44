//! Drag-to-resize between sibling panels.

use super::layout::ResizeHandle;
use crate::layout::{GroupId, LayoutNode, Point, SplitDirection};
use crate::workspace::WorkspaceStore;

/// Shift `delta` percent from child `index + 1` to child `index`
///
/// Returns `None` when either side would end up below `min_size` or the
/// index has no right-hand neighbour.
pub fn compute_resized_sizes(
    sizes: &[f32],
    index: usize,
    delta: f32,
    min_size: f32,
) -> Option<Vec<f32>> {
    let first = sizes.get(index)? + delta;
    let second = sizes.get(index + 1)? - delta;
    if first < min_size || second < min_size {
        return None;
    }
    let mut next = sizes.to_vec();
    next[index] = first;
    next[index + 1] = second;
    Some(next)
}

/// An in-progress handle drag
///
/// Holds IDs only; every move re-reads the group's sizes from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    group_id: GroupId,
    index: usize,
    direction: SplitDirection,
    container_extent: f32,
    min_size: f32,
    /// Pointer position along the group's axis at the previous move
    last: f32,
}

impl ResizeDrag {
    /// Start dragging a handle from the given pointer position
    pub fn begin(handle: &ResizeHandle, pointer: Point, min_size: f32) -> Self {
        crate::debug_info!(
            "PANEL_RESIZE",
            "Resize started on group {} handle {}",
            handle.group_id,
            handle.index
        );
        Self {
            group_id: handle.group_id,
            index: handle.index,
            direction: handle.direction,
            container_extent: handle.container_extent,
            min_size,
            last: handle.direction.along(pointer.x, pointer.y),
        }
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Apply a pointer move. Returns true when new sizes were committed.
    ///
    /// The reference position advances on every move, including moves
    /// ignored for crossing the size floor.
    pub fn drag_to(&mut self, store: &mut WorkspaceStore, pointer: Point) -> bool {
        let position = self.direction.along(pointer.x, pointer.y);
        let delta_px = position - self.last;
        self.last = position;

        if self.container_extent <= 0.0 || delta_px == 0.0 {
            return false;
        }
        let delta = delta_px / self.container_extent * 100.0;

        let Some(current) = effective_sizes(store.state().root(), self.group_id) else {
            crate::debug_info!("PANEL_RESIZE", "Group {} vanished during resize", self.group_id);
            return false;
        };

        match compute_resized_sizes(&current, self.index, delta, self.min_size) {
            Some(sizes) => {
                crate::debug_trace!(
                    "PANEL_RESIZE",
                    "Group {} sizes {:?} -> {:?}",
                    self.group_id,
                    current,
                    sizes
                );
                store.update_panel_sizes(self.group_id, sizes);
                true
            }
            None => false,
        }
    }

    /// Finish the drag
    pub fn end(self) {
        crate::debug_info!("PANEL_RESIZE", "Resize finished on group {}", self.group_id);
    }
}

/// Current sizes of a group, with missing entries filled in
pub fn effective_sizes(root: &LayoutNode, group_id: GroupId) -> Option<Vec<f32>> {
    let group = root.find_group(group_id)?;
    Some((0..group.children.len()).map(|i| group.size_at(i)).collect())
}
