//! Tab drag and drop.
//!
//! Sub-modules:
//! - [`zone`]: drop-zone classification and ghost preview geometry.
//! - [`coordinator`]: pointer-driven state machine `Idle → Pending → Dragging`.
//! - [`commit`]: applying a released drop to the workspace store.

mod commit;
mod coordinator;
mod zone;

pub use commit::{DropOutcome, apply_drop};
pub use coordinator::{
    DragCoordinator, DragSession, DragSettings, DragState, DropCommit, TabDragData,
};
pub use zone::{DropZone, compute_drop_zone, drop_zone_preview};
