//! Pointer-driven drag state machine for tabs.

use super::zone::{DropZone, compute_drop_zone, drop_zone_preview};
use crate::config::LayoutConfig;
use crate::layout::{Bounds, ConversationId, PanelId, Point, TabId};
use crate::workspace::WorkspaceState;

/// Drag tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSettings {
    /// Pointer travel (pixels) before a press becomes a drag
    pub activation_distance: f32,
    /// Edge band of a hovered panel, as a fraction of its width/height
    pub edge_threshold: f32,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            activation_distance: chatdock_config::defaults::drag_activation_distance(),
            edge_threshold: chatdock_config::defaults::drop_edge_threshold(),
        }
    }
}

impl From<&LayoutConfig> for DragSettings {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            activation_distance: config.drag_activation_distance,
            edge_threshold: config.drop_edge_threshold,
        }
    }
}

/// Snapshot of the dragged tab, taken when the drag starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabDragData {
    pub tab_id: TabId,
    pub source_panel_id: PanelId,
    pub conversation_id: ConversationId,
    pub owner_id: String,
    /// Title shown on the drag ghost
    pub title: String,
}

impl TabDragData {
    /// Capture a tab from the current state, if it still lives in `panel_id`
    pub fn capture(state: &WorkspaceState, tab_id: TabId, panel_id: PanelId) -> Option<Self> {
        let tab = state.root().find_panel(panel_id)?.find_tab(tab_id)?;
        Some(Self {
            tab_id,
            source_panel_id: panel_id,
            conversation_id: tab.conversation_id.clone(),
            owner_id: tab.owner_id.clone(),
            title: tab.title.clone(),
        })
    }
}

/// A released drag with a target, ready to apply to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropCommit {
    pub tab_id: TabId,
    pub source_panel_id: PanelId,
    pub target_panel_id: PanelId,
    pub drop_zone: DropZone,
    /// Tab-bar slot, set when released over a tab
    pub target_index: Option<usize>,
}

/// An active drag gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub data: TabDragData,
    pub hovered_panel_id: Option<PanelId>,
    pub drop_zone: Option<DropZone>,
    pub target_index: Option<usize>,
    pub pointer: Point,
}

/// Coordinator state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer is down on a tab but has not travelled far enough
    Pending {
        tab_id: TabId,
        panel_id: PanelId,
        origin: Point,
    },
    Dragging(DragSession),
}

/// Turns pointer events into drag sessions and drop commits
///
/// The coordinator holds IDs only. It never mutates the workspace; the
/// caller hands a released [`DropCommit`] to [`super::apply_drop`].
#[derive(Debug, Default)]
pub struct DragCoordinator {
    settings: DragSettings,
    state: DragState,
}

impl DragCoordinator {
    pub fn new(settings: DragSettings) -> Self {
        Self {
            settings,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The active drag session, if dragging
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Pointer pressed on a tab handle
    pub fn pointer_down(&mut self, tab_id: TabId, panel_id: PanelId, at: Point) {
        if self.is_dragging() {
            return;
        }
        self.state = DragState::Pending {
            tab_id,
            panel_id,
            origin: at,
        };
    }

    /// Pointer moved
    ///
    /// A pending press becomes a drag once it travels past the activation
    /// distance. Returns true on the move that starts the drag. If the tab
    /// vanished from the workspace in the meantime, the press is dropped.
    pub fn pointer_move(&mut self, state: &WorkspaceState, at: Point) -> bool {
        match &mut self.state {
            DragState::Idle => false,
            DragState::Dragging(session) => {
                session.pointer = at;
                false
            }
            DragState::Pending {
                tab_id,
                panel_id,
                origin,
            } => {
                let (tab_id, panel_id) = (*tab_id, *panel_id);
                if origin.distance_to(at) <= self.settings.activation_distance {
                    return false;
                }
                match TabDragData::capture(state, tab_id, panel_id) {
                    Some(data) => {
                        crate::debug_info!(
                            "DRAG",
                            "Drag started for tab {} from panel {}",
                            data.tab_id,
                            data.source_panel_id
                        );
                        self.state = DragState::Dragging(DragSession {
                            data,
                            hovered_panel_id: None,
                            drop_zone: None,
                            target_index: None,
                            pointer: at,
                        });
                        true
                    }
                    None => {
                        crate::debug_info!("DRAG", "Pressed tab {} no longer exists", tab_id);
                        self.state = DragState::Idle;
                        false
                    }
                }
            }
        }
    }

    /// Pointer is over a panel surface with the given bounding rectangle
    pub fn hover_panel(&mut self, panel_id: PanelId, rect: Bounds, at: Point) {
        let threshold = self.settings.edge_threshold;
        if let DragState::Dragging(session) = &mut self.state {
            let zone = compute_drop_zone(rect, at, threshold);
            crate::debug_trace!("DRAG", "Hover panel {} zone={:?}", panel_id, zone);
            session.hovered_panel_id = Some(panel_id);
            session.drop_zone = Some(zone);
            session.target_index = None;
            session.pointer = at;
        }
    }

    /// Pointer is over slot `index` of a panel's tab bar
    pub fn hover_tab_slot(&mut self, panel_id: PanelId, index: usize) {
        if let DragState::Dragging(session) = &mut self.state {
            session.hovered_panel_id = Some(panel_id);
            session.drop_zone = Some(DropZone::Center);
            session.target_index = Some(index);
        }
    }

    /// Pointer left every drop target
    pub fn leave_targets(&mut self) {
        if let DragState::Dragging(session) = &mut self.state {
            session.hovered_panel_id = None;
            session.drop_zone = None;
            session.target_index = None;
        }
    }

    /// Ghost rectangle for the hovered panel, given its bounds
    pub fn preview(&self, rect: Bounds) -> Option<Bounds> {
        drop_zone_preview(rect, self.session()?.drop_zone)
    }

    /// Pointer released
    ///
    /// Returns a commit when a drag was over a target. The session is
    /// discarded in every case.
    pub fn release(&mut self) -> Option<DropCommit> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        let Some(target_panel_id) = session.hovered_panel_id else {
            crate::debug_info!("DRAG", "Dropped outside any panel, cancelled");
            return None;
        };
        let commit = DropCommit {
            tab_id: session.data.tab_id,
            source_panel_id: session.data.source_panel_id,
            target_panel_id,
            drop_zone: session.drop_zone.unwrap_or(DropZone::Center),
            target_index: session.target_index,
        };
        crate::debug_info!("DRAG", "Drop committed: {:?}", commit);
        Some(commit)
    }

    /// Abort the gesture (Escape or lost pointer capture)
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            crate::debug_info!("DRAG", "Drag cancelled");
        }
        self.state = DragState::Idle;
    }
}
