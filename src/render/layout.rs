//! Geometry pass over the layout tree.

use super::RenderSettings;
use crate::layout::{
    Bounds, ConversationId, GroupId, LayoutNode, PanelGroup, PanelId, Point, SplitDirection, TabId,
};

/// What a panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    /// No tabs: the host draws the explicit empty state
    Empty,
    /// The active tab's conversation
    Conversation {
        tab_id: TabId,
        conversation_id: ConversationId,
        tab_count: usize,
    },
}

/// Placement of one panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelFrame {
    pub panel_id: PanelId,
    pub bounds: Bounds,
    pub content: PanelContent,
}

/// A draggable handle between children `index` and `index + 1` of a group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeHandle {
    pub group_id: GroupId,
    pub index: usize,
    pub direction: SplitDirection,
    pub bounds: Bounds,
    /// Extent of the owning group along its direction, in pixels
    pub container_extent: f32,
}

/// Output of one layout pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutFrame {
    /// Panels in pre-order
    pub panels: Vec<PanelFrame>,
    pub handles: Vec<ResizeHandle>,
}

impl LayoutFrame {
    /// Find the panel under a point
    pub fn panel_at(&self, point: Point) -> Option<&PanelFrame> {
        self.panels.iter().find(|p| p.bounds.contains(point))
    }

    /// Find the resize handle under a point
    pub fn handle_at(&self, point: Point) -> Option<&ResizeHandle> {
        self.handles.iter().find(|h| h.bounds.contains(point))
    }

    /// Bounds of a panel, used as the hovered rectangle while dragging
    pub fn panel_bounds(&self, panel_id: PanelId) -> Option<Bounds> {
        self.panels
            .iter()
            .find(|p| p.panel_id == panel_id)
            .map(|p| p.bounds)
    }
}

/// Lays the tree out inside a pixel rectangle
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutRenderer {
    settings: RenderSettings,
}

impl LayoutRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Compute panel and handle geometry for the whole tree
    pub fn render(&self, root: &LayoutNode, area: Bounds) -> LayoutFrame {
        let mut frame = LayoutFrame::default();
        self.layout_node(root, area, &mut frame);
        crate::debug_trace!(
            "RENDER",
            "Laid out {} panels and {} handles in {:.0}x{:.0}",
            frame.panels.len(),
            frame.handles.len(),
            area.width,
            area.height
        );
        frame
    }

    fn layout_node(&self, node: &LayoutNode, bounds: Bounds, frame: &mut LayoutFrame) {
        match node {
            LayoutNode::Panel(panel) => {
                let content = match panel.active_tab() {
                    Some(tab) => PanelContent::Conversation {
                        tab_id: tab.id,
                        conversation_id: tab.conversation_id.clone(),
                        tab_count: panel.tabs.len(),
                    },
                    None => PanelContent::Empty,
                };
                frame.panels.push(PanelFrame {
                    panel_id: panel.id,
                    bounds,
                    content,
                });
            }
            LayoutNode::Group(group) => self.layout_group(group, bounds, frame),
        }
    }

    fn layout_group(&self, group: &PanelGroup, bounds: Bounds, frame: &mut LayoutFrame) {
        let count = group.children.len();
        let extent = group.direction.along(bounds.width, bounds.height);
        let mut offset = 0.0;

        for (index, child) in group.children.iter().enumerate() {
            let outer = extent * group.size_at(index) / 100.0;
            let is_last = index + 1 == count;
            // The handle takes the trailing pixels of every child but the last
            let handle = if is_last {
                0.0
            } else {
                self.settings.handle_width.min(outer).max(0.0)
            };
            let inner = (outer - handle).max(0.0);

            let child_bounds = match group.direction {
                SplitDirection::Horizontal => {
                    Bounds::new(bounds.x + offset, bounds.y, inner, bounds.height)
                }
                SplitDirection::Vertical => {
                    Bounds::new(bounds.x, bounds.y + offset, bounds.width, inner)
                }
            };
            self.layout_node(child, child_bounds, frame);

            if !is_last {
                let handle_bounds = match group.direction {
                    SplitDirection::Horizontal => {
                        Bounds::new(bounds.x + offset + inner, bounds.y, handle, bounds.height)
                    }
                    SplitDirection::Vertical => {
                        Bounds::new(bounds.x, bounds.y + offset + inner, bounds.width, handle)
                    }
                };
                frame.handles.push(ResizeHandle {
                    group_id: group.id,
                    index,
                    direction: group.direction,
                    bounds: handle_bounds,
                    container_extent: extent,
                });
            }
            offset += outer;
        }
    }
}
