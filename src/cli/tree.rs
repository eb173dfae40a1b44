//! ASCII rendering of a workspace layout.

use crate::layout::{LayoutNode, Panel, PanelGroup, PanelId, SplitDirection};
use crate::workspace::WorkspaceState;

/// Render the workspace as an indented tree
///
/// `*` marks the active panel and each panel's active tab.
pub fn format_tree(state: &WorkspaceState) -> String {
    let panels = state.root().count_panels();
    let mut out = format!(
        "Workspace {:?} ({panels} panel{})\n",
        state.workspace.name,
        if panels == 1 { "" } else { "s" }
    );
    write_node(&mut out, state.root(), state.active_panel_id, "", true);
    out
}

fn write_node(
    out: &mut String,
    node: &LayoutNode,
    active_panel: Option<PanelId>,
    prefix: &str,
    last: bool,
) {
    let branch = if last { "└─ " } else { "├─ " };
    let child_prefix = format!("{prefix}{}", if last { "   " } else { "│  " });
    match node {
        LayoutNode::Panel(panel) => {
            out.push_str(&format!("{prefix}{branch}{}\n", panel_line(panel, active_panel)));
            write_tabs(out, panel, &child_prefix);
        }
        LayoutNode::Group(group) => {
            out.push_str(&format!("{prefix}{branch}{}\n", group_line(group)));
            let count = group.children.len();
            for (i, child) in group.children.iter().enumerate() {
                write_node(out, child, active_panel, &child_prefix, i + 1 == count);
            }
        }
    }
}

fn group_line(group: &PanelGroup) -> String {
    let direction = match group.direction {
        SplitDirection::Horizontal => "horizontal",
        SplitDirection::Vertical => "vertical",
    };
    let sizes: Vec<String> = (0..group.children.len())
        .map(|i| format!("{:.1}", group.size_at(i)))
        .collect();
    format!("{direction} [{}] {}", sizes.join(", "), short_id(group.id))
}

fn panel_line(panel: &Panel, active_panel: Option<PanelId>) -> String {
    let marker = if active_panel == Some(panel.id) { "* " } else { "" };
    let tabs = match panel.tabs.len() {
        0 => "empty".to_string(),
        1 => "1 tab".to_string(),
        n => format!("{n} tabs"),
    };
    format!("{marker}panel {} ({tabs})", short_id(panel.id))
}

fn write_tabs(out: &mut String, panel: &Panel, prefix: &str) {
    let count = panel.tabs.len();
    for (i, tab) in panel.tabs.iter().enumerate() {
        let branch = if i + 1 == count { "└─ " } else { "├─ " };
        let marker = if panel.active_tab_id == Some(tab.id) { "* " } else { "" };
        let pinned = if tab.is_pinned { " (pinned)" } else { "" };
        out.push_str(&format!(
            "{prefix}{branch}{marker}{} [{}]{pinned}\n",
            tab.title, tab.conversation_id
        ));
    }
}

fn short_id(id: uuid::Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}
