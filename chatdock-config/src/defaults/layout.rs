//! Default values for panel layout and drag-and-drop settings.

pub fn min_panel_size() -> f32 {
    15.0 // Percent of the parent group
}

pub fn drop_edge_threshold() -> f32 {
    0.25 // Outer quarter of the hovered panel
}

pub fn drag_activation_distance() -> f32 {
    8.0 // Pixels of pointer travel before a press becomes a drag
}

pub fn resize_handle_width() -> f32 {
    6.0
}

pub fn default_split_sizes() -> [f32; 2] {
    [50.0, 50.0]
}
