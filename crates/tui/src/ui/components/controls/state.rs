use fortune_types::{ApiMode, SelectionMode};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// Mode toggles and the primary action button.
#[derive(Debug)]
pub struct ControlsState {
    pub selection_mode: SelectionMode,
    pub api_mode: ApiMode,
    /// Focus flag for the random/pick toggle
    pub f_selection_mode: FocusFlag,
    /// Focus flag for the direct/sidecar toggle
    pub f_api_mode: FocusFlag,
    /// Focus flag for the reveal/another button
    pub f_action: FocusFlag,
    pub container_focus: FocusFlag,
}

impl ControlsState {
    pub fn new(api_mode: ApiMode, selection_mode: SelectionMode) -> Self {
        Self {
            selection_mode,
            api_mode,
            f_selection_mode: FocusFlag::named("controls.selection_mode"),
            f_api_mode: FocusFlag::named("controls.api_mode"),
            f_action: FocusFlag::named("controls.action"),
            container_focus: FocusFlag::named("controls"),
        }
    }
}

impl HasFocus for ControlsState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_selection_mode);
        builder.leaf_widget(&self.f_api_mode);
        builder.leaf_widget(&self.f_action);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
