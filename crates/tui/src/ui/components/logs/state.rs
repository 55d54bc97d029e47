use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::{layout::Rect, widgets::ListState};

/// Oldest lines are dropped beyond this many entries.
pub const MAX_LOG_ENTRIES: usize = 500;

#[derive(Debug)]
pub struct LogsState {
    /// Plain-text activity lines, oldest first.
    pub entries: Vec<String>,
    pub list_state: ListState,
    /// Focus flag for the log list
    pub f_list: FocusFlag,
}

impl Default for LogsState {
    fn default() -> Self {
        Self {
            entries: vec!["Welcome to Fortune Cookie".into()],
            list_state: ListState::default(),
            f_list: FocusFlag::named("logs.list"),
        }
    }
}

impl LogsState {
    /// Append a line, keeping the newest one selected unless the user scrolled away.
    pub fn push(&mut self, entry: String) {
        let following = self
            .list_state
            .selected()
            .is_none_or(|selected| selected + 1 >= self.entries.len());
        self.entries.push(entry);
        if self.entries.len() > MAX_LOG_ENTRIES {
            let overflow = self.entries.len() - MAX_LOG_ENTRIES;
            self.entries.drain(..overflow);
            if let Some(selected) = self.list_state.selected() {
                self.list_state.select(Some(selected.saturating_sub(overflow)));
            }
        }
        if following {
            self.list_state.select(Some(self.entries.len() - 1));
        }
    }
}

impl HasFocus for LogsState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(&self.f_list);
    }

    fn focus(&self) -> FocusFlag {
        self.f_list.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
