//! Logs component showing recent client activity.
//!
//! Lines are appended by [`crate::app::App::append_log_message`]. The list
//! follows the newest entry until the user scrolls away from it.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use fortune_types::Effect;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::app::App;
use crate::ui::theme::Theme;
use crate::ui::{components::component::Component, theme::theme_helpers as th, utils::truncate_with_ellipsis};

#[derive(Debug, Default)]
pub struct LogsComponent {
    list_area: Rect,
}

impl Component for LogsComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Up => app.logs.list_state.select_previous(),
            KeyCode::Down => app.logs.list_state.select_next(),
            KeyCode::PageUp => app.logs.list_state.scroll_up_by(10),
            KeyCode::PageDown => app.logs.list_state.scroll_down_by(10),
            KeyCode::Home => app.logs.list_state.select_first(),
            KeyCode::End => app.logs.list_state.select_last(),
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let pos = Position::new(mouse.column, mouse.row);
        if !self.list_area.contains(pos) {
            return Vec::new();
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                app.focus.focus(&app.logs.f_list);
                let index = hover_index_for_position(self.list_area, pos, app.logs.list_state.offset(), app.logs.entries.len());
                if index.is_some() {
                    app.logs.list_state.select(index);
                }
            }
            MouseEventKind::ScrollDown => app.logs.list_state.scroll_down_by(1),
            MouseEventKind::ScrollUp => app.logs.list_state.scroll_up_by(1),
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let focused = app.logs.f_list.get();
        let title = format!("Logs ({})", app.logs.entries.len());
        let block = th::block(&*app.ctx.theme, Some(title.as_str()), focused);
        let list_area = block.inner(rect);
        frame.render_widget(block, rect);

        let width = list_area.width.saturating_sub(1) as usize;
        let items: Vec<ListItem> = app
            .logs
            .entries
            .iter()
            .map(|entry| {
                let style = entry_style(&*app.ctx.theme, entry);
                ListItem::new(Line::from(Span::styled(truncate_with_ellipsis(entry, width), style)))
            })
            .collect();
        let mut list = List::new(items).style(th::panel_style(&*app.ctx.theme));
        if focused {
            list = list.highlight_style(app.ctx.theme.selection_style());
        }
        frame.render_stateful_widget(list, list_area, &mut app.logs.list_state);

        let content_len = app.logs.entries.len();
        let visible = list_area.height as usize;
        if focused && visible > 0 && content_len > visible {
            let max_scroll_offset = content_len.saturating_sub(visible);
            let mut sb_state = ScrollbarState::new(max_scroll_offset)
                .position(app.logs.list_state.offset().min(max_scroll_offset))
                .viewport_content_length(visible);
            let sb = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .thumb_style(Style::default().fg(app.ctx.theme.roles().scrollbar_thumb))
                .track_style(Style::default().fg(app.ctx.theme.roles().scrollbar_track));
            frame.render_stateful_widget(sb, list_area, &mut sb_state);
        }
        self.list_area = list_area;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(
            &*app.ctx.theme,
            &[("↑/↓", " Move  "), ("PgUp/PgDn", " Page  "), ("Home/End", " Jump  ")],
        )
    }
}

fn entry_style<T: Theme + ?Sized>(theme: &T, entry: &str) -> Style {
    if entry.starts_with("Error") || entry.starts_with("Could not") {
        theme.status_error()
    } else if entry.starts_with("Service busy") {
        theme.status_warning()
    } else {
        theme.text_primary_style()
    }
}

fn hover_index_for_position(list_area: Rect, position: Position, offset: usize, entry_len: usize) -> Option<usize> {
    if !list_area.contains(position) {
        return None;
    }
    let index = position.y.saturating_sub(list_area.y) as usize + offset;
    if index < entry_len { Some(index) } else { None }
}
