//! Fortune panel: the revealed slip, its request metrics, and any error or
//! backpressure notice.
//!
//! The `#id` label is focusable and clickable; activating it sends
//! [`Msg::FortuneIdClicked`] so the selector jumps to that fortune.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use fortune_types::{Effect, FortuneReveal, Msg};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::ui::theme::Theme;
use crate::ui::{
    components::component::Component,
    theme::theme_helpers as th,
    utils::{centered_box, throbber_frame},
};

#[derive(Debug, Default)]
pub struct FortuneComponent {
    id_area: Option<Rect>,
}

impl FortuneComponent {
    fn activate_id(app: &mut App) -> Vec<Effect> {
        match app.fortune.revealed_id() {
            Some(id) => app.update(&Msg::FortuneIdClicked(id)),
            None => Vec::new(),
        }
    }

    fn render_reveal(&mut self, frame: &mut Frame, area: Rect, theme: &dyn Theme, reveal: &FortuneReveal, id_focused: bool) {
        let [paper_area, metrics_area] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

        let paper_width = (reveal.message.width() as u16 + 6).clamp(20, paper_area.width.max(1));
        let text_width = paper_width.saturating_sub(4).max(1) as usize;
        let paper_height = (reveal.message.width().div_ceil(text_width) as u16 + 2).min(paper_area.height);
        let paper = Paragraph::new(reveal.message.as_str())
            .centered()
            .wrap(Wrap { trim: true })
            .style(theme.fortune_paper_style())
            .block(Block::default().padding(Padding::new(2, 2, 1, 1)).style(theme.fortune_paper_style()));
        frame.render_widget(paper, centered_box(paper_width, paper_height, paper_area));

        let mut spans = Vec::new();
        let mut id_offset = None;
        if let Some(id) = reveal.id {
            let mut id_style = theme.accent_primary_style().add_modifier(Modifier::UNDERLINED);
            if id_focused {
                id_style = id_style.patch(theme.selection_style());
            }
            id_offset = Some(format!("#{id}").width() as u16);
            spans.push(Span::styled(format!("#{id}"), id_style));
            spans.push(Span::styled("  ·  ", theme.text_muted_style()));
        }
        spans.push(Span::styled(format!("{} ms", reveal.request_ms), theme.text_secondary_style()));
        if let Some(delay) = reveal.server_delay_ms {
            spans.push(Span::styled(format!(" (server {delay:.0} ms)"), theme.text_muted_style()));
        }
        spans.push(Span::styled("  ·  cache ", theme.text_muted_style()));
        spans.push(Span::styled(format!(" {} ", reveal.cache_status), theme.cache_chip_style(reveal.cache_status)));

        let line = Line::from(spans);
        let line_width = line.width() as u16;
        // Same offset `Paragraph` uses for centered lines.
        let left = metrics_area.x + (metrics_area.width / 2).saturating_sub(line_width / 2);
        frame.render_widget(Paragraph::new(line).centered(), metrics_area);
        self.id_area = id_offset.map(|width| Rect::new(left, metrics_area.y, width, 1));
    }
}

impl Component for FortuneComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Self::activate_id(app),
            KeyCode::Tab => {
                app.focus.next();
                Vec::new()
            }
            KeyCode::BackTab => {
                app.focus.prev();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let pos = Position::new(mouse.column, mouse.row);
        if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) && self.id_area.is_some_and(|area| area.contains(pos)) {
            return Self::activate_id(app);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("Fortune"), false);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        self.id_area = None;

        let center_line = |frame: &mut Frame, line: Line| {
            let [row] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(inner);
            frame.render_widget(Paragraph::new(line).centered().wrap(Wrap { trim: true }), row);
        };

        if app.loading {
            center_line(
                frame,
                Line::from(vec![
                    Span::styled(throbber_frame(app.throbber_idx), theme.accent_primary_style()),
                    Span::styled(" Cracking the cookie…", theme.text_secondary_style()),
                ]),
            );
        } else if let Some(notice) = app.fortune.notice.as_deref() {
            center_line(frame, Line::from(Span::styled(format!("⚠ {notice}"), theme.status_warning())));
        } else if let Some(error) = app.fortune.error.as_deref() {
            let [message, retry] = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(inner);
            frame.render_widget(
                Paragraph::new(Span::styled(format!("Error: {error}"), theme.status_error())).centered(),
                message,
            );
            frame.render_widget(
                Paragraph::new(Line::from(th::build_hint_spans(theme, &[("a", " Try again")]))).centered(),
                retry,
            );
        } else if let Some(reveal) = app.fortune.reveal.clone() {
            let id_focused = app.fortune.f_fortune_id.get();
            self.render_reveal(frame, inner, theme, &reveal, id_focused);
        } else {
            let hint = Line::from(th::build_hint_spans(theme, &[("r", " Crack the cookie")]));
            center_line(frame, hint);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        if app.fortune.revealed_id().is_some() {
            th::build_hint_spans(&*app.ctx.theme, &[("Enter", " Pick this fortune  ")])
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use crossterm::event::KeyModifiers;
    use fortune_types::{CacheStatus, SelectionMode};
    use ratatui::{Terminal, backend::TestBackend};

    fn reveal(id: Option<i64>) -> FortuneReveal {
        FortuneReveal {
            message: "A clean build is a happy build.".into(),
            id,
            request_ms: 87,
            cache_status: CacheStatus::Hit,
            server_delay_ms: None,
        }
    }

    fn draw(app: &mut App, component: &mut FortuneComponent) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                component.render(frame, area, app);
            })
            .expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_reveal_with_metrics() {
        let mut app = test_app();
        app.fortune.reveal = Some(reveal(Some(42)));
        let mut component = FortuneComponent::default();
        let screen = draw(&mut app, &mut component);
        assert!(screen.contains("#42"));
        assert!(screen.contains("87 ms"));
        assert!(screen.contains("HIT"));
        assert!(component.id_area.is_some());
    }

    #[test]
    fn clicking_id_selects_fortune() {
        let mut app = test_app();
        app.fortune.reveal = Some(reveal(Some(42)));
        let mut component = FortuneComponent::default();
        draw(&mut app, &mut component);
        let area = component.id_area.expect("id area");

        component.handle_mouse_events(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: area.x,
                row: area.y,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(app.selection_mode(), SelectionMode::Pick);
        assert_eq!(app.selector.value(), 42);
        assert!(app.fortune.reveal.is_none());
    }

    #[test]
    fn enter_without_id_does_nothing() {
        let mut app = test_app();
        app.fortune.reveal = Some(reveal(None));
        let mut component = FortuneComponent::default();
        let effects = component.handle_key_events(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(effects.is_empty());
        assert!(app.fortune.reveal.is_some());
    }

    #[test]
    fn notice_and_error_are_rendered() {
        let mut app = test_app();
        let mut component = FortuneComponent::default();
        app.fortune.error = Some("API request failed: 500".into());
        assert!(draw(&mut app, &mut component).contains("Try again"));

        app.fortune.clear();
        app.fortune.notice = Some("busy".into());
        assert!(draw(&mut app, &mut component).contains("busy"));
    }
}
