use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use fortune_types::{Effect, Msg};
use ratatui::{
    prelude::*,
    style::Style,
    widgets::Paragraph,
};
use tracing::debug;

use super::components::{Component, ControlsComponent, FortuneComponent, LogsComponent, SelectorComponent};
use super::theme::theme_helpers as th;
use crate::app::App;

/// Root view: lays out the components and routes input to the focused one.
#[derive(Default, Debug)]
pub struct MainView {
    pub controls_view: ControlsComponent,
    pub selector_view: SelectorComponent,
    pub fortune_view: FortuneComponent,
    pub logs_view: LogsComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore_focus(&mut self, app: &mut App) {
        app.focus.first();
    }

    /// Keys that work from anywhere while no text is being edited.
    fn handle_global_key(app: &mut App, key: KeyEvent) -> Option<Vec<Effect>> {
        if app.selector.is_focused() || !(key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT) {
            return None;
        }
        let msg = match key.code {
            KeyCode::Char('q') => return Some(vec![Effect::Quit]),
            KeyCode::Char('r') if !app.loading => Msg::RevealRequested,
            KeyCode::Char('a') if app.fortune.has_outcome() => Msg::AnotherFortune,
            KeyCode::Char('m') => Msg::ApiModeToggled,
            KeyCode::Char('p') => Msg::SelectionModeChanged(app.selection_mode().toggled()),
            _ => return None,
        };
        Some(app.update(&msg))
    }

    /// Commit an open edit once terminal focus has left the selector.
    fn settle_selector(app: &mut App) -> Vec<Effect> {
        if app.selector.is_focused()
            && (!app.f_selector.get() || !app.selector_visible())
            && let Some(value) = app.selector.blur()
        {
            debug!(value, "selector committed on focus loss");
            return app.update(&Msg::SelectedIndexChanged(value));
        }
        Vec::new()
    }

    fn focused_component(&mut self, app: &App) -> Option<&mut dyn Component> {
        if app.controls.container_focus.get() {
            Some(&mut self.controls_view)
        } else if app.f_selector.get() && app.selector_visible() {
            Some(&mut self.selector_view)
        } else if app.fortune.f_fortune_id.get() {
            Some(&mut self.fortune_view)
        } else if app.logs.f_list.get() {
            Some(&mut self.logs_view)
        } else {
            None
        }
    }

    fn focused_component_ref(&self, app: &App) -> Option<&dyn Component> {
        if app.controls.container_focus.get() {
            Some(&self.controls_view)
        } else if app.f_selector.get() && app.selector_visible() {
            Some(&self.selector_view)
        } else if app.fortune.f_fortune_id.get() {
            Some(&self.fortune_view)
        } else if app.logs.f_list.get() {
            Some(&self.logs_view)
        } else {
            None
        }
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        let mut effects = app.update(&msg);
        effects.extend(Self::settle_selector(app));
        effects
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let mut effects = match Self::handle_global_key(app, key) {
            Some(effects) => effects,
            None => match self.focused_component(app) {
                Some(component) => component.handle_key_events(app, key),
                None => {
                    if key.code == KeyCode::Tab {
                        app.focus.next();
                    } else if key.code == KeyCode::BackTab {
                        app.focus.prev();
                    }
                    Vec::new()
                }
            },
        };
        effects.extend(Self::settle_selector(app));
        effects
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        effects.extend(self.controls_view.handle_mouse_events(app, mouse));
        if app.selector_visible() {
            effects.extend(self.selector_view.handle_mouse_events(app, mouse));
        }
        effects.extend(self.fortune_view.handle_mouse_events(app, mouse));
        effects.extend(self.logs_view.handle_mouse_events(app, mouse));
        effects.extend(Self::settle_selector(app));
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        frame.render_widget(Paragraph::new(title_line(app)), layout[0]);
        self.controls_view.render(frame, layout[1], app);
        if app.selector_visible() {
            self.selector_view.render(frame, layout[2], app);
        }
        self.fortune_view.render(frame, layout[3], app);
        self.logs_view.render(frame, layout[4], app);

        let hint_spans: Vec<Span> = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints_widget, layout[5]);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];
        if let Some(component) = self.focused_component_ref(app) {
            hint_spans.extend(component.get_hint_spans(app));
        }
        if app.selector.is_focused() {
            return hint_spans;
        }
        hint_spans.extend(th::build_hint_spans(
            &*app.ctx.theme,
            &[
                ("r", " Reveal  "),
                ("a", " Another  "),
                ("m", " API mode  "),
                ("p", " Pick/Random  "),
                ("Tab", " Focus  "),
                ("q", " Quit "),
            ],
        ));
        hint_spans
    }

    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let selector_height = if app.selector_visible() { 4 } else { 0 };
        Layout::vertical([
            Constraint::Length(1),               // Title
            Constraint::Length(3),               // Controls
            Constraint::Length(selector_height), // Selector (pick mode, before a reveal)
            Constraint::Min(7),                  // Fortune
            Constraint::Length(8),               // Logs
            Constraint::Length(1),               // Hints bar
        ])
        .split(area)
        .to_vec()
    }
}

fn title_line(app: &App) -> Line<'static> {
    let theme = &*app.ctx.theme;
    let count = match app.fortune_count {
        Some(count) => format!("{count} fortunes"),
        None => "counting fortunes…".to_string(),
    };
    Line::from(vec![
        Span::styled(" Fortune Cookie", theme.accent_emphasis_style()),
        Span::styled(format!("  ·  {} API ({})", app.api_mode(), app.api_mode().base_path()), theme.text_secondary_style()),
        Span::styled(format!("  ·  {count}"), theme.text_muted_style()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use fortune_types::{ApiMode, SelectionMode};
    use rat_focus::FocusBuilder;
    use std::rc::Rc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn global_keys_dispatch_messages() {
        let mut app = test_app();
        let mut view = MainView::new();

        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::Char('q'))), vec![Effect::Quit]);

        view.handle_key_events(&mut app, key(KeyCode::Char('p')));
        assert_eq!(app.selection_mode(), SelectionMode::Pick);

        let effects = view.handle_key_events(&mut app, key(KeyCode::Char('m')));
        assert_eq!(effects, vec![Effect::FetchCount(ApiMode::Sidecar), Effect::SavePreferences]);

        let effects = view.handle_key_events(&mut app, key(KeyCode::Char('r')));
        assert!(matches!(effects.as_slice(), [Effect::FetchFortune { .. }]));
        assert!(view.handle_key_events(&mut app, key(KeyCode::Char('r'))).is_empty());
    }

    #[test]
    fn editing_selector_swallows_global_keys() {
        let mut app = test_app();
        let mut view = MainView::new();
        view.handle_key_events(&mut app, key(KeyCode::Char('p')));
        app.focus = Rc::new(FocusBuilder::build_for(&app));
        app.focus.focus(&app.f_selector);
        app.selector.focus();

        assert!(view.handle_key_events(&mut app, key(KeyCode::Char('q'))).is_empty());
        assert!(app.selector.has_error());
        assert_eq!(app.selection_mode(), SelectionMode::Pick);
    }

    #[test]
    fn selector_hidden_while_fortune_is_shown() {
        let mut app = test_app();
        let mut view = MainView::new();
        view.handle_message(&mut app, Msg::SelectionModeChanged(SelectionMode::Pick));
        let area = Rect::new(0, 0, 80, 30);
        assert_eq!(view.get_preferred_layout(&app, area)[2].height, 4);

        view.handle_message(&mut app, Msg::RevealRequested);
        assert!(!app.selector_visible());
        assert_eq!(view.get_preferred_layout(&app, area)[2].height, 0);

        app.loading = false;
        app.fortune.error = Some("boom".into());
        assert!(!app.selector_visible());

        view.handle_message(&mut app, Msg::AnotherFortune);
        assert!(app.selector_visible());
    }

    #[test]
    fn leaving_pick_mode_commits_open_edit() {
        let mut app = test_app();
        app.update(&Msg::SelectionModeChanged(SelectionMode::Pick));
        app.selector.focus();
        app.selector.set_edit_buffer("150");

        let mut view = MainView::new();
        view.handle_message(&mut app, Msg::SelectionModeChanged(SelectionMode::Random));
        assert!(!app.selector.is_focused());
        assert_eq!(app.selector.value(), 99);
    }
}
