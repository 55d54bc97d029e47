//! Controls row: selection-mode toggle, API-mode toggle and the primary
//! reveal/another button.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use fortune_types::{ApiMode, Effect, Msg, SelectionMode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Borders, Paragraph},
};

use crate::app::App;
use crate::ui::theme::Theme;
use crate::ui::{components::component::Component, theme::theme_helpers as th};

#[derive(Debug, Default, Clone, Copy)]
struct ControlsLayout {
    selection_mode: Rect,
    api_mode: Rect,
    action: Rect,
}

#[derive(Debug, Default)]
pub struct ControlsComponent {
    layout: ControlsLayout,
}

/// Message sent by the primary button in the current state.
pub fn action_msg(app: &App) -> Msg {
    if app.fortune.has_outcome() {
        Msg::AnotherFortune
    } else {
        Msg::RevealRequested
    }
}

fn action_label(app: &App) -> String {
    if app.loading {
        "Cracking…".to_string()
    } else if app.fortune.has_outcome() {
        "Another fortune".to_string()
    } else if app.selection_mode() == SelectionMode::Pick {
        format!("Reveal fortune #{}", app.selector.value())
    } else {
        "Crack the cookie".to_string()
    }
}

fn toggle_line<'a>(theme: &dyn Theme, options: [&'a str; 2], active: usize) -> Line<'a> {
    let mut spans = Vec::with_capacity(3);
    for (index, option) in options.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" | ", theme.text_muted_style()));
        }
        let style = if index == active {
            theme.accent_emphasis_style()
        } else {
            theme.text_muted_style()
        };
        spans.push(Span::styled(option, style));
    }
    Line::from(spans)
}

impl ControlsComponent {
    fn toggle_selection_mode(app: &mut App) -> Vec<Effect> {
        let next = app.selection_mode().toggled();
        app.update(&Msg::SelectionModeChanged(next))
    }

    fn activate(app: &mut App) -> Vec<Effect> {
        if app.loading {
            return Vec::new();
        }
        let msg = action_msg(app);
        app.update(&msg)
    }
}

impl Component for ControlsComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                return Vec::new();
            }
            _ => {}
        }

        let activates = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
        let flips = activates || matches!(key.code, KeyCode::Left | KeyCode::Right);
        if app.controls.f_selection_mode.get() && flips {
            Self::toggle_selection_mode(app)
        } else if app.controls.f_api_mode.get() && flips {
            app.update(&Msg::ApiModeToggled)
        } else if app.controls.f_action.get() && activates {
            Self::activate(app)
        } else {
            Vec::new()
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Vec::new();
        }
        let pos = Position::new(mouse.column, mouse.row);
        let layout = self.layout;
        if layout.selection_mode.contains(pos) {
            app.focus.focus(&app.controls.f_selection_mode);
            Self::toggle_selection_mode(app)
        } else if layout.api_mode.contains(pos) {
            app.focus.focus(&app.controls.f_api_mode);
            app.update(&Msg::ApiModeToggled)
        } else if layout.action.contains(pos) {
            app.focus.focus(&app.controls.f_action);
            Self::activate(app)
        } else {
            Vec::new()
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let areas = self.get_preferred_layout(app, rect);
        let theme = &*app.ctx.theme;
        let controls = &app.controls;

        let selection_active = usize::from(controls.selection_mode == SelectionMode::Pick);
        let block = th::block(theme, Some("Mode"), controls.f_selection_mode.get());
        frame.render_widget(
            Paragraph::new(toggle_line(
                theme,
                [SelectionMode::Random.label(), SelectionMode::Pick.label()],
                selection_active,
            ))
            .centered()
            .block(block),
            areas[0],
        );

        let api_active = usize::from(controls.api_mode == ApiMode::Sidecar);
        let block = th::block(theme, Some("API"), controls.f_api_mode.get());
        frame.render_widget(
            Paragraph::new(toggle_line(theme, [ApiMode::Direct.label(), ApiMode::Sidecar.label()], api_active))
                .centered()
                .block(block),
            areas[1],
        );

        th::render_button(
            frame,
            areas[2],
            &action_label(app),
            !app.loading,
            controls.f_action.get(),
            !app.fortune.has_outcome(),
            theme,
            Borders::ALL,
        );

        self.layout = ControlsLayout {
            selection_mode: areas[0],
            api_mode: areas[1],
            action: areas[2],
        };
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let theme = &*app.ctx.theme;
        if app.controls.f_action.get() {
            th::build_hint_spans(theme, &[("Enter", " Press  ")])
        } else {
            th::build_hint_spans(theme, &[("←/→", " Switch  ")])
        }
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::horizontal([Constraint::Length(30), Constraint::Length(22), Constraint::Min(18)])
            .split(area)
            .to_vec()
    }
}
