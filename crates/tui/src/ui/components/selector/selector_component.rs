//! Terminal rendering and input mapping for [`BoundedValueSelector`].
//!
//! Layout (one row of controls plus a helper line):
//!
//! ```text
//! ┌───┐╭──────────────────────╮┌───┐
//! │ ‹ ││  40  41 [42] 43  44  ││ › │
//! └───┘╰──────────────────────╯└───┘
//!  Select fortune index (0–99)
//! ```
//!
//! Terminal columns are the drag coordinate. A press and release on the
//! carousel without horizontal movement opens the text edit instead.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use fortune_types::{Effect, Msg};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::state::{BoundedValueSelector, SelectorKey};
use crate::app::App;
use crate::ui::{components::component::Component, theme::theme_helpers as th};

pub const INVALID_NUMBER_HELP: &str = "Please enter a valid number";

/// Helper line under the selector.
pub fn helper_text(selector: &BoundedValueSelector) -> String {
    if selector.has_error() {
        INVALID_NUMBER_HELP.to_string()
    } else {
        format!("Select fortune index ({}–{})", selector.min(), selector.max())
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct SelectorLayout {
    decrement: Rect,
    carousel: Rect,
    increment: Rect,
    whole: Rect,
}

/// Pointer press on the carousel that may turn into a drag or a click.
#[derive(Debug, Clone, Copy)]
struct Press {
    column: u16,
    moved: bool,
}

#[derive(Debug, Default)]
pub struct SelectorComponent {
    layout: SelectorLayout,
    press: Option<Press>,
}

impl SelectorComponent {
    /// Forward a state-machine notification to the app.
    fn notify(app: &mut App, changed: Option<i64>) -> Vec<Effect> {
        match changed {
            Some(value) => app.update(&Msg::SelectedIndexChanged(value)),
            None => Vec::new(),
        }
    }

    fn handle_editing_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let changed = match key.code {
            KeyCode::Char(character) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.selector.input_char(character),
            KeyCode::Backspace => app.selector.backspace(),
            KeyCode::Enter | KeyCode::Esc => app.selector.blur(),
            KeyCode::Tab => {
                let changed = app.selector.blur();
                app.focus.next();
                changed
            }
            KeyCode::BackTab => {
                let changed = app.selector.blur();
                app.focus.prev();
                changed
            }
            code => match selector_key(code) {
                Some(step) => app.selector.key(step),
                None => None,
            },
        };
        Self::notify(app, changed)
    }

    fn handle_idle_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let changed = match key.code {
            KeyCode::Char(character) if character.is_ascii_digit() || character == '-' => {
                if app.selector.focus() {
                    app.selector.input_char(character)
                } else {
                    None
                }
            }
            KeyCode::Enter => {
                app.selector.focus();
                None
            }
            KeyCode::Tab => {
                app.focus.next();
                None
            }
            KeyCode::BackTab => {
                app.focus.prev();
                None
            }
            code => match selector_key(code) {
                Some(step) => app.selector.key(step),
                None => None,
            },
        };
        Self::notify(app, changed)
    }

    fn render_stepper(frame: &mut Frame, area: Rect, label: &str, enabled: bool, app: &App) {
        th::render_button(frame, area, label, enabled, false, false, &*app.ctx.theme, Borders::ALL);
    }

    fn render_carousel(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let selector = &app.selector;
        let terminal_focused = app.f_selector.get();
        let border_style = if selector.has_error() {
            theme.error_border_style()
        } else {
            theme.border_style(terminal_focused || selector.is_focused())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(th::panel_style(theme));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let slots = selector.density().visible_count();
        let radius = (slots / 2) as i64;
        let cells = Layout::horizontal(vec![Constraint::Ratio(1, slots as u32); slots]).split(inner);
        for visible in selector.visible_values() {
            let Some(cell) = usize::try_from(visible.offset + radius).ok().and_then(|slot| cells.get(slot)) else {
                continue;
            };
            if visible.offset == 0 {
                let text = selector.display_text();
                let mut style = th::input_style(theme, !selector.has_error(), selector.is_focused());
                if selector.is_focused() && selector.is_buffer_selected() {
                    style = style.patch(theme.selection_style());
                } else if !selector.is_focused() {
                    style = theme.carousel_style(0);
                }
                if selector.is_disabled() {
                    style = style.add_modifier(Modifier::DIM);
                }
                frame.render_widget(Paragraph::new(Span::styled(format!("[{text}]"), style)).centered(), *cell);
                if selector.is_focused() {
                    let text_width = text.width() as u16 + 2;
                    let left = cell.x + cell.width.saturating_sub(text_width) / 2;
                    let cursor_x = (left + text_width.saturating_sub(1)).min(cell.right().saturating_sub(1));
                    frame.set_cursor_position((cursor_x, cell.y));
                }
            } else {
                let mut style = theme.carousel_style(visible.offset);
                if selector.is_disabled() {
                    style = style.add_modifier(Modifier::DIM);
                }
                frame.render_widget(Paragraph::new(Span::styled(visible.value.to_string(), style)).centered(), *cell);
            }
        }
    }
}

impl Component for SelectorComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.selector.is_focused() {
            Self::handle_editing_key(app, key)
        } else {
            Self::handle_idle_key(app, key)
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let pos = Position::new(mouse.column, mouse.row);
        let layout = self.layout;
        let changed = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if layout.decrement.contains(pos) => {
                app.focus.focus(&app.f_selector);
                app.selector.decrement()
            }
            MouseEventKind::Down(MouseButton::Left) if layout.increment.contains(pos) => {
                app.focus.focus(&app.f_selector);
                app.selector.increment()
            }
            MouseEventKind::Down(MouseButton::Left) if layout.carousel.contains(pos) => {
                app.focus.focus(&app.f_selector);
                if app.selector.drag_start(f64::from(mouse.column)) {
                    self.press = Some(Press {
                        column: mouse.column,
                        moved: false,
                    });
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left) if app.selector.is_dragging() => {
                if let Some(press) = self.press.as_mut()
                    && press.column != mouse.column
                {
                    press.moved = true;
                }
                app.selector.drag_move(f64::from(mouse.column))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                app.selector.drag_end();
                if let Some(press) = self.press.take()
                    && !press.moved
                    && layout.carousel.contains(pos)
                {
                    app.selector.focus();
                }
                None
            }
            MouseEventKind::ScrollUp if layout.whole.contains(pos) => app.selector.increment(),
            MouseEventKind::ScrollDown if layout.whole.contains(pos) => app.selector.decrement(),
            _ => None,
        };
        Self::notify(app, changed)
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let areas = self.get_preferred_layout(app, rect);
        let (decrement, carousel, increment, helper) = (areas[0], areas[1], areas[2], areas[3]);

        Self::render_stepper(frame, decrement, "‹", app.selector.can_decrement(), app);
        self.render_carousel(frame, carousel, app);
        Self::render_stepper(frame, increment, "›", app.selector.can_increment(), app);

        let helper_style = if app.selector.has_error() {
            app.ctx.theme.status_error()
        } else {
            app.ctx.theme.text_muted_style()
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(helper_text(&app.selector), helper_style))),
            helper,
        );

        self.layout = SelectorLayout {
            decrement,
            carousel,
            increment,
            whole: rect,
        };
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let hints: &[(&str, &str)] = if app.selector.is_focused() {
            &[("0-9", " Type  "), ("Enter/Esc", " Commit  "), ("↑/↓", " Step  ")]
        } else {
            &[
                ("←/→", " Step  "),
                ("PgUp/PgDn", " ±10  "),
                ("Home/End", " Bounds  "),
                ("Enter", " Edit  "),
            ]
        };
        th::build_hint_spans(&*app.ctx.theme, hints)
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        let [controls, helper] = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);
        let [decrement, carousel, increment] =
            Layout::horizontal([Constraint::Length(5), Constraint::Min(10), Constraint::Length(5)]).areas(controls);
        vec![decrement, carousel, increment, helper]
    }
}

fn selector_key(code: KeyCode) -> Option<SelectorKey> {
    Some(match code {
        KeyCode::Up => SelectorKey::Up,
        KeyCode::Down => SelectorKey::Down,
        KeyCode::Left => SelectorKey::Left,
        KeyCode::Right => SelectorKey::Right,
        KeyCode::PageUp => SelectorKey::PageUp,
        KeyCode::PageDown => SelectorKey::PageDown,
        KeyCode::Home => SelectorKey::Home,
        KeyCode::End => SelectorKey::End,
        _ => return None,
    })
}
