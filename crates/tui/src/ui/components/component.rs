//! Component system for the fortune TUI.
//!
//! Components are self-contained UI elements that translate terminal input
//! into state changes on [`App`] and render themselves into a provided `Rect`.
//! They report side effects back to the runtime as [`Effect`]s instead of
//! performing I/O.

use crossterm::event::{KeyEvent, MouseEvent};
use fortune_types::{Effect, Msg};
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;

/// A trait representing a UI component with its own state and behavior.
///
/// Component state that must survive a rebuild of the view (values, focus
/// flags) lives on [`App`]; the component itself only keeps layout caches
/// used for mouse hit-testing.
pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events. Components hit-test against the areas they
    /// cached during the last render.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into `rect`.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hints strip while this component is focused.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Split `area` into the regions this component renders into.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}
