//! UI utilities shared by the components.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const THROBBER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Braille spinner frame for animation step `index`.
pub fn throbber_frame(index: usize) -> &'static str {
    THROBBER_FRAMES[index % THROBBER_FRAMES.len()]
}

/// Truncates `text` to at most `max_width` display columns, ending with `…`
/// when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > max_width - 1 {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}

/// Centers a `width` x `height` box inside `area`, shrinking it to fit.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate_with_ellipsis("fortune", 10), "fortune");
        assert_eq!(truncate_with_ellipsis("fortune cookie", 8), "fortune…");
        assert_eq!(truncate_with_ellipsis("运气很好", 5), "运气…");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
    }

    #[test]
    fn throbber_wraps() {
        assert_eq!(throbber_frame(0), throbber_frame(10));
    }

    #[test]
    fn centered_box_fits_inside_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_box(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_box(40, 40, area), area);
    }
}
