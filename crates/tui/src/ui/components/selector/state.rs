//! Bounded numeric value selector.
//!
//! `BoundedValueSelector` owns one integer constrained to a closed range and
//! reconciles every way the user can change it: stepper buttons, keyboard
//! steps, typed text, pointer drag and programmatic updates from the host.
//! The state is UI-agnostic; the terminal component in
//! [`super::selector_component`] only translates events into the calls below.
//!
//! Every state-changing operation returns `Option<i64>`. `Some(value)` is the
//! change notification and is produced exactly once per committed change,
//! carrying the final clamped value. `None` means the authoritative value did
//! not move.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use thiserror::Error;

/// Pointer distance that corresponds to one step while dragging.
pub const DEFAULT_STEP_PIXEL_SIZE: f64 = 40.0;
/// Step applied by the page keys.
pub const PAGE_STEP: i64 = 10;

/// Configuration errors raised at the range boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("invalid selector range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },
}

/// Closed integer range with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    min: i64,
    max: i64,
}

impl ValueRange {
    pub fn new(min: i64, max: i64) -> Result<Self, SelectorError> {
        if min > max {
            return Err(SelectorError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Index range `0..=max`, collapsing a negative `max` to zero.
    pub fn indices(max: i64) -> Self {
        Self { min: 0, max: max.max(0) }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// How many neighbouring values the carousel renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Density {
    Compact,
    #[default]
    Full,
}

impl Density {
    /// Number of values drawn in the carousel, the current one included.
    pub fn visible_count(self) -> usize {
        match self {
            Self::Compact => 3,
            Self::Full => 5,
        }
    }

    fn radius(self) -> i64 {
        match self {
            Self::Compact => 1,
            Self::Full => 2,
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compact => "compact",
            Self::Full => "full",
        })
    }
}

impl FromStr for Density {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            other => Err(format!("invalid density '{other}'; expected 'compact' or 'full'")),
        }
    }
}

/// Pointer position and value captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub start_coordinate: f64,
    pub start_value: i64,
}

/// What the user is currently doing with the selector.
///
/// Focused and Dragging are distinct variants, so a drag can never coexist
/// with an open text edit and the anchor only exists while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Focused,
    Dragging(DragAnchor),
}

/// Keyboard steps understood by [`BoundedValueSelector::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKey {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
}

/// One cell of the carousel: a value and its distance from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleValue {
    pub value: i64,
    pub offset: i64,
}

#[derive(Debug, Clone)]
pub struct BoundedValueSelector {
    value: i64,
    range: ValueRange,
    edit_buffer: String,
    has_error: bool,
    interaction: InteractionState,
    /// Set on focus so the first keystroke replaces the whole buffer.
    buffer_selected: bool,
    step_pixel_size: f64,
    density: Density,
    disabled: bool,
}

impl BoundedValueSelector {
    /// Create a selector, clamping `initial` into `[min, max]`.
    pub fn new(initial: i64, min: i64, max: i64) -> Result<Self, SelectorError> {
        Ok(Self::with_range(initial, ValueRange::new(min, max)?))
    }

    pub fn with_range(initial: i64, range: ValueRange) -> Self {
        let value = range.clamp(initial);
        Self {
            value,
            range,
            edit_buffer: value.to_string(),
            has_error: false,
            interaction: InteractionState::Idle,
            buffer_selected: false,
            step_pixel_size: DEFAULT_STEP_PIXEL_SIZE,
            density: Density::default(),
            disabled: false,
        }
    }

    /// Set the drag distance per step. Non-finite or non-positive sizes fall
    /// back to [`DEFAULT_STEP_PIXEL_SIZE`].
    pub fn with_step_pixel_size(mut self, step_pixel_size: f64) -> Self {
        self.step_pixel_size = if step_pixel_size.is_finite() && step_pixel_size > 0.0 {
            step_pixel_size
        } else {
            DEFAULT_STEP_PIXEL_SIZE
        };
        self
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    pub fn min(&self) -> i64 {
        self.range.min
    }

    pub fn max(&self) -> i64 {
        self.range.max
    }

    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    /// True while the typed text cannot be parsed as an integer.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn is_focused(&self) -> bool {
        matches!(self.interaction, InteractionState::Focused)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, InteractionState::Dragging(_))
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_buffer_selected(&self) -> bool {
        self.buffer_selected
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn set_density(&mut self, density: Density) {
        self.density = density;
    }

    pub fn step_pixel_size(&self) -> f64 {
        self.step_pixel_size
    }

    pub fn can_increment(&self) -> bool {
        !self.disabled && self.value < self.range.max
    }

    pub fn can_decrement(&self) -> bool {
        !self.disabled && self.value > self.range.min
    }

    /// Text for the centre cell: the edit buffer while editing, else the value.
    pub fn display_text(&self) -> String {
        if self.is_focused() {
            self.edit_buffer.clone()
        } else {
            self.value.to_string()
        }
    }

    /// Replace the range and re-clamp the value.
    ///
    /// An inverted range is rejected and leaves the selector untouched.
    pub fn set_range(&mut self, min: i64, max: i64) -> Result<Option<i64>, SelectorError> {
        self.range = ValueRange::new(min, max)?;
        let changed = self.commit(self.value);
        if changed.is_some() && !self.is_focused() {
            self.sync_buffer();
        }
        Ok(changed)
    }

    /// Programmatic update from the host. The value is clamped; an in-progress
    /// edit keeps its text.
    pub fn set_value(&mut self, value: i64) -> Option<i64> {
        let changed = self.commit(value);
        if !self.is_focused() {
            self.sync_buffer();
        }
        changed
    }

    /// Disabling ends any interaction: a drag is dropped and an open edit is
    /// abandoned without committing.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled && self.interaction != InteractionState::Idle {
            self.interaction = InteractionState::Idle;
            self.buffer_selected = false;
            self.sync_buffer();
        }
    }

    pub fn increment(&mut self) -> Option<i64> {
        if !self.can_increment() {
            return None;
        }
        self.commit_step(self.value + 1)
    }

    pub fn decrement(&mut self) -> Option<i64> {
        if !self.can_decrement() {
            return None;
        }
        self.commit_step(self.value - 1)
    }

    /// Keyboard channel; every key commits immediately.
    pub fn key(&mut self, key: SelectorKey) -> Option<i64> {
        if self.disabled {
            return None;
        }
        let target = match key {
            SelectorKey::Up | SelectorKey::Right => self.value.saturating_add(1),
            SelectorKey::Down | SelectorKey::Left => self.value.saturating_sub(1),
            SelectorKey::PageUp => self.value.saturating_add(PAGE_STEP),
            SelectorKey::PageDown => self.value.saturating_sub(PAGE_STEP),
            SelectorKey::Home => self.range.min,
            SelectorKey::End => self.range.max,
        };
        self.commit_step(target)
    }

    /// Open the text edit. Ends an active drag. Returns `false` when disabled.
    pub fn focus(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        if !self.is_focused() {
            self.sync_buffer();
        }
        self.interaction = InteractionState::Focused;
        self.buffer_selected = true;
        true
    }

    /// Typed-text channel. Only in-range integers commit; out-of-range numbers
    /// are kept verbatim until blur so the user can keep typing.
    pub fn set_edit_buffer(&mut self, text: impl Into<String>) -> Option<i64> {
        if self.disabled || !self.is_focused() {
            return None;
        }
        self.edit_buffer = text.into();
        self.buffer_selected = false;
        if self.edit_buffer.is_empty() {
            self.has_error = false;
            return None;
        }
        match parse_typed(&self.edit_buffer) {
            Some(parsed) => {
                self.has_error = false;
                if self.range.contains(parsed) { self.commit(parsed) } else { None }
            }
            None => {
                self.has_error = true;
                None
            }
        }
    }

    pub fn input_char(&mut self, character: char) -> Option<i64> {
        if self.disabled || !self.is_focused() {
            return None;
        }
        let next = if self.buffer_selected {
            character.to_string()
        } else {
            let mut text = self.edit_buffer.clone();
            text.push(character);
            text
        };
        self.set_edit_buffer(next)
    }

    pub fn backspace(&mut self) -> Option<i64> {
        if self.disabled || !self.is_focused() {
            return None;
        }
        let next = if self.buffer_selected {
            String::new()
        } else {
            let mut text = self.edit_buffer.clone();
            text.pop();
            text
        };
        self.set_edit_buffer(next)
    }

    /// Close the text edit and settle the buffer.
    pub fn blur(&mut self) -> Option<i64> {
        if !self.is_focused() {
            return None;
        }
        self.interaction = InteractionState::Idle;
        self.buffer_selected = false;
        match parse_typed(&self.edit_buffer) {
            Some(parsed) => {
                let changed = self.commit(parsed);
                self.sync_buffer();
                changed
            }
            None => {
                self.sync_buffer();
                None
            }
        }
    }

    /// Begin a pointer drag at `coordinate`. Rejected while disabled or editing.
    pub fn drag_start(&mut self, coordinate: f64) -> bool {
        if self.disabled || self.is_focused() || !coordinate.is_finite() {
            return false;
        }
        self.interaction = InteractionState::Dragging(DragAnchor {
            start_coordinate: coordinate,
            start_value: self.value,
        });
        true
    }

    /// Continuous commit while dragging.
    pub fn drag_move(&mut self, coordinate: f64) -> Option<i64> {
        let InteractionState::Dragging(anchor) = self.interaction else {
            return None;
        };
        let steps = ((coordinate - anchor.start_coordinate) / self.step_pixel_size).round();
        if !steps.is_finite() {
            return None;
        }
        // `as` saturates for out-of-range floats.
        let target = anchor.start_value.saturating_add(steps as i64);
        self.commit_step(target)
    }

    pub fn drag_end(&mut self) {
        if self.is_dragging() {
            self.interaction = InteractionState::Idle;
        }
    }

    /// Values around the current one that fall inside the range.
    pub fn visible_values(&self) -> Vec<VisibleValue> {
        let radius = self.density.radius();
        (-radius..=radius)
            .filter_map(|offset| {
                let value = self.value.checked_add(offset)?;
                self.range.contains(value).then_some(VisibleValue { value, offset })
            })
            .collect()
    }

    fn commit(&mut self, candidate: i64) -> Option<i64> {
        let clamped = self.range.clamp(candidate);
        if clamped == self.value {
            return None;
        }
        self.value = clamped;
        Some(clamped)
    }

    /// Commit from a discrete channel and resynchronize the buffer, so a
    /// later blur cannot resurrect stale typed text.
    fn commit_step(&mut self, candidate: i64) -> Option<i64> {
        let changed = self.commit(candidate);
        self.sync_buffer();
        changed
    }

    fn sync_buffer(&mut self) {
        self.edit_buffer = self.value.to_string();
        self.has_error = false;
    }
}

/// Parse typed text as an integer. Decimal integers too large for `i64`
/// saturate, so they behave like any other out-of-range number.
fn parse_typed(text: &str) -> Option<i64> {
    match text.trim().parse::<i64>() {
        Ok(parsed) => Some(parsed),
        Err(error) => match error.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn selector(initial: i64, min: i64, max: i64) -> BoundedValueSelector {
        BoundedValueSelector::new(initial, min, max).expect("valid range")
    }

    #[test]
    fn creation_in_range_is_exact() {
        for value in 0..=9 {
            assert_eq!(selector(value, 0, 9).value(), value);
        }
    }

    #[test]
    fn creation_out_of_range_clamps() {
        assert_eq!(selector(-4, 0, 9).value(), 0);
        assert_eq!(selector(42, 0, 9).value(), 9);
        assert_eq!(selector(42, 0, 9).edit_buffer(), "9");
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            BoundedValueSelector::new(0, 5, 1).unwrap_err(),
            SelectorError::InvalidRange { min: 5, max: 1 }
        );

        let mut selector = selector(3, 0, 9);
        assert!(selector.set_range(10, 2).is_err());
        assert_eq!(selector.range(), ValueRange::new(0, 9).expect("range"));
        assert_eq!(selector.value(), 3);
    }

    #[test]
    fn committing_the_same_value_notifies_once() {
        let mut selector = selector(2, 0, 9);
        assert_eq!(selector.set_value(5), Some(5));
        assert_eq!(selector.set_value(5), None);

        assert!(selector.focus());
        assert_eq!(selector.set_edit_buffer("7"), Some(7));
        assert_eq!(selector.set_edit_buffer("7"), None);
        assert_eq!(selector.blur(), None);
    }

    #[test]
    fn stepper_is_silent_at_bounds() {
        let mut at_max = selector(9, 0, 9);
        assert_eq!(at_max.increment(), None);
        assert_eq!(at_max.value(), 9);
        assert_eq!(at_max.decrement(), Some(8));

        let mut at_min = selector(0, 0, 9);
        assert_eq!(at_min.decrement(), None);
        assert_eq!(at_min.value(), 0);
        assert_eq!(at_min.increment(), Some(1));
    }

    #[test]
    fn keyboard_steps_and_jumps() {
        let mut selector = selector(50, 0, 99);
        assert_eq!(selector.key(SelectorKey::Up), Some(51));
        assert_eq!(selector.key(SelectorKey::Left), Some(50));
        assert_eq!(selector.key(SelectorKey::PageUp), Some(60));
        assert_eq!(selector.key(SelectorKey::PageDown), Some(50));
        assert_eq!(selector.key(SelectorKey::End), Some(99));
        assert_eq!(selector.key(SelectorKey::PageUp), None);
        assert_eq!(selector.key(SelectorKey::Home), Some(0));
        assert_eq!(selector.key(SelectorKey::PageDown), None);
        assert_eq!(selector.key(SelectorKey::Down), None);
    }

    #[test]
    fn page_step_clamps_near_bounds() {
        let mut selector = selector(95, 0, 99);
        assert_eq!(selector.key(SelectorKey::PageUp), Some(99));
    }

    #[test]
    fn typed_in_range_integer_commits_exactly() {
        let mut selector = selector(0, 0, 99);
        selector.focus();
        assert_eq!(selector.input_char('4'), Some(4));
        assert_eq!(selector.input_char('2'), Some(42));
        assert_eq!(selector.value(), 42);
        assert!(!selector.has_error());
    }

    #[test]
    fn typed_non_numeric_sets_error_and_blur_reverts() {
        let mut selector = selector(3, 0, 9);
        selector.focus();
        assert_eq!(selector.set_edit_buffer("abc"), None);
        assert!(selector.has_error());
        assert_eq!(selector.value(), 3);

        assert_eq!(selector.blur(), None);
        assert_eq!(selector.edit_buffer(), "3");
        assert!(!selector.has_error());
        assert_eq!(selector.interaction(), InteractionState::Idle);
    }

    #[test]
    fn empty_buffer_is_a_valid_transient_state() {
        let mut selector = selector(3, 0, 9);
        selector.focus();
        assert_eq!(selector.backspace(), None);
        assert_eq!(selector.edit_buffer(), "");
        assert!(!selector.has_error());
        assert_eq!(selector.value(), 3);

        assert_eq!(selector.blur(), None);
        assert_eq!(selector.edit_buffer(), "3");
    }

    #[test]
    fn out_of_range_text_is_kept_until_blur() {
        let mut selector = selector(0, 0, 9);
        selector.focus();
        assert_eq!(selector.input_char('1'), Some(1));
        assert_eq!(selector.input_char('5'), None);
        assert_eq!(selector.edit_buffer(), "15");
        assert_eq!(selector.value(), 1);
        assert!(!selector.has_error());

        assert_eq!(selector.blur(), Some(9));
        assert_eq!(selector.value(), 9);
        assert_eq!(selector.edit_buffer(), "9");
    }

    #[test]
    fn typing_past_max_then_blur_clamps() {
        let mut selector = selector(4, 0, 9);
        selector.focus();
        assert_eq!(selector.set_edit_buffer("15"), None);
        assert_eq!(selector.blur(), Some(9));
        assert_eq!(selector.edit_buffer(), "9");
    }

    #[test]
    fn integers_wider_than_i64_clamp_on_blur() {
        let mut selector = selector(3, 0, 9);
        selector.focus();
        assert_eq!(selector.set_edit_buffer("99999999999999999999"), None);
        assert!(!selector.has_error());
        assert_eq!(selector.edit_buffer(), "99999999999999999999");
        assert_eq!(selector.blur(), Some(9));
        assert_eq!(selector.edit_buffer(), "9");

        selector.focus();
        assert_eq!(selector.set_edit_buffer("-99999999999999999999"), None);
        assert!(!selector.has_error());
        assert_eq!(selector.blur(), Some(0));
        assert_eq!(selector.edit_buffer(), "0");
    }

    #[test]
    fn first_keystroke_after_focus_replaces_buffer() {
        let mut selector = selector(7, 0, 99);
        selector.focus();
        assert!(selector.is_buffer_selected());
        assert_eq!(selector.input_char('3'), Some(3));
        assert_eq!(selector.edit_buffer(), "3");
        assert!(!selector.is_buffer_selected());
    }

    #[test]
    fn negative_ranges_accept_a_leading_minus() {
        let mut selector = selector(0, -20, 20);
        selector.focus();
        assert_eq!(selector.input_char('-'), None);
        assert!(selector.has_error());
        assert_eq!(selector.input_char('5'), Some(-5));
        assert!(!selector.has_error());
    }

    #[test]
    fn drag_moves_by_rounded_steps() {
        let mut selector = selector(5, 0, 99).with_step_pixel_size(30.0);
        assert!(selector.drag_start(100.0));
        assert_eq!(selector.drag_move(195.0), Some(8));
        assert_eq!(selector.edit_buffer(), "8");
        assert_eq!(selector.drag_move(190.0), None);
        assert_eq!(selector.drag_move(40.0), Some(3));
        selector.drag_end();
        assert_eq!(selector.interaction(), InteractionState::Idle);
        assert_eq!(selector.drag_move(400.0), None);
    }

    #[test]
    fn drag_clamps_to_range() {
        let mut selector = selector(5, 0, 6).with_step_pixel_size(30.0);
        selector.drag_start(0.0);
        assert_eq!(selector.drag_move(95.0), Some(6));
        assert_eq!(selector.drag_move(-1_000.0), Some(0));
    }

    #[test]
    fn drag_is_rejected_while_focused() {
        let mut selector = selector(5, 0, 9);
        selector.focus();
        assert!(!selector.drag_start(10.0));
        assert!(selector.is_focused());
        assert_eq!(selector.drag_move(500.0), None);
    }

    #[test]
    fn focusing_ends_a_drag() {
        let mut selector = selector(5, 0, 9);
        selector.drag_start(10.0);
        assert!(selector.focus());
        assert!(selector.is_focused());
        assert!(!selector.is_dragging());
    }

    #[test]
    fn range_shrink_reclamps_once() {
        let mut selector = selector(7, 0, 9);
        assert_eq!(selector.set_range(0, 5), Ok(Some(5)));
        assert_eq!(selector.value(), 5);
        assert_eq!(selector.edit_buffer(), "5");
        assert_eq!(selector.set_range(0, 5), Ok(None));
    }

    #[test]
    fn range_change_while_editing_keeps_typed_text() {
        let mut selector = selector(7, 0, 9);
        selector.focus();
        selector.set_edit_buffer("8");
        assert_eq!(selector.set_range(0, 5), Ok(Some(5)));
        assert_eq!(selector.edit_buffer(), "8");
        assert_eq!(selector.blur(), None);
        assert_eq!(selector.edit_buffer(), "5");
    }

    #[test]
    fn step_while_editing_resyncs_buffer() {
        let mut selector = selector(3, 0, 9);
        selector.focus();
        selector.set_edit_buffer("oops");
        assert_eq!(selector.increment(), Some(4));
        assert_eq!(selector.edit_buffer(), "4");
        assert!(!selector.has_error());
        assert_eq!(selector.blur(), None);
        assert_eq!(selector.value(), 4);
    }

    #[test]
    fn disabled_blocks_every_channel() {
        let mut selector = selector(5, 0, 9).with_disabled(true);
        assert_eq!(selector.increment(), None);
        assert_eq!(selector.decrement(), None);
        assert_eq!(selector.key(SelectorKey::End), None);
        assert!(!selector.drag_start(0.0));
        assert_eq!(selector.drag_move(300.0), None);
        assert!(!selector.focus());
        assert_eq!(selector.set_edit_buffer("7"), None);
        assert_eq!(selector.input_char('7'), None);
        assert_eq!(selector.blur(), None);
        assert_eq!(selector.value(), 5);
    }

    #[test]
    fn disabling_abandons_interaction_without_commit() {
        let mut selector = selector(5, 0, 20);
        selector.focus();
        selector.set_edit_buffer("25");
        selector.set_disabled(true);
        assert_eq!(selector.interaction(), InteractionState::Idle);
        assert_eq!(selector.edit_buffer(), "5");
        assert_eq!(selector.value(), 5);

        selector.set_disabled(false);
        selector.drag_start(0.0);
        selector.set_disabled(true);
        assert!(!selector.is_dragging());
    }

    #[test]
    fn visible_values_follow_density_and_range() {
        let full = selector(5, 0, 9);
        let values: Vec<i64> = full.visible_values().iter().map(|cell| cell.value).collect();
        assert_eq!(values, vec![3, 4, 5, 6, 7]);

        let compact = selector(0, 0, 9).with_density(Density::Compact);
        assert_eq!(
            compact.visible_values(),
            vec![VisibleValue { value: 0, offset: 0 }, VisibleValue { value: 1, offset: 1 }]
        );
        assert_eq!(Density::Compact.visible_count(), 3);
        assert_eq!(Density::Full.visible_count(), 5);
    }

    #[test]
    fn invalid_step_size_falls_back_to_default() {
        assert_eq!(selector(0, 0, 1).with_step_pixel_size(0.0).step_pixel_size(), DEFAULT_STEP_PIXEL_SIZE);
        assert_eq!(selector(0, 0, 1).with_step_pixel_size(f64::NAN).step_pixel_size(), DEFAULT_STEP_PIXEL_SIZE);
        assert_eq!(selector(0, 0, 1).with_step_pixel_size(3.0).step_pixel_size(), 3.0);
    }

    #[test]
    fn density_parses_from_text() {
        assert_eq!("Compact".parse::<Density>(), Ok(Density::Compact));
        assert_eq!("full".parse::<Density>(), Ok(Density::Full));
        assert!("cozy".parse::<Density>().is_err());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Increment,
        Decrement,
        Key(SelectorKey),
        Focus,
        Type(String),
        Char(char),
        Backspace,
        Blur,
        DragStart(f64),
        DragMove(f64),
        DragEnd,
        SetValue(i64),
        SetRange(i64, i64),
    }

    fn key_strategy() -> impl Strategy<Value = SelectorKey> {
        prop_oneof![
            Just(SelectorKey::Up),
            Just(SelectorKey::Down),
            Just(SelectorKey::Left),
            Just(SelectorKey::Right),
            Just(SelectorKey::PageUp),
            Just(SelectorKey::PageDown),
            Just(SelectorKey::Home),
            Just(SelectorKey::End),
        ]
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Increment),
            Just(Op::Decrement),
            key_strategy().prop_map(Op::Key),
            Just(Op::Focus),
            "[-0-9a-z]{0,4}".prop_map(Op::Type),
            prop::char::range('0', '9').prop_map(Op::Char),
            Just(Op::Backspace),
            Just(Op::Blur),
            (-500.0f64..500.0).prop_map(Op::DragStart),
            (-500.0f64..500.0).prop_map(Op::DragMove),
            Just(Op::DragEnd),
            (-200i64..200).prop_map(Op::SetValue),
            (-100i64..100, 0i64..100).prop_map(|(min, span)| Op::SetRange(min, min + span)),
        ]
    }

    proptest! {
        #[test]
        fn creation_always_clamps(initial in any::<i64>(), min in -1_000i64..1_000, span in 0i64..1_000) {
            let selector = BoundedValueSelector::new(initial, min, min + span).expect("valid range");
            prop_assert_eq!(selector.value(), initial.clamp(min, min + span));
        }

        #[test]
        fn value_never_leaves_range(ops in prop::collection::vec(op_strategy(), 1..60)) {
            let mut selector = selector(0, 0, 50).with_step_pixel_size(3.0);
            let mut last = selector.value();
            for op in ops {
                let notified = match op {
                    Op::Increment => selector.increment(),
                    Op::Decrement => selector.decrement(),
                    Op::Key(key) => selector.key(key),
                    Op::Focus => { selector.focus(); None }
                    Op::Type(text) => selector.set_edit_buffer(text),
                    Op::Char(character) => selector.input_char(character),
                    Op::Backspace => selector.backspace(),
                    Op::Blur => selector.blur(),
                    Op::DragStart(coordinate) => { selector.drag_start(coordinate); None }
                    Op::DragMove(coordinate) => selector.drag_move(coordinate),
                    Op::DragEnd => { selector.drag_end(); None }
                    Op::SetValue(value) => selector.set_value(value),
                    Op::SetRange(min, max) => selector.set_range(min, max).expect("generated ranges are ordered"),
                };
                prop_assert!(selector.range().contains(selector.value()));
                match notified {
                    Some(value) => {
                        prop_assert_ne!(value, last);
                        prop_assert_eq!(value, selector.value());
                    }
                    None => prop_assert_eq!(selector.value(), last),
                }
                if !selector.is_focused() {
                    prop_assert_eq!(selector.edit_buffer(), selector.value().to_string());
                    prop_assert!(!selector.has_error());
                }
                last = selector.value();
            }
        }
    }
}
