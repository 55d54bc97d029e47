//! Bounded fortune index picker.

mod selector_component;
mod state;

pub use selector_component::{INVALID_NUMBER_HELP, SelectorComponent, helper_text};
pub use state::{
    BoundedValueSelector, DEFAULT_STEP_PIXEL_SIZE, Density, DragAnchor, InteractionState, PAGE_STEP, SelectorError, SelectorKey, ValueRange,
    VisibleValue,
};
