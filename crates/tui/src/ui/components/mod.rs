//! UI components: controls, selector, fortune panel, logs.

pub mod component;
pub mod controls;
pub mod fortune;
pub mod logs;
pub mod selector;

pub(crate) use component::Component;
pub use controls::ControlsComponent;
pub use fortune::FortuneComponent;
pub use logs::LogsComponent;
pub use selector::SelectorComponent;
