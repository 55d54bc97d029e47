mod controls_component;
mod state;

pub use controls_component::ControlsComponent;
pub use state::ControlsState;
