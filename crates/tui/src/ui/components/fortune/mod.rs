mod fortune_component;
mod state;

pub use fortune_component::FortuneComponent;
pub use state::FortuneState;
