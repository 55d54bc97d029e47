//! # Fortune Cookie TUI
//!
//! A terminal client for the fortune cookie service built on Ratatui. The
//! screen offers:
//!
//! - A Random / Pick-by-number toggle and a Direct / Sidecar API toggle
//! - A bounded value selector for picking a fortune index by keyboard, typed
//!   number, stepper buttons, mouse wheel or horizontal drag
//! - The revealed fortune with request latency and cache status
//! - A scrollable in-app log of requests and failures
//!
//! ## Architecture
//!
//! State lives in `App` and changes only through `App::update`, which returns
//! effects. The runtime executes those effects (HTTP calls, saving
//! preferences) and feeds results back as messages. Each on-screen element is
//! a component that handles its own input and rendering.

mod app;
mod cmd;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use fortune_api::FortuneClient;
use fortune_util::UserPreferences;

pub use app::{BACKPRESSURE_NOTICE, FALLBACK_FORTUNE_COUNT, TuiOptions, max_index_for};
pub use ui::components::selector::{
    BoundedValueSelector, DEFAULT_STEP_PIXEL_SIZE, Density, DragAnchor, InteractionState, PAGE_STEP, SelectorError, SelectorKey, ValueRange,
    VisibleValue,
};

/// Runs the TUI until the user quits.
///
/// Sets up the terminal, requests the fortune count for the starting API
/// mode, and runs the event loop. The session (API mode, selection mode,
/// selected index) is written to `preferences` on the way out.
///
/// # Errors
///
/// Terminal setup or teardown failures.
pub async fn run(client: FortuneClient, preferences: Arc<UserPreferences>, options: TuiOptions) -> Result<()> {
    let ctx = app::SharedCtx::new(client, preferences);
    let app = app::App::new(ctx, options);
    ui::runtime::run_app(app).await
}
