//! Application state and logic for the fortune TUI.
//!
//! This module contains the main application state and the message handling
//! that ties the selector, the API toggles and the fortune panel together. The
//! state is mutated only through [`App::update`]; side effects are returned as
//! [`Effect`]s and executed by [`crate::cmd`].

use std::rc::Rc;
use std::sync::Arc;

use fortune_api::FortuneClient;
use fortune_types::{ApiMode, Effect, ExecOutcome, FetchResult, FortuneTarget, Msg, SelectionMode};
use fortune_util::UserPreferences;
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::ui::components::controls::ControlsState;
use crate::ui::components::fortune::FortuneState;
use crate::ui::components::logs::LogsState;
use crate::ui::components::selector::{BoundedValueSelector, Density, ValueRange};
use crate::ui::theme::{self, Theme};

/// Count assumed until the service reports one, and when it reports zero or fails.
pub const FALLBACK_FORTUNE_COUNT: u64 = 100;
/// Terminal columns that make up one drag step on the carousel.
pub const TERMINAL_CELLS_PER_STEP: f64 = 3.0;
/// Warning shown when the service answers 429 or 503.
pub const BACKPRESSURE_NOTICE: &str = "Service is under heavy load. Please try again in a moment.";

const SPINNER_FRAMES: usize = 10;

/// Launch settings resolved by the binary before the TUI starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuiOptions {
    pub api_mode: ApiMode,
    pub selection_mode: SelectionMode,
    pub initial_index: i64,
    pub density: Density,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            api_mode: ApiMode::default(),
            selection_mode: SelectionMode::default(),
            initial_index: 0,
            density: Density::default(),
        }
    }
}

/// Cross-cutting shared context owned by the App.
///
/// Holds runtime-wide objects like the HTTP client, the preferences store and
/// the active theme.
#[derive(Debug)]
pub struct SharedCtx {
    pub client: FortuneClient,
    pub preferences: Arc<UserPreferences>,
    pub theme: Box<dyn Theme>,
    pub theme_id: &'static str,
}

impl SharedCtx {
    pub fn new(client: FortuneClient, preferences: Arc<UserPreferences>) -> Self {
        let loaded = theme::load(preferences.preferred_theme().as_deref());
        Self {
            client,
            preferences,
            theme: loaded.theme,
            theme_id: loaded.definition.id,
        }
    }
}

pub struct App {
    /// Shared, cross-cutting context (client, preferences, theme)
    pub ctx: SharedCtx,
    /// rat-focus tree rebuilt before each render
    pub focus: Rc<Focus>,
    /// Mode toggles and the reveal/another buttons
    pub controls: ControlsState,
    /// The fortune index picker
    pub selector: BoundedValueSelector,
    /// Terminal focus for the picker; separate from its text-edit state
    pub f_selector: FocusFlag,
    /// Revealed fortune, error or backpressure notice
    pub fortune: FortuneState,
    /// Application logs and status messages
    pub logs: LogsState,
    /// Count reported for the active API mode, once known
    pub fortune_count: Option<u64>,
    /// A fortune request is in flight
    pub loading: bool,
    /// Any background request is in flight
    pub executing: bool,
    /// Animation frame for the throbber
    pub throbber_idx: usize,
    container_focus: FocusFlag,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("controls", &self.controls)
            .field("selector", &self.selector)
            .field("fortune", &self.fortune)
            .field("fortune_count", &self.fortune_count)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(ctx: SharedCtx, options: TuiOptions) -> Self {
        let range = ValueRange::indices(max_index_for(FALLBACK_FORTUNE_COUNT));
        let selector = BoundedValueSelector::with_range(options.initial_index, range)
            .with_step_pixel_size(TERMINAL_CELLS_PER_STEP)
            .with_density(options.density);

        let mut app = Self {
            ctx,
            focus: Rc::default(),
            controls: ControlsState::new(options.api_mode, options.selection_mode),
            selector,
            f_selector: FocusFlag::named("fortune.selector"),
            fortune: FortuneState::default(),
            logs: LogsState::default(),
            fortune_count: None,
            loading: false,
            executing: false,
            throbber_idx: 0,
            container_focus: FocusFlag::named("fortune.root"),
        };
        app.focus = Rc::new(FocusBuilder::build_for(&app));
        app
    }

    /// Effects to run once the event loop is up.
    pub fn initial_effects(&self) -> Vec<Effect> {
        vec![Effect::FetchCount(self.controls.api_mode)]
    }

    pub fn api_mode(&self) -> ApiMode {
        self.controls.api_mode
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.controls.selection_mode
    }

    /// The picker is shown in Pick mode until a fortune is loading or revealed.
    pub fn selector_visible(&self) -> bool {
        self.controls.selection_mode == SelectionMode::Pick && !self.loading && !self.fortune.has_outcome()
    }

    /// Whether anything on screen is animating.
    pub fn needs_animation(&self) -> bool {
        self.loading || self.executing
    }

    /// Append a line to the in-app log panel.
    pub fn append_log_message(&mut self, message: impl Into<String>) {
        self.logs.push(message.into());
    }

    /// Updates the application state based on a message.
    ///
    /// Returns the side effects the runtime should execute.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        let mut effects = Vec::new();
        match msg {
            Msg::Tick => {
                if self.needs_animation() {
                    self.throbber_idx = (self.throbber_idx + 1) % SPINNER_FRAMES;
                }
            }
            Msg::Resize(..) => {}
            Msg::ExecCompleted(outcome) => self.apply_outcome(outcome),
            Msg::SelectionModeChanged(mode) => {
                if self.controls.selection_mode != *mode {
                    self.controls.selection_mode = *mode;
                    self.fortune.clear();
                    effects.push(Effect::SavePreferences);
                }
            }
            Msg::ApiModeToggled => {
                let mode = self.controls.api_mode.toggled();
                self.controls.api_mode = mode;
                self.fortune_count = None;
                self.fortune.clear();
                self.append_log_message(format!("Switched to {mode} API ({})", mode.base_path()));
                effects.push(Effect::FetchCount(mode));
                effects.push(Effect::SavePreferences);
            }
            Msg::RevealRequested => effects.extend(self.request_reveal()),
            Msg::AnotherFortune => self.fortune.clear(),
            Msg::FortuneIdClicked(id) => {
                self.controls.selection_mode = SelectionMode::Pick;
                if let Some(value) = self.selector.set_value(*id) {
                    debug!(value, "selector moved to clicked fortune");
                }
                self.fortune.clear();
                effects.push(Effect::SavePreferences);
            }
            Msg::SelectedIndexChanged(value) => {
                debug!(value, "selected fortune index changed");
            }
        }
        effects
    }

    fn request_reveal(&mut self) -> Vec<Effect> {
        if self.loading {
            return Vec::new();
        }
        if let Some(value) = self.selector.blur() {
            debug!(value, "selector committed before reveal");
        }
        let target = match self.controls.selection_mode {
            SelectionMode::Random => FortuneTarget::Random,
            SelectionMode::Pick => FortuneTarget::Index(self.selector.value()),
        };
        self.loading = true;
        self.throbber_idx = 0;
        self.fortune.clear();
        self.selector.set_disabled(true);
        vec![Effect::FetchFortune {
            api_mode: self.controls.api_mode,
            target,
        }]
    }

    fn apply_outcome(&mut self, outcome: &ExecOutcome) {
        match outcome {
            ExecOutcome::FortuneCount { api_mode, result } => self.apply_count(*api_mode, result),
            ExecOutcome::Fortune(result) => self.apply_fortune(result),
            ExecOutcome::Log(line) => self.append_log_message(line.clone()),
        }
    }

    fn apply_count(&mut self, api_mode: ApiMode, result: &Result<u64, String>) {
        if api_mode != self.controls.api_mode {
            debug!(%api_mode, "ignoring count for inactive api mode");
            return;
        }
        let count = match result {
            Ok(0) => {
                warn!("service reported zero fortunes; assuming {FALLBACK_FORTUNE_COUNT}");
                FALLBACK_FORTUNE_COUNT
            }
            Ok(count) => {
                self.append_log_message(format!("{count} fortunes available via {api_mode}"));
                *count
            }
            Err(error) => {
                self.append_log_message(format!("Could not load fortune count: {error}"));
                FALLBACK_FORTUNE_COUNT
            }
        };
        self.fortune_count = Some(count);
        match self.selector.set_range(0, max_index_for(count)) {
            Ok(Some(value)) => debug!(value, "selector re-clamped to new range"),
            Ok(None) => {}
            Err(error) => warn!(%error, "rejected selector range"),
        }
    }

    fn apply_fortune(&mut self, result: &FetchResult) {
        if !self.loading {
            debug!("ignoring fortune result with no request in flight");
            return;
        }
        self.loading = false;
        self.selector.set_disabled(false);
        match result {
            FetchResult::Revealed(reveal) => {
                info!(
                    id = ?reveal.id,
                    request_ms = reveal.request_ms,
                    cache = %reveal.cache_status,
                    "fortune revealed"
                );
                let id = reveal.id.map(|id| format!(" #{id}")).unwrap_or_default();
                self.append_log_message(format!(
                    "Fortune{id} in {} ms (cache {})",
                    reveal.request_ms, reveal.cache_status
                ));
                self.fortune.reveal = Some(reveal.clone());
            }
            FetchResult::Backpressure { status } => {
                self.append_log_message(format!("Service busy (HTTP {status}); not retrying"));
                self.fortune.notice = Some(BACKPRESSURE_NOTICE.to_string());
            }
            FetchResult::Failed(message) => {
                self.append_log_message(format!("Error: {message}"));
                self.fortune.error = Some(message.clone());
            }
        }
    }

    /// Persist the session so the next launch starts where this one ended.
    pub fn save_preferences(&self) {
        if let Err(error) =
            self.ctx
                .preferences
                .record_session(self.controls.api_mode, self.controls.selection_mode, self.selector.value())
        {
            warn!(%error, "failed to save preferences");
        }
    }
}

/// Highest selectable index for `count` fortunes.
pub fn max_index_for(count: u64) -> i64 {
    i64::try_from(count.max(1) - 1).unwrap_or(i64::MAX)
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.widget(&self.controls);
        if self.selector_visible() {
            builder.leaf_widget(&self.f_selector);
        }
        builder.widget(&self.fortune);
        builder.widget(&self.logs);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

/// App wired to an unreachable local client and an in-memory preferences store.
#[cfg(test)]
pub(crate) fn test_app() -> App {
    let client = FortuneClient::new(fortune_api::ClientConfig::default()).expect("client");
    let ctx = SharedCtx::new(client, Arc::new(UserPreferences::ephemeral()));
    App::new(ctx, TuiOptions::default())
}
