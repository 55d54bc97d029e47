//! Shared type definitions for the fortune client and terminal UI.
//!
//! Wire payloads live in [`fortune`]; the message and effect vocabulary used by
//! the TUI event loop lives at the crate root so the API layer and the UI can
//! agree on it without depending on each other.

pub mod fortune;

pub use fortune::{
    ApiMode, CacheStatus, EMPTY_FORTUNE_TEXT, FlakyResponse, FortuneCountResponse, FortuneResponse, FortuneReveal, FortuneTarget,
    HealthResponse, ParseApiModeError, SelectionMode,
};

/// Result of a fortune request as seen by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// The fortune was fetched and should be revealed.
    Revealed(FortuneReveal),
    /// The service answered 429 or 503. Shown as a warning, never retried.
    Backpressure { status: u16 },
    /// Any other failure, rendered as an error message.
    Failed(String),
}

/// Outcome of a background request executed on behalf of an [`Effect`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExecOutcome {
    /// The fortune count for `api_mode` was requested.
    FortuneCount { api_mode: ApiMode, result: Result<u64, String> },
    /// A fortune request completed.
    Fortune(FetchResult),
    /// A plain log line with nothing else to update.
    Log(String),
}

/// Messages that can be sent to update the application state.
///
/// This enum defines the user actions and system events that can trigger
/// state changes in the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Periodic UI tick (throbbers)
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// Background execution completed with outcome
    ExecCompleted(Box<ExecOutcome>),
    /// Switch between random and pick-by-number
    SelectionModeChanged(SelectionMode),
    /// Flip between the direct and sidecar routes
    ApiModeToggled,
    /// Crack the cookie
    RevealRequested,
    /// Dismiss the current fortune (or error) and start over
    AnotherFortune,
    /// The `#id` of a revealed fortune was activated
    FortuneIdClicked(i64),
    /// The selector committed a new value
    SelectedIndexChanged(i64),
}

/// Side effects that can be triggered by state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load the number of fortunes available on the given route
    FetchCount(ApiMode),
    /// Fetch a fortune
    FetchFortune { api_mode: ApiMode, target: FortuneTarget },
    /// Persist the current preferences
    SavePreferences,
    /// Leave the TUI
    Quit,
}
