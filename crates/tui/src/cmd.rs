//! # Command Execution Layer
//!
//! This module turns the [`Effect`]s produced by [`App::update`] into work:
//! network calls against the fortune service run as background tasks, while
//! local bookkeeping (saving preferences) happens immediately.
//!
//! ## Design
//! - [`Cmd`] is the effectful command type.
//! - [`from_effects`] translates state-driven [`Effect`]s into [`Cmd`]s.
//! - [`run_cmds`] executes them and hands back a [`CommandBatch`] that the
//!   runtime folds into its set of pending tasks.
//!
//! State updates stay pure; everything that touches the network or the disk
//! lives here.

use fortune_api::{ApiError, FortuneClient};
use fortune_types::{ApiMode, Effect, ExecOutcome, FetchResult, FortuneTarget};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::task::{JoinHandle, spawn};
use tracing::{debug, warn};

use crate::app::App;

/// Side-effectful commands executed outside of pure state updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Ask `mode`'s route how many fortunes exist.
    FetchCount(ApiMode),
    /// Fetch one fortune. Exactly one request; never retried.
    FetchFortune { api_mode: ApiMode, target: FortuneTarget },
    /// Persist the current session to the preferences file.
    SavePreferences,
}

/// A spawned request that always resolves to an outcome, even when the task
/// itself fails to join.
pub type PendingExec = BoxFuture<'static, ExecOutcome>;

/// Results of running a batch of commands.
#[derive(Default)]
pub struct CommandBatch {
    /// Outcomes already available; the runtime feeds them back right away.
    pub immediate: Vec<ExecOutcome>,
    /// Background tasks that will each resolve to one outcome.
    pub pending: Vec<PendingExec>,
}

/// Convert application [`Effect`]s into [`Cmd`] instances.
///
/// [`Effect::Quit`] has no command; the runtime acts on it directly.
pub fn from_effects(effects: Vec<Effect>) -> Vec<Cmd> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::FetchCount(mode) => Some(Cmd::FetchCount(mode)),
            Effect::FetchFortune { api_mode, target } => Some(Cmd::FetchFortune { api_mode, target }),
            Effect::SavePreferences => Some(Cmd::SavePreferences),
            Effect::Quit => None,
        })
        .collect()
}

/// Execute `commands`, spawning a task per network call.
///
/// Must be called from within a Tokio runtime.
pub fn run_cmds(app: &mut App, commands: Vec<Cmd>) -> CommandBatch {
    let mut batch = CommandBatch::default();
    for command in commands {
        debug!(?command, "running command");
        match command {
            Cmd::FetchCount(api_mode) => {
                let client = app.ctx.client.clone();
                let handle = spawn(fetch_count(client, api_mode));
                batch.pending.push(settle(handle, move |error| ExecOutcome::FortuneCount {
                    api_mode,
                    result: Err(error),
                }));
            }
            Cmd::FetchFortune { api_mode, target } => {
                let client = app.ctx.client.clone();
                let handle = spawn(fetch_fortune(client, api_mode, target));
                batch.pending.push(settle(handle, |error| ExecOutcome::Fortune(FetchResult::Failed(error))));
            }
            Cmd::SavePreferences => app.save_preferences(),
        }
    }
    batch
}

/// Convenience wrapper: translate and run in one step.
pub fn run_from_effects(app: &mut App, effects: Vec<Effect>) -> CommandBatch {
    let commands = from_effects(effects);
    run_cmds(app, commands)
}

/// Map a join failure to the outcome the request's consumer expects, so the
/// loading state it set up is always cleared.
fn settle<F>(handle: JoinHandle<ExecOutcome>, on_join_error: F) -> PendingExec
where
    F: FnOnce(String) -> ExecOutcome + Send + 'static,
{
    handle
        .map(|joined| {
            joined.unwrap_or_else(|error| {
                warn!(%error, "request task failed");
                on_join_error(format!("Request task failed: {error}"))
            })
        })
        .boxed()
}

async fn fetch_count(client: FortuneClient, api_mode: ApiMode) -> ExecOutcome {
    let result = client.fetch_count(api_mode).await.map_err(|error| {
        warn!(%error, %api_mode, "fortune count request failed");
        error.to_string()
    });
    ExecOutcome::FortuneCount { api_mode, result }
}

async fn fetch_fortune(client: FortuneClient, api_mode: ApiMode, target: FortuneTarget) -> ExecOutcome {
    let result = match client.fetch_fortune(api_mode, target).await {
        Ok(fetch) => FetchResult::Revealed(fetch.into_reveal()),
        Err(ApiError::Backpressure { status }) => FetchResult::Backpressure { status },
        Err(error) => {
            warn!(%error, %api_mode, ?target, "fortune request failed");
            FetchResult::Failed(error.to_string())
        }
    };
    ExecOutcome::Fortune(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use std::net::SocketAddr;
    use std::sync::Arc;

    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use fortune_api::ClientConfig;
    use fortune_types::{CacheStatus, SelectionMode};
    use fortune_util::UserPreferences;
    use serde_json::json;

    async fn spawn_service() -> SocketAddr {
        let router = Router::new()
            .route("/direct/fortunes/count", get(|| async { Json(json!({ "count": 3 })) }))
            .route(
                "/direct/fortune/{index}",
                get(|| async {
                    let mut headers = HeaderMap::new();
                    headers.insert("X-Cache", "HIT".parse().expect("header value"));
                    (headers, Json(json!({ "id": 2, "message": "Read the error message." }))).into_response()
                }),
            )
            .route("/api/fortune", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
            .route("/api/fortunes/count", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind service");
        let address = listener.local_addr().expect("service address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        address
    }

    fn client_for(address: SocketAddr) -> FortuneClient {
        FortuneClient::new(ClientConfig::default().with_base_url(format!("http://{address}"))).expect("client")
    }

    async fn join_all(batch: CommandBatch) -> Vec<ExecOutcome> {
        let mut outcomes = batch.immediate;
        for pending in batch.pending {
            outcomes.push(pending.await);
        }
        outcomes
    }

    #[test]
    fn quit_has_no_command() {
        let commands = from_effects(vec![Effect::Quit, Effect::SavePreferences, Effect::FetchCount(ApiMode::Sidecar)]);
        assert_eq!(commands, vec![Cmd::SavePreferences, Cmd::FetchCount(ApiMode::Sidecar)]);
    }

    #[tokio::test]
    async fn fetches_resolve_to_outcomes() {
        let address = spawn_service().await;
        let mut app = test_app();
        app.ctx.client = client_for(address);

        let batch = run_from_effects(
            &mut app,
            vec![
                Effect::FetchCount(ApiMode::Direct),
                Effect::FetchFortune {
                    api_mode: ApiMode::Direct,
                    target: FortuneTarget::Index(2),
                },
            ],
        );
        assert!(batch.immediate.is_empty());
        let outcomes = join_all(batch).await;

        assert_eq!(
            outcomes[0],
            ExecOutcome::FortuneCount {
                api_mode: ApiMode::Direct,
                result: Ok(3),
            }
        );
        match &outcomes[1] {
            ExecOutcome::Fortune(FetchResult::Revealed(reveal)) => {
                assert_eq!(reveal.id, Some(2));
                assert_eq!(reveal.message, "Read the error message.");
                assert_eq!(reveal.cache_status, CacheStatus::Hit);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn overload_and_errors_are_classified() {
        let address = spawn_service().await;
        let mut app = test_app();
        app.ctx.client = client_for(address);

        let batch = run_from_effects(
            &mut app,
            vec![
                Effect::FetchFortune {
                    api_mode: ApiMode::Sidecar,
                    target: FortuneTarget::Random,
                },
                Effect::FetchCount(ApiMode::Sidecar),
            ],
        );
        let outcomes = join_all(batch).await;

        assert_eq!(outcomes[0], ExecOutcome::Fortune(FetchResult::Backpressure { status: 503 }));
        assert!(matches!(
            &outcomes[1],
            ExecOutcome::FortuneCount { api_mode: ApiMode::Sidecar, result: Err(_) }
        ));
    }

    #[tokio::test]
    async fn failed_fortune_task_clears_loading() {
        let mut app = test_app();
        app.update(&fortune_types::Msg::RevealRequested);
        assert!(app.loading);

        let handle: JoinHandle<ExecOutcome> = spawn(std::future::pending());
        handle.abort();
        let outcome = settle(handle, |error| ExecOutcome::Fortune(FetchResult::Failed(error))).await;
        assert!(matches!(&outcome, ExecOutcome::Fortune(FetchResult::Failed(message)) if message.starts_with("Request task failed")));

        app.update(&fortune_types::Msg::ExecCompleted(Box::new(outcome)));
        assert!(!app.loading);
        assert!(!app.selector.is_disabled());
        assert!(app.fortune.error.is_some());
    }

    #[tokio::test]
    async fn save_preferences_runs_inline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let preferences = Arc::new(UserPreferences::at_path(dir.path().join("preferences.json")).expect("preferences"));
        let mut app = test_app();
        app.ctx.preferences = preferences.clone();
        app.update(&fortune_types::Msg::SelectionModeChanged(SelectionMode::Pick));

        let batch = run_from_effects(&mut app, vec![Effect::SavePreferences]);
        assert!(batch.pending.is_empty());
        assert_eq!(preferences.selection_mode(), Some(SelectionMode::Pick));
    }
}
