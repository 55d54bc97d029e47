use std::fs::{self, File};
use std::io;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fortune_api::{ApiError, ClientConfig, FortuneClient};
use fortune_tui::{Density, TuiOptions};
use fortune_types::{ApiMode, FortuneTarget};
use fortune_util::{UserPreferences, resolve_api_mode, tui_log_path};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Terminal client for the dev fortune cookie service.
#[derive(Debug, Parser)]
#[command(name = "fortune", version, about)]
struct Cli {
    /// Service base URL (overrides FORTUNE_API_BASE).
    #[arg(long, global = true, value_name = "URL")]
    api_base: Option<String>,

    /// Route to call: `direct` or `sidecar` (overrides FORTUNE_API_MODE).
    #[arg(long, global = true, value_name = "MODE")]
    mode: Option<ApiMode>,

    /// How many neighbouring values the selector shows.
    #[arg(long, value_name = "DENSITY", default_value_t = Density::Full)]
    density: Density,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print how many fortunes the service holds.
    Count,
    /// Fetch one fortune, random unless an index is given.
    Fetch {
        #[arg(long, allow_negative_numbers = true)]
        index: Option<i64>,
    },
    /// Check that the service is up.
    Health,
    /// Call the intentionally unreliable endpoint once.
    Flaky,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let in_tui = cli.command.is_none();
    init_tracing(in_tui);

    let client = build_client(cli.api_base.as_deref())?;
    let preferences = Arc::new(open_preferences());

    match cli.command {
        None => {
            let options = tui_options(&cli, &preferences);
            info!(api_base = client.base_url(), api_mode = %options.api_mode, "starting TUI");
            fortune_tui::run(client, preferences, options).await
        }
        Some(command) => {
            let mode = resolve_api_mode(cli.mode, preferences.api_mode());
            run_command(&client, mode, command).await
        }
    }
}

/// Logs go to a file while the TUI owns the terminal, to stderr otherwise.
fn init_tracing(in_tui: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if !in_tui {
        let _ = builder.with_writer(io::stderr).try_init();
        return;
    }

    let path = tui_log_path();
    let file = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| File::options().create(true).append(true).open(&path));
    match file {
        Ok(file) => {
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        Err(_) => {
            let _ = builder.with_writer(io::sink).try_init();
        }
    }
}

fn build_client(api_base: Option<&str>) -> Result<FortuneClient> {
    let mut config = ClientConfig::from_env();
    if let Some(base) = api_base {
        config = config.with_base_url(base);
    }
    FortuneClient::new(config).context("failed to configure the fortune service client")
}

fn open_preferences() -> UserPreferences {
    UserPreferences::new().unwrap_or_else(|error| {
        warn!(%error, "preferences unavailable; using an in-memory store");
        UserPreferences::ephemeral()
    })
}

/// Layer CLI flags, environment and saved preferences into launch settings.
fn tui_options(cli: &Cli, preferences: &UserPreferences) -> TuiOptions {
    TuiOptions {
        api_mode: resolve_api_mode(cli.mode, preferences.api_mode()),
        selection_mode: preferences.selection_mode().unwrap_or_default(),
        initial_index: preferences.last_index().unwrap_or(0),
        density: cli.density,
    }
}

#[derive(Debug, Serialize)]
struct CountOutput {
    mode: ApiMode,
    count: u64,
}

async fn run_command(client: &FortuneClient, mode: ApiMode, command: Command) -> Result<()> {
    match command {
        Command::Count => {
            let count = client.fetch_count(mode).await.map_err(report)?;
            print_json(&CountOutput { mode, count })
        }
        Command::Fetch { index } => {
            let target = index.map_or(FortuneTarget::Random, FortuneTarget::Index);
            let fetched = client.fetch_fortune(mode, target).await.map_err(report)?;
            print_json(&fetched.into_reveal())
        }
        Command::Health => print_json(&client.health().await.map_err(report)?),
        Command::Flaky => print_json(&client.flaky(mode).await.map_err(report)?),
    }
}

fn report(error: ApiError) -> anyhow::Error {
    if error.is_backpressure() {
        warn!(%error, "service shed the request; not retrying");
        anyhow::Error::new(error).context("Service is under heavy load. Please try again in a moment.")
    } else {
        anyhow::Error::new(error)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortune_types::SelectionMode;

    #[test]
    fn no_subcommand_launches_tui_with_flags() {
        let cli = Cli::try_parse_from(["fortune", "--mode", "sidecar", "--density", "compact"]).expect("parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.mode, Some(ApiMode::Sidecar));
        assert_eq!(cli.density, Density::Compact);
    }

    #[test]
    fn fetch_accepts_index_and_global_flags() {
        let cli = Cli::try_parse_from(["fortune", "fetch", "--index", "7", "--api-base", "http://127.0.0.1:9000"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::Fetch { index: Some(7) })));
        assert_eq!(cli.api_base.as_deref(), Some("http://127.0.0.1:9000"));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["fortune", "--mode", "carrier-pigeon"]).is_err());
    }

    #[test]
    fn tui_options_restore_saved_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let preferences = UserPreferences::at_path(dir.path().join("preferences.json")).expect("preferences");
        preferences
            .record_session(ApiMode::Sidecar, SelectionMode::Pick, 42)
            .expect("save");
        let cli = Cli::try_parse_from(["fortune"]).expect("parse");

        let options = temp_env::with_var_unset(fortune_util::API_MODE_ENV, || tui_options(&cli, &preferences));
        assert_eq!(options.api_mode, ApiMode::Sidecar);
        assert_eq!(options.selection_mode, SelectionMode::Pick);
        assert_eq!(options.initial_index, 42);
        assert_eq!(options.density, Density::Full);
    }

    #[test]
    fn backpressure_is_reported_with_notice() {
        let error = report(ApiError::Backpressure { status: 429 });
        assert!(error.to_string().contains("heavy load"));
    }
}
