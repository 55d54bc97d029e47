//! Environment-driven launch configuration.
//!
//! Values are layered in a fixed order: explicit command-line values first,
//! then environment variables, then saved preferences, then built-in defaults.

use std::env;
use std::path::PathBuf;

use fortune_types::ApiMode;
use tracing::warn;

use crate::path_processing::{app_data_dir, expand_tilde};

/// Environment variable selecting the initial API route (`direct` or `sidecar`).
pub const API_MODE_ENV: &str = "FORTUNE_API_MODE";
/// Environment variable overriding the TUI log file location.
pub const LOG_PATH_ENV: &str = "FORTUNE_TUI_LOG_PATH";
/// Log file name used under the data dir.
pub const LOG_FILE_NAME: &str = "tui.log";

/// API mode requested through `FORTUNE_API_MODE`, if set to something valid.
pub fn api_mode_from_env() -> Option<ApiMode> {
    let raw = env::var(API_MODE_ENV).ok()?;
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse::<ApiMode>() {
        Ok(mode) => Some(mode),
        Err(error) => {
            warn!(value = %raw, %error, "ignoring {API_MODE_ENV}");
            None
        }
    }
}

/// Pick the starting API mode.
pub fn resolve_api_mode(cli: Option<ApiMode>, saved: Option<ApiMode>) -> ApiMode {
    cli.or_else(api_mode_from_env).or(saved).unwrap_or_default()
}

/// Where the TUI writes its tracing output.
pub fn tui_log_path() -> PathBuf {
    env::var(LOG_PATH_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(|value| expand_tilde(&value))
        .unwrap_or_else(|| app_data_dir().join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_beats_environment_and_preferences() {
        temp_env::with_var(API_MODE_ENV, Some("direct"), || {
            assert_eq!(resolve_api_mode(Some(ApiMode::Sidecar), Some(ApiMode::Direct)), ApiMode::Sidecar);
        });
    }

    #[test]
    fn environment_beats_preferences() {
        temp_env::with_var(API_MODE_ENV, Some("sidecar"), || {
            assert_eq!(resolve_api_mode(None, Some(ApiMode::Direct)), ApiMode::Sidecar);
        });
    }

    #[test]
    fn invalid_environment_falls_through() {
        temp_env::with_var(API_MODE_ENV, Some("carrier-pigeon"), || {
            assert_eq!(api_mode_from_env(), None);
            assert_eq!(resolve_api_mode(None, Some(ApiMode::Sidecar)), ApiMode::Sidecar);
        });
        temp_env::with_var_unset(API_MODE_ENV, || {
            assert_eq!(resolve_api_mode(None, None), ApiMode::Direct);
        });
    }

    #[test]
    fn log_path_honours_override() {
        temp_env::with_var(LOG_PATH_ENV, Some("/tmp/fortune-test.log"), || {
            assert_eq!(tui_log_path(), PathBuf::from("/tmp/fortune-test.log"));
        });
        temp_env::with_var_unset(LOG_PATH_ENV, || {
            assert!(tui_log_path().ends_with(LOG_FILE_NAME));
        });
    }
}
