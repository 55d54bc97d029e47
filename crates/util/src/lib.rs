//! Configuration and persistence helpers shared by the fortune binary and TUI.

pub mod config;
pub mod path_processing;
pub mod preferences;

pub use config::{API_MODE_ENV, LOG_PATH_ENV, api_mode_from_env, resolve_api_mode, tui_log_path};
pub use path_processing::{app_data_dir, expand_tilde};
pub use preferences::{PREFERENCES_PATH_ENV, PreferencesError, PreferencesPayload, UserPreferences};
