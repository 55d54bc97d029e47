use std::path::PathBuf;

use dirs_next::{data_local_dir, home_dir};

/// Directory name used under the platform config and data dirs.
pub const APP_DIR_NAME: &str = "fortune";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if p == "~" {
        return home();
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home().join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home().join(rest);
    }
    PathBuf::from(p)
}

/// Per-user data directory for the application, e.g. `~/.local/share/fortune`.
pub fn app_data_dir() -> PathBuf {
    data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_plain_paths_alone() {
        assert_eq!(expand_tilde(" /tmp/fortune.json "), PathBuf::from("/tmp/fortune.json"));
        assert_eq!(expand_tilde("relative/prefs.json"), PathBuf::from("relative/prefs.json"));
    }

    #[test]
    fn expands_home_prefix() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/prefs.json"), home.join("prefs.json"));
    }

    #[test]
    fn data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with(APP_DIR_NAME));
    }
}
