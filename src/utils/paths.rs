use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".balance_projector";
const SPEC_FILE: &str = "spec.json";

/// Returns the application-specific data directory, defaulting to `~/.balance_projector`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("BALANCE_PROJECTOR_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Specification file used when no explicit path is supplied.
pub fn default_spec_file() -> PathBuf {
    app_data_dir().join(SPEC_FILE)
}
