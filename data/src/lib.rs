pub mod chart;
pub mod config;
pub mod hover;
pub mod selection;
pub mod util;

pub use config::state::State;
pub use config::theme::Theme;
pub use selection::{Month, Selection, SelectionError};

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

pub const SAVED_STATE_PATH: &str = "saved-state.json";
const APP_DIR: &str = "tickerline";

#[derive(thiserror::Error, Debug, Clone)]
pub enum InternalError {
    #[error("Fetch error: {0}")]
    Fetch(String),
    #[error("Config error: {0}")]
    Config(String),
}

pub fn data_path(path_name: Option<&str>) -> PathBuf {
    let base = if let Ok(path) = std::env::var("TICKERLINE_DATA_PATH") {
        PathBuf::from(path)
    } else {
        dirs_next::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    };

    match path_name {
        Some(name) => base.join(name),
        None => base,
    }
}

pub fn write_json_to_file(json: &str, file_name: &str) -> Result<(), InternalError> {
    let path = data_path(Some(file_name));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| InternalError::Config(e.to_string()))?;
    }

    let mut file = File::create(&path).map_err(|e| InternalError::Config(e.to_string()))?;
    file.write_all(json.as_bytes())
        .map_err(|e| InternalError::Config(e.to_string()))?;

    Ok(())
}

pub fn read_from_file(file_name: &str) -> Result<State, InternalError> {
    let path = data_path(Some(file_name));

    let mut file = File::open(&path).map_err(|e| InternalError::Fetch(e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| InternalError::Fetch(e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| InternalError::Config(e.to_string()))
}

/// Loads the saved state, falling back to defaults when it is missing or unreadable.
pub fn load_saved_state() -> State {
    match read_from_file(SAVED_STATE_PATH) {
        Ok(state) => {
            log::info!("Loaded saved state from {SAVED_STATE_PATH}");
            state
        }
        Err(InternalError::Fetch(err)) => {
            log::info!("No saved state found ({err}), using defaults");
            State::default()
        }
        Err(err) => {
            log::warn!("Failed to parse saved state, using defaults: {err}");
            State::default()
        }
    }
}

pub fn save_state(state: &State) -> Result<(), InternalError> {
    let json =
        serde_json::to_string_pretty(state).map_err(|e| InternalError::Config(e.to_string()))?;
    write_json_to_file(&json, SAVED_STATE_PATH)
}
