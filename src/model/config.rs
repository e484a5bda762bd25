use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default name of the persistence file, relative to the working directory
pub const DEFAULT_TASKS_FILE: &str = "tasks.txt";

/// Configuration from tasklist.toml. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the persistence file
    #[serde(default = "default_tasks_file")]
    pub file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            file: default_tasks_file(),
        }
    }
}

fn default_tasks_file() -> String {
    DEFAULT_TASKS_FILE.to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the key hint line under the buttons
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides, e.g. `pending = "#FF474C"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}
