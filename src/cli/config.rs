// ABOUTME: Configuration management for the nblaunch application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::server::LaunchOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Browser used when the matched server record has no preference;
    /// empty means the system default
    #[serde(default)]
    pub browser: Option<String>,

    /// Runtime directory to scan for running-server records
    #[serde(default)]
    pub runtime_dir: Option<PathBuf>,

    /// Command used to start a new notebook server when none is running
    #[serde(default = "default_server_command")]
    pub server_command: Vec<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_server_command() -> Vec<String> {
    vec![
        "jupyter".to_string(),
        "notebook".to_string(),
        "--NotebookApp.open_browser=True".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: None,
            runtime_dir: None,
            server_command: default_server_command(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = serde_yaml::from_str(&contents)?;

            config.merge_env();

            Ok(config)
        } else {
            let mut config = Config::default();
            config.merge_env();
            Ok(config)
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Result<PathBuf> {
        let possible_paths = vec![
            PathBuf::from("nblaunch.yaml"),
            PathBuf::from("nblaunch.yml"),
            PathBuf::from(".nblaunch.yaml"),
            PathBuf::from(".nblaunch.yml"),
        ];

        // Check home directory
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".nblaunch").join("config.yaml");
            if home_config.exists() {
                return Ok(home_config);
            }
        }

        // Check current directory
        for path in possible_paths {
            if path.exists() {
                return Ok(path);
            }
        }

        // Return default path (may not exist)
        Ok(PathBuf::from("nblaunch.yaml"))
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) {
        if let Ok(browser) = std::env::var("NBLAUNCH_BROWSER") {
            self.browser = Some(browser);
        }
        if let Ok(runtime_dir) = std::env::var("NBLAUNCH_RUNTIME_DIR") {
            self.runtime_dir = Some(PathBuf::from(runtime_dir));
        }
        if let Ok(level) = std::env::var("NBLAUNCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("NBLAUNCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Launch options for the server module, resolved from this configuration
    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            browser: self.browser.clone(),
            server_command: self.server_command.clone(),
        }
    }
}
