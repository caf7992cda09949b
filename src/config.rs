// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use xdg::BaseDirectories;

pub const APP_NAME: &str = "judgeboard";
pub const DEFAULT_CONFIG_FILENAME: &str = "config.toml";

// Main configuration structure, mapping to config.toml
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub interface: InterfaceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Base URL of the judge platform API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token for authenticated calls. Absent means anonymous browsing:
    /// the table still renders, admin and playlist affordances do not.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}
fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            base_url: default_base_url(),
            token: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct InterfaceConfig {
    /// How often the problem table is refreshed from the server.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    /// Ask before deleting a problem.
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
    /// How long a status notice stays visible.
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,
}

fn default_refresh_interval_ms() -> u64 {
    5_000
}
fn default_confirm_delete() -> bool {
    true
}
fn default_notice_ttl_ms() -> u64 {
    4_000
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        InterfaceConfig {
            refresh_interval_ms: default_refresh_interval_ms(),
            confirm_delete: default_confirm_delete(),
            notice_ttl_ms: default_notice_ttl_ms(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // "debug", "info", "warn", "error"
    #[serde(default = "default_log_dir")]
    pub log_dir: String, // Path, can use ~
    #[serde(default = "default_file_logging")]
    pub file_logging: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    "~/.judgeboard/logs".to_string()
}
fn default_file_logging() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            log_dir: default_log_dir(),
            file_logging: default_file_logging(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct KeyBindingsConfig {
    #[serde(default = "default_quit")] pub quit: String,
    #[serde(default = "default_help")] pub help: String,
    #[serde(default = "default_next_tab")] pub next_tab: String,
    #[serde(default = "default_prev_tab")] pub prev_tab: String,
    #[serde(default = "default_search")] pub search: String,
    #[serde(default = "default_difficulty")] pub difficulty: String,
    #[serde(default = "default_tag")] pub tag: String,
    #[serde(default = "default_refresh")] pub refresh: String,
    #[serde(default = "default_edit")] pub edit: String,
    #[serde(default = "default_delete")] pub delete: String,
    #[serde(default = "default_save_to_playlist")] pub save_to_playlist: String,
    #[serde(default = "default_new_playlist")] pub new_playlist: String,
    #[serde(default = "default_up")] pub up: String,
    #[serde(default = "default_down")] pub down: String,
    #[serde(default = "default_prev_page")] pub prev_page: String,
    #[serde(default = "default_next_page")] pub next_page: String,
    #[serde(default = "default_submit")] pub submit: String,
    #[serde(default = "default_add_entry")] pub add_entry: String,
    #[serde(default = "default_remove_entry")] pub remove_entry: String,
}

fn default_quit() -> String { "q".to_string() }
fn default_help() -> String { "?".to_string() }
fn default_next_tab() -> String { "Tab".to_string() }
fn default_prev_tab() -> String { "BackTab".to_string() }
fn default_search() -> String { "/".to_string() }
fn default_difficulty() -> String { "d".to_string() }
fn default_tag() -> String { "t".to_string() }
fn default_refresh() -> String { "r".to_string() }
fn default_edit() -> String { "e".to_string() }
fn default_delete() -> String { "x".to_string() }
fn default_save_to_playlist() -> String { "s".to_string() }
fn default_new_playlist() -> String { "n".to_string() }
fn default_up() -> String { "Up".to_string() }
fn default_down() -> String { "Down".to_string() }
fn default_prev_page() -> String { "Left".to_string() }
fn default_next_page() -> String { "Right".to_string() }
fn default_submit() -> String { "Ctrl+s".to_string() }
fn default_add_entry() -> String { "Ctrl+a".to_string() }
fn default_remove_entry() -> String { "Ctrl+d".to_string() }

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            help: default_help(),
            next_tab: default_next_tab(),
            prev_tab: default_prev_tab(),
            search: default_search(),
            difficulty: default_difficulty(),
            tag: default_tag(),
            refresh: default_refresh(),
            edit: default_edit(),
            delete: default_delete(),
            save_to_playlist: default_save_to_playlist(),
            new_playlist: default_new_playlist(),
            up: default_up(),
            down: default_down(),
            prev_page: default_prev_page(),
            next_page: default_next_page(),
            submit: default_submit(),
            add_entry: default_add_entry(),
            remove_entry: default_remove_entry(),
        }
    }
}

impl Config {
    /// Loads config.toml from the override path or the XDG config dir. A
    /// missing default file is not an error; the caller falls back to
    /// `Config::default()`.
    pub fn load(config_path_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_path_override {
            Some(path) => {
                debug!("Using provided config path override: {}", path.display());
                path.to_path_buf()
            }
            None => {
                let xdg_dirs = BaseDirectories::with_prefix(APP_NAME)?;
                xdg_dirs
                    .find_config_file(DEFAULT_CONFIG_FILENAME)
                    .with_context(|| {
                        format!(
                            "Could not find default config file '{}'",
                            DEFAULT_CONFIG_FILENAME
                        )
                    })?
            }
        };

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

        let config: Config =
            toml::from_str(&config_str).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// The log directory with `~` expanded.
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.logging.log_dir).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.server.request_timeout_ms, 10_000);
        assert!(config.server.token.is_none());
        assert_eq!(config.interface.refresh_interval_ms, 5_000);
        assert!(config.interface.confirm_delete);
        assert_eq!(config.keybindings.quit, "q");
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            base_url = "https://judge.example.com/api/v1"
            token = "secret"

            [keybindings]
            delete = "D"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "https://judge.example.com/api/v1");
        assert_eq!(config.server.token.as_deref(), Some("secret"));
        assert_eq!(config.server.request_timeout_ms, 10_000);
        assert_eq!(config.keybindings.delete, "D");
        assert_eq!(config.keybindings.edit, "e");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [server]
            base_uri = "typo"
            "#,
        );
        assert!(result.is_err());
    }
}
