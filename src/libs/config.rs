//! Configuration management for the taskdeck application.
//!
//! The only thing taskdeck needs to know is where the hosted backend lives:
//! the Supabase project URL and its public anon key. Both can come from the
//! configuration file written by `taskdeck init` or from the environment.
//!
//! ## Resolution Order
//!
//! 1. `TASKDECK_SUPABASE_URL` / `TASKDECK_SUPABASE_ANON_KEY` (a `.env` file in
//!    the working directory is loaded first, if present)
//! 2. `config.json` in the application data directory
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use taskdeck::libs::config::Config;
//!
//! let config = Config::read()?;
//! let supabase = config.supabase()?;
//! println!("Project: {}", supabase.url);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};

/// Configuration file name inside the application data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding [`SupabaseConfig::url`].
pub const ENV_SUPABASE_URL: &str = "TASKDECK_SUPABASE_URL";

/// Environment variable overriding [`SupabaseConfig::anon_key`].
pub const ENV_SUPABASE_ANON_KEY: &str = "TASKDECK_SUPABASE_ANON_KEY";

/// Connection parameters of the hosted backend.
///
/// The anon key is a public client key; row-level security on the `tasks`
/// table is what keeps users' rows apart, so storing it in plain text is fine.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://abcd.supabase.co`
    pub url: String,
    /// Public anon key sent as the `apikey` header
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Runs the interactive prompts, pre-filled with `config` when present.
    pub fn init(config: &Option<SupabaseConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or(Self {
            url: String::new(),
            anon_key: String::new(),
        });
        msg_print!(Message::ConfigModuleSupabase);
        Ok(Self {
            url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSupabaseUrl.to_string())
                .default(config.url)
                .interact_text()?,
            anon_key: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSupabaseAnonKey.to_string())
                .default(config.anon_key)
                .interact_text()?,
        })
    }
}

/// Root configuration object persisted as `config.json`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Hosted backend connection. `None` until `taskdeck init` has run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supabase: Option<SupabaseConfig>,
}

impl Config {
    /// Reads the configuration file and applies environment overrides.
    ///
    /// A missing file is not an error: the default configuration is used and
    /// the environment may still provide everything that is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let _ = dotenv::dotenv();

        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let mut config = if config_file_path.exists() {
            let config_str = fs::read_to_string(config_file_path)?;
            serde_json::from_str(&config_str)?
        } else {
            Config::default()
        };

        config.apply_env(env::var(ENV_SUPABASE_URL).ok(), env::var(ENV_SUPABASE_ANON_KEY).ok());
        Ok(config)
    }

    /// Overlays environment-provided values on top of the file values.
    ///
    /// A single variable only completes a configuration that already has the
    /// other half; both together create one from scratch.
    pub fn apply_env(&mut self, url: Option<String>, anon_key: Option<String>) {
        let url = url.filter(|v| !v.trim().is_empty());
        let anon_key = anon_key.filter(|v| !v.trim().is_empty());

        match (url, anon_key) {
            (Some(url), Some(anon_key)) => self.supabase = Some(SupabaseConfig { url, anon_key }),
            (Some(url), None) => {
                if let Some(existing) = self.supabase.as_mut() {
                    existing.url = url;
                }
            }
            (None, Some(anon_key)) => {
                if let Some(existing) = self.supabase.as_mut() {
                    existing.anon_key = anon_key;
                }
            }
            (None, None) => {}
        }
    }

    /// Returns the backend settings or an error telling the user how to add them.
    pub fn supabase(&self) -> Result<&SupabaseConfig> {
        match &self.supabase {
            Some(supabase) if !supabase.url.is_empty() && !supabase.anon_key.is_empty() => Ok(supabase),
            _ => msg_bail_anyhow!(Message::SupabaseNotConfigured),
        }
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if it exists.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Runs the interactive setup wizard, starting from the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        config.supabase = Some(SupabaseConfig::init(&config.supabase)?);
        Ok(config)
    }
}
