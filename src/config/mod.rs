pub mod env;
pub mod toml_config;

pub use env::ProxyConfig;
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::{DEFAULT_API_URL, DEFAULT_SESSION_FILE};
    use super::TomlConfig;
    use crate::core::{ApiMode, ConfigProvider};
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, validate_url, Validate};
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "swim-tracker")]
    #[command(about = "Log swims and follow your progress along the route")]
    pub struct CliConfig {
        #[arg(long, env = "REACT_APP_API_URL", global = true)]
        pub api_url: Option<String>,

        #[arg(long, env = "REACT_APP_API_UNAME", global = true)]
        pub username: Option<String>,

        #[arg(long, env = "REACT_APP_API_PASS", hide_env_values = true, global = true)]
        pub password: Option<String>,

        #[arg(long, env = "REACT_APP_SESSION_TOKEN", hide_env_values = true, global = true)]
        pub session_token: Option<String>,

        #[arg(long, value_enum, global = true)]
        pub mode: Option<ApiMode>,

        #[arg(long, global = true, help = "Where the session token is kept")]
        pub session_file: Option<String>,

        #[arg(long, global = true, help = "TOML file with [api] and [session] sections")]
        pub config: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Total distance and route progress
        Status,
        /// Table of logged swims
        List {
            #[arg(long, default_value_t = 1)]
            page: usize,
            #[arg(long, default_value_t = crate::core::ledger::DEFAULT_PAGE_SIZE)]
            page_size: usize,
        },
        /// Log a swim
        Add {
            /// yyyy-MM-dd or dd.MM.yyyy, today when omitted
            #[arg(long)]
            date: Option<String>,
            /// Distance in meters
            #[arg(long)]
            distance: String,
            #[arg(long, default_value = "")]
            name: String,
            #[arg(long, default_value = "")]
            comment: String,
        },
        /// Delete swims by id
        Delete {
            #[arg(required = true)]
            ids: Vec<String>,
            /// Skip the confirmation prompt
            #[arg(long)]
            yes: bool,
        },
        /// Write the table as CSV (stdout when no file is given)
        Export {
            #[arg(long)]
            output: Option<String>,
        },
        Login {
            token: String,
        },
        Logout,
    }

    impl CliConfig {
        /// Fills every setting not given on the command line from the config file.
        pub fn merge_file(&mut self, file: TomlConfig) {
            self.api_url = self.api_url.take().or(file.api.url);
            self.username = self.username.take().or(file.api.username);
            self.password = self.password.take().or(file.api.password);
            self.mode = self.mode.or(file.api.mode);
            self.session_token = self.session_token.take().or(file.session.token);
            self.session_file = self.session_file.take().or(file.session.file);
        }

        pub fn load_config_file(&mut self) -> Result<()> {
            if let Some(path) = self.config.clone() {
                tracing::debug!("Loading config file {}", path);
                let file = TomlConfig::from_file(&path)?;
                self.merge_file(file);
            }
            Ok(())
        }

        pub fn session_file(&self) -> &str {
            self.session_file.as_deref().unwrap_or(DEFAULT_SESSION_FILE)
        }
    }

    impl ConfigProvider for CliConfig {
        fn api_url(&self) -> &str {
            self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
        }

        fn credentials(&self) -> Option<(&str, &str)> {
            match (&self.username, &self.password) {
                (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
                _ => None,
            }
        }

        fn session_token(&self) -> Option<&str> {
            self.session_token.as_deref()
        }

        fn api_mode(&self) -> ApiMode {
            self.mode.unwrap_or_default()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_url("api_url", self.api_url())?;
            validate_path("session_file", self.session_file())?;

            if self.api_mode() == ApiMode::Direct && self.credentials().is_none() {
                tracing::warn!("No API credentials configured, requests go out without basic auth");
            }
            Ok(())
        }
    }

}
