pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod proxy;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{FileTokenStore, HttpSwimApi, MemoryTokenStore};
pub use config::{ProxyConfig, TomlConfig};
pub use core::{session::SessionGate, tracker::Tracker};
pub use proxy::{ProxyEvent, ProxyResponse, SwimProxy};
pub use utils::error::{Result, TrackerError};
