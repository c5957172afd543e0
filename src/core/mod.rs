pub mod form;
pub mod ledger;
pub mod progress;
pub mod session;
pub mod tracker;

pub use crate::domain::model::{Dashboard, NewSwim, RoutePoint, RouteProgress, SwimId, SwimRecord};
pub use crate::domain::ports::{ApiMode, ConfigProvider, SwimApi, TokenStore};
pub use crate::utils::error::Result;
