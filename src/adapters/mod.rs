// Adapters layer: concrete implementations for external systems (swim API, session storage).

pub mod http;
pub mod storage;

pub use http::HttpSwimApi;
pub use storage::{FileTokenStore, MemoryTokenStore};
