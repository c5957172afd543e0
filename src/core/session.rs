use crate::domain::ports::TokenStore;
use crate::utils::error::Result;

pub const TOKEN_KEY: &str = "token";

/// Logged-in/logged-out gate over the stored session token.
pub struct SessionGate<T: TokenStore> {
    store: T,
}

impl<T: TokenStore> SessionGate<T> {
    pub fn new(store: T) -> Self {
        Self { store }
    }

    pub fn is_logged_in(&self, expected: &str) -> Result<bool> {
        Ok(self
            .store
            .get(TOKEN_KEY)?
            .is_some_and(|stored| !expected.is_empty() && stored == expected))
    }

    /// Stores `candidate` only when it matches `expected`.
    pub fn login(&self, candidate: &str, expected: &str) -> Result<bool> {
        if expected.is_empty() || candidate != expected {
            tracing::warn!("Login rejected: token mismatch");
            return Ok(false);
        }
        self.store.set(TOKEN_KEY, candidate)?;
        tracing::info!("Logged in");
        Ok(true)
    }

    pub fn logout(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)
    }

    pub fn store(&self) -> &T {
        &self.store
    }
}
