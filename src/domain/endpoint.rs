use crate::utils::error::{Result, TrackerError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One serverless function and the upstream call it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetSwims,
    ToSwim,
    AddSwim,
    DeleteSwim,
    Login,
    Token,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::GetSwims,
        Endpoint::ToSwim,
        Endpoint::AddSwim,
        Endpoint::DeleteSwim,
        Endpoint::Login,
        Endpoint::Token,
    ];

    pub fn function_name(self) -> &'static str {
        match self {
            Endpoint::GetSwims => "getSwims",
            Endpoint::ToSwim => "toSwim",
            Endpoint::AddSwim => "addSwim",
            Endpoint::DeleteSwim => "deleteSwim",
            Endpoint::Login => "login",
            Endpoint::Token => "token",
        }
    }

    /// Upstream path, `None` for functions answered locally.
    pub fn upstream_path(self) -> Option<&'static str> {
        match self {
            Endpoint::GetSwims => Some("/api/getswims"),
            Endpoint::ToSwim => Some("/api/toswim"),
            Endpoint::AddSwim => Some("/api/addswim"),
            Endpoint::DeleteSwim => Some("/api/deleteswim"),
            Endpoint::Login => Some("/api/login"),
            Endpoint::Token => None,
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::GetSwims | Endpoint::ToSwim | Endpoint::Token => Method::Get,
            Endpoint::AddSwim | Endpoint::DeleteSwim | Endpoint::Login => Method::Post,
        }
    }

    /// Resolves `/.netlify/functions/getSwims`, `/api/getswims` or a bare name.
    pub fn from_path(path: &str) -> Result<Self> {
        let name = path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();

        Self::ALL
            .into_iter()
            .find(|e| e.function_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| TrackerError::UnknownEndpoint {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}
