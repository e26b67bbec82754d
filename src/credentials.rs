//! Credential pair for the search API.
//!
//! The library never reads the environment on its own. The binary calls
//! [`Credentials::from_env`] once at start and passes the result down.

use std::env;
use std::fmt;

use crate::error::HarvestError;

const ID_VARS: [&str; 2] = ["CLIENT_ID", "NAVER_CLIENT_ID"];
const SECRET_VARS: [&str; 2] = ["CLIENT_SECRET", "NAVER_CLIENT_SECRET"];

/// Client id and secret sent as request headers.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read the pair from `CLIENT_ID` / `CLIENT_SECRET`, falling back to the
    /// `NAVER_`-prefixed names.
    ///
    /// # Errors
    ///
    /// [`HarvestError::InvalidArgument`] if either token is missing or blank.
    pub fn from_env() -> Result<Self, HarvestError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`Credentials::from_env`], with a caller-provided lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HarvestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(*name))
                .find(|value| !value.trim().is_empty())
        };
        let client_id = first(&ID_VARS[..]).ok_or_else(|| {
            HarvestError::InvalidArgument(format!("missing client id (set {})", ID_VARS[0]))
        })?;
        let client_secret = first(&SECRET_VARS[..]).ok_or_else(|| {
            HarvestError::InvalidArgument(format!("missing client secret (set {})", SECRET_VARS[0]))
        })?;
        Ok(Self::new(client_id, client_secret))
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}
