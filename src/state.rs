use std::sync::Arc;

use crate::{services::token_service::TokenIssuer, store::Store};

#[derive(Debug, Clone, Copy)]
pub struct AuthSettings {
    /// Create an account when an unknown username logs in.
    pub auto_register: bool,
    pub cookie_secure: bool,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            auto_register: true,
            cookie_secure: false,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenIssuer,
    pub auth: AuthSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenIssuer, auth: AuthSettings) -> Self {
        Self {
            store,
            tokens,
            auth,
        }
    }
}
