//! Credentials context for backend calls.
//!
//! The session token is owned by the authentication layer of the host
//! application and injected here; nothing in this crate reads it from
//! global state.

/// Credentials passed by reference into every backend call.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    token: Option<String>,
}

impl AuthContext {
    /// Context carrying a bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Anonymous context (public endpoints only).
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// The bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_accessor() {
        assert_eq!(AuthContext::anonymous().token(), None);
        assert_eq!(AuthContext::with_token("jwt").token(), Some("jwt"));
    }
}
