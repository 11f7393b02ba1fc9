//! Per-call context: credentials plus cancellation.

use tokio_util::sync::CancellationToken;

/// Bearer credentials attached to outgoing requests.
///
/// The default value is unauthenticated, which is a normal mode of
/// operation rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
}

impl Credentials {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Wrap a bearer token. Blank tokens are treated as no token.
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self {
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    pub fn from_token(token: Option<String>) -> Self {
        token.map(Self::bearer).unwrap_or_default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Everything a single call needs besides its method, path and body.
///
/// Cloning is cheap; clones share the same cancellation token.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    pub credentials: Credentials,
    pub cancel: CancellationToken,
}

impl CallContext {
    pub fn new(credentials: Credentials, cancel: CancellationToken) -> Self {
        Self {
            credentials,
            cancel,
        }
    }

    /// Same credentials, fresh cancellation token that is cancelled
    /// together with this context's token.
    pub fn child(&self) -> Self {
        Self {
            credentials: self.credentials.clone(),
            cancel: self.cancel.child_token(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
