use shelflife_core::error::CoreError;

/// Errors from the ShelfLife REST client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server could not be reached (DNS, refused connection, TLS,
    /// timeout, dropped connection while reading a success body).
    #[error("Network error while calling {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-2xx status.
    #[error("{} {} failed: {}{}", .method, .path, .status, body_suffix(.body))]
    Http {
        method: String,
        path: String,
        status: u16,
        /// Response body text; empty when it could not be read.
        body: String,
    },

    /// A success payload did not have the shape the accessor promises.
    #[error("Unexpected response from {path}: {message}")]
    Decode { path: String, message: String },

    /// The outgoing payload could not be normalized.
    #[error(transparent)]
    Normalize(#[from] CoreError),

    /// The call's cancellation token fired before it completed.
    #[error("Request to {path} was cancelled")]
    Cancelled { path: String },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" - {body}")
    }
}

impl ApiError {
    /// HTTP status of an [`ApiError::Http`], `None` for every other variant.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
