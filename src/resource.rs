/// Outcome of an asynchronous fetch.
///
/// Every network-facing call in this crate hands back a `Resource` instead of a
/// `Result`; the failure cause is already collapsed into `message`.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Loading,
    Success {
        data: T,
    },
    Error {
        message: String,
        /// Last known value, for callers that keep showing stale data.
        data: Option<T>,
    },
}

pub const GENERIC_ERROR: &str = "An unknown error occurred";

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> Resource<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    /// Builds an `Error`. A blank message is replaced by [`GENERIC_ERROR`].
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            message
        };
        Self::Error {
            message,
            data: None,
        }
    }

    pub fn error_with_data(message: impl Into<String>, data: T) -> Self {
        match Self::error(message) {
            Self::Error { message, .. } => Self::Error {
                message,
                data: Some(data),
            },
            other => other,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loading => None,
            Self::Success { data } => Some(data),
            Self::Error { data, .. } => data.as_ref(),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Loading => None,
            Self::Success { .. } => None,
            Self::Error { message, .. } => Some(message),
        }
    }

    pub fn map<U, F>(self, f: F) -> Resource<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Loading => Resource::Loading,
            Self::Success { data } => Resource::Success { data: f(data) },
            Self::Error { message, data } => Resource::Error {
                message,
                data: data.map(f),
            },
        }
    }
}
