use std::ffi::OsString;

use thiserror::Error;

use crate::entry::Identifier;

#[derive(Error, Debug)]
pub enum WalkError {
    // Provider
    #[error("document not found: {0}")]
    NotFound(Identifier),

    #[error("permission denied: {0}")]
    PermissionDenied(Identifier),

    #[error("hierarchy loop at {0}")]
    Loop(Identifier),

    #[error("IO error at {id}")]
    Io {
        id: Identifier,
        #[source]
        source: std::io::Error,
    },

    #[error("provider failed listing {id}: {message}")]
    Provider { id: Identifier, message: String },

    /// A name that cannot be carried in an [`Identifier`] without loss.
    #[error("name {name:?} under {id} is not valid UTF-8")]
    InvalidName { id: Identifier, name: OsString },

    // Caller
    #[error("visitor failed")]
    Visitor(#[source] Box<dyn std::error::Error + Send + Sync>),

    // Config
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl WalkError {
    /// Wrap an arbitrary error raised inside a [`Visitor`](crate::Visitor).
    pub fn visitor(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Visitor(err.into())
    }

    /// The identifier this error occurred at, if applicable.
    pub fn id(&self) -> Option<&Identifier> {
        match self {
            Self::NotFound(id)
            | Self::PermissionDenied(id)
            | Self::Loop(id)
            | Self::Io { id, .. }
            | Self::Provider { id, .. }
            | Self::InvalidName { id, .. } => Some(id),
            Self::Visitor(_) | Self::InvalidConfig(_) => None,
        }
    }

    /// Whether this error came from a [`ChildProvider`](crate::ChildProvider).
    ///
    /// Only provider failures are subject to [`ErrorPolicy`](crate::ErrorPolicy);
    /// visitor and configuration errors always abort the walk.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::PermissionDenied(_)
                | Self::Loop(_)
                | Self::Io { .. }
                | Self::Provider { .. }
                | Self::InvalidName { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_failures_carry_their_id() {
        let err = WalkError::PermissionDenied("primary:Android/data".into());
        assert!(err.is_provider_failure());
        assert_eq!(err.id().map(Identifier::as_str), Some("primary:Android/data"));
    }

    #[test]
    fn visitor_errors_are_not_provider_failures() {
        let err = WalkError::visitor("display gone");
        assert!(!err.is_provider_failure());
        assert!(err.id().is_none());
        assert_eq!(
            std::error::Error::source(&err).map(|s| s.to_string()),
            Some("display gone".to_string())
        );
    }
}
