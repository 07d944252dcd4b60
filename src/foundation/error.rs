use crate::attributes::order::OrderError;
use crate::metadata::document::AssemblyError;

/// Convenience result type used across traitsmith.
pub type TraitsmithResult<T> = Result<T, TraitsmithError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum TraitsmithError {
    /// Malformed configuration (rule set, templates, colors).
    #[error("config error: {0}")]
    Config(String),

    /// Attribute ordering failed for an item.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// A required metadata field could not be constructed.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    /// Filesystem failures while reading inputs or writing metadata.
    #[error("io error: {0}")]
    Io(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TraitsmithError {
    /// Build a [`TraitsmithError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`TraitsmithError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`TraitsmithError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` when the failure is specific to one item (ordering or assembly), as opposed to a
    /// configuration or environment problem that will affect every item.
    pub fn is_item_failure(&self) -> bool {
        matches!(self, Self::Order(_) | Self::Assembly(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
