use catalog_types::ProductId;

/// Errors from product store operations.
///
/// Both variants are local and deterministic: retrying the same call against
/// the same state yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The operation referenced an identifier absent from the store.
    #[error("product not found: {id}")]
    NotFound { id: ProductId },

    /// A create collided with an identifier already present.
    #[error("product already exists: {id}")]
    AlreadyExists { id: ProductId },
}

impl StoreError {
    pub fn not_found(id: &ProductId) -> Self {
        Self::NotFound { id: id.clone() }
    }

    pub fn already_exists(id: &ProductId) -> Self {
        Self::AlreadyExists { id: id.clone() }
    }

    /// The identifier the failing operation referred to.
    pub fn id(&self) -> &ProductId {
        match self {
            Self::NotFound { id } | Self::AlreadyExists { id } => id,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
