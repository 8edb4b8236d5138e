/// Failure taxonomy for storage operations.
///
/// `NotFound` deliberately carries no detail: the caller must not be able to
/// tell a miss caused by tenant isolation apart from a genuinely absent path.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("access denied")]
    AccessDenied,
    #[error("not found")]
    NotFound,
    #[error("payload exceeds the maximum allowed size of {limit} bytes")]
    PayloadTooLarge { limit: u64 },
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Map an io error on a read path to `NotFound`, keeping everything else
    /// as `Io`.
    pub(crate) fn from_read(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound
        } else {
            StorageError::Io(err)
        }
    }
}
