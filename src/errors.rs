use thiserror::Error;

/// Failures raised while resolving or validating a wizard configuration.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("no form configuration registered for `{0}`")]
    ConfigNotFound(String),
    #[error("invalid form configuration: {0}")]
    InvalidConfig(String),
}

/// Failures raised by the object storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("storage rejected `{key}`: HTTP {status}")]
    Rejected { key: String, status: u16 },
}

/// Failures surfaced to the caller of an upload operation.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("cannot upload an empty file")]
    EmptyFile,
    #[error(transparent)]
    Store(#[from] StoreError),
}
