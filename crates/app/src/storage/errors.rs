//! Evidence store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image host rejected the upload with status {status}: {message}")]
    Rejected { status: u16, message: String },
}
