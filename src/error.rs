use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed private key: {0}")]
    KeyFormat(String),
    #[error("failed to sign auth message: {0}")]
    Signing(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned code {code}: {message}")]
    Api { code: i64, message: String },
    #[error("response is missing the {0} payload")]
    MissingData(&'static str),
}

impl Error {
    // Retrying a malformed key or a failed signature cannot succeed;
    // everything coming back from the wire can be transient.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Api { .. } | Error::MissingData(_)
        )
    }
}
