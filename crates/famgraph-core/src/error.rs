pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid {what} request: {message}")]
    InvalidRequest { what: &'static str, message: String },

    #[error("Invalid config value for `{key}`: {message}")]
    InvalidConfig { key: String, message: String },
}

impl Error {
    pub(crate) fn request(what: &'static str, err: serde_json::Error) -> Self {
        Self::InvalidRequest {
            what,
            message: err.to_string(),
        }
    }
}
