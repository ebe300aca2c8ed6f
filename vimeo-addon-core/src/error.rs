use thiserror::Error;
use vimeo_addon_client::VimeoError;

#[derive(Error, Debug)]
pub enum AddonError {
    /// Upstream, transport or decoding failure, propagated unchanged.
    #[error(transparent)]
    Client(#[from] VimeoError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, AddonError>;
