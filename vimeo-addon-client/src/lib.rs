// Vimeo API Client
//
// Pure HTTP client for the Vimeo REST API, independent of the addon layer.
//
// Architecture:
// - vimeo-addon-client: HTTP client, response decoding, upstream schemas
// - vimeo-addon-core: host content model, converters, listing/item operations
// - vimeo-addon: HTTP surface the host calls

pub mod client;
pub mod error;
pub mod response;
pub mod types;

// Re-export client types for convenience
pub use client::{RequestOptions, VimeoClient, DEFAULT_API_URL, DEFAULT_PLAYER_URL};
pub use error::VimeoError;
pub use reqwest::StatusCode;
pub use types::*;
