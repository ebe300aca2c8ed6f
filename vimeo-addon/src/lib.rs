pub mod http;
pub mod server;

pub use http::create_router;
