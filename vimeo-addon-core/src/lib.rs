pub mod addon;
pub mod config;
pub mod error;
pub mod logging;

pub use addon::{Addon, VimeoAddon};
pub use config::Config;
pub use error::{AddonError, Result};
