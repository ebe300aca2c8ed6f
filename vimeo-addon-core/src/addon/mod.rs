// Addon
//
// Action interface the host calls (directory, item, source) and its Vimeo
// implementation.

pub mod convert;
pub mod listing;
pub mod manifest;
pub mod model;
pub mod resolve;
pub mod router;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use vimeo_addon_client::VimeoClient;

use crate::config::{AddonVariant, VimeoConfig};
use crate::error::{AddonError, Result};

pub use manifest::AddonManifest;
pub use model::{
    ChannelItem, DirectoryItem, DirectoryRequest, DirectoryResponse, ItemRequest, MainItem, Source,
    SourceKind,
};
pub use router::DirectoryQuery;

/// Addon action interface
#[async_trait]
pub trait Addon: Send + Sync {
    /// Static descriptor served to the host
    fn manifest(&self) -> &AddonManifest;

    /// Paginated listing
    async fn directory(&self, request: DirectoryRequest) -> Result<DirectoryResponse>;

    /// Single playable item
    async fn item(&self, request: ItemRequest) -> Result<ChannelItem>;

    /// Additional sources for an item
    async fn source(&self, request: Value) -> Result<Vec<Source>>;
}

/// Vimeo addon over an injected client
pub struct VimeoAddon {
    client: VimeoClient,
    variant: AddonVariant,
    manifest: AddonManifest,
}

impl VimeoAddon {
    #[must_use]
    pub fn new(client: VimeoClient, variant: AddonVariant) -> Self {
        Self {
            client,
            variant,
            manifest: AddonManifest::default(),
        }
    }

    /// Build the addon and its client from the `vimeo` config section
    pub fn from_config(config: &VimeoConfig) -> Result<Self> {
        Ok(Self::new(config.build_client()?, config.variant))
    }
}

#[async_trait]
impl Addon for VimeoAddon {
    fn manifest(&self) -> &AddonManifest {
        &self.manifest
    }

    async fn directory(&self, request: DirectoryRequest) -> Result<DirectoryResponse> {
        let query = DirectoryQuery::from_request(&request);
        let page = request.page();
        info!(?query, page, "Directory request");

        router::dispatch(&self.client, &query, page, self.variant).await
    }

    async fn item(&self, request: ItemRequest) -> Result<ChannelItem> {
        let id = request.ids.id.trim();
        if id.is_empty() {
            return Err(AddonError::InvalidRequest("ids.id is empty".to_string()));
        }
        info!(id, variant = ?self.variant, "Item request");

        match self.variant {
            AddonVariant::Categories => resolve::get_video(&self.client, id).await,
            AddonVariant::Channels => resolve::get_channel(&self.client, id).await,
        }
    }

    // Sources are embedded in item results.
    async fn source(&self, _request: Value) -> Result<Vec<Source>> {
        Ok(Vec::new())
    }
}
