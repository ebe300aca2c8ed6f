// Directory routing
//
// A directory request is classified once into a `DirectoryQuery`, then
// dispatched with an exhaustive match.

use serde_json::{Map, Value};
use vimeo_addon_client::{client::value_to_string, VimeoClient};

use super::listing::{
    list_categories, list_channels, list_channels_by_category, list_videos_by_channel,
    search_channels,
};
use super::model::{DirectoryRequest, DirectoryResponse};
use crate::config::AddonVariant;
use crate::error::Result;

/// Selector of the "Top Vimeo Channels" dashboard
pub const CHANNELS_SELECTOR: &str = "channels";

/// Named sub-listings reachable through the request `id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Channels,
}

impl Selector {
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            CHANNELS_SELECTOR => Some(Self::Channels),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryQuery {
    ByCategory {
        category: String,
    },
    ByChannel {
        channel: String,
        sort: Option<String>,
    },
    BySelector {
        selector: Selector,
        filter: Map<String, Value>,
    },
    BySearch {
        text: String,
    },
    Default,
}

/// Filter value as a non-empty string; `null`, `false`, `0` and `""` count
/// as unset.
fn present(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => value_to_string(other).filter(|s| !s.is_empty()),
    }
}

impl DirectoryQuery {
    /// Classify a request. First match wins: category filter, channel
    /// filter, selector id, search text, then the category overview.
    #[must_use]
    pub fn from_request(request: &DirectoryRequest) -> Self {
        let filter = request.filter.clone().unwrap_or_default();

        if let Some(category) = present(filter.get("category")) {
            return Self::ByCategory { category };
        }
        if let Some(channel) = present(filter.get("channel")) {
            return Self::ByChannel {
                channel,
                sort: present(filter.get("sort")),
            };
        }
        if let Some(selector) = request.id.as_deref().and_then(Selector::parse) {
            return Self::BySelector { selector, filter };
        }
        if let Some(text) = request.search.as_deref().filter(|s| !s.is_empty()) {
            return Self::BySearch {
                text: text.to_string(),
            };
        }
        Self::Default
    }
}

/// Run the listing operation selected by `query`
pub async fn dispatch(
    client: &VimeoClient,
    query: &DirectoryQuery,
    page: u64,
    variant: AddonVariant,
) -> Result<DirectoryResponse> {
    match query {
        DirectoryQuery::ByCategory { category } => {
            list_channels_by_category(client, category, page, variant).await
        }
        DirectoryQuery::ByChannel { channel, sort } => {
            list_videos_by_channel(client, channel, sort.as_deref(), page).await
        }
        DirectoryQuery::BySelector {
            selector: Selector::Channels,
            filter,
        } => list_channels(client, filter, page, variant).await,
        DirectoryQuery::BySearch { text } => search_channels(client, text, page, variant).await,
        DirectoryQuery::Default => list_categories(client, page).await,
    }
}
