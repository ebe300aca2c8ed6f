// Listing operations
//
// Paginated-listing adapter: turns an internal page number (0 = first
// request) into an upstream `page`/`per_page` pair and computes the next
// cursor from the upstream `total`.

use serde_json::{Map, Value};
use tracing::debug;
use vimeo_addon_client::{Channel, VimeoClient};

use super::convert::{
    convert_category, convert_channel, convert_channel_item, convert_video, Playable,
};
use super::model::{
    DirectoryFeatures, DirectoryResponse, FilterDescriptor, FilterValue, MainItem,
};
use crate::config::AddonVariant;
use crate::error::Result;

pub const CHANNEL_PAGE_SIZE: u64 = 25;
pub const VIDEO_PAGE_SIZE: u64 = 25;
pub const CATEGORY_PAGE_SIZE: u64 = 100;

/// Sort used for channel videos when the request names none
pub const DEFAULT_VIDEO_SORT: &str = "default";

const CHANNEL_SORTS: &[&str] = &["alphabetical", "date", "followers", "videos"];
const VIDEO_SORTS: &[&str] = &[
    "added",
    "alphabetical",
    "comments",
    "date",
    "default",
    "duration",
    "likes",
    "manual",
    "modified_time",
    "plays",
];

fn sort_features(values: &[&str]) -> DirectoryFeatures {
    DirectoryFeatures {
        filter: vec![FilterDescriptor {
            name: "Sort By".to_string(),
            id: "sort".to_string(),
            values: values
                .iter()
                .map(|v| FilterValue {
                    key: (*v).to_string(),
                    value: (*v).to_string(),
                })
                .collect(),
        }],
    }
}

/// Sort options advertised with channel listings
#[must_use]
pub fn channel_filters() -> DirectoryFeatures {
    sort_features(CHANNEL_SORTS)
}

/// Sort options advertised with video listings
#[must_use]
pub fn video_filters() -> DirectoryFeatures {
    sort_features(VIDEO_SORTS)
}

/// Page sent upstream. The first request (page 0) fetches page 1.
#[must_use]
pub const fn upstream_page(page: u64) -> u64 {
    if page > 0 {
        page
    } else {
        1
    }
}

/// `page + 1` while the upstream still holds items past this page.
#[must_use]
pub const fn next_cursor(total: u64, page: u64, page_size: u64) -> Option<u64> {
    if total > page_size.saturating_mul(page) {
        Some(page + 1)
    } else {
        None
    }
}

fn channel_items(channels: &[Channel], variant: AddonVariant) -> Vec<MainItem> {
    channels
        .iter()
        .map(|channel| match variant {
            AddonVariant::Categories => MainItem::Directory(convert_channel(channel)),
            AddonVariant::Channels => {
                MainItem::Channel(convert_channel_item(channel, &Playable::default()))
            }
        })
        .collect()
}

fn channel_page(
    total: u64,
    channels: &[Channel],
    page: u64,
    variant: AddonVariant,
) -> DirectoryResponse {
    DirectoryResponse {
        next_cursor: next_cursor(total, page, CHANNEL_PAGE_SIZE),
        items: channel_items(channels, variant),
        features: Some(channel_filters()),
    }
}

/// Top channels, with the request filter (e.g. `sort`) passed through
pub async fn list_channels(
    client: &VimeoClient,
    filter: &Map<String, Value>,
    page: u64,
    variant: AddonVariant,
) -> Result<DirectoryResponse> {
    let page = upstream_page(page);
    debug!(page, "Listing channels");

    let result = client.channels(filter, page, CHANNEL_PAGE_SIZE).await?;
    Ok(channel_page(result.total, &result.data, page, variant))
}

/// Channels of one category
pub async fn list_channels_by_category(
    client: &VimeoClient,
    category: &str,
    page: u64,
    variant: AddonVariant,
) -> Result<DirectoryResponse> {
    let page = upstream_page(page);
    debug!(category, page, "Listing channels by category");

    let result = client
        .category_channels(category, page, CHANNEL_PAGE_SIZE)
        .await?;
    Ok(channel_page(result.total, &result.data, page, variant))
}

/// Channels matching free text
pub async fn search_channels(
    client: &VimeoClient,
    text: &str,
    page: u64,
    variant: AddonVariant,
) -> Result<DirectoryResponse> {
    let page = upstream_page(page);
    debug!(text, page, "Searching channels");

    let result = client.search_channels(text, page, CHANNEL_PAGE_SIZE).await?;
    Ok(channel_page(result.total, &result.data, page, variant))
}

/// All categories in one call. Never paginates further.
pub async fn list_categories(client: &VimeoClient, page: u64) -> Result<DirectoryResponse> {
    let page = page.saturating_add(1);
    debug!(page, "Listing categories");

    let result = client.categories(page, CATEGORY_PAGE_SIZE).await?;
    Ok(DirectoryResponse {
        next_cursor: None,
        items: result
            .data
            .iter()
            .map(|category| MainItem::Directory(convert_category(category)))
            .collect(),
        features: None,
    })
}

/// Videos of one channel
pub async fn list_videos_by_channel(
    client: &VimeoClient,
    channel: &str,
    sort: Option<&str>,
    page: u64,
) -> Result<DirectoryResponse> {
    let page = upstream_page(page);
    let sort = sort.unwrap_or(DEFAULT_VIDEO_SORT);
    debug!(channel, sort, page, "Listing channel videos");

    let result = client
        .channel_videos(channel, sort, None, page, VIDEO_PAGE_SIZE)
        .await?;
    Ok(DirectoryResponse {
        next_cursor: next_cursor(result.total, page, VIDEO_PAGE_SIZE),
        items: result
            .data
            .iter()
            .map(|video| MainItem::Channel(convert_video(video, &Playable::default())))
            .collect(),
        features: Some(video_filters()),
    })
}
