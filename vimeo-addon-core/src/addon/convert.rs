// Entity converters
//
// Pure mappings from upstream resources to the host content model.

use serde_json::{Map, Value};
use vimeo_addon_client::{Category, Channel, Pictures, Video};

use super::model::{ChannelItem, DirectoryArgs, DirectoryItem, Images, ItemIds, Source, SourceKind};

/// Width of the picture variant used as poster. No fallback to other widths.
pub const POSTER_WIDTH: u32 = 640;

const CATEGORY_PREFIX: &str = "/categories/";
const CHANNEL_PREFIX: &str = "/channels/";
const VIDEO_PREFIX: &str = "/videos/";

/// Playable references resolved before conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playable {
    /// Direct progressive file URL
    pub video_url: Option<String>,
    /// Page on the upstream site
    pub external_url: Option<String>,
}

impl Playable {
    fn sources(&self, id: &str, name: &str) -> Vec<Source> {
        let source = |kind, url: &String| Source {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            url: url.clone(),
        };

        let mut sources = Vec::new();
        if let Some(ref url) = self.video_url {
            sources.push(source(SourceKind::Url, url));
        }
        if let Some(ref url) = self.external_url {
            sources.push(source(SourceKind::ExternalUrl, url));
        }
        sources
    }
}

/// Strip the resource-type prefix from an upstream URI
#[must_use]
pub fn extract_id(uri: &str, prefix: &str) -> String {
    uri.replacen(prefix, "", 1)
}

#[must_use]
pub fn category_id(category: &Category) -> String {
    extract_id(&category.uri, CATEGORY_PREFIX)
}

#[must_use]
pub fn channel_id(channel: &Channel) -> String {
    extract_id(&channel.uri, CHANNEL_PREFIX)
}

#[must_use]
pub fn video_id(video: &Video) -> String {
    extract_id(&video.uri, VIDEO_PREFIX)
}

fn poster(pictures: Option<&Pictures>) -> Images {
    Images {
        poster: pictures
            .and_then(|p| p.link_for_width(POSTER_WIDTH))
            .filter(|link| !link.is_empty())
            .map(str::to_string),
    }
}

fn filter_args(key: &str, id: &str) -> DirectoryArgs {
    let mut filter = Map::new();
    filter.insert(key.to_string(), Value::String(id.to_string()));
    DirectoryArgs { filter }
}

/// Category -> browsable directory filtered by that category
#[must_use]
pub fn convert_category(category: &Category) -> DirectoryItem {
    let id = category_id(category);
    DirectoryItem {
        images: poster(category.pictures.as_ref()),
        args: filter_args("category", &id),
        id,
        name: category.name.clone(),
        description: None,
    }
}

/// Channel -> browsable directory of its videos
#[must_use]
pub fn convert_channel(channel: &Channel) -> DirectoryItem {
    let id = channel_id(channel);
    DirectoryItem {
        images: poster(channel.pictures.as_ref()),
        args: filter_args("channel", &id),
        id,
        name: channel.name.clone(),
        description: channel.description.clone(),
    }
}

/// Channel -> playable item
#[must_use]
pub fn convert_channel_item(channel: &Channel, playable: &Playable) -> ChannelItem {
    let id = channel_id(channel);
    ChannelItem {
        ids: ItemIds { id: id.clone() },
        sources: playable.sources(&id, &channel.name),
        id,
        name: channel.name.clone(),
        description: channel.description.clone(),
        release_date: channel.created_time.clone(),
        images: poster(channel.pictures.as_ref()),
    }
}

/// Video -> playable item
#[must_use]
pub fn convert_video(video: &Video, playable: &Playable) -> ChannelItem {
    let id = video_id(video);
    ChannelItem {
        ids: ItemIds { id: id.clone() },
        sources: playable.sources(&id, &video.name),
        id,
        name: video.name.clone(),
        description: video.description.clone(),
        release_date: None,
        images: poster(video.pictures.as_ref()),
    }
}
