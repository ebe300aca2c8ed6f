//! Vimeo API Data Structures
//!
//! Only the fields the addon reads are modeled. Anything the API may omit or
//! send as `null` is an `Option` or defaults to empty.

use std::cmp::Reverse;

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` the same as a missing field.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paginated collection envelope (`{ total, page, per_page, data }`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paginated<T> {
    #[serde(default, deserialize_with = "null_to_default")]
    pub total: u64,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u64>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub data: Vec<T>,
}

/// Picture set attached to categories, channels and videos
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Pictures {
    #[serde(default, deserialize_with = "null_to_default")]
    pub sizes: Vec<PictureSize>,
}

impl Pictures {
    /// Link of the variant whose width is exactly `width`.
    #[must_use]
    pub fn link_for_width(&self, width: u32) -> Option<&str> {
        self.sizes
            .iter()
            .find(|size| size.width == width)
            .and_then(|size| size.link.as_deref())
    }
}

/// One rendition of a picture
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PictureSize {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Category resource (`/categories/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub uri: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub pictures: Option<Pictures>,
}

/// Channel resource (`/channels/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Channel {
    pub uri: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub pictures: Option<Pictures>,
}

/// Video resource (`/videos/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Video {
    pub uri: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub release_time: Option<String>,
    #[serde(default)]
    pub pictures: Option<Pictures>,
}

/// Player configuration (`https://player.vimeo.com/video/{id}/config`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlayerConfig {
    #[serde(default, deserialize_with = "null_to_default")]
    pub request: PlayerRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlayerRequest {
    #[serde(default, deserialize_with = "null_to_default")]
    pub files: PlayerFiles,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlayerFiles {
    #[serde(default, deserialize_with = "null_to_default")]
    pub progressive: Vec<ProgressiveFile>,
}

/// Directly playable progressive (single-file) rendition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgressiveFile {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub mime: Option<String>,
}

impl PlayerConfig {
    /// Widest progressive file. Ties keep the earliest entry.
    #[must_use]
    pub fn best_progressive(&self) -> Option<&ProgressiveFile> {
        self.request
            .files
            .progressive
            .iter()
            .min_by_key(|file| Reverse(file.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paginated_null_data() {
        let page: Paginated<Channel> =
            serde_json::from_value(json!({"total": 0, "data": null})).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_paginated_missing_total() {
        let page: Paginated<Category> = serde_json::from_value(json!({
            "data": [{"uri": "/categories/animation", "name": "Animation"}]
        }))
        .unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.data[0].name, "Animation");
        assert!(page.data[0].pictures.is_none());
    }

    #[test]
    fn test_channel_null_pictures_and_description() {
        let channel: Channel = serde_json::from_value(json!({
            "uri": "/channels/staffpicks",
            "name": "Staff Picks",
            "description": null,
            "pictures": null
        }))
        .unwrap();
        assert_eq!(channel.description, None);
        assert_eq!(channel.pictures, None);
    }

    #[test]
    fn test_link_for_width() {
        let pictures: Pictures = serde_json::from_value(json!({
            "sizes": [
                {"width": 100, "height": 75, "link": "https://i.vimeocdn.com/100.jpg"},
                {"width": 640, "height": 360, "link": "https://i.vimeocdn.com/640.jpg"}
            ]
        }))
        .unwrap();
        assert_eq!(
            pictures.link_for_width(640),
            Some("https://i.vimeocdn.com/640.jpg")
        );
        assert_eq!(pictures.link_for_width(1280), None);
    }

    #[test]
    fn test_best_progressive_is_widest() {
        let config: PlayerConfig = serde_json::from_value(json!({
            "request": {"files": {"progressive": [
                {"url": "https://cdn/360.mp4", "width": 640, "quality": "360p"},
                {"url": "https://cdn/1080.mp4", "width": 1920, "quality": "1080p"},
                {"url": "https://cdn/720.mp4", "width": 1280, "quality": "720p"}
            ]}}
        }))
        .unwrap();
        assert_eq!(
            config.best_progressive().map(|f| f.url.as_str()),
            Some("https://cdn/1080.mp4")
        );
    }

    #[test]
    fn test_best_progressive_missing_files() {
        let config: PlayerConfig =
            serde_json::from_value(json!({"request": {"files": {"dash": {}}}})).unwrap();
        assert!(config.best_progressive().is_none());

        let config: PlayerConfig = serde_json::from_value(json!({})).unwrap();
        assert!(config.best_progressive().is_none());
    }
}
