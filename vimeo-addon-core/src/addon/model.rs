// Host content model
//
// Request and response shapes exchanged with the host. Field names follow
// the host's camelCase wire format.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Accept `"123"` and `123` alike for identifiers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Directory (listing) request
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryRequest {
    /// Sub-listing selector, e.g. `"channels"`
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub filter: Option<Map<String, Value>>,
    /// Page number; `null` or absent means the first page
    #[serde(default)]
    pub cursor: Option<Value>,
}

impl DirectoryRequest {
    /// Internal page number: 0 for the first request, otherwise the cursor.
    /// Numeric strings are accepted; anything unusable counts as 0.
    #[must_use]
    pub fn page(&self) -> u64 {
        match &self.cursor {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }
}

/// Paginated directory result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryResponse {
    pub next_cursor: Option<u64>,
    pub items: Vec<MainItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<DirectoryFeatures>,
}

/// Listing entry, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MainItem {
    Directory(DirectoryItem),
    Channel(ChannelItem),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Images {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

/// Payload re-submitted by the host as the next request's filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryArgs {
    pub filter: Map<String, Value>,
}

/// Browsable entry (category, or channel in the categories variant)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub images: Images,
    pub args: DirectoryArgs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIds {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

/// Playable entry (video, or channel in the channels variant)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelItem {
    pub id: String,
    pub ids: ItemIds,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub images: Images,
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    Url,
    ExternalUrl,
}

/// One concrete playable resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub url: String,
}

/// Single-item request (`{ ids: { id } }`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemRequest {
    pub ids: ItemIds,
}

/// Sort/filter UI the host may render for a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryFeatures {
    pub filter: Vec<FilterDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub name: String,
    pub id: String,
    pub values: Vec<FilterValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValue {
    pub key: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cursor_normalization() {
        let request = |cursor: Value| DirectoryRequest {
            cursor: Some(cursor),
            ..DirectoryRequest::default()
        };

        assert_eq!(DirectoryRequest::default().page(), 0);
        assert_eq!(request(Value::Null).page(), 0);
        assert_eq!(request(json!(3)).page(), 3);
        assert_eq!(request(json!("4")).page(), 4);
        assert_eq!(request(json!(-1)).page(), 0);
        assert_eq!(request(json!("next")).page(), 0);
    }

    #[test]
    fn test_directory_request_from_host_json() {
        let request: DirectoryRequest = serde_json::from_value(json!({
            "id": "channels",
            "filter": {"sort": "followers"},
            "cursor": null,
            "language": "en"
        }))
        .unwrap();
        assert_eq!(request.id.as_deref(), Some("channels"));
        assert_eq!(request.filter.unwrap()["sort"], json!("followers"));
    }

    #[test]
    fn test_item_request_numeric_id() {
        let request: ItemRequest = serde_json::from_value(json!({"ids": {"id": 999}})).unwrap();
        assert_eq!(request.ids.id, "999");

        let err = serde_json::from_value::<ItemRequest>(json!({"ids": {"id": [1]}}));
        assert!(err.is_err());
    }

    #[test]
    fn test_main_item_wire_format() {
        let item = MainItem::Channel(ChannelItem {
            id: "42".to_string(),
            ids: ItemIds {
                id: "42".to_string(),
            },
            name: "Clip".to_string(),
            description: None,
            release_date: Some("2020-01-01T00:00:00+00:00".to_string()),
            images: Images::default(),
            sources: vec![Source {
                id: "42".to_string(),
                name: "Clip".to_string(),
                kind: SourceKind::ExternalUrl,
                url: "https://vimeo.com/42".to_string(),
            }],
        });

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "type": "channel",
                "id": "42",
                "ids": {"id": "42"},
                "name": "Clip",
                "releaseDate": "2020-01-01T00:00:00+00:00",
                "images": {},
                "sources": [{
                    "id": "42",
                    "name": "Clip",
                    "type": "externalUrl",
                    "url": "https://vimeo.com/42"
                }]
            })
        );
    }

    #[test]
    fn test_next_cursor_serializes_null() {
        let response = DirectoryResponse {
            next_cursor: None,
            items: Vec::new(),
            features: None,
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"nextCursor": null, "items": []})
        );
    }
}
