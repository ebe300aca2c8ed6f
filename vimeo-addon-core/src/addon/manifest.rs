// Addon manifest
//
// Static descriptor the host reads before calling any action.

use serde::{Deserialize, Serialize};

pub const ADDON_ID: &str = "vimeo";
pub const ADDON_NAME: &str = "Vimeo Categories";
pub const ADDON_VERSION: &str = "0.0.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    pub item_types: Vec<String>,
    pub default_directory_options: DirectoryOptions,
    pub default_directory_features: DefaultDirectoryFeatures,
    pub dashboards: Vec<Dashboard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryOptions {
    pub image_shape: String,
    pub display_name: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultDirectoryFeatures {
    pub search: SearchFeature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFeature {
    pub enabled: bool,
}

/// Entry point listed on the host's home screen. The `id` is sent back as
/// the directory request's selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: String,
    pub name: String,
}

impl Default for AddonManifest {
    fn default() -> Self {
        Self {
            id: ADDON_ID.to_string(),
            name: ADDON_NAME.to_string(),
            version: ADDON_VERSION.to_string(),
            item_types: vec!["channel".to_string()],
            default_directory_options: DirectoryOptions {
                image_shape: "landscape".to_string(),
                display_name: true,
            },
            default_directory_features: DefaultDirectoryFeatures {
                search: SearchFeature { enabled: true },
            },
            dashboards: vec![
                Dashboard {
                    id: String::new(),
                    name: "Vimeo Categories".to_string(),
                },
                Dashboard {
                    id: super::router::CHANNELS_SELECTOR.to_string(),
                    name: "Top Vimeo Channels".to_string(),
                },
            ],
        }
    }
}
