// Item resolution operations

use tracing::{debug, warn};
use vimeo_addon_client::VimeoClient;

use super::convert::{convert_channel_item, convert_video, video_id, Playable};
use super::model::ChannelItem;
use crate::error::Result;

/// Widest progressive file of a video.
///
/// A failed player configuration lookup only costs the item its source, so
/// it is logged and swallowed.
pub async fn resolve_video_url(client: &VimeoClient, video_id: &str) -> Option<String> {
    match client.player_config(video_id).await {
        Ok(config) => config.best_progressive().map(|file| file.url.clone()),
        Err(e) => {
            warn!(video_id, error = %e, "Player configuration lookup failed");
            None
        }
    }
}

/// Fetch a video and attach its playable file
pub async fn get_video(client: &VimeoClient, id: &str) -> Result<ChannelItem> {
    let video = client.video(id).await?;
    let playable = Playable {
        video_url: resolve_video_url(client, id).await,
        external_url: None,
    };
    debug!(id, playable = playable.video_url.is_some(), "Resolved video");
    Ok(convert_video(&video, &playable))
}

/// Fetch a channel and feed it from its most recently added video. Falls
/// back to the video's page link when no progressive file resolves.
pub async fn get_channel(client: &VimeoClient, id: &str) -> Result<ChannelItem> {
    let channel = client.channel(id).await?;

    let latest = match client.channel_videos(id, "added", Some("desc"), 1, 1).await {
        Ok(page) => page.data.into_iter().next(),
        Err(e) => {
            warn!(channel = id, error = %e, "Latest channel video lookup failed");
            None
        }
    };

    let playable = match latest {
        Some(video) => {
            let video_url = resolve_video_url(client, &video_id(&video)).await;
            let external_url = if video_url.is_none() { video.link } else { None };
            Playable {
                video_url,
                external_url,
            }
        }
        None => Playable::default(),
    };

    Ok(convert_channel_item(&channel, &playable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addon::model::SourceKind;
    use crate::error::AddonError;
    use serde_json::json;
    use vimeo_addon_client::VimeoError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(api: &MockServer, player: &MockServer) -> VimeoClient {
        let mut client = VimeoClient::new(&api.uri()).unwrap();
        client.set_player_url(&player.uri()).unwrap();
        client
    }

    async fn mount_video(server: &MockServer, id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/videos/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uri": format!("/videos/{id}"),
                "name": "Short film",
                "description": "A film",
                "link": format!("https://vimeo.com/{id}")
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_get_video_picks_widest_file() {
        let api = MockServer::start().await;
        let player = MockServer::start().await;
        mount_video(&api, "42").await;
        Mock::given(method("GET"))
            .and(path("/video/42/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "request": {"files": {"progressive": [
                    {"url": "https://cdn/540.mp4", "width": 960},
                    {"url": "https://cdn/1080.mp4", "width": 1920}
                ]}}
            })))
            .expect(1)
            .mount(&player)
            .await;

        let client = client_for(&api, &player);
        let item = get_video(&client, "42").await.unwrap();

        assert_eq!(item.id, "42");
        assert_eq!(item.sources.len(), 1);
        assert_eq!(item.sources[0].kind, SourceKind::Url);
        assert_eq!(item.sources[0].url, "https://cdn/1080.mp4");
    }

    #[tokio::test]
    async fn test_get_video_without_progressive_files() {
        let api = MockServer::start().await;
        let player = MockServer::start().await;
        mount_video(&api, "999").await;
        Mock::given(method("GET"))
            .and(path("/video/999/config"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"request": {"files": {}}})),
            )
            .mount(&player)
            .await;

        let client = client_for(&api, &player);
        let item = get_video(&client, "999").await.unwrap();
        assert!(item.sources.is_empty());
    }

    #[tokio::test]
    async fn test_get_video_tolerates_player_config_failure() {
        let api = MockServer::start().await;
        let player = MockServer::start().await;
        mount_video(&api, "7").await;
        Mock::given(method("GET"))
            .and(path("/video/7/config"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&player)
            .await;

        let client = client_for(&api, &player);
        let item = get_video(&client, "7").await.unwrap();
        assert_eq!(item.name, "Short film");
        assert!(item.sources.is_empty());
    }

    #[tokio::test]
    async fn test_get_video_not_found() {
        let api = MockServer::start().await;
        let player = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})),
            )
            .mount(&api)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&player)
            .await;

        let client = client_for(&api, &player);
        let err = get_video(&client, "404").await.unwrap_err();
        assert!(matches!(
            err,
            AddonError::Client(VimeoError::Upstream { ref payload, .. }) if *payload == json!({"error": "not found"})
        ));
    }

    #[tokio::test]
    async fn test_get_channel_uses_latest_video() {
        let api = MockServer::start().await;
        let player = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels/staffpicks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uri": "/channels/staffpicks",
                "name": "Staff Picks",
                "created_time": "2008-01-01T00:00:00+00:00"
            })))
            .mount(&api)
            .await;
        Mock::given(method("GET"))
            .and(path("/channels/staffpicks/videos"))
            .and(query_param("per_page", "1"))
            .and(query_param("sort", "added"))
            .and(query_param("direction", "desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 5000,
                "data": [{"uri": "/videos/555", "name": "Newest", "link": "https://vimeo.com/555"}]
            })))
            .expect(1)
            .mount(&api)
            .await;
        Mock::given(method("GET"))
            .and(path("/video/555/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "request": {"files": {"progressive": [{"url": "https://cdn/555.mp4", "width": 1280}]}}
            })))
            .mount(&player)
            .await;

        let client = client_for(&api, &player);
        let item = get_channel(&client, "staffpicks").await.unwrap();

        assert_eq!(item.id, "staffpicks");
        assert_eq!(item.release_date.as_deref(), Some("2008-01-01T00:00:00+00:00"));
        assert_eq!(item.sources.len(), 1);
        assert_eq!(item.sources[0].url, "https://cdn/555.mp4");
        assert_eq!(item.sources[0].name, "Staff Picks");
    }

    #[tokio::test]
    async fn test_get_channel_falls_back_to_external_link() {
        let api = MockServer::start().await;
        let player = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels/quiet"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uri": "/channels/quiet",
                "name": "Quiet"
            })))
            .mount(&api)
            .await;
        Mock::given(method("GET"))
            .and(path("/channels/quiet/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1,
                "data": [{"uri": "/videos/8", "name": "Only", "link": "https://vimeo.com/8"}]
            })))
            .mount(&api)
            .await;
        Mock::given(method("GET"))
            .and(path("/video/8/config"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&player)
            .await;

        let client = client_for(&api, &player);
        let item = get_channel(&client, "quiet").await.unwrap();

        assert_eq!(item.sources.len(), 1);
        assert_eq!(item.sources[0].kind, SourceKind::ExternalUrl);
        assert_eq!(item.sources[0].url, "https://vimeo.com/8");
    }

    #[tokio::test]
    async fn test_get_channel_without_videos() {
        let api = MockServer::start().await;
        let player = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels/empty"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uri": "/channels/empty",
                "name": "Empty"
            })))
            .mount(&api)
            .await;
        Mock::given(method("GET"))
            .and(path("/channels/empty/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0, "data": []})))
            .mount(&api)
            .await;

        let client = client_for(&api, &player);
        let item = get_channel(&client, "empty").await.unwrap();
        assert!(item.sources.is_empty());
    }
}
