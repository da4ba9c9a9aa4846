//! Farcaster mini-app descriptors served next to the game page.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
};
use serde::Serialize;

use common::mint::GAME_NAME;

pub const PREVIEW_IMAGE: &str = "snake-preview.jpg";
pub const SPLASH_IMAGE: &str = "snake-splash.jpg";
pub const SPLASH_BACKGROUND_COLOR: &str = "#000000";

#[derive(Clone)]
pub struct MiniAppState {
    pub base_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniAppConfig {
    pub version: String,
    pub image_url: String,
    pub button: MiniAppButton,
}

#[derive(Debug, Serialize)]
pub struct MiniAppButton {
    pub title: String,
    pub action: MiniAppAction,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniAppAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub url: String,
    pub name: String,
    pub splash_image_url: String,
    pub splash_background_color: String,
}

impl MiniAppConfig {
    pub fn for_base_url(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            version: "1".to_string(),
            image_url: format!("{}/{}", base_url, PREVIEW_IMAGE),
            button: MiniAppButton {
                title: "Play Snake".to_string(),
                action: MiniAppAction {
                    action_type: "launch_frame".to_string(),
                    url: base_url.to_string(),
                    name: GAME_NAME.to_string(),
                    splash_image_url: format!("{}/{}", base_url, SPLASH_IMAGE),
                    splash_background_color: SPLASH_BACKGROUND_COLOR.to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarcasterManifest {
    pub account_association: AccountAssociation,
}

#[derive(Debug, Serialize)]
pub struct AccountAssociation {
    pub header: String,
    pub payload: String,
    pub signature: String,
}

impl Default for FarcasterManifest {
    fn default() -> Self {
        Self {
            account_association: AccountAssociation {
                header: "eyJmaWQiOjEsInR5cGUiOiJjdXN0b2R5Iiwia2V5IjoiMHg0ODY5NGE2NzJkNjc2YzY5NjI2NTc3Mjc0NzkyZTY1NzQ2OCJ9".to_string(),
                payload: "eyJkb21haW4iOiJ5b3VyLWRvbWFpbi5jb20ifQ".to_string(),
                signature: "MHg...".to_string(),
            },
        }
    }
}

/// Configured base URL, or one rebuilt from the request's Host header.
fn resolve_base_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base_url) = configured {
        return base_url.to_string();
    }
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    format!("{}://{}", scheme, host)
}

pub async fn miniapp_config(
    State(state): State<MiniAppState>,
    headers: HeaderMap,
) -> Json<MiniAppConfig> {
    let base_url = resolve_base_url(state.base_url.as_deref(), &headers);
    Json(MiniAppConfig::for_base_url(&base_url))
}

pub async fn farcaster_manifest() -> Json<FarcasterManifest> {
    Json(FarcasterManifest::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_configured_base_url_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.org"));
        assert_eq!(resolve_base_url(Some("https://snake.app"), &headers), "https://snake.app");
    }

    #[test]
    fn test_base_url_from_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.org:3000"));
        assert_eq!(resolve_base_url(None, &headers), "http://example.org:3000");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(resolve_base_url(None, &headers), "https://example.org:3000");
    }

    #[test]
    fn test_config_urls() {
        let config = MiniAppConfig::for_base_url("https://snake.app/");
        assert_eq!(config.image_url, "https://snake.app/snake-preview.jpg");
        assert_eq!(config.button.action.url, "https://snake.app");
        assert_eq!(config.button.action.splash_image_url, "https://snake.app/snake-splash.jpg");

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["button"]["action"]["type"], "launch_frame");
        assert_eq!(json["button"]["action"]["splashBackgroundColor"], "#000000");
    }
}
