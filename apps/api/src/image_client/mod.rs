/// Image Client — talks to the Unsplash random-photo endpoint.
///
/// Like `llm_client`, this is the only module that knows the wire format of
/// the image-search service. It reports failures as `ImageSearchError`;
/// turning those into a usable picture is the resolver's job.
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const UNSPLASH_RANDOM_PHOTO_URL: &str = "https://api.unsplash.com/photos/random";

/// Landscape card size used by X and Instagram link previews.
pub const TARGET_WIDTH: u32 = 1200;
pub const TARGET_HEIGHT: u32 = 630;
const ORIENTATION: &str = "landscape";

#[derive(Debug, Error)]
pub enum ImageSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The subset of an Unsplash photo object the resolver cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoResponse {
    #[serde(default)]
    pub urls: Option<PhotoUrls>,
}

/// Rendition URLs, largest first. Unsplash also sends raw/small/thumb.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoUrls {
    pub full: Option<String>,
    pub regular: Option<String>,
}

#[derive(Clone)]
pub struct UnsplashClient {
    client: Client,
    access_key: String,
    search_url: String,
}

impl UnsplashClient {
    pub fn new(
        access_key: String,
        search_url: String,
        timeout: Duration,
    ) -> Result<Self, ImageSearchError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            access_key,
            search_url,
        })
    }

    /// Fetches one random landscape photo matching `query`.
    pub async fn random_photo(&self, query: &str) -> Result<PhotoResponse, ImageSearchError> {
        debug!(query, "Unsplash random photo request");

        let response = self
            .client
            .get(&self.search_url)
            .query(&search_params(query, &self.access_key))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ImageSearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Query-string pairs for a random-photo request. reqwest url-encodes them.
fn search_params(query: &str, access_key: &str) -> Vec<(&'static str, String)> {
    vec![
        ("query", query.to_string()),
        ("orientation", ORIENTATION.to_string()),
        ("w", TARGET_WIDTH.to_string()),
        ("h", TARGET_HEIGHT.to_string()),
        ("client_id", access_key.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    use super::*;
    use crate::testing::serve;

    async fn client_for(router: Router) -> UnsplashClient {
        let addr = serve(router).await;
        UnsplashClient::new(
            "access-key".to_string(),
            format!("http://{addr}/photos/random"),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let router = Router::new().route(
            "/photos/random",
            get(|| async { (StatusCode::FORBIDDEN, "Rate Limit Exceeded") }),
        );
        let err = client_for(router).await.random_photo("ocean").await.unwrap_err();
        assert!(
            matches!(&err, ImageSearchError::Api { status: 403, message } if message == "Rate Limit Exceeded"),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let router = Router::new().route("/photos/random", get(|| async { "<html>oops</html>" }));
        let err = client_for(router).await.random_photo("ocean").await.unwrap_err();
        assert!(matches!(err, ImageSearchError::Parse(_)), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_success_body_is_decoded() {
        let router = Router::new().route(
            "/photos/random",
            get(|| async { Json(json!({"urls": {"regular": "https://x/r.jpg"}})) }),
        );
        let photo = client_for(router).await.random_photo("ocean").await.unwrap();
        assert_eq!(photo.urls.unwrap().regular.as_deref(), Some("https://x/r.jpg"));
    }

    #[test]
    fn test_search_params_fix_orientation_and_size() {
        let params = search_params("nature ocean", "key-123");
        assert_eq!(
            params,
            vec![
                ("query", "nature ocean".to_string()),
                ("orientation", "landscape".to_string()),
                ("w", "1200".to_string()),
                ("h", "630".to_string()),
                ("client_id", "key-123".to_string()),
            ]
        );
    }

    #[test]
    fn test_photo_response_ignores_extra_fields() {
        let json = r#"{
            "id": "abc",
            "urls": {
                "raw": "https://x/raw.jpg",
                "full": "https://x/full.jpg",
                "regular": "https://x/regular.jpg",
                "small": "https://x/small.jpg"
            },
            "user": {"name": "someone"}
        }"#;
        let photo: PhotoResponse = serde_json::from_str(json).unwrap();
        let urls = photo.urls.unwrap();
        assert_eq!(urls.regular.as_deref(), Some("https://x/regular.jpg"));
        assert_eq!(urls.full.as_deref(), Some("https://x/full.jpg"));
    }

    #[test]
    fn test_photo_response_without_urls() {
        let photo: PhotoResponse = serde_json::from_str(r#"{"errors": ["nope"]}"#).unwrap();
        assert!(photo.urls.is_none());
    }

    #[test]
    fn test_photo_response_rejects_non_object_body() {
        assert!(serde_json::from_str::<PhotoResponse>(r#""Rate Limit Exceeded""#).is_err());
    }
}
