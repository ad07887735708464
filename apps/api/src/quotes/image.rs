//! Image Resolver — finds a photo for the quote's keyword, or the default photo.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::image_client::{ImageSearchError, PhotoResponse, UnsplashClient};
use crate::models::quote::ImageResult;

/// Shown whenever the image search yields nothing usable.
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1511593358241-7eea1f3c84e5?w=1200&h=630&fit=crop";

/// Broadens single-word keywords so the random-photo search reliably matches.
const QUERY_PREFIX: &str = "nature inspirational animals";

/// Image search backend. Implemented by the Unsplash client and by test fakes.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    async fn random_photo(&self, query: &str) -> Result<PhotoResponse, ImageSearchError>;
}

#[async_trait]
impl ImageSearch for UnsplashClient {
    async fn random_photo(&self, query: &str) -> Result<PhotoResponse, ImageSearchError> {
        UnsplashClient::random_photo(self, query).await
    }
}

impl ImageResult {
    pub fn fallback() -> Self {
        Self {
            url: DEFAULT_IMAGE_URL.to_string(),
        }
    }
}

/// Builds the search query sent to the image service.
pub fn build_search_query(keyword: &str) -> String {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        QUERY_PREFIX.to_string()
    } else {
        format!("{QUERY_PREFIX} {keyword}")
    }
}

/// Picks `regular`, then `full`, then the default URL. Empty strings count as missing.
pub fn select_image_url(photo: &PhotoResponse) -> String {
    photo
        .urls
        .as_ref()
        .and_then(|urls| {
            [urls.regular.as_deref(), urls.full.as_deref()]
                .into_iter()
                .flatten()
                .map(str::trim)
                .find(|url| !url.is_empty())
        })
        .unwrap_or(DEFAULT_IMAGE_URL)
        .to_string()
}

/// Resolves an image for `keyword`. Never fails; errors are logged and absorbed.
pub async fn resolve_image(search: &dyn ImageSearch, keyword: &str) -> ImageResult {
    let query = build_search_query(keyword);

    match search.random_photo(&query).await {
        Ok(photo) => {
            let url = select_image_url(&photo);
            if url == DEFAULT_IMAGE_URL {
                warn!(%query, "Image search response had no usable URL, using default image");
            } else {
                debug!(%query, %url, "Image resolved");
            }
            ImageResult { url }
        }
        Err(e) => {
            warn!(%query, "Image search failed, using default image: {e}");
            ImageResult::fallback()
        }
    }
}
