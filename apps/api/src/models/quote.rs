use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three fields pulled out of a generation response.
/// Every field is always populated, either extracted or defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub english_quote: String,
    pub french_quote: String,
    pub search_keyword: String,
}

/// A photo URL to pair with the quote. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub url: String,
}

/// One completed generation cycle.
#[derive(Debug, Clone, Serialize)]
pub struct Generation {
    pub id: Uuid,
    pub quote: GenerationResult,
    pub image: ImageResult,
    pub generated_at: DateTime<Utc>,
}

impl Generation {
    pub fn new(quote: GenerationResult, image: ImageResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            quote,
            image,
            generated_at: Utc::now(),
        }
    }
}
