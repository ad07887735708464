//! Display state — what the single screen currently shows.
//!
//! Only a completed generation cycle replaces the content. The copy and like
//! flags are presentational and never feed back into generation.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::models::quote::Generation;

/// How long a "Copied!" acknowledgement stays visible.
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    French,
}

#[derive(Debug, Default)]
pub struct DisplayState {
    generation: Option<Generation>,
    copied_at: Option<Instant>,
    liked: bool,
}

/// Serializable snapshot of the display state.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayView {
    pub generation: Option<Generation>,
    pub copied: bool,
    pub liked: bool,
    /// A cycle is running; the Generate action is inert until it clears.
    pub generating: bool,
}

impl DisplayView {
    /// The view right after `generation` is published: both flags reset.
    pub fn published(generation: Generation, generating: bool) -> Self {
        Self {
            generation: Some(generation),
            copied: false,
            liked: false,
            generating,
        }
    }
}

impl DisplayState {
    /// Replaces the shown content with a fresh generation. Resets both flags.
    pub fn apply(&mut self, generation: Generation) {
        self.generation = Some(generation);
        self.copied_at = None;
        self.liked = false;
    }

    pub fn generation(&self) -> Option<&Generation> {
        self.generation.as_ref()
    }

    /// Returns the quote text in `language` and starts the copy acknowledgement.
    pub fn copy_text(&mut self, language: Language, now: Instant) -> Option<String> {
        let quote = &self.generation.as_ref()?.quote;
        let text = match language {
            Language::English => quote.english_quote.clone(),
            Language::French => quote.french_quote.clone(),
        };
        self.copied_at = Some(now);
        Some(text)
    }

    /// Flips the like flag. Returns the new value, or `None` before the first generation.
    pub fn toggle_like(&mut self) -> Option<bool> {
        self.generation.as_ref()?;
        self.liked = !self.liked;
        Some(self.liked)
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .map(|at| now.saturating_duration_since(at) < COPY_ACK_DURATION)
            .unwrap_or(false)
    }

    pub fn view(&self, now: Instant, generating: bool) -> DisplayView {
        DisplayView {
            generation: self.generation.clone(),
            copied: self.is_copied(now),
            liked: self.liked,
            generating,
        }
    }
}
