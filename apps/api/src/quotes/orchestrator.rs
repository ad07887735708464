//! Quote Orchestrator — runs one generation cycle end to end.
//!
//! Flow: request_quote → parse_generation → resolve_image.
//!
//! Each stage absorbs its own failures, so a cycle always ends with displayable
//! content. At most one cycle runs at a time; a trigger that arrives while a
//! cycle is in flight is ignored rather than queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::models::quote::Generation;
use crate::quotes::display::DisplayState;
use crate::quotes::image::{resolve_image, ImageSearch};
use crate::quotes::parser::parse_generation;
use crate::quotes::requester::QuoteSource;

pub struct QuoteOrchestrator {
    quotes: Arc<dyn QuoteSource>,
    images: Arc<dyn ImageSearch>,
    display: Arc<RwLock<DisplayState>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when dropped, on every exit path.
struct InFlightGuard(Arc<QuoteOrchestrator>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.in_flight.store(false, Ordering::Release);
    }
}

impl QuoteOrchestrator {
    pub fn new(quotes: Arc<dyn QuoteSource>, images: Arc<dyn ImageSearch>) -> Self {
        Self {
            quotes,
            images,
            display: Arc::new(RwLock::new(DisplayState::default())),
            in_flight: AtomicBool::new(false),
        }
    }

    /// The display state this orchestrator publishes completed cycles into.
    pub fn display(&self) -> Arc<RwLock<DisplayState>> {
        self.display.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Runs one generation cycle and publishes it to the display state.
    ///
    /// Returns `None` without doing anything if another cycle is in flight.
    ///
    /// The cycle runs on its own task: dropping the returned future (client
    /// gone, request timeout) does not cancel it. The flag clears only after
    /// the display is updated, so cycles publish in the order they ran.
    pub async fn generate(self: &Arc<Self>) -> Option<Generation> {
        let guard = self.try_begin()?;

        let cycle = tokio::spawn(async move {
            let generation = guard.0.run_cycle().await;
            drop(guard);
            generation
        });

        match cycle.await {
            Ok(generation) => Some(generation),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                error!("Generation task was cancelled: {e}");
                None
            }
        }
    }

    async fn run_cycle(&self) -> Generation {
        info!("Generating quote");

        // A failed request parses like an empty response: all defaults.
        let raw = match self.quotes.request_quote().await {
            Ok(text) => text,
            Err(e) => {
                warn!("Quote request failed, using default quote: {e}");
                String::new()
            }
        };

        let quote = parse_generation(&raw);
        let image = resolve_image(self.images.as_ref(), &quote.search_keyword).await;

        let generation = Generation::new(quote, image);
        info!(
            "Generation {} complete (keyword: {})",
            generation.id, generation.quote.search_keyword
        );

        self.display.write().await.apply(generation.clone());

        generation
    }

    fn try_begin(self: &Arc<Self>) -> Option<InFlightGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(Arc::clone(self)))
    }
}
