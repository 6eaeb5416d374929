//! Per-invocation identifier and jitter source.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Largest sketch seed accepted by whiteboard consumers.
const MAX_SEED: u32 = i32::MAX as u32;

/// Identifier counter and random source for one export.
///
/// Each export owns its context, so concurrent exports never share mutable
/// state. Identifiers combine the context's timestamp with a monotonic
/// counter.
///
/// # Examples
///
/// ```
/// # use archway::export::context::RenderContext;
/// let mut context = RenderContext::seeded(7, 0);
/// assert_eq!(context.next_id("rectangle"), "rectangle_0_1");
/// assert_eq!(context.next_id("text"), "text_0_2");
/// ```
#[derive(Debug, Clone)]
pub struct RenderContext {
    timestamp: u64,
    counter: u64,
    rng: StdRng,
}

impl RenderContext {
    /// Creates a context stamped with the current time and an entropy-seeded
    /// random source.
    pub fn new() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();
        Self {
            timestamp,
            counter: 0,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Creates a reproducible context.
    pub fn seeded(seed: u64, timestamp: u64) -> Self {
        Self {
            timestamp,
            counter: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Returns a fresh identifier of the form `{prefix}_{timestamp}_{n}`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}_{}_{}", self.timestamp, self.counter)
    }

    /// Draws a visual jitter value.
    pub fn jitter(&mut self) -> u32 {
        self.rng.random_range(1..=MAX_SEED)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}
