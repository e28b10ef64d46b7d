//! # Score Store
//!
//! The [`ScoreStore`] trait and its in-memory implementation.
//!
//! ## Concurrency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Lock Discipline                                    │
//! │                                                                         │
//! │   put(points)                         get(id)                           │
//! │   ──────────                          ───────                           │
//! │   write lock ─┐                       read lock ─┐                      │
//! │               │ loop:                            │ map.get(id)          │
//! │               │   id = generate()                │                      │
//! │               │   taken? → retry                 └─ unlock              │
//! │               │ insert(id, points)                                      │
//! │               └─ unlock                                                 │
//! │                                                                         │
//! │   A reader sees either no entry or the complete entry. Two writers     │
//! │   can never hand out the same id.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::id::ReceiptId;

// =============================================================================
// Store Trait
// =============================================================================

/// Storage for receipt scores.
///
/// Implementations must be safe to share between request handlers.
pub trait ScoreStore: Send + Sync {
    /// Stores `points` under a fresh identifier and returns it.
    ///
    /// The identifier never collides with one already stored.
    fn put(&self, points: u64) -> ReceiptId;

    /// Points stored under `id`, if any.
    fn get(&self, id: &str) -> Option<u64>;
}

// =============================================================================
// In-Memory Store
// =============================================================================

type IdGenerator = Box<dyn Fn() -> ReceiptId + Send + Sync>;

/// Process-local score table.
///
/// ## Example
/// ```rust
/// use receipt_store::{InMemoryScoreStore, ScoreStore};
///
/// let store = InMemoryScoreStore::new();
/// let first = store.put(28);
/// let second = store.put(109);
///
/// assert_ne!(first, second);
/// assert_eq!(store.len(), 2);
/// ```
pub struct InMemoryScoreStore {
    scores: RwLock<HashMap<String, u64>>,
    generate_id: IdGenerator,
}

impl InMemoryScoreStore {
    /// Creates an empty store that hands out UUID v4 identifiers.
    pub fn new() -> Self {
        Self::with_id_generator(ReceiptId::generate)
    }

    /// Creates an empty store with a custom identifier source.
    ///
    /// Collisions with stored identifiers are retried, so the generator
    /// only needs to eventually produce an unused value.
    pub fn with_id_generator<F>(generate_id: F) -> Self
    where
        F: Fn() -> ReceiptId + Send + Sync + 'static,
    {
        InMemoryScoreStore {
            scores: RwLock::new(HashMap::new()),
            generate_id: Box::new(generate_id),
        }
    }

    /// Number of stored scores.
    pub fn len(&self) -> usize {
        self.scores.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.read().is_empty()
    }
}

impl Default for InMemoryScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryScoreStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryScoreStore")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl ScoreStore for InMemoryScoreStore {
    fn put(&self, points: u64) -> ReceiptId {
        let mut scores = self.scores.write();

        let id = loop {
            let candidate = (self.generate_id)();
            if !scores.contains_key(candidate.as_str()) {
                break candidate;
            }
            warn!(id = %candidate, "Receipt ID collision, regenerating");
        };

        scores.insert(id.as_str().to_string(), points);
        debug!(id = %id, points, "Stored receipt score");
        id
    }

    fn get(&self, id: &str) -> Option<u64> {
        self.scores.read().get(id).copied()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
