//! # receipt-store: In-Memory Score Table
//!
//! Holds the points awarded to every accepted receipt, keyed by the
//! identifier handed back to the client.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Score Store Flow                                │
//! │                                                                         │
//! │   ReceiptService                                                        │
//! │        │                                                                │
//! │        │ put(points)              get("7fb1377b-...")                   │
//! │        ▼                                │                               │
//! │  ┌──────────────────────────────────────▼──────────────────────────┐   │
//! │  │                  InMemoryScoreStore                             │   │
//! │  │                                                                 │   │
//! │  │   RwLock<HashMap<String, u64>>                                  │   │
//! │  │   ├── write lock: generate id + insert (one critical section)   │   │
//! │  │   └── read lock:  lookups run concurrently                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │   Entries live until the process exits. No eviction, no persistence.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use receipt_store::{InMemoryScoreStore, ScoreStore};
//!
//! let store = InMemoryScoreStore::new();
//! let id = store.put(28);
//!
//! assert_eq!(store.get(id.as_str()), Some(28));
//! assert_eq!(store.get("no-such-receipt"), None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod id;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use id::ReceiptId;
pub use store::{InMemoryScoreStore, ScoreStore};
