//! # Receipt API
//!
//! HTTP server for the receipt points service.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Receipt API Server                               │
//! │                                                                         │
//! │  Client ───► axum (8080) ───► handlers ───► ReceiptService             │
//! │                                                  │                      │
//! │                                   ┌──────────────┴──────────────┐       │
//! │                                   ▼                             ▼       │
//! │                             receipt-core                 receipt-store  │
//! │                          (validate + score)             (id → points)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - `ApiConfig` from env vars and an optional TOML file
//! - [`service`] - Submit/lookup orchestration
//! - [`handlers`] - axum handlers
//! - [`router`] - Routes + transport layers
//! - [`server`] - Listener and graceful shutdown
//! - [`error`] - `ApiError` and its HTTP mapping
//! - [`telemetry`] - tracing subscriber setup

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod service;
pub mod telemetry;

pub use config::{ApiConfig, ConfigError, LogFormat};
pub use error::{ApiError, ErrorCode};
pub use router::build_router;
pub use server::{shutdown_signal, ApiServer, ServerError};
pub use service::{ReceiptService, ServiceError};
