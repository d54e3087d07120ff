//! # repo-harness
//!
//! Test-support HTTP endpoints for exercising a content-repository server
//! from an integration-test harness.
//!
//! ## Overview
//!
//! The crate serves three independent, stateless-per-request endpoints:
//!
//! - an **access toggle** that flips the authenticator's anonymous-access
//!   flag through the configuration store and blocks (bounded) until the
//!   matching change event confirms the update was observed,
//! - a **namespace dump** that prints the session user id and every
//!   prefix→URI namespace mapping as plain text,
//! - a **selector-routed no-op probe**, reachable only under specific URL
//!   selectors and extension, for exercising the selector-matching layer.
//!
//! The production collaborators (configuration-management service, change
//! notification feed, repository session) are replaced by in-memory
//! emulations so the endpoints run hermetically.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use repo_harness::config::ConfigStore;
//! use repo_harness::endpoints::{self, AccessToggle, AppState};
//! use repo_harness::notify::EventBus;
//! use repo_harness::routing::{SelectorBinding, SelectorRegistry};
//! use repo_harness::session::InMemorySession;
//!
//! # async fn example() {
//! let bus = EventBus::new();
//! let store = ConfigStore::with_notifier(bus.clone());
//! let toggle = AccessToggle::new(store.clone(), &bus).await;
//!
//! let mut selectors = SelectorRegistry::new();
//! selectors.register(SelectorBinding::new("selector-probe", &["print", "a4"], "txt"));
//!
//! let app = endpoints::router(AppState {
//!     toggle: Arc::new(toggle),
//!     session: Arc::new(InMemorySession::new("admin")),
//!     selectors: Arc::new(selectors),
//! });
//! # let _ = app;
//! # }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod config;
pub mod endpoints;
pub mod error;
pub mod notify;
pub mod routing;
pub mod session;
pub mod settings;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::config::{ConfigRecord, ConfigStore, PropertyValue};
    pub use crate::endpoints::{AccessToggle, AppState};
    pub use crate::error::{HarnessError, Result};
    pub use crate::notify::{ChangeEvent, EventBus, ModificationCounter};
    pub use crate::routing::{RequestPathInfo, SelectorBinding, SelectorRegistry};
    pub use crate::session::{InMemorySession, RepositorySession};
}
