//! Offline-capable caching proxy core for the CareConnect service worker.
//!
//! This crate provides:
//! - `CacheProxy` - The request interceptor owning one versioned cache
//!   generation
//! - `ServiceWorker` - The lifecycle interface (install, activate, fetch,
//!   push, notification click)
//! - `EventScope` - Explicit event-lifetime extension for asynchronous side
//!   effects a handler wants guaranteed
//! - `NetworkClient` / `HostRuntime` / `Notifier` - Seams to the embedding
//!   runtime
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use worker_core::ProxyConfig;
//! use worker_proxy::{CacheProxy, EventScope, ServiceWorker};
//!
//! let proxy = CacheProxy::new(ProxyConfig::default(), store, network, host, notifier);
//!
//! let scope = EventScope::new();
//! proxy.install(&scope).await;
//! scope.settle().await;
//! ```

mod event;
mod host;
mod network;
mod proxy;
mod push;
mod strategy;

pub use event::*;
pub use host::*;
pub use network::*;
pub use proxy::*;
pub use push::*;
pub use strategy::*;
