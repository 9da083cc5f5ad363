//! Core abstractions for the CareConnect offline caching proxy.
//!
//! This crate provides:
//! - `Request` / `Response` - The request/response vocabulary the proxy
//!   intercepts and serves
//! - `ProxyConfig` - Construction-time configuration (cache generation tag,
//!   essential resources, freshness bound, strategy markers)
//! - `NotificationDefaults` - Fallback values for push notification display

mod config;
mod request;

pub use config::*;
pub use request::*;
