//! Proxy configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default freshness bound for cached snapshots.
const DEFAULT_MAX_CACHE_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for the caching proxy, supplied at construction time.
///
/// The cache generation name doubles as the version tag: changing it is the
/// only supported way to force eviction of all previously cached content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Name of the current cache generation (version tag baked in at build).
    pub cache_name: String,
    /// Maximum age before a cached snapshot requires revalidation.
    pub max_cache_age: Duration,
    /// Root-relative paths cached best-effort during install.
    pub essential_resources: Vec<String>,
    /// Path segments marking a request as dynamic/API content.
    pub api_markers: Vec<String>,
    /// Path suffix marking a request as a JSON resource.
    pub json_suffix: String,
    /// URI schemes the proxy declines to intercept.
    pub extension_schemes: Vec<String>,
    /// When true, install-phase population is registered against the event
    /// lifetime and awaited by the driver; when false it is spawned
    /// fire-and-forget.
    pub await_install_population: bool,
    /// Same tradeoff for activation-phase eviction of stale generations.
    /// Off by default: activation does not wait on cleanup, trading
    /// completeness for activation latency.
    pub await_activation_cleanup: bool,
    /// Fallback values for push notification display.
    pub notification: NotificationDefaults,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            cache_name: "careconnect-v1.0.0".to_string(),
            max_cache_age: DEFAULT_MAX_CACHE_AGE,
            essential_resources: vec![
                "/".to_string(),
                "/index.html".to_string(),
                "/manifest.json".to_string(),
                "/favicon.png".to_string(),
                "/icons/Icon-192.png".to_string(),
                "/icons/Icon-512.png".to_string(),
            ],
            api_markers: vec!["/api/".to_string()],
            json_suffix: ".json".to_string(),
            extension_schemes: vec![
                "chrome-extension".to_string(),
                "moz-extension".to_string(),
            ],
            await_install_population: true,
            await_activation_cleanup: false,
            notification: NotificationDefaults::default(),
        }
    }
}

impl ProxyConfig {
    /// Create a configuration with the given cache generation name.
    pub fn new(cache_name: impl Into<String>) -> Self {
        Self {
            cache_name: cache_name.into(),
            ..Default::default()
        }
    }

    /// Set the maximum cache age.
    pub fn with_max_cache_age(mut self, age: Duration) -> Self {
        self.max_cache_age = age;
        self
    }

    /// Replace the essential resource set.
    pub fn with_essential_resources(mut self, paths: Vec<&str>) -> Self {
        self.essential_resources = paths.into_iter().map(String::from).collect();
        self
    }

    /// Add an API route marker segment.
    pub fn with_api_marker(mut self, marker: impl Into<String>) -> Self {
        self.api_markers.push(marker.into());
        self
    }

    /// Add a URI scheme to decline interception for.
    pub fn with_extension_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.extension_schemes.push(scheme.into());
        self
    }

    /// Register install-phase population against the event lifetime instead
    /// of spawning it fire-and-forget.
    pub fn with_await_install_population(mut self, enabled: bool) -> Self {
        self.await_install_population = enabled;
        self
    }

    /// Register activation-phase eviction against the event lifetime instead
    /// of spawning it fire-and-forget.
    pub fn with_await_activation_cleanup(mut self, enabled: bool) -> Self {
        self.await_activation_cleanup = enabled;
        self
    }

    /// Set the notification display defaults.
    pub fn with_notification_defaults(mut self, defaults: NotificationDefaults) -> Self {
        self.notification = defaults;
        self
    }
}

/// Fallback values used when a push payload omits a field, plus the fixed
/// icon references every displayed notification carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationDefaults {
    /// Title when the payload has none.
    pub title: String,
    /// Body when the payload has none.
    pub body: String,
    /// Tag when the payload has none.
    pub tag: String,
    /// Icon path.
    pub icon: String,
    /// Badge icon path.
    pub badge: String,
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            title: "CareConnect".to_string(),
            body: "New notification".to_string(),
            tag: "careconnect-notification".to_string(),
            icon: "/icons/Icon-192.png".to_string(),
            badge: "/icons/Icon-192.png".to_string(),
        }
    }
}
