//! The caching proxy and its lifecycle interface.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use http::StatusCode;
use tracing::{debug, info, warn};
use worker_cache::{CacheError, CacheStore, Snapshot};
use worker_core::{ProxyConfig, Request, Response};

use crate::event::EventScope;
use crate::host::{HostRuntime, Notifier};
use crate::network::{NetworkClient, NetworkError};
use crate::push::PushPayload;
use crate::strategy::{classify, FetchOutcome, Strategy};

/// Errors internal to proxy operations. None of these ever escape to the
/// page: every failure is folded into the response the page receives.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Cache store failure.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Network failure.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// An essential resource path is not a valid URI.
    #[error("invalid essential resource path: {0}")]
    InvalidResource(String),

    /// An essential resource fetch came back non-2xx during install.
    #[error("essential resource {path} returned status {status}")]
    EssentialStatus {
        /// The resource path.
        path: String,
        /// The status it returned.
        status: u16,
    },
}

/// Lifecycle interface of the request interceptor: one method per phase.
///
/// Each method receives the event's [`EventScope`]; asynchronous side effects
/// the handler wants guaranteed are registered there and awaited by the
/// driver. `fetch` resolves exactly one [`FetchOutcome`] per request.
#[async_trait]
pub trait ServiceWorker: Send + Sync {
    /// Install: become active-eligible and populate the essential resources.
    async fn install(&self, scope: &EventScope);

    /// Activate: claim clients and evict superseded cache generations.
    async fn activate(&self, scope: &EventScope);

    /// Intercept one outgoing request.
    async fn fetch(&self, request: Request, scope: &EventScope) -> FetchOutcome;

    /// Handle a delivered push message.
    async fn push(&self, data: Option<&[u8]>, scope: &EventScope);

    /// Handle a click on a displayed notification.
    async fn notification_click(&self, tag: &str, scope: &EventScope);
}

/// The offline-capable caching proxy.
///
/// Owns one versioned cache generation, classifies intercepted requests into
/// network-first or cache-first retrieval, bounds cached entries to the
/// configured maximum age, and evicts superseded generations on activation.
pub struct CacheProxy {
    config: Arc<ProxyConfig>,
    store: Arc<dyn CacheStore>,
    network: Arc<dyn NetworkClient>,
    host: Arc<dyn HostRuntime>,
    notifier: Arc<dyn Notifier>,
}

impl CacheProxy {
    /// Create a proxy over the given collaborators.
    pub fn new(
        config: ProxyConfig,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn NetworkClient>,
        host: Arc<dyn HostRuntime>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            network,
            host,
            notifier,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Run background work either against the event lifetime or
    /// fire-and-forget, per the configured tradeoff for that phase.
    fn run_background<F>(&self, scope: &EventScope, awaited: bool, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if awaited {
            scope.wait_until(task);
        } else {
            tokio::spawn(task);
        }
    }

    /// Register a best-effort cache write for the response. A failed write
    /// is logged and never blocks or fails the response path.
    fn store_snapshot(&self, scope: &EventScope, key: String, response: &Response) {
        let snapshot = Snapshot::capture(response);
        let store = Arc::clone(&self.store);
        let generation = self.config.cache_name.clone();
        scope.wait_until(async move {
            if let Err(err) = store.put(&generation, &key, snapshot).await {
                warn!(key = %key, error = %err, "cache write failed");
            }
        });
    }

    async fn network_first(&self, request: Request, scope: &EventScope) -> FetchOutcome {
        let key = request.cache_key();

        match self.network.fetch(&request).await {
            Ok(response) => {
                if response.is_success() {
                    self.store_snapshot(scope, key, &response);
                }
                FetchOutcome::Respond(response)
            }
            Err(err) => {
                debug!(key = %key, error = %err, "network failed, falling back to cache");
                match self.store.get(&self.config.cache_name, &key).await {
                    Ok(Some(snapshot)) => FetchOutcome::Respond(snapshot.into_response()),
                    Ok(None) => FetchOutcome::Unresolved,
                    Err(err) => {
                        warn!(key = %key, error = %err, "cache lookup failed");
                        FetchOutcome::Unresolved
                    }
                }
            }
        }
    }

    async fn cache_first(&self, request: Request, scope: &EventScope) -> FetchOutcome {
        let key = request.cache_key();

        let cached = match self.store.get(&self.config.cache_name, &key).await {
            Ok(cached) => cached,
            Err(err) => {
                warn!(key = %key, error = %err, "cache lookup failed");
                None
            }
        };

        if let Some(snapshot) = &cached {
            if snapshot.is_fresh(Utc::now(), self.config.max_cache_age) {
                return FetchOutcome::Respond(snapshot.clone().into_response());
            }
        }

        // Absent or stale: revalidate over the network.
        match self.network.fetch(&request).await {
            Ok(response) => {
                if response.is_success() {
                    self.store_snapshot(scope, key, &response);
                }
                FetchOutcome::Respond(response)
            }
            Err(err) => {
                debug!(key = %key, error = %err, "network failed for static asset");
                match cached {
                    // Stale-but-present beats nothing.
                    Some(snapshot) => FetchOutcome::Respond(snapshot.into_response()),
                    None => FetchOutcome::Respond(offline_response()),
                }
            }
        }
    }
}

#[async_trait]
impl ServiceWorker for CacheProxy {
    async fn install(&self, scope: &EventScope) {
        info!(cache = %self.config.cache_name, "service worker installing");

        // Become active-eligible immediately; do not wait for a predecessor.
        self.host.skip_waiting().await;

        let config = Arc::clone(&self.config);
        let store = Arc::clone(&self.store);
        let network = Arc::clone(&self.network);
        let awaited = self.config.await_install_population;
        self.run_background(scope, awaited, async move {
            if let Err(err) = populate_essentials(&config, &*store, &*network).await {
                warn!(error = %err, "essential resource caching failed");
            }
        });
    }

    async fn activate(&self, scope: &EventScope) {
        info!(cache = %self.config.cache_name, "service worker activating");

        // Serve already-open pages from this instance without a reload.
        self.host.claim_clients().await;

        let current = self.config.cache_name.clone();
        let store = Arc::clone(&self.store);
        let awaited = self.config.await_activation_cleanup;
        self.run_background(scope, awaited, async move {
            let names = match store.names().await {
                Ok(names) => names,
                Err(err) => {
                    warn!(error = %err, "could not enumerate cache generations");
                    return;
                }
            };
            for name in names.into_iter().filter(|name| *name != current) {
                match store.delete(&name).await {
                    Ok(true) => debug!(generation = %name, "evicted stale cache generation"),
                    Ok(false) => {}
                    Err(err) => {
                        warn!(generation = %name, error = %err, "generation eviction failed")
                    }
                }
            }
        });
    }

    async fn fetch(&self, request: Request, scope: &EventScope) -> FetchOutcome {
        match classify(&self.config, &request) {
            None => FetchOutcome::PassThrough,
            Some(Strategy::NetworkFirst) => self.network_first(request, scope).await,
            Some(Strategy::CacheFirst) => self.cache_first(request, scope).await,
        }
    }

    async fn push(&self, data: Option<&[u8]>, scope: &EventScope) {
        let Some(data) = data else {
            return;
        };

        let payload = match PushPayload::parse(data) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "push payload parse failed");
                return;
            }
        };

        let notification = payload.into_notification(&self.config.notification);
        let notifier = Arc::clone(&self.notifier);
        scope.wait_until(async move {
            if let Err(err) = notifier.show(notification).await {
                warn!(error = %err, "notification display failed");
            }
        });
    }

    async fn notification_click(&self, tag: &str, scope: &EventScope) {
        self.notifier.close(tag).await;

        let host = Arc::clone(&self.host);
        scope.wait_until(async move {
            host.focus_or_open("/").await;
        });
    }
}

/// Fetch the essential resource set and bulk-insert it into the current
/// generation. Any failure aborts the whole population; the caller logs and
/// swallows it so install never fails.
async fn populate_essentials(
    config: &ProxyConfig,
    store: &dyn CacheStore,
    network: &dyn NetworkClient,
) -> Result<(), ProxyError> {
    store.open(&config.cache_name).await?;

    let fetches = config.essential_resources.iter().map(|path| async move {
        let uri = path
            .parse::<http::Uri>()
            .map_err(|_| ProxyError::InvalidResource(path.clone()))?;
        let request = Request::get(uri);
        let response = network.fetch(&request).await?;
        if !response.is_success() {
            return Err(ProxyError::EssentialStatus {
                path: path.clone(),
                status: response.status().as_u16(),
            });
        }
        Ok((request.cache_key(), Snapshot::capture(&response)))
    });

    let entries = futures::future::try_join_all(fetches).await?;
    store.put_many(&config.cache_name, entries).await?;

    debug!(
        cache = %config.cache_name,
        count = config.essential_resources.len(),
        "essential resources cached"
    );
    Ok(())
}

/// The synthesized response for a cache-first double miss.
fn offline_response() -> Response {
    Response::new(StatusCode::SERVICE_UNAVAILABLE).with_body(b"Offline".to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_response_shape() {
        let response = offline_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.body(), b"Offline");
    }

    #[test]
    fn test_proxy_error_display() {
        let err = ProxyError::EssentialStatus {
            path: "/favicon.png".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "essential resource /favicon.png returned status 404"
        );
    }
}
