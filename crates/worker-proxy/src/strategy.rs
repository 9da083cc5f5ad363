//! Request classification.

use worker_core::{ProxyConfig, Request, Response};

/// Retrieval strategy for an intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Network first, cache as offline fallback. Dynamic/API content must be
    /// fresh when reachable.
    NetworkFirst,
    /// Cache first, revalidate only when stale or absent. Static assets
    /// change rarely; prefer the instant local response.
    CacheFirst,
}

/// What the proxy tells the interception boundary for one request.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The proxy declines to intervene; the request reaches the origin
    /// unmodified.
    PassThrough,
    /// The proxy resolves the request with this response.
    Respond(Response),
    /// Network and cache both came up empty on the network-first path. No
    /// offline fallback body exists for API routes, so the caller's request
    /// is left unresolved rather than answered with a synthesized status.
    Unresolved,
}

impl FetchOutcome {
    /// The response, if the proxy resolved one.
    pub fn into_response(self) -> Option<Response> {
        match self {
            Self::Respond(response) => Some(response),
            Self::PassThrough | Self::Unresolved => None,
        }
    }
}

/// Classify a request, or decline to intercept it.
///
/// Only `GET` is intercepted; other methods and browser-extension schemes
/// pass through untouched. Remaining requests are network-first when the
/// path contains an API marker segment or ends with the JSON suffix,
/// cache-first otherwise.
pub fn classify(config: &ProxyConfig, request: &Request) -> Option<Strategy> {
    if request.method() != http::Method::GET {
        return None;
    }
    if let Some(scheme) = request.scheme() {
        if config.extension_schemes.iter().any(|s| s == scheme) {
            return None;
        }
    }

    let path = request.path();
    let dynamic = config.api_markers.iter().any(|m| path.contains(m.as_str()))
        || path.ends_with(&config.json_suffix);

    if dynamic {
        Some(Strategy::NetworkFirst)
    } else {
        Some(Strategy::CacheFirst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use worker_core::Request;

    fn get(uri: &str) -> Request {
        Request::get(uri.parse().unwrap())
    }

    #[test]
    fn test_non_get_passes_through() {
        let config = ProxyConfig::default();
        let post = Request::new(Method::POST, "https://app.example/api/visits".parse().unwrap());
        let put = Request::new(Method::PUT, "https://app.example/profile".parse().unwrap());

        assert_eq!(classify(&config, &post), None);
        assert_eq!(classify(&config, &put), None);
    }

    #[test]
    fn test_extension_scheme_passes_through() {
        let config = ProxyConfig::default();

        assert_eq!(
            classify(&config, &get("chrome-extension://abcdef/popup.html")),
            None
        );
        assert_eq!(
            classify(&config, &get("moz-extension://abcdef/popup.html")),
            None
        );
    }

    #[test]
    fn test_api_marker_is_network_first() {
        let config = ProxyConfig::default();

        assert_eq!(
            classify(&config, &get("https://app.example/api/appointments")),
            Some(Strategy::NetworkFirst)
        );
    }

    #[test]
    fn test_json_suffix_is_network_first() {
        let config = ProxyConfig::default();

        assert_eq!(
            classify(&config, &get("https://app.example/manifest.json")),
            Some(Strategy::NetworkFirst)
        );
        // Suffix match, not substring: a path merely containing ".json"
        // stays cache-first.
        assert_eq!(
            classify(&config, &get("https://app.example/docs/.json-format.html")),
            Some(Strategy::CacheFirst)
        );
    }

    #[test]
    fn test_static_asset_is_cache_first() {
        let config = ProxyConfig::default();

        assert_eq!(
            classify(&config, &get("https://app.example/icons/Icon-192.png")),
            Some(Strategy::CacheFirst)
        );
        assert_eq!(
            classify(&config, &get("https://app.example/")),
            Some(Strategy::CacheFirst)
        );
    }

    #[test]
    fn test_custom_api_marker() {
        let config = ProxyConfig::default().with_api_marker("/graphql/");

        assert_eq!(
            classify(&config, &get("https://app.example/graphql/query")),
            Some(Strategy::NetworkFirst)
        );
    }
}
