//! Request and response vocabulary.

use http::header::HeaderMap;
use http::{HeaderName, HeaderValue, Method, StatusCode, Uri};

/// An intercepted outbound request.
///
/// Identity for caching purposes is the method plus the full URL; two
/// requests with the same method and URL address the same cache entry.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
}

impl Request {
    /// Create a request with the given method and URI.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
        }
    }

    /// Create a GET request for the given URI.
    pub fn get(uri: Uri) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Add a request header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The full request URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// The URI path component.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// The URI scheme, if the URI carries one.
    pub fn scheme(&self) -> Option<&str> {
        self.uri.scheme_str()
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The cache key identifying this request in a cache generation.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.uri)
    }
}

/// A response, either live from the network or rebuilt from a snapshot.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    /// Create an empty response with the given status.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Set the response body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Add a response header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// The response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Whether the status is in the 2xx range.
    ///
    /// Only successful responses are ever written to a cache generation.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
