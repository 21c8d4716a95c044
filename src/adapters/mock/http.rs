//! Mock HTTP client for testing.
//!
//! Responses are registered per method and URL prefix. The longest matching
//! prefix wins. Several responses registered for the same route are served
//! in order, and the last one keeps being served once the queue runs dry.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Method, Request, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    /// Body as UTF-8 text.
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// Body parsed as JSON.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }

    /// Header value, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

impl MockResponse {
    /// A response with a JSON body.
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(body.to_string())))
    }

    /// A response with an empty body.
    pub fn status(status: u16) -> Self {
        MockResponse::Success(Response::new(status, Bytes::new()))
    }
}

type RouteKey = (Option<Method>, String);

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use malajunta::adapters::mock::{MockHttpClient, MockResponse};
/// use malajunta::traits::Method;
///
/// let client = MockHttpClient::new();
/// client.on(Method::Get, "https://x.supabase.co/rest/v1/posts", MockResponse::json(200, json!([])));
///
/// // ... exercise the gateway ...
///
/// assert_eq!(client.requests_to(Method::Get, "/rest/v1/posts").len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Queued responses by (method, URL prefix); `None` matches any method
    responses: Arc<Mutex<HashMap<RouteKey, VecDeque<MockResponse>>>>,
    /// Default response when no route matches
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a response for a method and URL prefix.
    pub fn on(&self, method: Method, url_prefix: &str, response: MockResponse) {
        self.push((Some(method), url_prefix.to_string()), response);
    }

    /// Queue a response for a URL prefix regardless of method.
    pub fn set_response(&self, url_prefix: &str, response: MockResponse) {
        self.push((None, url_prefix.to_string()), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests with the given method whose URL contains `fragment`.
    pub fn requests_to(&self, method: Method, fragment: &str) -> Vec<RecordedRequest> {
        self.get_requests()
            .into_iter()
            .filter(|r| r.method == method && r.url.contains(fragment))
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Clear all configured responses.
    pub fn clear_responses(&self) {
        self.responses.lock().unwrap().clear();
    }

    fn push(&self, key: RouteKey, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .entry(key)
            .or_default()
            .push_back(response);
    }

    fn record_request(&self, request: &Request) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        });
    }

    /// Find the response for a request, consuming it from its queue.
    fn next_response(&self, method: Method, url: &str) -> Option<MockResponse> {
        let mut responses = self.responses.lock().unwrap();

        let best = responses
            .keys()
            .filter(|(m, prefix)| m.map_or(true, |m| m == method) && url.starts_with(prefix))
            // Longest prefix first, method-specific beats any-method on ties
            .max_by_key(|(m, prefix)| (prefix.len(), m.is_some()))
            .cloned();

        if let Some(key) = best {
            if let Some(queue) = responses.get_mut(&key) {
                if queue.len() > 1 {
                    return queue.pop_front();
                }
                return queue.front().cloned();
            }
        }

        self.default_response.lock().unwrap().clone()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: Request) -> Result<Response, HttpError> {
        self.record_request(&request);

        match self.next_response(request.method, &request.url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for {} {}",
                request.method, request.url
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.on(
            Method::Get,
            "https://example.com/test",
            MockResponse::Success(Response::new(200, Bytes::from("Hello"))),
        );

        let response = client.send(Request::new(Method::Get, "https://example.com/test"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Bytes::from("Hello"));

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].url, "https://example.com/test");
    }

    #[tokio::test]
    async fn test_method_is_part_of_the_route() {
        let client = MockHttpClient::new();
        client.on(Method::Get, "https://example.com/likes", MockResponse::status(200));
        client.on(Method::Delete, "https://example.com/likes", MockResponse::status(204));

        let req = Request::new(Method::Delete, "https://example.com/likes?post_id=eq.1");
        assert_eq!(client.send(req).await.unwrap().status, 204);
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let client = MockHttpClient::new();
        client.set_response("https://example.com/", MockResponse::status(404));
        client.set_response("https://example.com/posts", MockResponse::status(200));

        let response = client.send(Request::new(Method::Get, "https://example.com/posts?select=*"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_queued_responses_then_sticky_last() {
        let client = MockHttpClient::new();
        client.set_response("https://example.com/a", MockResponse::status(500));
        client.set_response("https://example.com/a", MockResponse::status(200));

        assert_eq!(client.send(Request::new(Method::Get, "https://example.com/a")).await.unwrap().status, 500);
        assert_eq!(client.send(Request::new(Method::Get, "https://example.com/a")).await.unwrap().status, 200);
        assert_eq!(client.send(Request::new(Method::Get, "https://example.com/a")).await.unwrap().status, 200);
    }

    #[tokio::test]
    async fn test_transport_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/error",
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );

        let result = client.send(Request::new(Method::Get, "https://example.com/error")).await;
        assert!(matches!(result, Err(HttpError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client.send(Request::new(Method::Get, "https://example.com/missing")).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_body_and_headers_recorded() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::status(201));

        let req = Request::new(Method::Post, "https://example.com/comments")
            .header("Authorization", "Bearer token123")
            .json(&serde_json::json!({"content": "hola"}))
            .unwrap();
        client.send(req).await.unwrap();

        let recorded = &client.requests_to(Method::Post, "/comments")[0];
        assert_eq!(recorded.header("authorization"), Some("Bearer token123"));
        assert_eq!(recorded.body_json().unwrap()["content"], "hola");
    }

    #[test]
    fn test_clear_requests_and_responses() {
        let client = MockHttpClient::new();
        client.set_response("https://example.com", MockResponse::status(200));
        client.record_request(&Request::new(Method::Get, "https://example.com"));
        assert_eq!(client.get_requests().len(), 1);

        client.clear_requests();
        client.clear_responses();
        assert!(client.get_requests().is_empty());
        assert!(client.next_response(Method::Get, "https://example.com").is_none());
    }
}
