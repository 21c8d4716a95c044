//! Remote data gateway.
//!
//! Typed operations over the hosted backend: auth, REST tables and views,
//! object storage and RPC. Every operation returns
//! `Result<T, GatewayError>`; nothing is retried or cached.
//!
//! The gateway owns the current session. Requests carry the session's access
//! token when one is held, and the anon key otherwise.

mod auth;
mod characters;
mod comments;
mod likes;
mod posts;
mod profiles;
pub mod query;
mod schema;
pub mod storage;
mod tags;

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{broadcast, RwLock};

use crate::adapters::ReqwestHttpClient;
use crate::config::BackendConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::models::Session;
use crate::traits::{HttpClient, Method, Request, Response, SessionStore};

pub use auth::{AuthChange, AuthEvent, SignUpOutcome};
pub use query::Query;
pub use schema::{SchemaStatus, SCHEMA_SQL};
pub use storage::Bucket;
pub use tags::TAG_COLUMNS;

/// Accept header that makes the REST API return one object instead of an
/// array, failing with `PGRST116` on zero rows.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Capacity of the auth event channel.
const AUTH_EVENT_CAPACITY: usize = 16;

/// Client for the hosted backend.
///
/// # Example
///
/// ```ignore
/// use malajunta::config::BackendConfig;
/// use malajunta::gateway::Gateway;
///
/// let gateway = Gateway::connect(BackendConfig::from_env()?);
/// let posts = gateway.get_all_media_posts().await?;
/// ```
pub struct Gateway {
    config: BackendConfig,
    http: Arc<dyn HttpClient>,
    session: RwLock<Option<Session>>,
    store: Option<Arc<dyn SessionStore>>,
    events: broadcast::Sender<AuthChange>,
}

impl Gateway {
    /// Create a gateway over an arbitrary HTTP client.
    pub fn new(config: BackendConfig, http: Arc<dyn HttpClient>) -> Self {
        let (events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self {
            config,
            http,
            session: RwLock::new(None),
            store: None,
            events,
        }
    }

    /// Create a gateway using reqwest.
    pub fn connect(config: BackendConfig) -> Self {
        Self::new(config, Arc::new(ReqwestHttpClient::new()))
    }

    /// Persist sessions through the given store.
    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Token for the `Authorization` header.
    ///
    /// An expired session is refreshed first; if that fails the stale token
    /// is sent and the backend decides.
    async fn bearer_token(&self) -> String {
        let expired = {
            let guard = self.session.read().await;
            match guard.as_ref() {
                Some(session) => session.is_expired(),
                None => return self.config.anon_key.clone(),
            }
        };
        if expired {
            if let Err(e) = self.refresh_session().await {
                tracing::warn!("Session refresh before request failed: {}", e);
            }
        }
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    /// Attach the API key and bearer token.
    async fn authorize(&self, request: Request) -> Request {
        let token = self.bearer_token().await;
        request
            .header("apikey", self.config.anon_key.clone())
            .header("Authorization", format!("Bearer {}", token))
    }

    /// Send a request; non-2xx statuses become [`GatewayError::Api`].
    async fn execute(&self, request: Request) -> GatewayResult<Response> {
        tracing::debug!("{} {}", request.method, request.url);
        let response = self.http.send(request).await?;
        if !response.is_success() {
            return Err(GatewayError::from_response(response.status, &response.body));
        }
        Ok(response)
    }

    async fn execute_authorized(&self, request: Request) -> GatewayResult<Response> {
        let request = self.authorize(request).await;
        self.execute(request).await
    }

    fn rest_url(&self, query: &Query) -> String {
        query.to_url(&self.config.rest_url())
    }

    /// GET rows as a list.
    async fn select_many<T: DeserializeOwned>(&self, query: Query) -> GatewayResult<Vec<T>> {
        let request = Request::new(Method::Get, self.rest_url(&query));
        let response = self.execute_authorized(request).await?;
        Ok(response.json()?)
    }

    /// GET exactly one row.
    async fn select_single<T: DeserializeOwned>(&self, query: Query) -> GatewayResult<T> {
        let request = Request::new(Method::Get, self.rest_url(&query)).header("Accept", SINGLE_OBJECT);
        let response = self.execute_authorized(request).await?;
        Ok(response.json()?)
    }

    /// POST one row and return it as stored.
    async fn insert_single<B, T>(&self, table: &str, row: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = Request::new(Method::Post, self.rest_url(&Query::table(table)))
            .json(row)?
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT);
        let response = self.execute_authorized(request).await?;
        Ok(response.json()?)
    }

    /// POST several rows and return them as stored.
    async fn insert_many<B, T>(&self, table: &str, rows: &[B]) -> GatewayResult<Vec<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = Request::new(Method::Post, self.rest_url(&Query::table(table)))
            .json(rows)?
            .header("Prefer", "return=representation");
        let response = self.execute_authorized(request).await?;
        Ok(response.json()?)
    }

    /// PATCH the rows matched by `query` and return the single updated row.
    async fn update_single<B, T>(&self, query: Query, changes: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = Request::new(Method::Patch, self.rest_url(&query))
            .json(changes)?
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT);
        let response = self.execute_authorized(request).await?;
        Ok(response.json()?)
    }

    /// DELETE the rows matched by `query`.
    async fn delete_where(&self, query: Query) -> GatewayResult<()> {
        let request = Request::new(Method::Delete, self.rest_url(&query));
        self.execute_authorized(request).await?;
        Ok(())
    }

    /// Call a stored procedure with JSON arguments.
    async fn call_rpc(&self, function: &str, args: serde_json::Value) -> GatewayResult<Bytes> {
        let request = Request::new(Method::Post, self.rest_url(&Query::rpc(function))).json(&args)?;
        let response = self.execute_authorized(request).await?;
        Ok(response.body)
    }

    /// Delete the calling user's auth account (RPC `delete_user`).
    pub async fn delete_user(&self) -> GatewayResult<()> {
        tracing::debug!("Calling delete_user");
        match self.call_rpc("delete_user", serde_json::json!({})).await {
            Ok(_) => {
                tracing::info!("Auth account deleted");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error deleting auth account: {}", e);
                Err(e)
            }
        }
    }
}

/// Serialize `changes` and add an `updated_at` stamp.
fn stamped<B: Serialize + ?Sized>(changes: &B) -> GatewayResult<serde_json::Value> {
    let mut value = serde_json::to_value(changes)?;
    if let Some(map) = value.as_object_mut() {
        map.insert(
            "updated_at".to_string(),
            serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
        );
    }
    Ok(value)
}

/// Log the outcome of a gateway call: `info` on success, `error` on failure.
fn logged<T>(result: GatewayResult<T>, success: &str, failure: &str) -> GatewayResult<T> {
    match &result {
        Ok(_) => tracing::info!("{}", success),
        Err(e) => tracing::error!("{}: {}", failure, e),
    }
    result
}
