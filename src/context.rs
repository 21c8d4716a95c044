//! Shared handles passed to every view.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::adapters::FileSessionStore;
use crate::config::AppConfig;
use crate::gateway::Gateway;
use crate::identity::{IdentityContext, IdentityNotice};
use crate::traits::HttpClient;

/// Gateway, identity holder and configuration for one running client.
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub gateway: Arc<Gateway>,
    pub identity: Arc<IdentityContext>,
}

impl AppContext {
    /// Wire the production stack: reqwest transport and, when a path is
    /// configured, a file-backed session.
    pub fn connect(config: AppConfig, notifier: mpsc::UnboundedSender<IdentityNotice>) -> Self {
        let mut gateway = Gateway::connect(config.backend.clone());
        if let Some(path) = &config.session_path {
            gateway = gateway.with_session_store(Arc::new(FileSessionStore::at(path)));
        }
        Self::assemble(config, gateway, notifier)
    }

    /// Wire the stack over any HTTP client (tests use the recording mock).
    pub fn with_http(
        config: AppConfig,
        http: Arc<dyn HttpClient>,
        notifier: mpsc::UnboundedSender<IdentityNotice>,
    ) -> Self {
        let gateway = Gateway::new(config.backend.clone(), http);
        Self::assemble(config, gateway, notifier)
    }

    fn assemble(
        config: AppConfig,
        gateway: Gateway,
        notifier: mpsc::UnboundedSender<IdentityNotice>,
    ) -> Self {
        let gateway = Arc::new(gateway);
        let identity = Arc::new(IdentityContext::new(Arc::clone(&gateway)).with_notifier(notifier));
        Self {
            config,
            gateway,
            identity,
        }
    }
}
